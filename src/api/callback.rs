use std::collections::HashMap;

use axum::{
    Extension,
    extract::Query,
    response::{IntoResponse, Redirect, Response},
};

use crate::{management::SharedSession, spotify::auth::AuthClient, warning};

/// OAuth callback: the home page of the flow.
///
/// With `code` and `state` present, validates the state and exchanges the
/// code for a token, then immediately fetches the user profile; both land
/// in the shared session and the session page is rendered. Any failure on
/// the way (state mismatch, exchange error, profile error) sends the
/// browser back to the login page. Without query parameters there is no
/// redirect in progress and the login page is the only sensible target.
///
/// The profile fetch only starts after the token exchange has succeeded;
/// the two requests are sequential, never concurrent. A failed profile
/// fetch still keeps the token in the session (the exchange did succeed),
/// but the attempt is not reported as a successful login.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(shared_state): Extension<SharedSession>,
) -> Response {
    let (Some(code), Some(state)) = (params.get("code"), params.get("state")) else {
        return Redirect::to("/login").into_response();
    };

    let client = AuthClient::from_env();

    let token = match client.get_token(code, state).await {
        Ok(token) => token,
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            return Redirect::to("/login").into_response();
        }
    };

    let mut session = shared_state.lock().await;
    session.set_token(token.clone());

    match client.get_user_profile(&token.access_token).await {
        Ok(profile) => {
            session.set_profile(profile);
            super::session_page(&session).into_response()
        }
        Err(e) => {
            warning!("Profile fetch failed: {}", e);
            Redirect::to("/login").into_response()
        }
    }
}
