use axum::{
    Extension,
    response::{IntoResponse, Redirect, Response},
};

use crate::{management::SharedSession, spotify::auth::AuthClient, warning};

/// Manual refresh action on the session page.
///
/// Exchanges the session's refresh token for a fresh access token and
/// re-renders the session page. The prior refresh token is preserved when
/// the response omits one. Without an authenticated session the browser is
/// sent to the login page.
pub async fn refresh(Extension(shared_state): Extension<SharedSession>) -> Response {
    let refresh_token = shared_state.lock().await.refresh_token();
    let Some(refresh_token) = refresh_token else {
        return Redirect::to("/login").into_response();
    };

    let client = AuthClient::from_env();
    match client.get_token_by_refresh(&refresh_token).await {
        Ok(token) => {
            let mut session = shared_state.lock().await;
            session.apply_refresh(token);
            super::session_page(&session).into_response()
        }
        Err(e) => {
            warning!("Token refresh failed: {}", e);
            Redirect::to("/login").into_response()
        }
    }
}
