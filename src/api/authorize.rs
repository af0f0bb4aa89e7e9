use axum::response::{IntoResponse, Redirect, Response};

use crate::{spotify::auth::AuthClient, warning};

/// Starts an authorization attempt: persists a fresh auth state and sends
/// the browser to the Spotify authorization page. A previously pending
/// state is overwritten.
pub async fn authorize() -> Response {
    let client = AuthClient::from_env();
    match client.authorize_url().await {
        Ok(url) => Redirect::temporary(&url).into_response(),
        Err(e) => {
            warning!("Failed to start authorization: {}", e);
            Redirect::to("/login").into_response()
        }
    }
}
