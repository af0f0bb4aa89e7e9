//! # API Module
//!
//! HTTP endpoints served by the local login server. The routes mirror the
//! pages of a minimal browser client for the authorization-code flow:
//!
//! - [`login`] - entry page with the "Log in with Spotify" action
//! - [`authorize`] - generates the auth state and redirects to Spotify
//! - [`callback`] - consumes the redirect, exchanges the code, fetches the
//!   profile, and renders the session page
//! - [`refresh`] - manual refresh action on the current session token
//! - [`health`] - status endpoint
//!
//! All handlers that touch the session receive the shared in-memory
//! [`Session`](crate::management::Session) through an axum `Extension`.
//! Failed exchanges (state mismatch included) send the browser back to the
//! login page; nothing is retried.

mod authorize;
mod callback;
mod health;
mod login;
mod refresh;

pub use authorize::authorize;
pub use callback::callback;
pub use health::health;
pub use login::login;
pub use refresh::refresh;

use axum::response::Html;

use crate::management::Session;

/// Renders the session page shown after a successful login or refresh.
pub(crate) fn session_page(session: &Session) -> Html<String> {
    let name = session
        .profile()
        .and_then(|p| p.display_name.clone())
        .or_else(|| session.profile().map(|p| p.id.clone()))
        .unwrap_or_else(|| "unknown user".to_string());

    let details = session
        .profile()
        .map(|p| {
            format!(
                "<p>id: {id}<br>email: {email}<br>country: {country}<br>product: {product}</p>",
                id = p.id,
                email = p.email.as_deref().unwrap_or("-"),
                country = p.country.as_deref().unwrap_or("-"),
                product = p.product.as_deref().unwrap_or("-"),
            )
        })
        .unwrap_or_default();

    let expiry = session
        .token()
        .map(|t| format!("<p>Access token valid for {} seconds.</p>", t.expires_in))
        .unwrap_or_default();

    Html(format!(
        "<h2>Signed in as {name}.</h2>{details}{expiry}\
         <p><a href=\"/refresh\">Refresh token</a> | <a href=\"/login\">Back to login</a></p>\
         <p>You can close this window; the terminal shows the session summary.</p>"
    ))
}
