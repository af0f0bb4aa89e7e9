use axum::response::Html;

/// Login page. A single action, no state: the link starts the
/// authorization flow.
pub async fn login() -> Html<&'static str> {
    Html(
        "<h2>spotlogin</h2>\
         <p>Sign in to your Spotify account to continue.</p>\
         <p><a href=\"/authorize\">Log in with Spotify</a></p>",
    )
}
