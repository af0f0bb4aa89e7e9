use axum::{Extension, Router, routing::get};
use std::{net::SocketAddr, str::FromStr};

use crate::{api, config, error, management::SharedSession};

/// Starts the local HTTP server that hosts the login flow.
///
/// The callback route must be reachable under the redirect URI registered
/// with the Spotify application.
pub async fn start_api_server(state: SharedSession) {
    let app = Router::new()
        .route("/health", get(api::health))
        .route("/login", get(api::login))
        .route("/authorize", get(api::authorize))
        .route("/callback", get(api::callback))
        .route("/refresh", get(api::refresh))
        .layer(Extension(state));

    let addr = match SocketAddr::from_str(&config::server_addr()) {
        Ok(addr) => addr,
        Err(e) => error!("Failed to parse server address: {}", e),
    };

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => error!("Failed to bind {}: {}", addr, e),
    };
    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
    }
}
