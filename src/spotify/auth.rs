use std::{sync::Arc, time::Duration};

use reqwest::{Client, Response, Url, header::AUTHORIZATION};
use tabled::Table;

use crate::{
    config,
    error::AuthError,
    info,
    management::{AuthStateStore, FileStateStore, SharedSession},
    server::start_api_server,
    success,
    types::{Token, UserProfile},
    utils, warning,
};

/// Spotify application credentials and endpoint URLs.
///
/// Built from the environment in production; tests construct it directly
/// and point the URLs at a mock server.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub scope: String,
    pub redirect_uri: String,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
}

impl AuthConfig {
    pub fn from_env() -> Self {
        Self {
            client_id: config::spotify_client_id(),
            client_secret: config::spotify_client_secret(),
            scope: config::spotify_scope(),
            redirect_uri: config::spotify_redirect_uri(),
            auth_url: config::spotify_apiauth_url(),
            token_url: config::spotify_apitoken_url(),
            api_url: config::spotify_apiurl(),
        }
    }
}

/// Client for the OAuth2 authorization-code flow.
///
/// Owns all network operations of the flow (code exchange, refresh
/// exchange, profile fetch) as well as the validation of the anti-CSRF
/// state value. The durable state storage is injected so the client can be
/// tested without the real file backend.
///
/// # Flow
///
/// 1. [`authorize_url`](Self::authorize_url) generates and persists a fresh
///    state value and returns the URL the browser must be sent to.
/// 2. The authorization server redirects back with `code` and `state`.
/// 3. [`get_token`](Self::get_token) validates the state, consumes it, and
///    exchanges the code for a token pair.
/// 4. [`get_user_profile`](Self::get_user_profile) fetches the account
///    profile with the access token.
/// 5. [`get_token_by_refresh`](Self::get_token_by_refresh) renews the
///    access token without another user prompt.
pub struct AuthClient<S: AuthStateStore> {
    config: AuthConfig,
    store: S,
}

impl AuthClient<FileStateStore> {
    /// Builds a client from the environment with the file-backed state store.
    pub fn from_env() -> Self {
        Self::new(AuthConfig::from_env(), FileStateStore::new())
    }
}

impl<S: AuthStateStore> AuthClient<S> {
    pub fn new(config: AuthConfig, store: S) -> Self {
        Self { config, store }
    }

    /// Generates a fresh 16-character auth state, persists it (overwriting
    /// any prior pending value), and returns the authorization URL to
    /// navigate to.
    ///
    /// The navigation itself is the caller's job: the HTTP layer answers
    /// with a redirect, the same way the original full-page navigation
    /// never returns control to the calling code.
    pub async fn authorize_url(&self) -> Result<String, AuthError> {
        let state = utils::generate_random_string(16);
        self.store.set(&state).await?;

        let url = Url::parse_with_params(
            &self.config.auth_url,
            &[
                ("response_type", "code"),
                ("client_id", self.config.client_id.as_str()),
                ("scope", self.config.scope.as_str()),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("state", state.as_str()),
            ],
        )
        .map_err(|e| AuthError::Network(format!("invalid authorize URL: {}", e)))?;

        Ok(url.into())
    }

    /// Returns the currently persisted auth state, if any.
    pub async fn auth_state(&self) -> Result<Option<String>, AuthError> {
        self.store.get().await
    }

    /// Exchanges an authorization code for a token pair.
    ///
    /// The returned `state` must match the persisted one; otherwise the
    /// exchange fails with [`AuthError::StateMismatch`] before any network
    /// call is made, and the persisted value is left untouched. On a match
    /// the state is consumed first, then the code is posted to the token
    /// endpoint with the Basic client credential.
    pub async fn get_token(&self, code: &str, state: &str) -> Result<Token, AuthError> {
        match self.store.get().await? {
            Some(stored) if stored == state => {}
            _ => return Err(AuthError::StateMismatch),
        }
        self.store.remove().await?;

        let client = Client::new();
        let response = client
            .post(&self.config.token_url)
            .header(
                AUTHORIZATION,
                utils::basic_auth_header(&self.config.client_id, &self.config.client_secret),
            )
            .form(&[
                ("code", code),
                ("grant_type", "authorization_code"),
                ("redirect_uri", self.config.redirect_uri.as_str()),
            ])
            .send()
            .await;

        let response = handle_response(response).await?;
        decode_json(response).await
    }

    /// Obtains a fresh access token from a refresh token.
    ///
    /// Providers may omit the refresh token in the response; in that case
    /// the one passed in is carried over into the returned token so the
    /// caller can keep refreshing.
    pub async fn get_token_by_refresh(&self, refresh_token: &str) -> Result<Token, AuthError> {
        let client = Client::new();
        let response = client
            .post(&self.config.token_url)
            .header(
                AUTHORIZATION,
                utils::basic_auth_header(&self.config.client_id, &self.config.client_secret),
            )
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
            ])
            .send()
            .await;

        let response = handle_response(response).await?;
        let mut token: Token = decode_json(response).await?;
        if token.refresh_token.is_none() {
            token.refresh_token = Some(refresh_token.to_string());
        }
        Ok(token)
    }

    /// Fetches the profile of the signed-in user with a Bearer header.
    pub async fn get_user_profile(&self, access_token: &str) -> Result<UserProfile, AuthError> {
        let api_url = format!("{uri}/me", uri = &self.config.api_url);

        let client = Client::new();
        let response = client.get(&api_url).bearer_auth(access_token).send().await;

        let response = handle_response(response).await?;
        decode_json(response).await
    }
}

/// Single funnel for the outcomes of all network operations.
///
/// Classifies failures into the two kinds the flow distinguishes: no
/// response received at all, or a non-success status from the backend.
/// Each failure is logged exactly once here before it propagates; there
/// are no retries and no fallbacks.
async fn handle_response(result: Result<Response, reqwest::Error>) -> Result<Response, AuthError> {
    match result {
        Ok(response) => {
            let status = response.status();
            if status.is_success() {
                Ok(response)
            } else {
                let body = response.text().await.unwrap_or_default();
                warning!("Backend returned code {}, body was: {}", status.as_u16(), body);
                Err(AuthError::Backend {
                    status: status.as_u16(),
                    body,
                })
            }
        }
        Err(e) => {
            warning!("An error occurred: {}", e);
            Err(AuthError::Network(e.to_string()))
        }
    }
}

async fn decode_json<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, AuthError> {
    response
        .json::<T>()
        .await
        .map_err(|e| AuthError::Network(e.to_string()))
}

/// Runs the interactive login flow.
///
/// Starts the local callback server, opens the browser at the login page,
/// and waits until the browser round trip has produced both a token and a
/// profile in the shared session. The profile is then printed as a table
/// and the server is kept alive so the manual refresh action on the
/// session page stays usable until Ctrl-C.
///
/// There is no deadline on the wait: the pending authorization stays valid
/// until the callback consumes it or the user aborts.
pub async fn login(shared_state: SharedSession) {
    let server_state = Arc::clone(&shared_state);
    tokio::spawn(async move {
        start_api_server(server_state).await;
    });

    let login_url = format!("http://{addr}/login", addr = config::server_addr());

    if webbrowser::open(&login_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            login_url
        )
    }

    let profile = wait_for_profile(Arc::clone(&shared_state)).await;

    success!("Authentication successful!");
    println!("{}", Table::new(utils::profile_table_rows(&profile)));

    info!(
        "The session page at {} stays available for manual token refresh. Press Ctrl-C to quit.",
        login_url
    );
    let _ = tokio::signal::ctrl_c().await;
}

/// Polls the shared session until the callback handler has stored both a
/// token and a profile. One-second interval, no timeout; Ctrl-C is the
/// only way out of an abandoned attempt.
async fn wait_for_profile(shared_state: SharedSession) -> UserProfile {
    use indicatif::{ProgressBar, ProgressStyle};

    let pb = ProgressBar::new_spinner();
    pb.set_message("Waiting for authorization in the browser...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    loop {
        {
            let session = shared_state.lock().await;
            if session.is_authenticated() {
                if let Some(profile) = session.profile() {
                    pb.finish_and_clear();
                    return profile.clone();
                }
            }
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
    }
}
