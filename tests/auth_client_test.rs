use httpmock::prelude::*;
use serde_json::json;

use spotlogin::error::AuthError;
use spotlogin::management::MemoryStateStore;
use spotlogin::spotify::auth::{AuthClient, AuthConfig};
use spotlogin::utils::basic_auth_header;

const REDIRECT_URI: &str = "http://127.0.0.1:8888/callback";

fn test_config(server: &MockServer) -> AuthConfig {
    AuthConfig {
        client_id: "my-client-id".to_string(),
        client_secret: "my-client-secret".to_string(),
        scope: "user-read-private user-read-email".to_string(),
        redirect_uri: REDIRECT_URI.to_string(),
        auth_url: "https://accounts.spotify.com/authorize".to_string(),
        token_url: server.url("/api/token"),
        api_url: server.url(""),
    }
}

fn state_of(url: &str) -> String {
    let url = reqwest::Url::parse(url).unwrap();
    url.query_pairs()
        .find(|(k, _)| k == "state")
        .map(|(_, v)| v.to_string())
        .unwrap()
}

#[tokio::test]
async fn get_token_exchanges_code_and_consumes_state() {
    let server = MockServer::start();
    let client = AuthClient::new(test_config(&server), MemoryStateStore::with_value("XYZ"));

    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/token")
            .header("authorization", basic_auth_header("my-client-id", "my-client-secret"))
            .header("content-type", "application/x-www-form-urlencoded")
            .body("code=abc123&grant_type=authorization_code&redirect_uri=http%3A%2F%2F127.0.0.1%3A8888%2Fcallback");
        then.status(200).json_body(json!({
            "access_token": "AT1",
            "refresh_token": "RT1",
            "token_type": "Bearer",
            "scope": "user-read-private",
            "expires_in": 3600
        }));
    });

    let token = client.get_token("abc123", "XYZ").await.unwrap();

    mock.assert_calls(1);
    assert_eq!(token.access_token, "AT1");
    assert_eq!(token.refresh_token.as_deref(), Some("RT1"));
    assert_eq!(token.token_type, "Bearer");
    assert_eq!(token.expires_in, 3600);

    // State consumed exactly once
    assert_eq!(client.auth_state().await.unwrap(), None);
}

#[tokio::test]
async fn get_token_rejects_wrong_state_without_network_call() {
    let server = MockServer::start();
    let client = AuthClient::new(test_config(&server), MemoryStateStore::with_value("XYZ"));

    let mock = server.mock(|when, then| {
        when.method(POST).path("/api/token");
        then.status(200);
    });

    let result = client.get_token("abc123", "WRONG").await;

    assert!(matches!(result, Err(AuthError::StateMismatch)));
    mock.assert_calls(0);

    // A stray callback must not consume the pending state
    assert_eq!(client.auth_state().await.unwrap(), Some("XYZ".to_string()));
}

#[tokio::test]
async fn get_token_rejects_missing_state() {
    let server = MockServer::start();
    let client = AuthClient::new(test_config(&server), MemoryStateStore::new());

    let mock = server.mock(|when, then| {
        when.method(POST).path("/api/token");
        then.status(200);
    });

    let result = client.get_token("abc123", "XYZ").await;

    assert!(matches!(result, Err(AuthError::StateMismatch)));
    mock.assert_calls(0);
}

#[tokio::test]
async fn get_token_surfaces_backend_failure() {
    let server = MockServer::start();
    let client = AuthClient::new(test_config(&server), MemoryStateStore::with_value("XYZ"));

    server.mock(|when, then| {
        when.method(POST).path("/api/token");
        then.status(400).body("invalid_grant");
    });

    let result = client.get_token("expired", "XYZ").await;

    match result {
        Err(AuthError::Backend { status, body }) => {
            assert_eq!(status, 400);
            assert_eq!(body, "invalid_grant");
        }
        other => panic!("expected backend error, got {:?}", other),
    }
}

#[tokio::test]
async fn refresh_preserves_prior_refresh_token_when_omitted() {
    let server = MockServer::start();
    let client = AuthClient::new(test_config(&server), MemoryStateStore::new());

    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/token")
            .header(
                "authorization",
                basic_auth_header("my-client-id", "my-client-secret"),
            )
            .body("grant_type=refresh_token&refresh_token=RT1");
        then.status(200).json_body(json!({
            "access_token": "AT2",
            "token_type": "Bearer",
            "expires_in": 3600
        }));
    });

    let token = client.get_token_by_refresh("RT1").await.unwrap();

    mock.assert_calls(1);
    assert_eq!(token.access_token, "AT2");
    // Response omitted the refresh token; the old one stays usable
    assert_eq!(token.refresh_token.as_deref(), Some("RT1"));
}

#[tokio::test]
async fn refresh_adopts_rotated_refresh_token() {
    let server = MockServer::start();
    let client = AuthClient::new(test_config(&server), MemoryStateStore::new());

    server.mock(|when, then| {
        when.method(POST).path("/api/token");
        then.status(200).json_body(json!({
            "access_token": "AT2",
            "refresh_token": "RT2",
            "token_type": "Bearer",
            "expires_in": 3600
        }));
    });

    let token = client.get_token_by_refresh("RT1").await.unwrap();

    assert_eq!(token.refresh_token.as_deref(), Some("RT2"));
}

#[tokio::test]
async fn get_user_profile_sends_bearer_token() {
    let server = MockServer::start();
    let client = AuthClient::new(test_config(&server), MemoryStateStore::new());

    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/me")
            .header("authorization", "Bearer AT1");
        then.status(200).json_body(json!({
            "id": "user123",
            "display_name": "Some User",
            "email": "user@example.com",
            "country": "DE",
            "product": "premium",
            "followers": { "total": 7 },
            "images": [{ "url": "https://i.scdn.co/image/abc", "height": 300, "width": 300 }]
        }));
    });

    let profile = client.get_user_profile("AT1").await.unwrap();

    mock.assert_calls(1);
    assert_eq!(profile.id, "user123");
    assert_eq!(profile.display_name.as_deref(), Some("Some User"));
    assert_eq!(profile.followers.unwrap().total, 7);
    assert_eq!(profile.images.len(), 1);
}

#[tokio::test]
async fn get_user_profile_surfaces_backend_failure() {
    let server = MockServer::start();
    let client = AuthClient::new(test_config(&server), MemoryStateStore::new());

    server.mock(|when, then| {
        when.method(GET).path("/me");
        then.status(401).body("The access token expired");
    });

    let result = client.get_user_profile("stale").await;

    assert!(matches!(
        result,
        Err(AuthError::Backend { status: 401, .. })
    ));
}

#[tokio::test]
async fn authorize_url_persists_state_and_overwrites_prior_one() {
    let server = MockServer::start();
    let client = AuthClient::new(test_config(&server), MemoryStateStore::with_value("stale"));

    let first = client.authorize_url().await.unwrap();
    let first_state = state_of(&first);

    assert_eq!(first_state.len(), 16);
    assert!(first_state.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(client.auth_state().await.unwrap(), Some(first_state.clone()));

    // Every authorize attempt replaces the pending state
    let second = client.authorize_url().await.unwrap();
    let second_state = state_of(&second);
    assert_ne!(second_state, first_state);
    assert_eq!(client.auth_state().await.unwrap(), Some(second_state));
}

#[tokio::test]
async fn authorize_url_carries_all_query_parameters() {
    let server = MockServer::start();
    let client = AuthClient::new(test_config(&server), MemoryStateStore::new());

    let url = client.authorize_url().await.unwrap();
    let parsed = reqwest::Url::parse(&url).unwrap();

    let pairs: Vec<(String, String)> = parsed
        .query_pairs()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    assert!(url.starts_with("https://accounts.spotify.com/authorize?"));
    assert!(pairs.contains(&("response_type".to_string(), "code".to_string())));
    assert!(pairs.contains(&("client_id".to_string(), "my-client-id".to_string())));
    assert!(pairs.contains(&(
        "scope".to_string(),
        "user-read-private user-read-email".to_string()
    )));
    assert!(pairs.contains(&("redirect_uri".to_string(), REDIRECT_URI.to_string())));
}
