use chrono::Utc;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

fn unix_now() -> u64 {
    Utc::now().timestamp() as u64
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

/// Access/refresh token pair returned by the token endpoint.
///
/// `refresh_token` and `scope` are optional because refresh responses may
/// omit them. `obtained_at` is stamped at deserialization time so token age
/// can be computed later; it is not part of the wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    pub expires_in: u64,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default = "unix_now")]
    pub obtained_at: u64,
}

/// Snapshot of the signed-in account from `GET /v1/me`.
///
/// Fully replaced on each fetch, never merged. Most fields are optional:
/// Spotify omits them depending on granted scopes and account settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub product: Option<String>,
    #[serde(default)]
    pub followers: Option<Followers>,
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Followers {
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub width: Option<u32>,
}

#[derive(Tabled)]
pub struct ProfileTableRow {
    pub field: String,
    pub value: String,
}
