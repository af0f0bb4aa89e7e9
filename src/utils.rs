use base64::{Engine, engine::general_purpose::STANDARD};
use rand::{Rng, distr::Alphanumeric};

use crate::types::{ProfileTableRow, UserProfile};

/// Generates a random alphanumeric string of the given length, uniformly
/// sampled from `[A-Za-z0-9]`. Used for the anti-CSRF auth state.
pub fn generate_random_string(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Builds the `Authorization` header value for the token endpoint:
/// `Basic base64(client_id:client_secret)`.
pub fn basic_auth_header(client_id: &str, client_secret: &str) -> String {
    let credentials = format!("{}:{}", client_id, client_secret);
    format!("Basic {}", STANDARD.encode(credentials))
}

/// Flattens a user profile into field/value rows for terminal display.
/// Optional fields that the API did not return are skipped.
pub fn profile_table_rows(profile: &UserProfile) -> Vec<ProfileTableRow> {
    let mut rows = vec![ProfileTableRow {
        field: "id".to_string(),
        value: profile.id.clone(),
    }];

    let optional = [
        ("display_name", &profile.display_name),
        ("email", &profile.email),
        ("country", &profile.country),
        ("product", &profile.product),
    ];
    for (field, value) in optional {
        if let Some(value) = value {
            rows.push(ProfileTableRow {
                field: field.to_string(),
                value: value.clone(),
            });
        }
    }

    if let Some(followers) = &profile.followers {
        rows.push(ProfileTableRow {
            field: "followers".to_string(),
            value: followers.total.to_string(),
        });
    }

    rows
}
