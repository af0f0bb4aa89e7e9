use std::fmt;

/// Errors produced by the authentication flow.
///
/// Network operations classify their failures into exactly two kinds:
/// `Network` when no response was received at all and `Backend` when the
/// server answered with a non-success status. `StateMismatch` is raised
/// before any network call is attempted.
#[derive(Debug)]
pub enum AuthError {
    /// The `state` returned by the authorization server does not match the
    /// persisted value, or no value is persisted at all.
    StateMismatch,
    /// The request never produced a response (connectivity failure,
    /// malformed response body).
    Network(String),
    /// The server responded with a non-2xx status.
    Backend { status: u16, body: String },
    /// The durable auth-state store could not be read or written.
    Store(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::StateMismatch => write!(f, "wrong auth state"),
            AuthError::Network(msg) => write!(f, "network error: {}", msg),
            AuthError::Backend { status, body } => {
                write!(f, "backend returned code {}, body was: {}", status, body)
            }
            AuthError::Store(msg) => write!(f, "auth state store error: {}", msg),
        }
    }
}

impl std::error::Error for AuthError {}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        AuthError::Network(err.to_string())
    }
}
