use std::sync::Arc;

use tokio::sync::Mutex;

use crate::types::{Token, UserProfile};

/// Shared handle to the session, passed between the CLI waiter and the
/// HTTP handlers of the callback server.
pub type SharedSession = Arc<Mutex<Session>>;

/// In-memory authentication session.
///
/// Holds the current token pair and the last fetched profile for the
/// lifetime of the process. Nothing here is ever persisted; a new run
/// starts from a clean session.
#[derive(Debug, Default)]
pub struct Session {
    token: Option<Token>,
    profile: Option<UserProfile>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedSession {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Stores the token obtained from a successful code exchange.
    pub fn set_token(&mut self, token: Token) {
        self.token = Some(token);
    }

    /// Stores the profile fetched after the exchange, replacing any prior one.
    pub fn set_profile(&mut self, profile: UserProfile) {
        self.profile = Some(profile);
    }

    /// Replaces the current token with a refreshed one.
    ///
    /// Refresh responses may omit the refresh token; in that case the
    /// previous one is carried over so later refreshes keep working.
    pub fn apply_refresh(&mut self, mut refreshed: Token) {
        if refreshed.refresh_token.is_none() {
            refreshed.refresh_token = self.token.as_ref().and_then(|t| t.refresh_token.clone());
        }
        self.token = Some(refreshed);
    }

    pub fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.token.as_ref().and_then(|t| t.refresh_token.clone())
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    /// A session counts as authenticated once both the token exchange and
    /// the profile fetch have completed.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.profile.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(access: &str, refresh: Option<&str>) -> Token {
        Token {
            access_token: access.to_string(),
            refresh_token: refresh.map(str::to_string),
            scope: None,
            expires_in: 3600,
            token_type: "Bearer".to_string(),
            obtained_at: 0,
        }
    }

    #[test]
    fn refresh_without_new_refresh_token_keeps_old_one() {
        let mut session = Session::new();
        session.set_token(token("AT1", Some("RT1")));

        session.apply_refresh(token("AT2", None));

        let current = session.token().unwrap();
        assert_eq!(current.access_token, "AT2");
        assert_eq!(current.refresh_token.as_deref(), Some("RT1"));
    }

    #[test]
    fn refresh_with_new_refresh_token_replaces_it() {
        let mut session = Session::new();
        session.set_token(token("AT1", Some("RT1")));

        session.apply_refresh(token("AT2", Some("RT2")));

        let current = session.token().unwrap();
        assert_eq!(current.refresh_token.as_deref(), Some("RT2"));
    }

    #[test]
    fn authenticated_needs_token_and_profile() {
        let mut session = Session::new();
        assert!(!session.is_authenticated());

        session.set_token(token("AT1", Some("RT1")));
        assert!(!session.is_authenticated());

        session.set_profile(crate::types::UserProfile {
            id: "user".to_string(),
            display_name: None,
            email: None,
            country: None,
            product: None,
            followers: None,
            images: vec![],
        });
        assert!(session.is_authenticated());
    }
}
