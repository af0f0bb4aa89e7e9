//! # Spotify Integration Module
//!
//! Client layer for the Spotify Web API, covering the OAuth2
//! authorization-code flow and the profile endpoint. This is the only place
//! in the crate that talks to the network.
//!
//! ## Authentication Strategy
//!
//! The [`auth`] module implements the classic authorization-code flow with
//! a confidential client:
//!
//! 1. **State Generation**: A random anti-CSRF state value is generated and
//!    persisted before the redirect.
//! 2. **Authorization Request**: The browser is sent to the authorization
//!    endpoint with `response_type=code`, client ID, scope, redirect URI,
//!    and the state.
//! 3. **Callback Validation**: The returning `state` is compared against
//!    the persisted one; a mismatch aborts the attempt before any network
//!    call.
//! 4. **Token Exchange**: The authorization code is posted to the token
//!    endpoint with a `Basic base64(client_id:client_secret)` header and a
//!    form-encoded body.
//! 5. **Profile Fetch**: `GET /me` with the Bearer access token.
//! 6. **Refresh**: `grant_type=refresh_token` renews the access token; the
//!    prior refresh token is preserved when the response omits one.
//!
//! ## Error Handling
//!
//! Every network operation funnels its outcome through a single handler
//! that distinguishes connectivity failures from backend responses with a
//! non-success status, logs one diagnostic, and propagates the error. No
//! retries, no fallbacks.

pub mod auth;
