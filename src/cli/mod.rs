//! # CLI Module
//!
//! User-facing command implementations. The surface is intentionally
//! small:
//!
//! - [`login`] - runs the interactive OAuth2 authorization-code flow:
//!   starts the local callback server, opens the browser, waits for the
//!   round trip, and prints the signed-in account's profile.
//!
//! Shell-completion generation lives in the binary itself since it needs
//! the clap command definition.

mod login;

pub use login::login;
