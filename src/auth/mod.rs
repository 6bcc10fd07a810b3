//! Authentication primitives for the session core.
//!
//! This module provides:
//! - `TokenStore`: the single in-memory authority over the session token
//! - `Credentials`: transient login form contents
//!
//! The token is volatile by design - it is issued at login with a server-side
//! one-hour lifetime and is never persisted by this client.

pub mod credentials;
pub mod store;

pub use credentials::Credentials;
pub use store::TokenStore;
