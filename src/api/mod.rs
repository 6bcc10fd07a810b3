//! REST client for the storefront administration backend.
//!
//! This module provides the `ApiClient` for the auth endpoints
//! (`/auth/login`, `/auth/logout`, `/auth/verify`) and the authenticated
//! resource fetches, plus the shared envelope decoding every endpoint uses.
//!
//! The backend authenticates with an opaque bearer token issued at login
//! with a one-hour server-side lifetime.

pub mod client;
pub mod envelope;
pub mod error;

pub use client::{ApiClient, LoginOutcome};
pub use error::ApiError;
