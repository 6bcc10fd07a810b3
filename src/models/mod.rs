//! Data models for the storefront backend.
//!
//! - `Principal`: the authenticated user returned alongside the token
//! - `DashboardSummary`, `ProductSummary`, `OrderSummary`: screen rows for
//!   the authenticated resource fetches

pub mod catalog;
pub mod principal;

pub use catalog::{DashboardSummary, OrderSummary, ProductSummary};
pub use principal::Principal;
