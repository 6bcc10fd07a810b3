//! In-process session token storage.
//!
//! One `TokenStore` exists per application run and is handed by reference to
//! the API client and the route guard. The token lives only in memory - it is
//! never written to disk and dies with the process, the same lifetime the
//! browser's tab-scoped session storage gives it in the web console.

use chrono::{DateTime, Utc};

use crate::models::Principal;

/// Single authority over the session token.
///
/// Token presence is necessary but not sufficient for "authenticated";
/// sufficiency requires a verify round-trip (see `ApiClient::check_token`).
#[derive(Debug, Default)]
pub struct TokenStore {
    token: Option<String>,
    principal: Option<Principal>,
    issued_at: Option<DateTime<Utc>>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stored token, if any.
    pub fn get(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Store a token. An empty value is a no-op. At most one token is held
    /// at a time, so a non-empty value replaces whatever was there.
    pub fn set(&mut self, token: impl Into<String>) {
        let token = token.into();
        if token.is_empty() {
            return;
        }
        self.token = Some(token);
        self.issued_at = Some(Utc::now());
    }

    /// Record the best-effort principal returned alongside the token.
    pub fn set_principal(&mut self, principal: Principal) {
        self.principal = Some(principal);
    }

    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    /// When the current token was stored. Display only - the real expiry is
    /// encoded inside the token server-side and the client does not parse it.
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        self.issued_at
    }

    /// Drop the token and principal. Safe to call with nothing stored.
    pub fn clear(&mut self) {
        self.token = None;
        self.principal = None;
        self.issued_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut store = TokenStore::new();
        assert_eq!(store.get(), None);

        store.set("abc123");
        assert_eq!(store.get(), Some("abc123"));
        assert!(store.issued_at().is_some());
    }

    #[test]
    fn test_set_empty_is_noop() {
        let mut store = TokenStore::new();
        store.set("");
        assert_eq!(store.get(), None);
        assert!(store.issued_at().is_none());

        // An empty set must not wipe an existing token either
        store.set("abc123");
        store.set("");
        assert_eq!(store.get(), Some("abc123"));
    }

    #[test]
    fn test_set_replaces_existing() {
        let mut store = TokenStore::new();
        store.set("first");
        store.set("second");
        assert_eq!(store.get(), Some("second"));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut store = TokenStore::new();
        store.set("abc123");
        store.set_principal(Principal::default());

        store.clear();
        assert_eq!(store.get(), None);
        assert!(store.principal().is_none());
        assert!(store.issued_at().is_none());

        // Clearing again must behave identically
        store.clear();
        assert_eq!(store.get(), None);
    }
}
