//! API client for the storefront administration backend.
//!
//! This module owns the three session-mutating operations (login, logout,
//! verify) and the authenticated resource fetches. Every failure mode of the
//! auth operations is converted into data here - callers see a `LoginOutcome`
//! or a plain `bool`, never a raised error, so the route guard only ever has
//! to choose between "proceed" and "redirect".

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::auth::{Credentials, TokenStore};
use crate::models::{DashboardSummary, OrderSummary, ProductSummary};

use super::envelope::{self, ApiOutcome, LoginPayload, VerifyPayload};
use super::ApiError;

/// HTTP request timeout in seconds.
/// Kept short so a dead verify endpoint resolves to "unauthorized" quickly
/// instead of leaving a navigation suspended.
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Fallback message when the backend gives us nothing better.
const GENERIC_LOGIN_FAILURE: &str = "Login failed";

/// Result of a login attempt, normalized for the UI.
#[derive(Debug)]
pub enum LoginOutcome {
    /// Token issued and stored; `token` echoes what the store now holds.
    Success { token: String },
    /// Rejected credentials, transport failure, or a malformed body - all
    /// collapse to a displayable message. Stored state is untouched.
    Failure { message: String },
}

/// API client for the storefront backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // =========================================================================
    // Session operations
    // =========================================================================

    /// Authenticate and, on success, store the issued token and principal.
    pub async fn login(&self, store: &mut TokenStore, credentials: &Credentials) -> LoginOutcome {
        let url = self.url("/auth/login");

        let response = match self.client.post(&url).json(credentials).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Login request failed");
                return LoginOutcome::Failure {
                    message: transport_failure_message(&e),
                };
            }
        };

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, "Failed to read login response body");
                return LoginOutcome::Failure {
                    message: GENERIC_LOGIN_FAILURE.to_string(),
                };
            }
        };

        apply_login_body(store, &body)
    }

    /// Notify the backend and drop the local token.
    ///
    /// The notification is best-effort: its outcome is logged but not
    /// surfaced, and the store is cleared on every exit path so a network
    /// failure can never strand a stale token.
    pub async fn logout(&self, store: &mut TokenStore) {
        if let Some(token) = store.get().map(str::to_owned) {
            let url = self.url("/auth/logout");
            let body = serde_json::json!({ "token": token });
            match self.client.post(&url).json(&body).send().await {
                Ok(_) => debug!("Logout notification sent"),
                Err(e) => debug!(error = %e, "Logout notification failed"),
            }
        }
        store.clear();
        info!("Session cleared");
    }

    /// Ask the backend whether the stored token is still accepted.
    ///
    /// With no stored token this returns `false` without a network call.
    /// A negative answer, a malformed body, and an unreachable endpoint are
    /// indistinguishable to the caller: all clear the store and return
    /// `false`.
    pub async fn check_token(&self, store: &mut TokenStore) -> bool {
        let Some(token) = store.get().map(str::to_owned) else {
            debug!("No token stored, skipping verify call");
            return false;
        };

        let url = self.url("/auth/verify");
        let body = serde_json::json!({ "token": token });

        let text = match self.client.post(&url).json(&body).send().await {
            Ok(response) => match response.text().await {
                Ok(text) => text,
                Err(e) => {
                    debug!(error = %e, "Failed to read verify response body");
                    store.clear();
                    return false;
                }
            },
            Err(e) => {
                debug!(error = %e, "Verify request failed");
                store.clear();
                return false;
            }
        };

        apply_verify_body(store, &text)
    }

    // =========================================================================
    // Authenticated resource fetches
    // =========================================================================

    pub async fn fetch_dashboard_summary(
        &self,
        store: &mut TokenStore,
    ) -> Result<DashboardSummary, ApiError> {
        self.get_enveloped(store, "/reports/summary").await
    }

    pub async fn fetch_products(
        &self,
        store: &mut TokenStore,
    ) -> Result<Vec<ProductSummary>, ApiError> {
        self.get_enveloped(store, "/products").await
    }

    pub async fn fetch_orders(
        &self,
        store: &mut TokenStore,
    ) -> Result<Vec<OrderSummary>, ApiError> {
        self.get_enveloped(store, "/orders").await
    }

    /// GET an enveloped resource with the stored token as a bearer credential.
    ///
    /// This is the one cross-cutting contract the token store exposes to the
    /// rest of the application. A 401 means the backend no longer accepts the
    /// token, so it is dropped here and the guard fails closed on the next
    /// navigation.
    async fn get_enveloped<T: DeserializeOwned>(
        &self,
        store: &mut TokenStore,
        path: &str,
    ) -> Result<T, ApiError> {
        let token = store.get().map(str::to_owned).ok_or(ApiError::TokenAbsent)?;
        let url = self.url(path);

        let response = self.client.get(&url).bearer_auth(&token).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            warn!(url = %url, "Token rejected mid-session");
            store.clear();
            return Err(ApiError::TokenInvalid);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_status(status, &body));
        }

        let text = response.text().await?;
        match envelope::decode::<T>(&text)? {
            ApiOutcome::Success(value) => Ok(value),
            ApiOutcome::Failure { message } => Err(ApiError::ServerError(
                message.unwrap_or_else(|| "request rejected".to_string()),
            )),
        }
    }
}

/// Decode a login response body and update the store accordingly.
///
/// Split out from the network path so the store-mutation rules can be tested
/// against fixture bodies.
pub fn apply_login_body(store: &mut TokenStore, body: &str) -> LoginOutcome {
    match envelope::decode::<LoginPayload>(body) {
        Ok(ApiOutcome::Success(payload)) => {
            if payload.token.is_empty() {
                // A success envelope with a blank token would leave the store
                // claiming a session that does not exist.
                warn!("Login response carried an empty token");
                return LoginOutcome::Failure {
                    message: GENERIC_LOGIN_FAILURE.to_string(),
                };
            }
            store.set(payload.token.clone());
            if let Some(user) = payload.user {
                store.set_principal(user);
            }
            info!("Login successful, token stored");
            LoginOutcome::Success {
                token: payload.token,
            }
        }
        Ok(ApiOutcome::Failure { message }) => LoginOutcome::Failure {
            message: message.unwrap_or_else(|| GENERIC_LOGIN_FAILURE.to_string()),
        },
        Err(e) => {
            debug!(error = %e, "Login response malformed");
            LoginOutcome::Failure {
                message: GENERIC_LOGIN_FAILURE.to_string(),
            }
        }
    }
}

/// Decode a verify response body. Anything short of an affirmative answer
/// clears the store and reports `false`.
pub fn apply_verify_body(store: &mut TokenStore, body: &str) -> bool {
    match envelope::decode::<VerifyPayload>(body) {
        Ok(ApiOutcome::Success(VerifyPayload { is_valid: true })) => true,
        Ok(ApiOutcome::Success(VerifyPayload { is_valid: false })) => {
            debug!("Token no longer valid, clearing store");
            store.clear();
            false
        }
        Ok(ApiOutcome::Failure { message }) => {
            debug!(message = ?message, "Verify returned a failure envelope");
            store.clear();
            false
        }
        Err(e) => {
            debug!(error = %e, "Verify response malformed, failing closed");
            store.clear();
            false
        }
    }
}

fn transport_failure_message(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "Connection timed out. Please try again.".to_string()
    } else if e.is_connect() {
        "Unable to connect to server. Check your internet connection.".to_string()
    } else {
        GENERIC_LOGIN_FAILURE.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_success_stores_token_and_principal() {
        let mut store = TokenStore::new();
        let body = r#"{"responseCode": 1, "response": {"token": "tok-abc", "user": {"name": "Store Admin", "email": "admin@test.com"}}}"#;

        let outcome = apply_login_body(&mut store, body);
        assert!(matches!(outcome, LoginOutcome::Success { ref token } if token == "tok-abc"));
        assert_eq!(store.get(), Some("tok-abc"));
        assert_eq!(
            store.principal().map(|p| p.display_name()),
            Some("Store Admin")
        );
    }

    #[test]
    fn test_login_rejection_leaves_store_unchanged() {
        let mut store = TokenStore::new();
        store.set("existing-token");

        let body = r#"{"responseCode": 0, "message": "Invalid email or password"}"#;
        let outcome = apply_login_body(&mut store, body);

        match outcome {
            LoginOutcome::Failure { message } => {
                assert_eq!(message, "Invalid email or password");
            }
            LoginOutcome::Success { .. } => panic!("expected failure"),
        }
        assert_eq!(store.get(), Some("existing-token"));
    }

    #[test]
    fn test_login_malformed_body_uses_generic_message() {
        let mut store = TokenStore::new();

        let outcome = apply_login_body(&mut store, "<html>502 Bad Gateway</html>");
        match outcome {
            LoginOutcome::Failure { message } => assert_eq!(message, GENERIC_LOGIN_FAILURE),
            LoginOutcome::Success { .. } => panic!("expected failure"),
        }
        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_login_empty_token_is_a_failure() {
        let mut store = TokenStore::new();
        let body = r#"{"responseCode": 1, "response": {"token": ""}}"#;

        let outcome = apply_login_body(&mut store, body);
        assert!(matches!(outcome, LoginOutcome::Failure { .. }));
        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_verify_affirmative_keeps_token() {
        let mut store = TokenStore::new();
        store.set("tok-abc");

        let valid = apply_verify_body(&mut store, r#"{"responseCode": 1, "response": {"isValid": true}}"#);
        assert!(valid);
        assert_eq!(store.get(), Some("tok-abc"));
    }

    #[test]
    fn test_verify_negative_clears_token() {
        let mut store = TokenStore::new();
        store.set("tok-abc");

        let valid = apply_verify_body(&mut store, r#"{"responseCode": 1, "response": {"isValid": false}}"#);
        assert!(!valid);
        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_verify_malformed_clears_token() {
        let mut store = TokenStore::new();
        store.set("tok-abc");

        let valid = apply_verify_body(&mut store, "gateway timeout");
        assert!(!valid);
        assert_eq!(store.get(), None);
    }

    #[tokio::test]
    async fn test_check_token_with_empty_store_skips_network() {
        // The base URL is unroutable; if check_token attempted a request the
        // timeout alone would make this test drag. An empty store must short
        // circuit before the client is touched.
        let api = ApiClient::new("http://192.0.2.1:1").expect("build client");
        let mut store = TokenStore::new();

        let start = std::time::Instant::now();
        assert!(!api.check_token(&mut store).await);
        assert!(start.elapsed() < std::time::Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_logout_clears_token_when_backend_unreachable() {
        // Discard port: the notification attempt is refused immediately.
        // The store must end up empty even though the backend never heard
        // about the logout.
        let api = ApiClient::new("http://127.0.0.1:9").expect("build client");
        let mut store = TokenStore::new();
        store.set("tok-abc");

        api.logout(&mut store).await;
        assert_eq!(store.get(), None);

        // And again with nothing stored: still fine, still empty.
        api.logout(&mut store).await;
        assert_eq!(store.get(), None);
    }

    #[tokio::test]
    async fn test_fetch_without_token_reports_absent() {
        let api = ApiClient::new("http://192.0.2.1:1").expect("build client");
        let mut store = TokenStore::new();

        let result = api.fetch_products(&mut store).await;
        assert!(matches!(result, Err(ApiError::TokenAbsent)));
    }
}
