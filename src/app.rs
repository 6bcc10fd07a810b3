//! Application state and screen flow.
//!
//! `App` wires the session core together: one `TokenStore`, one `ApiClient`,
//! one `RouteGuard`, constructed at startup and shared by reference for the
//! life of the run. All navigation goes through `goto`, so every screen
//! change is a guard decision.

use std::io::{self, Write};

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::api::{ApiClient, ApiError, LoginOutcome};
use crate::auth::{Credentials, TokenStore};
use crate::config::Config;
use crate::guard::{Decision, RouteGuard};
use crate::routes::Route;

pub struct App {
    pub config: Config,
    pub store: TokenStore,
    pub api: ApiClient,
    pub guard: RouteGuard,

    /// Screen currently rendered, if any.
    pub current_route: Option<Route>,
    /// Inline message under the login prompt. Only login failures set this;
    /// silent redirects (absent or expired token) never do.
    pub login_error: Option<String>,
    /// One-shot message shown after the current command.
    pub status_message: Option<String>,
}

impl App {
    pub fn new() -> Result<Self> {
        let config = match Config::load() {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "Failed to load config, using defaults");
                Config::default()
            }
        };

        let base_url = config.resolve_api_base_url();
        debug!(base_url = %base_url, "Backend configured");
        let api = ApiClient::new(base_url)?;

        Ok(Self {
            config,
            store: TokenStore::new(),
            api,
            guard: RouteGuard::new(),
            current_route: None,
            login_error: None,
            status_message: None,
        })
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Attempt a login with the given credentials. Returns true on success.
    pub async fn attempt_login(&mut self, identifier: &str, secret: &str) -> bool {
        if identifier.is_empty() || secret.is_empty() {
            self.login_error = Some("Email and password required".to_string());
            return false;
        }
        self.login_error = None;

        let credentials = Credentials::new(identifier, secret);
        match self.api.login(&mut self.store, &credentials).await {
            LoginOutcome::Success { token } => {
                debug!(token_len = token.len(), "Token issued");
                // New token, possibly a new principal: the next protected
                // navigation verifies it before anything is trusted.
                self.guard.on_new_session();
                self.config.last_identifier = Some(identifier.to_string());
                if let Err(e) = self.config.save() {
                    warn!(error = %e, "Failed to save config");
                }
                info!("Signed in");
                true
            }
            LoginOutcome::Failure { message } => {
                warn!(error = %message, "Login failed");
                self.login_error = Some(message);
                false
            }
        }
    }

    /// Prompt for credentials on the terminal and sign in. On success,
    /// navigates to the preserved destination or the default landing screen.
    pub async fn login_interactive(&mut self) -> Result<()> {
        let identifier = match self.config.last_identifier.clone() {
            Some(last) => {
                print!("Email [{}]: ", last);
                io::stdout().flush()?;

                let mut input = String::new();
                io::stdin().read_line(&mut input)?;
                let input = input.trim();

                if input.is_empty() {
                    last
                } else {
                    input.to_string()
                }
            }
            None => {
                print!("Email: ");
                io::stdout().flush()?;

                let mut input = String::new();
                io::stdin().read_line(&mut input)?;
                input.trim().to_string()
            }
        };

        let secret = rpassword::prompt_password("Password: ")?;

        if self.attempt_login(&identifier, &secret).await {
            println!("Login successful.");
            let landing = self.guard.landing_after_login();
            self.goto(landing.path()).await?;
        } else if let Some(ref message) = self.login_error {
            // Inline failure message; the prompt stays on the login screen.
            println!("{}", message);
        }
        Ok(())
    }

    /// Sign out: best-effort backend notification, then unconditional local
    /// cleanup. Always leaves the store empty.
    pub async fn logout(&mut self) {
        self.api.logout(&mut self.store).await;
        self.guard.reset();
        self.current_route = None;
        self.status_message = Some("Signed out.".to_string());
    }

    pub fn whoami(&self) {
        match self.store.principal() {
            Some(principal) => {
                let role = principal.role.as_deref().unwrap_or("admin");
                match principal.id {
                    Some(id) => println!("{} ({}) [user {}]", principal.display_name(), role, id),
                    None => println!("{} ({})", principal.display_name(), role),
                }
                if let Some(issued) = self.store.issued_at() {
                    println!("signed in at {}", issued.format("%Y-%m-%d %H:%M:%S UTC"));
                }
            }
            None if self.store.get().is_some() => println!("Signed in (no profile returned)"),
            None => println!("Not signed in"),
        }
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Navigate to a path, routing the request through the guard.
    pub async fn goto(&mut self, path: &str) -> Result<()> {
        let Some(route) = Route::from_path(path) else {
            println!("Unknown screen: {} (try `routes`)", path);
            return Ok(());
        };

        let decision = self.guard.navigate(route, &mut self.store, &self.api).await;
        debug!(state = ?self.guard.state(), "Guard state settled");
        match decision {
            Decision::Render(route) => {
                self.current_route = Some(route);
                self.render(route).await;
            }
            Decision::RedirectToLogin { requested } => {
                // Silent by design: an expired session is not misuse, so no
                // message is shown - including a stale one from an earlier
                // failed attempt.
                debug!(requested = requested.path(), "Redirecting to login");
                self.login_error = None;
                self.current_route = Some(Route::Login);
                self.render(Route::Login).await;
            }
            Decision::RedirectForward(target) => {
                debug!(target = target.path(), "Already signed in, going forward");
                self.current_route = Some(target);
                self.render(target).await;
            }
        }
        Ok(())
    }

    async fn render(&mut self, route: Route) {
        println!("-- {} --", route.title());
        match route {
            Route::Login => {
                if let Some(ref message) = self.login_error {
                    println!("{}", message);
                }
                println!("Use `login` to sign in.");
            }
            Route::PasswordReset => {
                println!("Password resets are handled by the web console.");
            }
            Route::Dashboard => match self.api.fetch_dashboard_summary(&mut self.store).await {
                Ok(summary) => {
                    println!("orders today     {}", summary.orders_today);
                    println!("revenue today    {:.2}", summary.revenue_today);
                    println!("pending refunds  {}", summary.pending_refunds);
                    println!("open tickets     {}", summary.open_tickets);
                }
                Err(e) => self.handle_fetch_error(e),
            },
            Route::Products => match self.api.fetch_products(&mut self.store).await {
                Ok(products) => {
                    for p in &products {
                        let stock = p
                            .stock
                            .map(|s| s.to_string())
                            .unwrap_or_else(|| "-".to_string());
                        let vendor = p.vendor.as_deref().unwrap_or("-");
                        println!("#{:<6} {:<30} {:>8.2}  stock {:>5}  {}", p.id, p.name, p.price, stock, vendor);
                    }
                    println!("{} products", products.len());
                }
                Err(e) => self.handle_fetch_error(e),
            },
            Route::Orders => match self.api.fetch_orders(&mut self.store).await {
                Ok(orders) => {
                    for o in &orders {
                        let customer = o.customer.as_deref().unwrap_or("-");
                        let placed = o
                            .placed_at
                            .map(|d| d.format("%Y-%m-%d").to_string())
                            .unwrap_or_else(|| "-".to_string());
                        println!(
                            "#{:<6} {:<24} {:>8.2}  {:<12} {}",
                            o.id,
                            customer,
                            o.total,
                            o.status_display(),
                            placed
                        );
                    }
                    println!("{} orders", orders.len());
                }
                Err(e) => self.handle_fetch_error(e),
            },
            // The remaining screens have no terminal rendering; their CRUD
            // surfaces live in the web console.
            Route::Vendors | Route::Promotions | Route::Support | Route::Reports | Route::Wallet => {}
        }
    }

    /// Convert a fetch error into a status message. A rejected token resets
    /// the guard so the next protected navigation redirects to login.
    fn handle_fetch_error(&mut self, e: ApiError) {
        match e {
            ApiError::TokenInvalid | ApiError::TokenAbsent => {
                self.guard.reset();
                self.status_message = Some("Session expired. Please log in again.".to_string());
            }
            ApiError::NetworkError(ref inner) if inner.is_timeout() => {
                self.status_message = Some("Connection timed out. Please try again.".to_string());
            }
            ApiError::NetworkError(_) => {
                self.status_message = Some("Network error. Check your connection.".to_string());
            }
            other => {
                warn!(error = %other, "Fetch failed");
                self.status_message = Some(format!("Error: {}", other));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_expiry_redirect_drops_stale_login_error() {
        let mut app = App::new().expect("build app");
        // Leftover message from an earlier failed attempt
        app.login_error = Some("Invalid email or password".to_string());

        // No token stored: the guard redirects to login without a network
        // call, and the redirect must arrive message-free.
        app.goto("/dashboard").await.expect("navigate");
        assert_eq!(app.current_route, Some(Route::Login));
        assert!(app.login_error.is_none());
    }
}
