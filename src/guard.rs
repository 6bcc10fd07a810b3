//! Route guard: gates screen rendering behind a valid session.
//!
//! Each navigation runs the same small state machine: start in `Checking`,
//! resolve to `Authorized` or `Unauthorized` from what is known about the
//! stored token, then turn that state into a render or a redirect. The guard
//! fails closed - "cannot determine validity" and "invalid" produce the same
//! redirect - and the request timeout on the API client bounds how long
//! `Checking` can last.
//!
//! Verification policy: the first protected navigation of a session verifies
//! the token over the network; after that the token is trusted until logout
//! or an observed 401.

use tracing::debug;

use crate::api::ApiClient;
use crate::auth::TokenStore;
use crate::routes::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    Checking,
    Authorized,
    Unauthorized,
}

/// What this navigation learned about the stored token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenEvidence {
    /// Nothing stored.
    Absent,
    /// Present and already verified earlier in this session.
    Trusted,
    /// Present and just affirmed by the verify endpoint.
    Verified,
    /// Present but the verify round-trip failed or came back negative.
    Rejected,
}

/// The guard's verdict for one navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Render(Route),
    /// Redirect to the login screen, remembering where the user wanted to go.
    RedirectToLogin { requested: Route },
    /// Already signed in and heading to the login screen: send them forward.
    RedirectForward(Route),
}

pub struct RouteGuard {
    /// Where the last navigation ended up; `Checking` while one is in flight.
    state: GuardState,
    /// Set once a verify round-trip has affirmed the token this session.
    verified: bool,
    /// Path requested before the last redirect to login.
    preserved: Option<Route>,
}

impl RouteGuard {
    pub fn new() -> Self {
        Self {
            state: GuardState::Checking,
            verified: false,
            preserved: None,
        }
    }

    pub fn state(&self) -> GuardState {
        self.state
    }

    /// Run the guard for one navigation. The only suspension point is the
    /// verify call on the first protected load of a session.
    pub async fn navigate(
        &mut self,
        route: Route,
        store: &mut TokenStore,
        api: &ApiClient,
    ) -> Decision {
        self.state = GuardState::Checking;
        let evidence = self.gather_evidence(route, store, api).await;
        if evidence == TokenEvidence::Verified {
            self.verified = true;
        }
        self.state = Self::resolve(route, evidence);
        debug!(route = route.path(), ?evidence, state = ?self.state, "Navigation resolved");
        self.decide(route, self.state, store.get().is_some())
    }

    async fn gather_evidence(
        &self,
        route: Route,
        store: &mut TokenStore,
        api: &ApiClient,
    ) -> TokenEvidence {
        if !route.requires_auth() {
            // Public screens never consult the token for authorization.
            return TokenEvidence::Absent;
        }
        if store.get().is_none() {
            return TokenEvidence::Absent;
        }
        if self.verified {
            return TokenEvidence::Trusted;
        }
        // First protected load this session: verify over the network.
        // check_token clears the store itself on any non-affirmative answer.
        if api.check_token(store).await {
            TokenEvidence::Verified
        } else {
            TokenEvidence::Rejected
        }
    }

    /// Resolve `Checking` into a terminal state. Pure.
    pub fn resolve(route: Route, evidence: TokenEvidence) -> GuardState {
        if !route.requires_auth() {
            return GuardState::Authorized;
        }
        match evidence {
            TokenEvidence::Trusted | TokenEvidence::Verified => GuardState::Authorized,
            TokenEvidence::Absent | TokenEvidence::Rejected => GuardState::Unauthorized,
        }
    }

    /// Turn a resolved state into a verdict, maintaining the preserved path.
    pub fn decide(&mut self, route: Route, state: GuardState, has_token: bool) -> Decision {
        match state {
            // A navigation still in Checking has no determined validity;
            // fail closed rather than render.
            GuardState::Checking | GuardState::Unauthorized => {
                if route.requires_auth() {
                    self.preserved = Some(route);
                }
                Decision::RedirectToLogin { requested: route }
            }
            GuardState::Authorized => {
                if route == Route::Login && has_token {
                    Decision::RedirectForward(self.landing_after_login())
                } else {
                    Decision::Render(route)
                }
            }
        }
    }

    /// Where to go after a successful login: the preserved path if a redirect
    /// captured one, otherwise the default landing screen. Consumes the
    /// preserved path.
    pub fn landing_after_login(&mut self) -> Route {
        self.preserved.take().unwrap_or(Route::DEFAULT_LANDING)
    }

    /// A new token was just issued. The next protected navigation must run
    /// the first-load verification again - a re-login mid-session may carry
    /// a different principal - but any preserved destination survives so the
    /// user still lands where they were headed.
    pub fn on_new_session(&mut self) {
        self.state = GuardState::Checking;
        self.verified = false;
    }

    /// Forget everything session-scoped. Called on logout and on an observed
    /// 401, so the next protected navigation re-verifies from scratch.
    pub fn reset(&mut self) {
        self.state = GuardState::Checking;
        self.verified = false;
        self.preserved = None;
    }
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self::new()
    }
}
