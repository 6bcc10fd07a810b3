//! Screen routing table.
//!
//! Mirrors the web console's sidebar: each screen has a stable path and a
//! flag saying whether it sits behind the session. Only the login and
//! password-reset screens are public.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    PasswordReset,
    Dashboard,
    Products,
    Vendors,
    Orders,
    Promotions,
    Support,
    Reports,
    Wallet,
}

impl Route {
    /// Where an authenticated user lands when no destination was preserved.
    pub const DEFAULT_LANDING: Route = Route::Dashboard;

    pub const ALL: [Route; 10] = [
        Route::Login,
        Route::PasswordReset,
        Route::Dashboard,
        Route::Products,
        Route::Vendors,
        Route::Orders,
        Route::Promotions,
        Route::Support,
        Route::Reports,
        Route::Wallet,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::PasswordReset => "/password-reset",
            Route::Dashboard => "/dashboard",
            Route::Products => "/products",
            Route::Vendors => "/vendors",
            Route::Orders => "/orders",
            Route::Promotions => "/promotions",
            Route::Support => "/support",
            Route::Reports => "/reports",
            Route::Wallet => "/wallet",
        }
    }

    pub fn from_path(path: &str) -> Option<Route> {
        Route::ALL.iter().copied().find(|r| r.path() == path)
    }

    /// Whether this screen requires a session to render.
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Route::Login | Route::PasswordReset)
    }

    /// Display title for the screen header.
    pub fn title(&self) -> &'static str {
        match self {
            Route::Login => "Sign in",
            Route::PasswordReset => "Password reset",
            Route::Dashboard => "Dashboard",
            Route::Products => "Products",
            Route::Vendors => "Vendors",
            Route::Orders => "Orders",
            Route::Promotions => "Promotions",
            Route::Support => "Customer support",
            Route::Reports => "Reports",
            Route::Wallet => "Wallet & refunds",
        }
    }
}
