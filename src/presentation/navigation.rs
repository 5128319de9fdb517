//! Named routes and the guards in front of them.

use crate::domain::session::SessionState;

/// Top-level views of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Sign-in form.
    Login,
    /// Overview, the home view.
    Dashboard,
    /// Spool inventory.
    Spools,
    /// Filament catalog.
    Filaments,
    /// Manufacturers.
    Manufacturers,
    /// Material types.
    Materials,
    /// Printers.
    Printers,
    /// Uploaded files.
    Files,
    /// Administration, admins only.
    Admin,
}

impl Route {
    /// Entries shown in the navigation bar, in order.
    pub const NAV_ENTRIES: [Self; 8] = [
        Self::Dashboard,
        Self::Spools,
        Self::Filaments,
        Self::Manufacturers,
        Self::Materials,
        Self::Printers,
        Self::Files,
        Self::Admin,
    ];

    /// View reached after signing in.
    pub const HOME: Self = Self::Dashboard;

    /// URL path of the route.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Dashboard => "/dashboard",
            Self::Spools => "/spools",
            Self::Filaments => "/filaments",
            Self::Manufacturers => "/manufacturers",
            Self::Materials => "/materials",
            Self::Printers => "/printers",
            Self::Files => "/files",
            Self::Admin => "/admin",
        }
    }

    /// Resolves a path. `/` maps to the home view.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim_end_matches('/');
        if trimmed.is_empty() {
            return Some(Self::HOME);
        }
        [Self::Login]
            .into_iter()
            .chain(Self::NAV_ENTRIES)
            .find(|route| route.path() == trimmed)
    }

    /// Which guard protects the route.
    #[must_use]
    pub const fn guard(self) -> RouteGuard {
        match self {
            Self::Login => RouteGuard::PublicOnly,
            _ => RouteGuard::Protected,
        }
    }

    /// Whether the route is offered to the given session.
    #[must_use]
    pub fn is_visible(self, session: &SessionState) -> bool {
        match self {
            Self::Admin => session.is_admin(),
            Self::Login => !session.is_authenticated(),
            _ => session.is_authenticated(),
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path().trim_start_matches('/'))
    }
}

/// Access policy of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteGuard {
    /// Reachable only when signed in.
    Protected,
    /// Reachable only when signed out.
    PublicOnly,
}

/// Outcome of running a guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Session still being probed; show a neutral loading indicator.
    Loading,
    /// Show the requested view.
    Render(Route),
    /// Go elsewhere instead.
    Redirect(Route),
}

impl RouteGuard {
    /// Decides what to show for `route` given the session.
    #[must_use]
    pub const fn resolve(self, route: Route, session: &SessionState) -> RouteDecision {
        match (self, session) {
            (_, SessionState::Loading) => RouteDecision::Loading,
            (Self::Protected, SessionState::Authenticated(_))
            | (Self::PublicOnly, SessionState::Unauthenticated) => RouteDecision::Render(route),
            (Self::Protected, SessionState::Unauthenticated) => {
                RouteDecision::Redirect(Route::Login)
            }
            (Self::PublicOnly, SessionState::Authenticated(_)) => {
                RouteDecision::Redirect(Route::HOME)
            }
        }
    }
}

/// Tracks the selected route.
#[derive(Debug, Clone)]
pub struct Navigator {
    current: Route,
}

impl Navigator {
    /// Creates navigator on the home view.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current: Route::HOME,
        }
    }

    /// Returns the selected route.
    #[must_use]
    pub const fn current(&self) -> Route {
        self.current
    }

    /// Navigates to `route`, following guard redirects. Returns the decision taken.
    pub fn navigate(&mut self, route: Route, session: &SessionState) -> RouteDecision {
        let decision = route.guard().resolve(route, session);
        match decision {
            RouteDecision::Render(target) | RouteDecision::Redirect(target) => {
                self.current = target;
            }
            RouteDecision::Loading => {}
        }
        decision
    }

    /// Whether `route` is the highlighted entry.
    #[must_use]
    pub fn is_active(&self, route: Route) -> bool {
        self.current == route
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}
