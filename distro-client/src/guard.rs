//! Route guards
//!
//! Pure decisions over [`SessionState`]: a guard either lets the navigation
//! proceed or names the path to redirect to.

use shared::Role;

use crate::session::SessionState;

pub const LOGIN_PATH: &str = "/login";
pub const DEFAULT_PATH: &str = "/";

/// Outcome of a guard check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Proceed,
    Redirect(&'static str),
}

pub trait RouteGuard: Send + Sync + std::fmt::Debug {
    fn check(&self, session: &SessionState) -> Navigation;
}

/// Protected view, optionally limited to some roles
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequireAuth {
    /// `None` admits every authenticated user
    pub allowed_roles: Option<Vec<Role>>,
}

impl RequireAuth {
    pub fn any() -> Self {
        Self::default()
    }

    pub fn roles(roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            allowed_roles: Some(roles.into_iter().collect()),
        }
    }
}

impl RouteGuard for RequireAuth {
    fn check(&self, session: &SessionState) -> Navigation {
        let Some(role) = session.role() else {
            return Navigation::Redirect(LOGIN_PATH);
        };
        match &self.allowed_roles {
            Some(allowed) if !allowed.contains(&role) => Navigation::Redirect(DEFAULT_PATH),
            _ => Navigation::Proceed,
        }
    }
}

/// View only for logged-out users (the login page)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublicOnly;

impl RouteGuard for PublicOnly {
    fn check(&self, session: &SessionState) -> Navigation {
        match session.role() {
            Some(role) => Navigation::Redirect(role.home_path()),
            None => Navigation::Proceed,
        }
    }
}

/// Dashboard paths and the guard protecting each
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: Vec<(String, Box<dyn RouteGuard>)>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, path: impl Into<String>, guard: impl RouteGuard + 'static) -> Self {
        self.routes.push((path.into(), Box::new(guard)));
        self
    }

    /// Routes of the admin dashboard
    pub fn dashboard() -> Self {
        let platform = [Role::SuperAdmin, Role::Admin];
        Self::new()
            .route(LOGIN_PATH, PublicOnly)
            .route("/", RequireAuth::any())
            .route("/zones", RequireAuth::any())
            .route("/routes", RequireAuth::any())
            .route("/staff", RequireAuth::any())
            .route("/shops", RequireAuth::any())
            .route("/products", RequireAuth::any())
            .route("/warehouses", RequireAuth::any())
            .route("/wallets", RequireAuth::roles(platform))
            .route("/credit-limits", RequireAuth::roles(platform))
            .route("/subsidies", RequireAuth::roles(platform))
            .route(
                "/distributor",
                RequireAuth::roles([Role::Distributor, Role::Manager]),
            )
    }

    /// Guard of the longest registered prefix of `path` (on segment
    /// boundaries); unknown paths proceed
    pub fn resolve(&self, path: &str, session: &SessionState) -> Navigation {
        self.guard_for(path)
            .map_or(Navigation::Proceed, |guard| guard.check(session))
    }

    fn guard_for(&self, path: &str) -> Option<&dyn RouteGuard> {
        let path = path.split(['?', '#']).next().unwrap_or(path);
        self.routes
            .iter()
            .filter(|(prefix, _)| covers(prefix, path))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, guard)| guard.as_ref())
    }
}

fn covers(prefix: &str, path: &str) -> bool {
    if prefix == "/" {
        return path == "/" || path.is_empty();
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}
