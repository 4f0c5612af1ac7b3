//! Route table and guard decisions

use crate::access::AccessResolver;
use shared::resources;

/// Home route, target of admin and resource redirects
pub const HOME: &str = "/";
/// Login route, target of unauthenticated redirects
pub const LOGIN: &str = "/login";

/// What a route requires before it can be shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    /// Open to everyone
    Public,
    /// Authenticated users
    Protected,
    /// Authenticated administrators
    Admin,
    /// Authenticated users granted the resource
    Resource(&'static str),
}

/// Outcome of evaluating a guard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(&'static str),
}

/// One client route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub path: &'static str,
    pub guard: Guard,
}

/// Every route of the client, most specific first
pub const ROUTES: &[Route] = &[
    Route { path: "/", guard: Guard::Protected },
    Route { path: "/login", guard: Guard::Public },
    Route { path: "/register", guard: Guard::Public },
    Route { path: "/events", guard: Guard::Protected },
    Route { path: "/events/new", guard: Guard::Resource(resources::CREATE_EVENT) },
    Route { path: "/events/:id", guard: Guard::Protected },
    Route { path: "/roleManagement", guard: Guard::Admin },
    Route { path: "/permissionManagement", guard: Guard::Admin },
    Route { path: "/inscriptions", guard: Guard::Protected },
    Route { path: "/inscriptions/mine", guard: Guard::Protected },
    Route { path: "/inscriptions/admin", guard: Guard::Protected },
    Route { path: "/inscriptions/reports", guard: Guard::Protected },
];

impl Route {
    /// Whether `path` matches this route; `:name` segments match any value
    pub fn matches(&self, path: &str) -> bool {
        let expected: Vec<&str> = segments(self.path).collect();
        let actual: Vec<&str> = segments(path).collect();

        expected.len() == actual.len()
            && expected
                .iter()
                .zip(&actual)
                .all(|(e, a)| e.starts_with(':') || e == a)
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('?')
        .next()
        .unwrap_or_default()
        .split('/')
        .filter(|s| !s.is_empty())
}

/// Find the route serving `path`
pub fn find_route(path: &str) -> Option<&'static Route> {
    ROUTES.iter().find(|route| route.matches(path))
}

/// Evaluates route guards for the current session
pub struct RouteGuard<'a> {
    resolver: &'a AccessResolver,
}

impl<'a> RouteGuard<'a> {
    pub fn new(resolver: &'a AccessResolver) -> Self {
        Self { resolver }
    }

    /// Decide whether `guard` lets the current user through
    pub async fn check(&self, guard: Guard, authenticated: bool) -> GuardDecision {
        match guard {
            Guard::Public => GuardDecision::Allow,
            _ if !authenticated => GuardDecision::Redirect(LOGIN),
            Guard::Protected => GuardDecision::Allow,
            Guard::Admin if self.resolver.is_admin() => GuardDecision::Allow,
            Guard::Admin => GuardDecision::Redirect(HOME),
            Guard::Resource(key) if self.resolver.has_resource_access(key).await => {
                GuardDecision::Allow
            }
            Guard::Resource(_) => GuardDecision::Redirect(HOME),
        }
    }

    /// Decide for a concrete path; unknown paths send the user to login
    pub async fn check_path(&self, path: &str, authenticated: bool) -> GuardDecision {
        match find_route(path) {
            Some(route) => self.check(route.guard, authenticated).await,
            None => GuardDecision::Redirect(LOGIN),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::RoleDirectory;
    use api::ApiResponse;
    use async_trait::async_trait;
    use serde_json::json;
    use shared::{NullLogger, RoleRef, User};
    use std::sync::Arc;
    use store::{keys, MemoryStore};

    struct NoRoles;

    #[async_trait]
    impl RoleDirectory for NoRoles {
        async fn get_roles(&self) -> ApiResponse {
            ApiResponse::new(200, json!([]))
        }

        async fn get_role_permissions(&self, _role_id: i64) -> ApiResponse {
            ApiResponse::new(200, json!([]))
        }
    }

    fn resolver_for(role: &str) -> AccessResolver {
        let store = MemoryStore::new();
        let user = User::new(1, "Ana", "ana@uni.edu").with_role(RoleRef::Name(role.into()));
        keys::save_session(&store, "tok", &user).unwrap();
        AccessResolver::new(Arc::new(store), Arc::new(NoRoles), Arc::new(NullLogger))
    }

    // ============== Route Matching Tests ==============

    #[test]
    fn test_find_route() {
        assert_eq!(find_route("/").unwrap().guard, Guard::Protected);
        assert_eq!(
            find_route("/events/new").unwrap().guard,
            Guard::Resource("events.create")
        );
        assert_eq!(find_route("/events/42").unwrap().path, "/events/:id");
        assert_eq!(find_route("/roleManagement/").unwrap().guard, Guard::Admin);
        assert_eq!(find_route("/inscriptions/mine?x=1").unwrap().path, "/inscriptions/mine");
        assert!(find_route("/events/1/edit").is_none());
        assert!(find_route("/nowhere").is_none());
    }

    #[test]
    fn test_only_auth_screens_are_public() {
        let public: Vec<&str> = ROUTES
            .iter()
            .filter(|r| r.guard == Guard::Public)
            .map(|r| r.path)
            .collect();
        assert_eq!(public, vec!["/login", "/register"]);
    }

    // ============== Guard Decision Tests ==============

    #[tokio::test]
    async fn test_unauthenticated_redirects_to_login() {
        let resolver = resolver_for("ADMIN");
        let guard = RouteGuard::new(&resolver);

        assert_eq!(guard.check_path("/login", false).await, GuardDecision::Allow);
        assert_eq!(guard.check_path("/events", false).await, GuardDecision::Redirect(LOGIN));
        assert_eq!(
            guard.check_path("/roleManagement", false).await,
            GuardDecision::Redirect(LOGIN)
        );
        assert_eq!(guard.check_path("/nowhere", true).await, GuardDecision::Redirect(LOGIN));
    }

    #[tokio::test]
    async fn test_admin_routes() {
        let admin = resolver_for("admin");
        let guard = RouteGuard::new(&admin);
        assert_eq!(guard.check_path("/roleManagement", true).await, GuardDecision::Allow);
        assert_eq!(guard.check_path("/events/new", true).await, GuardDecision::Allow);

        let speaker = resolver_for("PONENTE");
        let guard = RouteGuard::new(&speaker);
        assert_eq!(
            guard.check_path("/permissionManagement", true).await,
            GuardDecision::Redirect(HOME)
        );
        assert_eq!(guard.check_path("/events/new", true).await, GuardDecision::Redirect(HOME));
        assert_eq!(guard.check_path("/events/7", true).await, GuardDecision::Allow);
    }
}
