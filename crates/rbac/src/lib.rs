//! # Congress RBAC
//!
//! Client-side access control for the congress client.
//!
//! ## Components
//!
//! - `AccessResolver` - Resource access decisions (`has_resource_access`)
//! - `ResourcePermissionMap` - Resource key → permission ID map
//! - `normalize_roles` / `normalize_permissions` - Response normalizers
//! - `RouteGuard` - Route table and guard decisions

pub mod access;
pub mod directory;
pub mod guard;
pub mod normalize;
pub mod resource_map;

pub use access::{is_admin_role, is_admin_user, stored_user_role_ids, stored_user_role_names, AccessResolver};
pub use directory::RoleDirectory;
pub use guard::{find_route, Guard, GuardDecision, Route, RouteGuard, ROUTES};
pub use normalize::{normalize_permissions, normalize_roles};
pub use resource_map::ResourcePermissionMap;
