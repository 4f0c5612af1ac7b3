//! AccessResolver - resource-level access decisions
//!
//! Answers "may the current user use this resource?" from the cached user,
//! the resource-permission map and the backend's role permissions. This is
//! UI gating only; the backend enforces its own authorization.

use crate::directory::RoleDirectory;
use crate::normalize::{normalize_permissions, normalize_roles};
use crate::resource_map::ResourcePermissionMap;
use futures::future::join_all;
use shared::{Logger, ADMIN_ROLE};
use std::sync::Arc;
use store::{keys, LocalStore};

/// Whether a role name is the administrator role (trimmed, any case)
pub fn is_admin_role(role: &str) -> bool {
    role.trim().eq_ignore_ascii_case(ADMIN_ROLE)
}

/// Role names of the cached user
pub fn stored_user_role_names(store: &dyn LocalStore) -> Vec<String> {
    keys::stored_user(store)
        .map(|user| user.role_names())
        .unwrap_or_default()
}

/// Numeric role IDs of the cached user
pub fn stored_user_role_ids(store: &dyn LocalStore) -> Vec<i64> {
    keys::stored_user(store)
        .map(|user| user.role_ids())
        .unwrap_or_default()
}

/// Whether the cached user carries the administrator role
pub fn is_admin_user(store: &dyn LocalStore) -> bool {
    stored_user_role_names(store).iter().any(|name| is_admin_role(name))
}

/// Resolves resource access for the user cached in the store
pub struct AccessResolver {
    store: Arc<dyn LocalStore>,
    directory: Arc<dyn RoleDirectory>,
    logger: Arc<dyn Logger>,
}

impl AccessResolver {
    pub fn new(
        store: Arc<dyn LocalStore>,
        directory: Arc<dyn RoleDirectory>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            store,
            directory,
            logger,
        }
    }

    /// Whether the cached user is an administrator
    pub fn is_admin(&self) -> bool {
        is_admin_user(self.store.as_ref())
    }

    /// Decide whether the current user may access `resource_key`.
    ///
    /// Admins pass without any network call. Everyone else needs a mapped
    /// permission ID that one of their roles carries. Every failure along
    /// the way resolves to `false`; nothing is cached between calls.
    pub async fn has_resource_access(&self, resource_key: &str) -> bool {
        let user = keys::stored_user(self.store.as_ref());
        let role_names = user.as_ref().map(|u| u.role_names()).unwrap_or_default();

        if role_names.iter().any(|name| is_admin_role(name)) {
            self.logger
                .debug(&format!("Admin access granted to '{}'", resource_key), None);
            return true;
        }

        let map = ResourcePermissionMap::load(self.store.as_ref());
        let Some(required) = map.get(resource_key) else {
            self.logger.debug(
                &format!("Resource '{}' has no mapped permission", resource_key),
                None,
            );
            return false;
        };

        let cached_ids = user.as_ref().map(|u| u.role_ids()).unwrap_or_default();
        let role_ids = if cached_ids.is_empty() {
            self.resolve_role_ids(&role_names).await
        } else {
            cached_ids
        };

        if role_ids.is_empty() {
            self.logger.debug(
                &format!("No role IDs resolved while checking '{}'", resource_key),
                None,
            );
            return false;
        }

        let responses = join_all(
            role_ids
                .iter()
                .map(|id| self.directory.get_role_permissions(*id)),
        )
        .await;

        let granted = responses
            .iter()
            .filter(|resp| !resp.is_error())
            .any(|resp| normalize_permissions(&resp.data).iter().any(|p| p.id == required));

        self.logger.debug(
            &format!(
                "Access to '{}' (permission {}) {}",
                resource_key,
                required,
                if granted { "granted" } else { "denied" }
            ),
            None,
        );
        granted
    }

    /// Match cached role names against the backend's role list.
    ///
    /// Every role whose name matches is kept, so names differing only by
    /// case or whitespace all contribute their IDs.
    async fn resolve_role_ids(&self, role_names: &[String]) -> Vec<i64> {
        if role_names.is_empty() {
            return Vec::new();
        }

        let response = self.directory.get_roles().await;
        if response.is_error() {
            self.logger.warn(
                &format!("Role lookup failed with status {}", response.status),
                None,
            );
            return Vec::new();
        }

        let mut ids = Vec::new();
        for role in normalize_roles(&response.data) {
            if role.id > 0
                && role_names.iter().any(|name| role.name_matches(name))
                && !ids.contains(&role.id)
            {
                ids.push(role.id);
            }
        }
        ids
    }
}
