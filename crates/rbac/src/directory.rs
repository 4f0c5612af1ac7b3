//! Role directory port used by the access resolver

use api::{ApiClient, ApiResponse};
use async_trait::async_trait;

/// Source of roles and role permissions.
///
/// `ApiClient` is the production implementation; tests substitute fakes.
#[async_trait]
pub trait RoleDirectory: Send + Sync {
    /// All roles known to the backend
    async fn get_roles(&self) -> ApiResponse;

    /// Permissions attached to one role
    async fn get_role_permissions(&self, role_id: i64) -> ApiResponse;
}

#[async_trait]
impl RoleDirectory for ApiClient {
    async fn get_roles(&self) -> ApiResponse {
        ApiClient::get_roles(self).await
    }

    async fn get_role_permissions(&self, role_id: i64) -> ApiResponse {
        ApiClient::get_role_permissions(self, role_id).await
    }
}
