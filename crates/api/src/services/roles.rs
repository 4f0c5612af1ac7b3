//! Role and user-role endpoints

use crate::{ApiClient, ApiResponse, ErrorKey};
use reqwest::Method;
use shared::{AssignRolePayload, RolePayload, RolePermissionsPayload, UpdateUserRolesPayload, ADMIN_ROLE};

impl ApiClient {
    /// `GET /api/users?limit=&offset=`
    pub async fn get_users(&self, limit: u32, offset: u32) -> ApiResponse {
        let builder = self
            .request(Method::GET, "/api/users")
            .query(&[("limit", limit), ("offset", offset)]);
        self.send(builder, ErrorKey::Error).await
    }

    /// `GET /api/roles`
    pub async fn get_roles(&self) -> ApiResponse {
        let builder = self.request(Method::GET, "/api/roles");
        self.send(builder, ErrorKey::Error).await
    }

    /// `POST /api/roles`
    pub async fn create_role(&self, payload: &RolePayload) -> ApiResponse {
        let builder = self.request(Method::POST, "/api/roles").json(payload);
        self.send(builder, ErrorKey::Error).await
    }

    /// `PUT /api/roles/{id}`
    pub async fn update_role(&self, role_id: i64, payload: &RolePayload) -> ApiResponse {
        let path = format!("/api/roles/{}", role_id);
        let builder = self.request(Method::PUT, &path).json(payload);
        self.send(builder, ErrorKey::Error).await
    }

    /// `DELETE /api/roles/{id}`
    pub async fn delete_role(&self, role_id: i64) -> ApiResponse {
        let path = format!("/api/roles/{}", role_id);
        let builder = self.request(Method::DELETE, &path);
        self.send(builder, ErrorKey::Error).await
    }

    /// `GET /api/roles/{id}/permissions`
    pub async fn get_role_permissions(&self, role_id: i64) -> ApiResponse {
        let path = format!("/api/roles/{}/permissions", role_id);
        let builder = self.request(Method::GET, &path);
        self.send(builder, ErrorKey::Error).await
    }

    /// `PUT /api/roles/{id}/permissions` with `{"permission_ids": [...]}`
    pub async fn update_role_permissions(&self, role_id: i64, permission_ids: &[i64]) -> ApiResponse {
        let path = format!("/api/roles/{}/permissions", role_id);
        let payload = RolePermissionsPayload {
            permission_ids: permission_ids.to_vec(),
        };
        let builder = self.request(Method::PUT, &path).json(&payload);
        self.send(builder, ErrorKey::Error).await
    }

    /// `PUT /api/user/assign-roles`; the backend expects an `X-Role: ADMIN` header
    pub async fn update_user_roles(&self, payload: &UpdateUserRolesPayload) -> ApiResponse {
        let builder = self
            .request(Method::PUT, "/api/user/assign-roles")
            .header("X-Role", ADMIN_ROLE)
            .json(payload);
        self.send(builder, ErrorKey::Error).await
    }

    /// `PUT /api/admin/assign-role`
    pub async fn assign_role(&self, payload: &AssignRolePayload) -> ApiResponse {
        let builder = self
            .request(Method::PUT, "/api/admin/assign-role")
            .json(payload);
        self.send(builder, ErrorKey::Error).await
    }
}

#[cfg(test)]
mod tests {
    use crate::services::test_support::{client_for, offline_client};
    use serde_json::json;
    use shared::{RolePayload, UpdateUserRolesPayload, UserRoleRow};
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_get_users_paging() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/users"))
            .and(query_param("limit", "20"))
            .and(query_param("offset", "40"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "name": "Ana", "roles": ["ADMIN"]}
            ])))
            .mount(&server)
            .await;

        let rows: Vec<UserRoleRow> = client_for(&server).get_users(20, 40).await.json().unwrap();
        assert_eq!(rows[0].roles, vec!["ADMIN"]);
    }

    #[tokio::test]
    async fn test_role_crud_paths() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/roles"))
            .and(body_json(json!({"name": "REVISOR"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 5, "name": "REVISOR"})))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/api/roles/5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 5})))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/roles/5"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let payload = RolePayload {
            name: "REVISOR".into(),
            description: None,
        };
        assert_eq!(client.create_role(&payload).await.status, 201);
        assert_eq!(client.update_role(5, &payload).await.status, 200);
        assert_eq!(client.delete_role(5).await.status, 204);
    }

    #[tokio::test]
    async fn test_update_role_permissions_body() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/roles/10/permissions"))
            .and(body_json(json!({"permission_ids": [99, 100]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let resp = client_for(&server).update_role_permissions(10, &[99, 100]).await;
        assert!(resp.is_success());
    }

    #[tokio::test]
    async fn test_update_user_roles_sends_admin_header() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/user/assign-roles"))
            .and(header("X-Role", "ADMIN"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let payload = UpdateUserRolesPayload {
            user_id: 7,
            roles: vec!["PONENTE".into()],
        };
        assert!(client_for(&server).update_user_roles(&payload).await.is_success());
    }

    #[tokio::test]
    async fn test_get_roles_offline() {
        let resp = offline_client().get_roles().await;
        assert_eq!(resp.status, 500);
        assert_eq!(resp.data, json!({"error": "Error de red o desconocido"}));
    }
}
