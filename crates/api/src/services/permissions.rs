//! Permission and resource endpoints

use crate::{ApiClient, ApiResponse, ErrorKey};
use reqwest::Method;
use shared::PermissionPayload;

impl ApiClient {
    /// `GET /api/permissions`
    pub async fn get_permissions(&self) -> ApiResponse {
        let builder = self.request(Method::GET, "/api/permissions");
        self.send(builder, ErrorKey::Error).await
    }

    /// `POST /api/permissions`
    pub async fn create_permission(&self, payload: &PermissionPayload) -> ApiResponse {
        let builder = self.request(Method::POST, "/api/permissions").json(payload);
        self.send(builder, ErrorKey::Error).await
    }

    /// `PUT /api/permissions/{id}`
    pub async fn update_permission(&self, permission_id: i64, payload: &PermissionPayload) -> ApiResponse {
        let path = format!("/api/permissions/{}", permission_id);
        let builder = self.request(Method::PUT, &path).json(payload);
        self.send(builder, ErrorKey::Error).await
    }

    /// `DELETE /api/permissions/{id}`
    pub async fn delete_permission(&self, permission_id: i64) -> ApiResponse {
        let path = format!("/api/permissions/{}", permission_id);
        let builder = self.request(Method::DELETE, &path);
        self.send(builder, ErrorKey::Error).await
    }

    /// `GET /api/resources`
    pub async fn get_resources(&self) -> ApiResponse {
        let builder = self.request(Method::GET, "/api/resources");
        self.send(builder, ErrorKey::Error).await
    }
}

#[cfg(test)]
mod tests {
    use crate::services::test_support::client_for;
    use serde_json::json;
    use shared::PermissionPayload;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_create_permission_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/permissions"))
            .and(body_json(json!({"name": "Crear evento", "resource": "events.create"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 99})))
            .expect(1)
            .mount(&server)
            .await;

        let payload = PermissionPayload {
            name: "Crear evento".into(),
            resource: Some("events.create".into()),
        };
        let resp = client_for(&server).create_permission(&payload).await;
        assert_eq!(resp.data["id"], 99);
    }

    #[tokio::test]
    async fn test_delete_permission_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/permissions/3"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "no existe"})))
            .mount(&server)
            .await;

        let resp = client_for(&server).delete_permission(3).await;
        assert!(resp.is_error());
        assert_eq!(resp.error_message().as_deref(), Some("no existe"));
    }

    #[tokio::test]
    async fn test_get_resources() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/resources"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(["events.create"])))
            .mount(&server)
            .await;

        let resp = client_for(&server).get_resources().await;
        assert_eq!(resp.data, json!(["events.create"]));
    }
}
