//! Server notification endpoints

use crate::{ApiClient, ApiResponse, ErrorKey};
use reqwest::Method;

impl ApiClient {
    /// `GET /api/notificaciones?userId=`
    pub async fn fetch_notifications(&self, user_id: i64) -> ApiResponse {
        let builder = self
            .request(Method::GET, "/api/notificaciones")
            .query(&[("userId", user_id)]);
        self.send(builder, ErrorKey::Error).await
    }

    /// `PATCH /api/notificaciones/{id}/leida`
    pub async fn mark_notification_as_read(&self, notification_id: i64) -> ApiResponse {
        let path = format!("/api/notificaciones/{}/leida", notification_id);
        let builder = self.request(Method::PATCH, &path);
        self.send(builder, ErrorKey::Error).await
    }
}

#[cfg(test)]
mod tests {
    use crate::services::test_support::client_for;
    use serde_json::json;
    use shared::ServerNotification;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_notifications() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/notificaciones"))
            .and(query_param("userId", "4"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "id_notificacion": 1, "id_usuario": 4, "tipo": "evento",
                "mensaje": "Nuevo evento", "leida": false, "createdAt": "2026-10-17T10:00:00Z"
            }])))
            .mount(&server)
            .await;

        let items: Vec<ServerNotification> =
            client_for(&server).fetch_notifications(4).await.json().unwrap();
        assert_eq!(items[0].mensaje, "Nuevo evento");
        assert!(!items[0].leida);
    }

    #[tokio::test]
    async fn test_mark_notification_as_read() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/api/notificaciones/9/leida"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        assert!(client_for(&server).mark_notification_as_read(9).await.is_success());
    }
}
