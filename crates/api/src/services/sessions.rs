//! Session endpoints

use crate::{ApiClient, ApiResponse, ErrorKey};
use reqwest::Method;
use shared::CreateSessionRequest;

impl ApiClient {
    /// `POST /api/sesiones?evento=`
    pub async fn create_session(&self, event_id: i64, request: &CreateSessionRequest) -> ApiResponse {
        let builder = self
            .request(Method::POST, "/api/sesiones")
            .query(&[("evento", event_id)])
            .json(request);
        self.send(builder, ErrorKey::Error).await
    }

    /// `GET /api/sesiones/ponibles?sesion_id=`: speakers free for a session
    pub async fn get_available_speakers(&self, session_id: i64) -> ApiResponse {
        let builder = self
            .request(Method::GET, "/api/sesiones/ponibles")
            .query(&[("sesion_id", session_id)]);
        self.send(builder, ErrorKey::Error).await
    }
}

#[cfg(test)]
mod tests {
    use crate::services::test_support::client_for;
    use serde_json::json;
    use shared::CreateSessionRequest;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_create_session_targets_event() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/sesiones"))
            .and(query_param("evento", "12"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id_sesion": 1})))
            .expect(1)
            .mount(&server)
            .await;

        let request = CreateSessionRequest {
            titulo: "Apertura".into(),
            descripcion: String::new(),
            fecha_inicio: "2026-11-02T09:00:00+00:00".into(),
            fecha_fin: "2026-11-02T10:00:00+00:00".into(),
            ponente: None,
        };
        let resp = client_for(&server).create_session(12, &request).await;
        assert_eq!(resp.status, 201);
    }

    #[tokio::test]
    async fn test_available_speakers_plain_text_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/sesiones/ponibles"))
            .and(query_param("sesion_id", "3"))
            .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
            .mount(&server)
            .await;

        let resp = client_for(&server).get_available_speakers(3).await;
        assert_eq!(resp.status, 500);
        assert_eq!(resp.error_message().as_deref(), Some("internal error"));
    }
}
