//! Event endpoints

use crate::{ApiClient, ApiResponse, ErrorKey};
use reqwest::Method;
use shared::{CreateEventRequest, RegistrationAction, UpdateEventRequest};

impl ApiClient {
    /// `GET /api/eventos`
    pub async fn get_events(&self) -> ApiResponse {
        let builder = self.request(Method::GET, "/api/eventos");
        self.send(builder, ErrorKey::Error).await
    }

    /// `GET /api/eventos?evento_id=`: event plus its sessions
    pub async fn get_event_detail(&self, event_id: i64) -> ApiResponse {
        let builder = self
            .request(Method::GET, "/api/eventos")
            .query(&[("evento_id", event_id)]);
        self.send(builder, ErrorKey::Error).await
    }

    /// `POST /api/eventos`
    pub async fn create_event(&self, request: &CreateEventRequest) -> ApiResponse {
        let builder = self.request(Method::POST, "/api/eventos").json(request);
        self.send(builder, ErrorKey::Error).await
    }

    /// `PATCH /api/eventos?id=&action=`: open or close registrations
    pub async fn patch_inscription_date(
        &self,
        event_id: i64,
        action: RegistrationAction,
    ) -> ApiResponse {
        let builder = self
            .request(Method::PATCH, "/api/eventos")
            .query(&[("id", event_id.to_string()), ("action", action.as_str().to_string())]);
        self.send(builder, ErrorKey::Error).await
    }

    /// `PUT /api/eventos`; the body names the event
    pub async fn update_event(&self, request: &UpdateEventRequest) -> ApiResponse {
        let builder = self.request(Method::PUT, "/api/eventos").json(request);
        self.send(builder, ErrorKey::Error).await
    }

    /// `DELETE /api/eventos?id=`
    pub async fn delete_event(&self, event_id: i64) -> ApiResponse {
        let builder = self
            .request(Method::DELETE, "/api/eventos")
            .query(&[("id", event_id)]);
        self.send(builder, ErrorKey::Error).await
    }

    /// `GET /api/eventos/fechas-ocupadas`: date ranges already taken
    pub async fn get_occupied_dates(&self) -> ApiResponse {
        let builder = self.request(Method::GET, "/api/eventos/fechas-ocupadas");
        self.send(builder, ErrorKey::Error).await
    }
}

#[cfg(test)]
mod tests {
    use crate::services::test_support::{client_for, offline_client};
    use serde_json::json;
    use shared::{CreateEventRequest, Event, OccupiedRange, RegistrationAction, UpdateEventRequest};
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn event_json(id: i64) -> serde_json::Value {
        json!({
            "id_evento": id,
            "nombre": "Congreso de Biología",
            "fecha_inicio": "2026-11-02T00:00:00Z",
            "fecha_fin": "2026-11-04T23:59:00Z",
            "fecha_cierre_inscripcion": "2026-10-30T23:59:00Z",
            "inscripciones_abiertas": true,
            "ubicacion": "Mérida, Venezuela"
        })
    }

    #[tokio::test]
    async fn test_get_events() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/eventos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([event_json(1), event_json(2)])))
            .mount(&server)
            .await;

        let resp = client_for(&server).get_events().await;
        let events: Vec<Event> = resp.json().unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].location().city, "Mérida");
    }

    #[tokio::test]
    async fn test_get_events_network_failure_uses_error_key() {
        let resp = offline_client().get_events().await;
        assert_eq!(resp.status, 500);
        assert_eq!(resp.data, json!({"error": "Error de red o desconocido"}));
    }

    #[tokio::test]
    async fn test_get_event_detail_query() {
        let server = MockServer::start().await;
        let mut body = event_json(5);
        body["sesiones"] = json!([{"id_sesion": 1, "titulo": "Apertura"}]);
        Mock::given(method("GET"))
            .and(path("/api/eventos"))
            .and(query_param("evento_id", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let resp = client_for(&server).get_event_detail(5).await;
        let detail: shared::EventDetail = resp.json().unwrap();
        assert_eq!(detail.event.id_evento, 5);
        assert_eq!(detail.sesiones[0].titulo, "Apertura");
    }

    #[tokio::test]
    async fn test_patch_inscription_date() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/api/eventos"))
            .and(query_param("id", "3"))
            .and(query_param("action", "cerrar"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
            .expect(1)
            .mount(&server)
            .await;

        let resp = client_for(&server)
            .patch_inscription_date(3, RegistrationAction::Cerrar)
            .await;
        assert!(resp.is_success());
    }

    #[tokio::test]
    async fn test_create_and_update_event() {
        let server = MockServer::start().await;
        let fields = CreateEventRequest {
            nombre: "Jornadas".into(),
            fecha_inicio: "02/11/2026 00:00:00".into(),
            fecha_fin: "04/11/2026 23:59:00".into(),
            fecha_cierre_inscripcion: "01/11/2026 23:59:00".into(),
            ubicacion: "Quito, Ecuador".into(),
        };

        Mock::given(method("POST"))
            .and(path("/api/eventos"))
            .and(body_json(json!({
                "nombre": "Jornadas",
                "fecha_inicio": "02/11/2026 00:00:00",
                "fecha_fin": "04/11/2026 23:59:00",
                "fecha_cierre_inscripcion": "01/11/2026 23:59:00",
                "ubicacion": "Quito, Ecuador"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id_evento": 9})))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/api/eventos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "actualizado"})))
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert_eq!(client.create_event(&fields).await.status, 201);

        let update = UpdateEventRequest { id_evento: 9, fields };
        assert_eq!(client.update_event(&update).await.status, 200);
    }

    #[tokio::test]
    async fn test_delete_event_no_content() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/eventos"))
            .and(query_param("id", "4"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let resp = client_for(&server).delete_event(4).await;
        assert_eq!(resp.status, 204);
        assert!(resp.data.is_null());
    }

    #[tokio::test]
    async fn test_get_occupied_dates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/eventos/fechas-ocupadas"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"fecha_inicio": "2026-11-02", "fecha_fin": "2026-11-04"}
            ])))
            .mount(&server)
            .await;

        let ranges: Vec<OccupiedRange> = client_for(&server).get_occupied_dates().await.json().unwrap();
        assert_eq!(ranges.len(), 1);
    }
}
