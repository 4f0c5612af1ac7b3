//! Inscription endpoints

use crate::{ApiClient, ApiResponse, BinaryResponse, ErrorKey};
use reqwest::Method;
use shared::{
    CreateInscriptionRequest, EnrollRequest, InscriptionQuery, Preferences, ReportFormat,
    ReportQuery, ReportScheduleRequest, UpdateStatusRequest,
};

impl ApiClient {
    /// `GET /api/inscripciones` with only the filters that are set
    pub async fn get_inscriptions(&self, query: &InscriptionQuery) -> ApiResponse {
        let builder = self
            .request(Method::GET, "/api/inscripciones")
            .query(&query.to_pairs());
        self.send(builder, ErrorKey::Message).await
    }

    /// `POST /api/inscripciones`
    pub async fn create_inscription(&self, request: &CreateInscriptionRequest) -> ApiResponse {
        let builder = self.request(Method::POST, "/api/inscripciones").json(request);
        self.send(builder, ErrorKey::Message).await
    }

    /// Quick enrollment through `POST /api/inscripciones`.
    ///
    /// Older endpoint variant; network failures report an `error` key.
    pub async fn enroll(&self, request: &EnrollRequest) -> ApiResponse {
        let builder = self.request(Method::POST, "/api/inscripciones").json(request);
        self.send(builder, ErrorKey::Error).await
    }

    /// `PATCH /api/inscripciones/status`
    pub async fn update_inscription_status(&self, request: &UpdateStatusRequest) -> ApiResponse {
        let builder = self
            .request(Method::PATCH, "/api/inscripciones/status")
            .json(request);
        self.send(builder, ErrorKey::Message).await
    }

    /// `GET /api/inscripciones/historial?id=`
    pub async fn get_inscription_history(&self, inscription_id: i64) -> ApiResponse {
        let builder = self
            .request(Method::GET, "/api/inscripciones/historial")
            .query(&[("id", inscription_id)]);
        self.send(builder, ErrorKey::Message).await
    }

    /// `GET /api/inscripciones/preferencias?user_id=`
    pub async fn get_preferences(&self, user_id: i64) -> ApiResponse {
        let builder = self
            .request(Method::GET, "/api/inscripciones/preferencias")
            .query(&[("user_id", user_id)]);
        self.send(builder, ErrorKey::Message).await
    }

    /// `PUT /api/inscripciones/preferencias`
    pub async fn update_preferences(&self, preferences: &Preferences) -> ApiResponse {
        let builder = self
            .request(Method::PUT, "/api/inscripciones/preferencias")
            .json(preferences);
        self.send(builder, ErrorKey::Message).await
    }

    /// `GET /api/inscripciones/notificaciones?user_id=`
    pub async fn get_inscription_notifications(&self, user_id: i64) -> ApiResponse {
        let builder = self
            .request(Method::GET, "/api/inscripciones/notificaciones")
            .query(&[("user_id", user_id)]);
        self.send(builder, ErrorKey::Message).await
    }

    /// `GET /api/inscripciones/reportes`
    pub async fn get_reports(&self, query: &ReportQuery) -> ApiResponse {
        let builder = self
            .request(Method::GET, "/api/inscripciones/reportes")
            .query(&query.to_pairs());
        self.send(builder, ErrorKey::Message).await
    }

    /// Report export as CSV or PDF bytes
    pub async fn download_report(&self, query: &ReportQuery, format: ReportFormat) -> BinaryResponse {
        let mut pairs = query.to_pairs();
        pairs.push(("format", format.as_str().to_string()));
        let builder = self
            .request(Method::GET, "/api/inscripciones/reportes")
            .query(&pairs);
        self.send_binary(builder).await
    }

    /// Payment receipt of an inscription
    pub async fn download_receipt(&self, inscription_id: i64) -> BinaryResponse {
        let builder = self
            .request(Method::GET, "/api/inscripciones/comprobante")
            .query(&[("id", inscription_id)]);
        self.send_binary(builder).await
    }

    /// `POST /api/inscripciones/reportes/schedule`
    pub async fn schedule_report(&self, request: &ReportScheduleRequest) -> ApiResponse {
        let builder = self
            .request(Method::POST, "/api/inscripciones/reportes/schedule")
            .json(request);
        self.send(builder, ErrorKey::Message).await
    }

    /// `GET /api/inscripciones/reportes/schedule`
    pub async fn get_report_schedules(&self) -> ApiResponse {
        let builder = self.request(Method::GET, "/api/inscripciones/reportes/schedule");
        self.send(builder, ErrorKey::Message).await
    }
}
