//! Inscription (participant enrollment) types

use crate::error::ValidationError;
use crate::text::is_valid_email;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Largest payment receipt accepted, in bytes
pub const MAX_RECEIPT_BYTES: usize = 2 * 1024 * 1024;

/// Receipt content types accepted for upload
pub const ALLOWED_RECEIPT_TYPES: &[&str] =
    &["application/pdf", "image/png", "image/jpeg", "image/jpg"];

/// Enrollment record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inscription {
    pub id_inscripcion: i64,
    pub id_evento: i64,
    #[serde(default)]
    pub evento_nombre: String,
    pub id_usuario: i64,
    #[serde(default)]
    pub nombre_participante: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub afiliacion: String,
    #[serde(default)]
    pub comprobante_pago: Option<String>,
    #[serde(default)]
    pub fecha_inscripcion: String,
    #[serde(default)]
    pub fecha_limite_pago: String,
    #[serde(default)]
    pub estado: String,
}

/// Body of `POST /api/inscripciones`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateInscriptionRequest {
    pub id_evento: i64,
    pub id_usuario: i64,
    pub nombre_participante: String,
    pub email: String,
    pub afiliacion: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comprobante_pago: Option<String>,
}

impl CreateInscriptionRequest {
    /// Trim the form fields and check them.
    ///
    /// Names need more than two characters, affiliations more than one.
    pub fn validated(mut self) -> Result<Self, ValidationError> {
        self.nombre_participante = self.nombre_participante.trim().to_string();
        self.email = self.email.trim().to_string();
        self.afiliacion = self.afiliacion.trim().to_string();

        if self.nombre_participante.chars().count() <= 2 {
            return Err(ValidationError::new("nombre_participante", "must have more than 2 characters"));
        }
        if self.afiliacion.chars().count() <= 1 {
            return Err(ValidationError::new("afiliacion", "must have more than 1 character"));
        }
        if !is_valid_email(&self.email) {
            return Err(ValidationError::new("email", "is not a valid address"));
        }
        Ok(self)
    }
}

/// Check a payment receipt before encoding it into the request
pub fn validate_receipt(content_type: &str, size: usize) -> Result<(), ValidationError> {
    if !ALLOWED_RECEIPT_TYPES.contains(&content_type) {
        return Err(ValidationError::new(
            "comprobante_pago",
            "only PDF or PNG/JPG images are allowed",
        ));
    }
    if size > MAX_RECEIPT_BYTES {
        return Err(ValidationError::new("comprobante_pago", "must not exceed 2MB"));
    }
    Ok(())
}

/// Body of the legacy quick enrollment (`inscribirEvento`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollRequest {
    pub id_usuario: i64,
    pub id_evento: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comentario: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estado_pago: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comprobante: Option<String>,
}

/// Filters for `GET /api/inscripciones`; unset fields are not sent
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InscriptionQuery {
    pub evento_id: Option<i64>,
    pub usuario_id: Option<i64>,
    pub search_term: Option<String>,
    pub country_term: Option<String>,
    pub city_term: Option<String>,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
}

impl InscriptionQuery {
    /// Query pairs in the order the backend documents them
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(id) = self.evento_id.filter(|id| *id != 0) {
            pairs.push(("evento_id", id.to_string()));
        }
        if let Some(id) = self.usuario_id.filter(|id| *id != 0) {
            pairs.push(("usuario_id", id.to_string()));
        }
        let text = [
            ("searchTerm", &self.search_term),
            ("countryTerm", &self.country_term),
            ("cityTerm", &self.city_term),
            ("fromDate", &self.from_date),
            ("toDate", &self.to_date),
        ];
        for (key, value) in text {
            if let Some(v) = value.as_deref().filter(|v| !v.is_empty()) {
                pairs.push((key, v.to_string()));
            }
        }
        pairs
    }
}

/// Body of `PATCH /api/inscripciones/status`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub id_inscripcion: i64,
    pub estado: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nota: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
}

/// Notification preferences of a participant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    pub id_usuario: i64,
    pub frecuencia: String,
    pub tipos: String,
    pub habilitado: bool,
}

/// Notification sent about an inscription
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InscriptionNotification {
    pub id_notificacion: i64,
    pub id_usuario: i64,
    #[serde(default)]
    pub id_inscripcion: Option<i64>,
    pub canal: String,
    pub asunto: String,
    pub mensaje: String,
    pub fecha_envio: String,
    pub estado: String,
}

/// Aggregated inscription report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub total: i64,
    #[serde(default)]
    pub por_estado: HashMap<String, i64>,
    #[serde(default)]
    pub registros: Vec<Inscription>,
}

/// Filters for `GET /api/inscripciones/reportes`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportQuery {
    pub evento_id: Option<i64>,
    pub estado: Option<String>,
}

impl ReportQuery {
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(id) = self.evento_id {
            pairs.push(("evento_id", id.to_string()));
        }
        if let Some(estado) = self.estado.as_deref().filter(|e| !e.is_empty()) {
            pairs.push(("estado", estado.to_string()));
        }
        pairs
    }
}

/// Export format for report downloads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Csv,
    Pdf,
}

impl ReportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportFormat::Csv => "csv",
            ReportFormat::Pdf => "pdf",
        }
    }
}

/// Body of `POST /api/inscripciones/reportes/schedule`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportScheduleRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_evento: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estado: Option<String>,
    pub frecuencia: String,
    pub formato: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creado_por: Option<String>,
}

/// Scheduled report as stored by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSchedule {
    pub id_reporte: i64,
    #[serde(default)]
    pub id_evento: Option<i64>,
    #[serde(default)]
    pub estado: Option<String>,
    pub frecuencia: String,
    pub formato: String,
    #[serde(default)]
    pub creado_por: Option<String>,
    pub creado_en: String,
}
