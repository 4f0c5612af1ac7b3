//! Event and session types

use crate::dates::{format_date_with_time, parse_flexible_date};
use crate::error::ValidationError;
use crate::text::{format_location, parse_location_parts, LocationParts};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Event as listed by `GET /api/eventos`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id_evento: i64,
    pub nombre: String,
    pub fecha_inicio: String,
    pub fecha_fin: String,
    #[serde(default)]
    pub fecha_cierre_inscripcion: String,
    #[serde(default)]
    pub inscripciones_abiertas: bool,
    #[serde(default)]
    pub ubicacion: String,
}

impl Event {
    /// First day of the event, if the backend date parses
    pub fn start_date(&self) -> Option<NaiveDate> {
        parse_flexible_date(&self.fecha_inicio)
    }

    /// Last day of the event, if the backend date parses
    pub fn end_date(&self) -> Option<NaiveDate> {
        parse_flexible_date(&self.fecha_fin)
    }

    /// Registration closing day, if set and parseable
    pub fn registration_close_date(&self) -> Option<NaiveDate> {
        parse_flexible_date(&self.fecha_cierre_inscripcion)
    }

    pub fn location(&self) -> LocationParts {
        parse_location_parts(&self.ubicacion)
    }

    /// Registration is possible: open flag set and closing day not passed
    pub fn accepts_registrations(&self, today: NaiveDate) -> bool {
        self.inscripciones_abiertas
            && self
                .registration_close_date()
                .map(|close| close >= today)
                .unwrap_or(true)
    }
}

/// Event plus its scheduled sessions (`GET /api/eventos?evento_id=`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDetail {
    #[serde(flatten)]
    pub event: Event,
    #[serde(default)]
    pub sesiones: Vec<SessionInfo>,
}

/// Session inside an event detail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionInfo {
    #[serde(default)]
    pub id_sesion: i64,
    #[serde(default)]
    pub titulo: String,
    #[serde(default)]
    pub descripcion: String,
    #[serde(default)]
    pub fecha_inicio: String,
    #[serde(default)]
    pub fecha_fin: String,
    #[serde(default)]
    pub ponente: Option<String>,
}

/// Body of `POST /api/eventos`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub nombre: String,
    pub fecha_inicio: String,
    pub fecha_fin: String,
    pub fecha_cierre_inscripcion: String,
    pub ubicacion: String,
}

/// Body of `PUT /api/eventos`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateEventRequest {
    pub id_evento: i64,
    #[serde(flatten)]
    pub fields: CreateEventRequest,
}

/// Date range already taken by another event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OccupiedRange {
    pub fecha_inicio: String,
    pub fecha_fin: String,
}

impl OccupiedRange {
    /// Whether `day` falls inside this range (inclusive)
    pub fn contains(&self, day: NaiveDate) -> bool {
        match (
            parse_flexible_date(&self.fecha_inicio),
            parse_flexible_date(&self.fecha_fin),
        ) {
            (Some(from), Some(to)) => from <= day && day <= to,
            _ => false,
        }
    }
}

/// Open or close registrations for an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationAction {
    Abrir,
    Cerrar,
}

impl RegistrationAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationAction::Abrir => "abrir",
            RegistrationAction::Cerrar => "cerrar",
        }
    }
}

/// Event form contents before they become a request body
#[derive(Debug, Clone)]
pub struct EventDraft {
    pub name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub registration_close: NaiveDate,
    pub city: String,
    pub country: String,
}

impl EventDraft {
    /// Validate the form and build the backend payload.
    ///
    /// The event spans from 00:00 of the first day to 23:59 of the last;
    /// registrations close at 23:59 of the chosen day, which must not fall
    /// after the event's last day.
    pub fn into_request(self) -> Result<CreateEventRequest, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::new("nombre", "is required"));
        }
        if self.city.trim().is_empty() || self.country.trim().is_empty() {
            return Err(ValidationError::new("ubicacion", "city and country are required"));
        }
        if self.end < self.start {
            return Err(ValidationError::new("fecha_fin", "must not precede the start date"));
        }
        if self.registration_close > self.end {
            return Err(ValidationError::new(
                "fecha_cierre_inscripcion",
                "must fall within the event dates",
            ));
        }

        Ok(CreateEventRequest {
            nombre: name.to_string(),
            fecha_inicio: format_date_with_time(self.start, 0, 0),
            fecha_fin: format_date_with_time(self.end, 23, 59),
            fecha_cierre_inscripcion: format_date_with_time(self.registration_close, 23, 59),
            ubicacion: format_location(&self.city, &self.country),
        })
    }
}

/// Longest session title the backend accepts
pub const MAX_SESSION_TITLE: usize = 100;

/// Body of `POST /api/sesiones?evento=`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateSessionRequest {
    pub titulo: String,
    #[serde(default)]
    pub descripcion: String,
    pub fecha_inicio: String,
    pub fecha_fin: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ponente: Option<String>,
}

/// Session form contents
#[derive(Debug, Clone)]
pub struct SessionDraft {
    pub title: String,
    pub description: String,
    pub day: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub speaker: Option<String>,
}

impl SessionDraft {
    /// Validate the form and build the backend payload (RFC 3339 timestamps)
    pub fn into_request(self) -> Result<CreateSessionRequest, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::new("titulo", "is required"));
        }
        if title.chars().count() > MAX_SESSION_TITLE {
            return Err(ValidationError::new(
                "titulo",
                format!("must be at most {} characters", MAX_SESSION_TITLE),
            ));
        }
        if self.end <= self.start {
            return Err(ValidationError::new("fecha_fin", "must be after the start time"));
        }

        let start = self.day.and_time(self.start).and_utc();
        let end = self.day.and_time(self.end).and_utc();

        Ok(CreateSessionRequest {
            titulo: title.to_string(),
            descripcion: self.description.trim().to_string(),
            fecha_inicio: start.to_rfc3339(),
            fecha_fin: end.to_rfc3339(),
            ponente: self.speaker.filter(|s| !s.trim().is_empty()),
        })
    }
}
