//! Notification types

use serde::{Deserialize, Serialize};

/// Notification delivered by `GET /api/notificaciones`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerNotification {
    pub id_notificacion: i64,
    pub id_usuario: i64,
    #[serde(default)]
    pub id_evento: Option<i64>,
    #[serde(default)]
    pub tipo: String,
    #[serde(default)]
    pub mensaje: String,
    #[serde(default)]
    pub leida: bool,
    #[serde(default, rename = "createdAt")]
    pub created_at: String,
}

/// Notification kept in local storage (`app-notifications`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalNotification {
    pub id: String,
    pub user_id: i64,
    pub message: String,
    pub created_at: String,
    pub read: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_notification_wire_names() {
        let item = LocalNotification {
            id: "1".into(),
            user_id: 4,
            message: "Inscripción recibida".into(),
            created_at: "2026-10-17T10:00:00Z".into(),
            read: false,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["userId"], 4);
        assert_eq!(json["createdAt"], "2026-10-17T10:00:00Z");
    }

    #[test]
    fn test_server_notification_created_at() {
        let json = r#"{"id_notificacion": 1, "id_usuario": 2, "tipo": "event-date-update",
            "mensaje": "Fechas actualizadas", "leida": false, "createdAt": "2026-03-01"}"#;
        let n: ServerNotification = serde_json::from_str(json).unwrap();
        assert_eq!(n.created_at, "2026-03-01");
        assert!(n.id_evento.is_none());
    }
}
