//! Normalizers for role and permission listings
//!
//! The backend has returned these lists in several envelopes and with
//! Spanish or English field names. Both functions accept any JSON value and
//! never fail: unrecognized shapes normalize to an empty list.

use serde_json::Value;
use shared::{Permission, Role};

/// Default name for permissions the backend sent without one
pub const DEFAULT_PERMISSION_NAME: &str = "Permiso";

/// Normalize a `GET /api/roles` body into roles
pub fn normalize_roles(payload: &Value) -> Vec<Role> {
    let Some(list) = extract_list(payload, "roles") else {
        return Vec::new();
    };

    list.iter()
        .map(|item| Role {
            id: first_id(item, &["id", "id_rol", "idRol"]).unwrap_or(0),
            name: first_text(item, &["name", "nombre_rol"]).unwrap_or_default(),
            description: first_text(item, &["description", "descripcion"]),
        })
        .collect()
}

/// Normalize a `GET /api/roles/{id}/permissions` body into permissions.
///
/// Entries without an ID get their 1-based position; entries whose ID is
/// present but unusable get 0.
pub fn normalize_permissions(payload: &Value) -> Vec<Permission> {
    let Some(list) = extract_list(payload, "permissions") else {
        return Vec::new();
    };

    list.iter()
        .enumerate()
        .map(|(index, item)| Permission {
            id: first_id(item, &["id", "id_permiso"]).unwrap_or(index as i64 + 1),
            name: first_text(item, &["name", "nombre_permiso"])
                .unwrap_or_else(|| DEFAULT_PERMISSION_NAME.to_string()),
            resource: first_text(item, &["resource", "recurso"]).unwrap_or_default(),
        })
        .collect()
}

/// Find the array inside a response envelope.
///
/// A non-null `payload` wrapper is unwrapped first. Then the root itself, the
/// collection key, or `data` is taken, whichever comes first non-null.
fn extract_list<'a>(payload: &'a Value, collection_key: &str) -> Option<&'a Vec<Value>> {
    let root = non_null(payload.get("payload")).unwrap_or(payload);
    if let Value::Array(items) = root {
        return Some(items);
    }

    non_null(root.get(collection_key))
        .or_else(|| non_null(root.get("data")))
        .and_then(Value::as_array)
}

fn non_null(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

/// ID of the first non-null key.
///
/// `None` only when every key is missing or null. A present value that is
/// not a whole number (`"abc"`, `true`, `99.5`) yields 0, which never
/// matches a mapped permission.
fn first_id(item: &Value, keys: &[&str]) -> Option<i64> {
    let value = keys.iter().find_map(|key| non_null(item.get(*key)))?;
    let id = match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(whole)),
        Value::String(s) => s.trim().parse::<f64>().ok().and_then(whole),
        _ => None,
    };
    Some(id.unwrap_or(0))
}

fn whole(value: f64) -> Option<i64> {
    let in_range = value >= i64::MIN as f64 && value <= i64::MAX as f64;
    (value.fract() == 0.0 && in_range).then_some(value as i64)
}

/// First key holding a scalar, rendered as text
fn first_text(item: &Value, keys: &[&str]) -> Option<String> {
    let value = keys.iter().find_map(|key| non_null(item.get(*key)))?;
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // ============== Envelope Tests ==============

    #[test]
    fn test_non_list_payloads_are_empty() {
        assert!(normalize_roles(&Value::Null).is_empty());
        assert!(normalize_roles(&json!("roles")).is_empty());
        assert!(normalize_roles(&json!({"roles": {"id": 1}})).is_empty());
        assert!(normalize_permissions(&json!(42)).is_empty());
        assert!(normalize_permissions(&json!({"error": "boom"})).is_empty());
    }

    #[test]
    fn test_raw_array() {
        let roles = normalize_roles(&json!([{"id": 1, "name": "ADMIN"}]));
        assert_eq!(roles, vec![Role::new(1, "ADMIN")]);
    }

    #[test]
    fn test_payload_data_envelope() {
        let body = json!({"payload": {"data": [{"id_rol": 3, "nombre_rol": "PONENTE"}]}});
        assert_eq!(normalize_roles(&body), vec![Role::new(3, "PONENTE")]);
    }

    #[test]
    fn test_data_roles_style() {
        let body = json!({"roles": [{"idRol": "4", "name": "REVISOR"}], "data": []});
        assert_eq!(normalize_roles(&body), vec![Role::new(4, "REVISOR")]);

        let body = json!({"data": [{"id": 5, "name": "ASISTENTE"}]});
        assert_eq!(normalize_roles(&body), vec![Role::new(5, "ASISTENTE")]);
    }

    #[test]
    fn test_null_payload_falls_back_to_root() {
        let body = json!({"payload": null, "permissions": [{"id": 9}]});
        assert_eq!(normalize_permissions(&body)[0].id, 9);
    }

    // ============== Field Coercion Tests ==============

    #[test]
    fn test_role_defaults() {
        let roles = normalize_roles(&json!([{}, {"id": "x", "name": 7}]));
        assert_eq!(roles[0], Role::new(0, ""));
        assert_eq!(roles[1], Role::new(0, "7"));
    }

    #[test]
    fn test_role_description_kept() {
        let roles = normalize_roles(&json!([{"id": 2, "name": "EDITOR", "descripcion": "Edita"}]));
        assert_eq!(roles[0].description.as_deref(), Some("Edita"));
    }

    #[test]
    fn test_permission_variants_and_defaults() {
        let body = json!({"permissions": [
            {"id_permiso": "99", "nombre_permiso": "Crear evento", "recurso": "events.create"},
            {"name": "Sin id"},
            {}
        ]});
        let perms = normalize_permissions(&body);

        assert_eq!(
            perms[0],
            Permission::new(99, "Crear evento").with_resource("events.create")
        );
        assert_eq!(perms[1], Permission::new(2, "Sin id"));
        assert_eq!(perms[2], Permission::new(3, DEFAULT_PERMISSION_NAME));
    }

    #[test]
    fn test_malformed_permission_ids_never_match() {
        let perms = normalize_permissions(&json!([
            {"id": "abc"},
            {"id": true},
            {"id": 99.5},
            {"id_permiso": "7.5"},
            {"id": 12.0},
            {"id": " 8 "},
            {"id": null}
        ]));
        let ids: Vec<i64> = perms.iter().map(|p| p.id).collect();

        assert_eq!(ids, vec![0, 0, 0, 0, 12, 8, 7]);
    }

    #[test]
    fn test_english_keys_win_over_spanish() {
        let perms = normalize_permissions(&json!([{"id": 1, "id_permiso": 2, "resource": "a", "recurso": "b"}]));
        assert_eq!(perms[0].id, 1);
        assert_eq!(perms[0].resource, "a");
    }
}
