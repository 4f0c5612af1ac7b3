//! Role, permission and resource types

use serde::{Deserialize, Serialize};

/// Role name that bypasses resource checks
pub const ADMIN_ROLE: &str = "ADMIN";

/// Application-defined resource keys
pub mod resources {
    /// Creating events
    pub const CREATE_EVENT: &str = "events.create";
}

/// Role as known to the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Role {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
        }
    }

    /// Case-insensitive, whitespace-tolerant name comparison
    pub fn name_matches(&self, other: &str) -> bool {
        self.name.trim().to_lowercase() == other.trim().to_lowercase()
    }
}

/// Backend-defined capability, assignable to roles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub resource: String,
}

impl Permission {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            resource: String::new(),
        }
    }

    /// Builder: set the resource the permission guards
    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = resource.into();
        self
    }
}

/// A protected client capability, keyed by resource key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDefinition {
    pub key: String,
    pub label: String,
    pub description: String,
}

/// Resources the client knows how to gate
pub fn resource_definitions() -> Vec<ResourceDefinition> {
    vec![ResourceDefinition {
        key: resources::CREATE_EVENT.to_string(),
        label: "Crear evento".to_string(),
        description: "Permite crear eventos en la aplicacion.".to_string(),
    }]
}

/// Look up a resource definition by key
pub fn find_resource(key: &str) -> Option<ResourceDefinition> {
    resource_definitions().into_iter().find(|r| r.key == key)
}

/// Create/update body for roles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RolePayload {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Create/update body for permissions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionPayload {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
}

/// Replace the permissions attached to a role
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RolePermissionsPayload {
    pub permission_ids: Vec<i64>,
}

/// Replace the roles of a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUserRolesPayload {
    pub user_id: i64,
    pub roles: Vec<String>,
}

/// Assign a single role to a user (admin endpoint)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignRolePayload {
    pub user_id: i64,
    pub rol: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_name_matching() {
        let role = Role::new(3, " Ponente ");

        assert!(role.name_matches("PONENTE"));
        assert!(role.name_matches("ponente  "));
        assert!(!role.name_matches("ADMIN"));
    }

    #[test]
    fn test_permission_resource_defaults_to_empty() {
        let perm: Permission = serde_json::from_str(r#"{"id": 9, "name": "crear_evento"}"#).unwrap();

        assert_eq!(perm.id, 9);
        assert!(perm.resource.is_empty());
    }

    #[test]
    fn test_resource_catalog() {
        let def = find_resource(resources::CREATE_EVENT).unwrap();
        assert_eq!(def.label, "Crear evento");
        assert!(find_resource("events.delete").is_none());
    }

    #[test]
    fn test_role_permissions_payload_shape() {
        let payload = RolePermissionsPayload { permission_ids: vec![1, 2] };
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json, serde_json::json!({"permission_ids": [1, 2]}));
    }
}
