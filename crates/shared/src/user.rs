//! Authenticated user types

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Role entry attached to a user.
///
/// The backend has shipped both plain role names and `{id, name}` records,
/// so both shapes are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RoleRef {
    Entry {
        #[serde(
            default,
            alias = "id_rol",
            alias = "idRol",
            deserialize_with = "lenient_id"
        )]
        id: Option<i64>,
        #[serde(default, alias = "nombre_rol")]
        name: String,
    },
    Name(String),
}

/// Accept a role ID as a number or a numeric string; anything else is no ID
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let id = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    };
    Ok(id)
}

impl RoleRef {
    /// Role name as cached on the client
    pub fn name(&self) -> &str {
        match self {
            RoleRef::Entry { name, .. } => name,
            RoleRef::Name(name) => name,
        }
    }

    /// Numeric role ID, when the backend sent one
    pub fn id(&self) -> Option<i64> {
        match self {
            RoleRef::Entry { id: Some(id), .. } if *id > 0 => Some(*id),
            _ => None,
        }
    }
}

/// User identity as returned by login and cached in local storage
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: i64,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub email: String,

    /// Single role name (older login responses)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Role entries (current login responses)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<RoleRef>,
}

impl User {
    /// Create a user with a single role name
    pub fn new(id: i64, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            role: None,
            roles: Vec::new(),
        }
    }

    /// Builder: add a role entry
    pub fn with_role(mut self, role: RoleRef) -> Self {
        self.roles.push(role);
        self
    }

    /// Builder: set the legacy single role name
    pub fn with_role_name(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Every non-empty role name the user carries, without duplicates
    pub fn role_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        let candidates = self
            .roles
            .iter()
            .map(|r| r.name())
            .chain(self.role.as_deref());

        for name in candidates {
            let trimmed = name.trim();
            if !trimmed.is_empty() && !names.iter().any(|n| n == trimmed) {
                names.push(trimmed.to_string());
            }
        }
        names
    }

    /// Numeric role IDs carried by the cached user, without duplicates
    pub fn role_ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = Vec::new();
        for id in self.roles.iter().filter_map(RoleRef::id) {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        ids
    }
}

/// Login request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Registration request body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role_id: Option<i64>,
}

/// Password reset request body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub email: String,
    pub new_password: String,
}

/// Successful login payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub message: String,
    pub user: User,
    pub token: String,
}

/// Row of the user administration listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRoleRow {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub roles: Vec<String>,
}
