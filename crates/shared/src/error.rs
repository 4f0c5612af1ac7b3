//! Error types for the congress client

use thiserror::Error;

/// Error thrown when a form or payload fails client-side validation
#[derive(Debug, Error)]
#[error("Invalid {field}: {reason}")]
pub struct ValidationError {
    pub field: String,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Error thrown when a resource key is not known to the client
#[derive(Debug, Error)]
#[error("Resource '{resource_key}' is not defined. Known resources: {}", known.join(", "))]
pub struct UnknownResourceError {
    pub resource_key: String,
    pub known: Vec<String>,
}

/// General client error type
#[derive(Debug, Error)]
pub enum CongressError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    UnknownResource(#[from] UnknownResourceError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, CongressError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_message() {
        let err = ValidationError::new("email", "must contain '@'");
        assert_eq!(err.to_string(), "Invalid email: must contain '@'");
    }

    #[test]
    fn test_unknown_resource_lists_known_keys() {
        let err: CongressError = UnknownResourceError {
            resource_key: "events.delete".to_string(),
            known: vec!["events.create".to_string()],
        }
        .into();

        assert_eq!(
            err.to_string(),
            "Resource 'events.delete' is not defined. Known resources: events.create"
        );
    }
}
