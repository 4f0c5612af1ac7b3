//! Error types for client workflows

use shared::{UnknownResourceError, ValidationError};
use store::StoreError;
use thiserror::Error;

/// Result type alias for client workflows
pub type Result<T> = std::result::Result<T, AppError>;

/// Failures surfaced to the user (the toast message of the web client)
#[derive(Error, Debug)]
pub enum AppError {
    /// Form input rejected before any request was sent
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Backend answered with an error status
    #[error("{message} (status {status})")]
    Rejected { status: u16, message: String },

    /// Backend answered 2xx with a body of the wrong shape
    #[error("Unexpected response: {0}")]
    InvalidResponse(String),

    /// Operation needs a logged-in user
    #[error("Not logged in")]
    NotAuthenticated,

    /// Resource key outside the client's catalog
    #[error(transparent)]
    UnknownResource(#[from] UnknownResourceError),

    /// API client could not be set up
    #[error(transparent)]
    Api(#[from] api::ApiError),

    /// Local storage failure
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

impl AppError {
    /// Build a `Rejected` error from an error response
    pub fn rejected(response: &api::ApiResponse, fallback: &str) -> Self {
        AppError::Rejected {
            status: response.status,
            message: response.error_message_or(fallback),
        }
    }
}
