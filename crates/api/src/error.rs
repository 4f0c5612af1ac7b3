//! Error types for the API client

use thiserror::Error;

/// Result type alias for client construction
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors raised while setting up the client.
///
/// Requests themselves never fail; see [`crate::ApiResponse`].
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid base URL or other configuration
    #[error("Configuration error: {0}")]
    Config(String),
}
