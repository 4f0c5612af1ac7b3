//! Congress API - REST service wrappers
//!
//! Every call resolves to an [`ApiResponse`] carrying the HTTP status and
//! decoded body; transport failures become a synthetic 500 instead of an
//! error value.

mod client;
mod error;
mod response;
pub mod services;

pub use client::ApiClient;
pub use error::{ApiError, Result};
pub use response::{ApiResponse, BinaryResponse, ErrorKey, NETWORK_ERROR_MESSAGE, NETWORK_ERROR_STATUS};
