//! # Congress Shared
//!
//! Domain types, configuration and helpers used across all congress crates.

pub mod config;
pub mod dates;
pub mod error;
pub mod event;
pub mod inscription;
pub mod notification;
pub mod role;
pub mod text;
pub mod user;

// Re-exports
pub use config::*;
pub use error::*;
pub use event::*;
pub use inscription::*;
pub use notification::*;
pub use role::*;
pub use user::*;
