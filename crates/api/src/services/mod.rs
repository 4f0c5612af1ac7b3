//! Service wrappers, one module per backend area
//!
//! Each module extends [`crate::ApiClient`] with the calls of its area.

mod auth;
mod events;
mod inscriptions;
mod notifications;
mod permissions;
mod roles;
mod sessions;
