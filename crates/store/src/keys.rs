//! Storage keys and typed accessors

use crate::{LocalStore, StoreResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::User;

/// Bearer token of the logged-in user
pub const AUTH_TOKEN: &str = "auth-token";
/// Cached `User` JSON
pub const AUTH_USER: &str = "auth-user";
/// Unix millis of the last recorded activity
pub const AUTH_LAST_ACTIVITY: &str = "auth-last-activity";
/// Resource key → permission ID map
pub const RESOURCE_PERMISSIONS: &str = "resource-permissions";
/// Locally generated notifications
pub const APP_NOTIFICATIONS: &str = "app-notifications";

/// Read and decode a JSON value.
///
/// Missing keys, read failures and undecodable values all read as `None`;
/// callers treat stored state as a best-effort cache.
pub fn read_json<T: DeserializeOwned>(store: &dyn LocalStore, key: &str) -> Option<T> {
    let raw = match store.get_item(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to read local store");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!(key, error = %e, "ignoring undecodable stored value");
            None
        }
    }
}

/// Encode and write a JSON value
pub fn write_json<T: Serialize + ?Sized>(
    store: &dyn LocalStore,
    key: &str,
    value: &T,
) -> StoreResult<()> {
    let raw = serde_json::to_string(value)?;
    store.set_item(key, &raw)
}

/// Stored bearer token, ignoring blanks
pub fn stored_token(store: &dyn LocalStore) -> Option<String> {
    store
        .get_item(AUTH_TOKEN)
        .ok()
        .flatten()
        .filter(|t| !t.trim().is_empty())
}

/// Cached user, if present and decodable
pub fn stored_user(store: &dyn LocalStore) -> Option<User> {
    read_json(store, AUTH_USER)
}

/// Persist the token and user returned by login
pub fn save_session(store: &dyn LocalStore, token: &str, user: &User) -> StoreResult<()> {
    store.set_item(AUTH_TOKEN, token)?;
    write_json(store, AUTH_USER, user)
}

/// Remove every session key (token, user, activity)
pub fn clear_session(store: &dyn LocalStore) -> StoreResult<()> {
    store.remove_item(AUTH_TOKEN)?;
    store.remove_item(AUTH_USER)?;
    store.remove_item(AUTH_LAST_ACTIVITY)
}

/// Unix millis of the last recorded activity
pub fn last_activity(store: &dyn LocalStore) -> Option<i64> {
    store
        .get_item(AUTH_LAST_ACTIVITY)
        .ok()
        .flatten()
        .and_then(|raw| raw.trim().parse().ok())
}

/// Record activity at `millis`
pub fn record_activity(store: &dyn LocalStore, millis: i64) -> StoreResult<()> {
    store.set_item(AUTH_LAST_ACTIVITY, &millis.to_string())
}
