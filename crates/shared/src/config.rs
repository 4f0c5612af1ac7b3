//! Client configuration and the logger seam

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Env var naming the backend base URL
pub const ENV_API_BASE_URL: &str = "CONGRESS_API_BASE_URL";
/// Fallback env var for the backend base URL (dev proxy target)
pub const ENV_API_TARGET: &str = "API_BASE_URL";
/// Env var naming the local storage file
pub const ENV_STORAGE: &str = "CONGRESS_STORAGE";

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_inactivity_minutes() -> u64 {
    30
}

/// Configuration for the congress client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    /// Backend base URL, without trailing slash
    #[serde(default = "default_base_url")]
    pub api_base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Local storage file (defaults to the user data dir)
    #[serde(default)]
    pub storage_path: Option<PathBuf>,

    /// Minutes of inactivity before the session is logged out
    #[serde(default = "default_inactivity_minutes")]
    pub inactivity_limit_minutes: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            storage_path: None,
            inactivity_limit_minutes: default_inactivity_minutes(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Apply overrides from the process environment
    pub fn with_env(self) -> Self {
        self.with_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn with_env_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = non_empty(ENV_API_BASE_URL).or_else(|| non_empty(ENV_API_TARGET)) {
            self.api_base_url = url;
        }
        if let Some(path) = non_empty(ENV_STORAGE) {
            self.storage_path = Some(PathBuf::from(path));
        }
        self
    }

    /// Builder: set the base URL
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Base URL with any trailing slash removed
    pub fn base_url(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn inactivity_limit(&self) -> Duration {
        Duration::from_secs(self.inactivity_limit_minutes.saturating_mul(60))
    }

    /// Storage file to use, falling back to `<data dir>/congress/storage.json`
    pub fn resolved_storage_path(&self) -> PathBuf {
        self.storage_path.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("congress")
                .join("storage.json")
        })
    }
}

/// Logger interface for dependency injection
pub trait Logger: Send + Sync {
    fn debug(&self, message: &str, meta: Option<&HashMap<String, String>>);
    fn info(&self, message: &str, meta: Option<&HashMap<String, String>>);
    fn warn(&self, message: &str, meta: Option<&HashMap<String, String>>);
    fn error(&self, message: &str, meta: Option<&HashMap<String, String>>);
}

/// Logger that forwards to `tracing`
#[derive(Debug, Clone, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn debug(&self, message: &str, meta: Option<&HashMap<String, String>>) {
        tracing::debug!(meta = ?meta, "{}", message);
    }

    fn info(&self, message: &str, meta: Option<&HashMap<String, String>>) {
        tracing::info!(meta = ?meta, "{}", message);
    }

    fn warn(&self, message: &str, meta: Option<&HashMap<String, String>>) {
        tracing::warn!(meta = ?meta, "{}", message);
    }

    fn error(&self, message: &str, meta: Option<&HashMap<String, String>>) {
        tracing::error!(meta = ?meta, "{}", message);
    }
}

/// No-op logger for testing
#[derive(Debug, Clone, Default)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn debug(&self, _message: &str, _meta: Option<&HashMap<String, String>>) {}
    fn info(&self, _message: &str, _meta: Option<&HashMap<String, String>>) {}
    fn warn(&self, _message: &str, _meta: Option<&HashMap<String, String>>) {}
    fn error(&self, _message: &str, _meta: Option<&HashMap<String, String>>) {}
}
