//! Uniform `{status, data}` results of service calls

use serde::de::DeserializeOwned;
use serde_json::{json, Value};

/// Message used when no HTTP response was received
pub const NETWORK_ERROR_MESSAGE: &str = "Error de red o desconocido";

/// Status reported when no HTTP response was received
pub const NETWORK_ERROR_STATUS: u16 = 500;

/// Key under which the synthetic network error message is reported.
///
/// Auth and inscription endpoints report `message`, the rest `error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKey {
    Error,
    Message,
}

impl ErrorKey {
    fn as_str(&self) -> &'static str {
        match self {
            ErrorKey::Error => "error",
            ErrorKey::Message => "message",
        }
    }
}

/// Result of a JSON service call.
///
/// Service calls never fail: HTTP errors keep their status and body, and
/// transport failures become a synthetic 500.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub data: Value,
}

impl ApiResponse {
    pub fn new(status: u16, data: Value) -> Self {
        Self { status, data }
    }

    /// Synthetic response for a request that never got an answer
    pub fn network_error(key: ErrorKey) -> Self {
        let mut body = serde_json::Map::new();
        body.insert(key.as_str().to_string(), json!(NETWORK_ERROR_MESSAGE));
        Self {
            status: NETWORK_ERROR_STATUS,
            data: Value::Object(body),
        }
    }

    /// 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Status 400 or above
    pub fn is_error(&self) -> bool {
        self.status >= 400
    }

    /// Error text carried by the body (`message`, then `error`)
    pub fn error_message(&self) -> Option<String> {
        ["message", "error"]
            .iter()
            .filter_map(|key| self.data.get(key))
            .filter_map(Value::as_str)
            .map(str::to_string)
            .next()
    }

    /// Error text, or `fallback` when the body carries none
    pub fn error_message_or(&self, fallback: &str) -> String {
        self.error_message().unwrap_or_else(|| fallback.to_string())
    }

    /// Decode the body into `T`, `None` when the shape does not match
    pub fn json<T: DeserializeOwned>(&self) -> Option<T> {
        serde_json::from_value(self.data.clone()).ok()
    }
}

/// Result of a binary download (reports, receipts)
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryResponse {
    pub status: u16,
    pub bytes: Vec<u8>,
}

impl BinaryResponse {
    pub fn network_error() -> Self {
        Self {
            status: NETWORK_ERROR_STATUS,
            bytes: Vec::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Turn a raw response body into JSON.
///
/// Empty bodies are `null`; non-JSON error bodies are wrapped as
/// `{"message": text}` so callers can always look for a message.
pub(crate) fn decode_body(status: u16, text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    match serde_json::from_str(text) {
        Ok(value) => value,
        Err(_) if status >= 400 => json!({ "message": text.trim() }),
        Err(_) => Value::String(text.to_string()),
    }
}
