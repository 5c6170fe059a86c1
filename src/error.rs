// ============================================================================
// ERRORS - API and storage error types
// ============================================================================

use thiserror::Error;

/// Errors surfaced by the API client
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    /// 401 from the backend. The session has already been cleared.
    #[error("Unauthorized")]
    Unauthorized { message: Option<String> },

    #[error("HTTP {status}")]
    Http { status: u16, message: Option<String> },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ApiError {
    /// The backend's `error` field, when the response carried one
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { message } | ApiError::Http { message, .. } => {
                message.as_deref()
            }
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    /// Server message, else the fallback
    pub fn server_message_or(&self, fallback: &str) -> String {
        self.server_message()
            .map(str::to_string)
            .unwrap_or_else(|| fallback.to_string())
    }

    /// Server message, else this error's own description, else the fallback.
    /// Unauthorized and bare HTTP statuses have no useful description of their own.
    pub fn describe_or(&self, fallback: &str) -> String {
        if let Some(message) = self.server_message() {
            return message.to_string();
        }
        match self {
            ApiError::Network(_) | ApiError::Parse(_) | ApiError::Serialization(_) => {
                self.to_string()
            }
            _ => fallback.to_string(),
        }
    }
}

/// Pull the `error` string out of a JSON error body such as `{"error": "..."}`
pub fn extract_error_field(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    match value.get("error")? {
        serde_json::Value::String(message) if !message.trim().is_empty() => Some(message.clone()),
        serde_json::Value::Object(inner) => inner
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string),
        _ => None,
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StorageError {
    #[error("Could not write key {0}")]
    Write(String),
}
