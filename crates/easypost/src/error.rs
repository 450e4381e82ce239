//! Error types for EasyPost client operations.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur during EasyPost client operations.
#[derive(Error, Debug)]
pub enum EasyPostError {
    /// Request input rejected before anything was sent.
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Invalid client configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Network-level failure (DNS, connect, reset, TLS).
    #[error("Transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The request did not complete within the configured timeout.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// API returned a non-2xx response.
    #[error("API error: {status} {code} - {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
        errors: Vec<FieldError>,
    },

    /// Response body did not match the expected shape.
    #[error("Deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// Response decoded but is missing something every response must carry.
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// No rate on a shipment matched the requested filters.
    #[error("No rates found: {0}")]
    NoRatesFound(String),
}

impl EasyPostError {
    /// HTTP status code, if this error came from an API response.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the API answered 404.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Whether the request failed below the HTTP layer.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Timeout(_))
    }

    /// Build an API error from a status code and raw response body.
    ///
    /// Parses the standard `{"error": {...}}` envelope when present. The
    /// resulting message is never empty.
    pub(crate) fn from_response(status: reqwest::StatusCode, body: &str) -> Self {
        let envelope = serde_json::from_str::<ErrorEnvelope>(body).ok();

        let (code, message, errors) = match envelope {
            Some(ErrorEnvelope { error }) => (
                error.code.unwrap_or_default(),
                error.message.map(message_text).unwrap_or_default(),
                error.errors,
            ),
            None => (String::new(), body.trim().to_string(), Vec::new()),
        };

        let message = if message.is_empty() {
            status
                .canonical_reason()
                .map_or_else(|| format!("HTTP {}", status.as_u16()), str::to_string)
        } else {
            message
        };

        let code = if code.is_empty() {
            format!("HTTP.{}", status.as_u16())
        } else {
            code
        };

        Self::Api {
            status: status.as_u16(),
            code,
            message,
            errors,
        }
    }
}

/// A per-field error reported alongside an API error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Offending field.
    #[serde(default)]
    pub field: String,
    /// What is wrong with it.
    #[serde(default, deserialize_with = "deserialize_message")]
    pub message: String,
    /// Suggested replacement value, when the API offers one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: Option<String>,
    message: Option<Value>,
    #[serde(default)]
    errors: Vec<FieldError>,
}

// The API sometimes reports `message` as a list or object instead of a string.
fn message_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        Value::Array(items) => items
            .into_iter()
            .map(message_text)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(map) => map
            .into_iter()
            .map(|(key, value)| format!("{key}: {}", message_text(value)))
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

fn deserialize_message<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(message_text)
}
