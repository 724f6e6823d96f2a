use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Transport and protocol failures for one chat backend request.
///
/// Upstream layers collapse every variant into the same user-visible
/// outcome; the variants exist for diagnostics logging only.
#[derive(Debug, Error)]
pub enum ChatApiError {
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {0} {1}")]
    Status(StatusCode, String),

    #[error("malformed response body: {0}")]
    MalformedBody(#[source] serde_json::Error),

    #[error("invalid header {0}")]
    InvalidHeader(String),

    #[error("{0}")]
    Unknown(String),
}

impl ChatApiError {
    /// True when the failure was a client-side timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Request(error) if error.is_timeout())
    }
}

/// FastAPI error body: `{"detail": "..."}` or `{"detail": [...]}`.
#[derive(Debug, Deserialize)]
struct ErrorPayload {
    detail: Option<serde_json::Value>,
}

/// Extracts a human-readable message from a non-2xx response body.
///
/// Falls back to the raw body, then to the status line's canonical reason.
pub fn parse_error_message(status: StatusCode, body: &str) -> String {
    if let Ok(ErrorPayload {
        detail: Some(detail),
    }) = serde_json::from_str::<ErrorPayload>(body)
    {
        match detail {
            serde_json::Value::String(message) if !message.trim().is_empty() => return message,
            serde_json::Value::String(_) => {}
            other => return other.to_string(),
        }
    }

    if body.trim().is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        body.to_string()
    }
}
