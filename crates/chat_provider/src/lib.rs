//! Minimal backend-agnostic contract for one chat exchange.
//!
//! This crate intentionally defines only the request/reply shapes and the
//! backend trait shared by the session controller. It excludes transport
//! details, wire payloads, and session state concerns.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned while constructing/configuring a backend before any exchange starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendInitError {
    message: String,
}

impl BackendInitError {
    /// Creates a new backend initialization error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the underlying error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for BackendInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for BackendInitError {}

impl From<String> for BackendInitError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for BackendInitError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// Role of one committed conversation turn sent to the backend as context.
///
/// System messages never appear here; the backend only sees the turns that
/// completed a successful round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

/// Reduced `{role, content}` projection of a transcript message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: TurnRole,
    pub content: String,
}

impl ChatTurn {
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            content: content.into(),
        }
    }

    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Assistant,
            content: content.into(),
        }
    }
}

/// Input required to start one backend exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeRequest {
    /// The raw user text, unprefixed and already trimmed by the caller.
    pub message: String,
    /// Committed turn history in append order. Does not include `message`.
    pub history: Vec<ChatTurn>,
}

/// Successful backend reply for one exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub text: String,
    /// Tokens consumed by the exchange; backends report 0 when unknown.
    pub tokens_used: u64,
    /// Name of the upstream service that produced the reply, when known.
    pub provider: Option<String>,
}

/// Immutable metadata describing a chat backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendProfile {
    pub backend_id: String,
    pub endpoint: Option<String>,
}

/// Backend interface for executing one exchange.
///
/// Failures are opaque strings; the session controller surfaces every
/// failure class uniformly and only logs the detail.
pub trait ChatBackend: Send + Sync {
    /// Returns backend identity metadata.
    fn describe(&self) -> BackendProfile;

    /// Executes one exchange and returns the reply or a failure description.
    fn exchange(&self, request: ExchangeRequest) -> Result<ChatReply, String>;
}
