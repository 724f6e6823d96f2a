use serde::{Deserialize, Serialize};

/// Canonical request payload for the chat endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub conversation_history: Vec<HistoryTurn>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>, conversation_history: Vec<HistoryTurn>) -> Self {
        Self {
            message: message.into(),
            conversation_history,
        }
    }
}

/// One prior turn of successfully round-tripped conversation context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryTurn {
    pub role: HistoryRole,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryRole {
    User,
    Assistant,
}

/// Response payload from the chat endpoint.
///
/// `tokensUsed` and `provider` are optional on the wire; absence means
/// zero tokens and an unknown provider respectively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub response: String,
    #[serde(default)]
    pub tokens_used: u64,
    #[serde(default)]
    pub provider: Option<String>,
}

/// Response payload from the health endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    /// Provider availability flags, as reported by the backend deployment.
    #[serde(flatten)]
    pub details: serde_json::Map<String, serde_json::Value>,
}

impl HealthResponse {
    /// Whether the backend reports itself ready to serve chat requests.
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy") || self.status.eq_ignore_ascii_case("ok")
    }
}
