//! Conversational session controller.
//!
//! Owns the rendered transcript, the committed turn history sent to the
//! backend as context, and the running token/provider metrics. All
//! mutation happens through the submit/complete/fail lifecycle; the host
//! rendering layer only reads snapshots.
//!
//! Failure semantics: transport, status, and parse failures are one
//! uniform class, surfaced as a single in-band system message. A failed
//! exchange never enters the turn history, so the backend's view of the
//! conversation only ever contains successfully round-tripped turns.

use serde::Serialize;
use time::OffsetDateTime;
use tracing::{debug, warn};

use chat_provider::{ChatBackend, ChatReply, ChatTurn, ExchangeRequest};

/// Marker prefixed to the rendered copy of each user submission.
pub const USER_ECHO_PREFIX: &str = "> ";

/// Fixed system greeting rendered at session start.
pub const GREETING: &str =
    "Hi! I'm the resume assistant. Ask me about projects, skills, or experience.";

/// Fixed diagnostic rendered when an exchange fails, whatever the cause.
pub const BACKEND_UNAVAILABLE: &str = "I couldn't reach the assistant backend. \
Check that the chat server is running and the API URL is configured, then try again.";

/// Author of a rendered transcript message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
    System,
}

/// One rendered transcript entry. Append-only; never reordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub tokens_used: Option<u64>,
    pub provider: Option<String>,
}

impl Message {
    fn new(role: Role, content: String) -> Self {
        Self {
            role,
            content,
            timestamp: OffsetDateTime::now_utc(),
            tokens_used: None,
            provider: None,
        }
    }
}

/// Running session counters. `total_tokens` never decreases.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionMetrics {
    pub total_tokens: u64,
    pub current_provider: Option<String>,
}

/// Read-only view handed to the host rendering layer.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub messages: Vec<Message>,
    pub busy: bool,
    pub metrics: SessionMetrics,
}

#[derive(Debug, Clone)]
pub struct ChatSession {
    transcript: Vec<Message>,
    conversation: Vec<ChatTurn>,
    metrics: SessionMetrics,
    loading: bool,
    pending: Option<String>,
}

impl ChatSession {
    /// Fresh session: the system greeting, empty history, zero tokens, no
    /// provider, not loading.
    #[must_use]
    pub fn new() -> Self {
        Self {
            transcript: vec![Message::new(Role::System, GREETING.to_string())],
            conversation: Vec::new(),
            metrics: SessionMetrics::default(),
            loading: false,
            pending: None,
        }
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    /// Committed turn history, in append order, alternating user/assistant.
    pub fn conversation_turns(&self) -> &[ChatTurn] {
        &self.conversation
    }

    pub fn metrics(&self) -> &SessionMetrics {
        &self.metrics
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            messages: self.transcript.clone(),
            busy: self.loading,
            metrics: self.metrics.clone(),
        }
    }

    /// Accepts a submission: echoes the user message into the transcript,
    /// enters the loading sub-state, and returns the outbound request.
    ///
    /// Empty/whitespace input is a silent no-op. A submission while a
    /// request is already in flight is rejected the same way; callers are
    /// expected to disable input while [`Self::is_loading`] is true.
    pub fn begin_submit(&mut self, text: &str) -> Option<ExchangeRequest> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }

        if self.loading {
            debug!("submission rejected: exchange already in flight");
            return None;
        }

        self.transcript.push(Message::new(
            Role::User,
            format!("{USER_ECHO_PREFIX}{trimmed}"),
        ));
        self.loading = true;
        self.pending = Some(trimmed.to_string());

        Some(ExchangeRequest {
            message: trimmed.to_string(),
            history: self.conversation.clone(),
        })
    }

    /// Success path: renders the assistant reply, accumulates token usage,
    /// records the provider, and commits the `{user, assistant}` turn pair.
    pub fn complete_exchange(&mut self, reply: ChatReply) {
        let Some(submitted) = self.pending.take() else {
            warn!("completion with no exchange in flight; dropped");
            return;
        };

        let mut message = Message::new(Role::Assistant, reply.text.clone());
        message.tokens_used = Some(reply.tokens_used);
        message.provider = reply.provider.clone();
        self.transcript.push(message);

        self.metrics.total_tokens += reply.tokens_used;
        if reply.provider.is_some() {
            self.metrics.current_provider = reply.provider;
        }

        self.conversation.push(ChatTurn::user(submitted));
        self.conversation.push(ChatTurn::assistant(reply.text));
        self.loading = false;
    }

    /// Failure path: one system diagnostic message, nothing else changes.
    ///
    /// The failed user text never reaches the turn history, keeping the
    /// backend's context consistent with what actually round-tripped.
    pub fn fail_exchange(&mut self, error: &str) {
        if self.pending.take().is_none() {
            warn!("failure with no exchange in flight; dropped");
            return;
        }

        warn!(error, "chat exchange failed");
        self.transcript
            .push(Message::new(Role::System, BACKEND_UNAVAILABLE.to_string()));
        self.loading = false;
    }

    /// Drives one full exchange against a backend. Returns whether the
    /// submission was accepted.
    pub fn exchange(&mut self, text: &str, backend: &dyn ChatBackend) -> bool {
        let Some(request) = self.begin_submit(text) else {
            return false;
        };

        match backend.exchange(request) {
            Ok(reply) => self.complete_exchange(reply),
            Err(error) => self.fail_exchange(&error),
        }

        true
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}
