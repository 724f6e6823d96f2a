//! Deterministic mock implementation of the shared `chat_provider` contract.
//!
//! This crate contains no transport logic and is intended for local
//! development and contract-level session testing.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use chat_provider::{BackendProfile, ChatBackend, ChatReply, ExchangeRequest};

/// Stable backend identifier used for explicit host-side selection.
pub const MOCK_BACKEND_ID: &str = "mock";

/// Scripted outcome for one mock exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOutcome {
    Reply(ChatReply),
    Failure(String),
}

/// Deterministic mock backend used by session tests and local runs.
///
/// Outcomes are consumed front-to-back; when the script runs dry the
/// backend repeats a canned reply so local runs never fail.
#[derive(Debug)]
pub struct MockChatBackend {
    script: Mutex<VecDeque<MockOutcome>>,
    observed: Mutex<Vec<ExchangeRequest>>,
}

impl MockChatBackend {
    #[must_use]
    pub fn new(script: Vec<MockOutcome>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            observed: Mutex::new(Vec::new()),
        }
    }

    /// Backend whose every exchange succeeds with the given reply values.
    #[must_use]
    pub fn replying(text: impl Into<String>, tokens_used: u64, provider: Option<String>) -> Self {
        Self::new(vec![MockOutcome::Reply(ChatReply {
            text: text.into(),
            tokens_used,
            provider,
        })])
    }

    /// Backend whose next exchange fails with the given description.
    #[must_use]
    pub fn failing(error: impl Into<String>) -> Self {
        Self::new(vec![MockOutcome::Failure(error.into())])
    }

    /// Requests observed so far, in submission order.
    #[must_use]
    pub fn observed_requests(&self) -> Vec<ExchangeRequest> {
        lock_unpoisoned(&self.observed).clone()
    }

    fn canned_reply() -> ChatReply {
        ChatReply {
            text: "Thanks for asking! This is a canned local reply.".to_string(),
            tokens_used: 0,
            provider: Some("mock".to_string()),
        }
    }
}

impl Default for MockChatBackend {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl ChatBackend for MockChatBackend {
    fn describe(&self) -> BackendProfile {
        BackendProfile {
            backend_id: MOCK_BACKEND_ID.to_string(),
            endpoint: None,
        }
    }

    fn exchange(&self, request: ExchangeRequest) -> Result<ChatReply, String> {
        lock_unpoisoned(&self.observed).push(request);

        match lock_unpoisoned(&self.script).pop_front() {
            Some(MockOutcome::Reply(reply)) => Ok(reply),
            Some(MockOutcome::Failure(error)) => Err(error),
            None => Ok(Self::canned_reply()),
        }
    }
}

fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
