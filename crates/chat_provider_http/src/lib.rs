//! HTTP-backed implementation of the shared `chat_provider` contract.
//!
//! This adapter translates `chat_api` wire payloads into the reply shape
//! the session controller expects, and collapses transport, status, and
//! parse failures into one opaque failure string.

use std::sync::Arc;
use std::time::Duration;

use chat_api::{
    ChatApiClient, ChatApiConfig, ChatApiError, ChatRequest, ChatResponse, HistoryRole,
    HistoryTurn,
};
use chat_provider::{
    BackendInitError, BackendProfile, ChatBackend, ChatReply, ChatTurn, ExchangeRequest, TurnRole,
};

/// Stable backend identifier used for host-side backend selection.
pub const HTTP_BACKEND_ID: &str = "http";

/// Runtime configuration for the HTTP chat backend.
#[derive(Debug, Clone, Default)]
pub struct HttpChatBackendConfig {
    pub base_url: Option<String>,
    pub timeout: Option<Duration>,
    pub user_agent: Option<String>,
}

impl HttpChatBackendConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    fn into_api_config(self) -> ChatApiConfig {
        let mut config = match self.base_url {
            Some(base_url) => ChatApiConfig::new(base_url),
            None => ChatApiConfig::default(),
        };

        if let Some(timeout) = self.timeout {
            config = config.with_timeout(timeout);
        }

        if let Some(user_agent) = self.user_agent {
            config = config.with_user_agent(user_agent);
        }

        config
    }
}

trait ExchangeClient: Send + Sync {
    fn endpoint(&self) -> String;
    fn send(&self, request: &ChatRequest) -> Result<ChatResponse, ChatApiError>;
}

#[derive(Debug)]
struct DefaultExchangeClient {
    client: ChatApiClient,
}

impl ExchangeClient for DefaultExchangeClient {
    fn endpoint(&self) -> String {
        self.client.chat_endpoint()
    }

    fn send(&self, request: &ChatRequest) -> Result<ChatResponse, ChatApiError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|error| {
                ChatApiError::Unknown(format!("failed to initialize tokio runtime: {error}"))
            })?;

        runtime.block_on(self.client.send(request))
    }
}

/// `ChatBackend` adapter backed by `chat_api` transport primitives.
pub struct HttpChatBackend {
    exchange_client: Arc<dyn ExchangeClient>,
}

impl HttpChatBackend {
    /// Creates a backend using real HTTP transport.
    pub fn new(config: HttpChatBackendConfig) -> Result<Self, BackendInitError> {
        let client = ChatApiClient::new(config.into_api_config()).map_err(|error| {
            BackendInitError::new(format!("Failed to initialize HTTP chat backend: {error}"))
        })?;

        Ok(Self {
            exchange_client: Arc::new(DefaultExchangeClient { client }),
        })
    }

    #[cfg(test)]
    fn with_exchange_client_for_tests(exchange_client: Arc<dyn ExchangeClient>) -> Self {
        Self { exchange_client }
    }
}

impl ChatBackend for HttpChatBackend {
    fn describe(&self) -> BackendProfile {
        BackendProfile {
            backend_id: HTTP_BACKEND_ID.to_string(),
            endpoint: Some(self.exchange_client.endpoint()),
        }
    }

    fn exchange(&self, request: ExchangeRequest) -> Result<ChatReply, String> {
        let wire = wire_request(&request);
        match self.exchange_client.send(&wire) {
            Ok(response) => Ok(ChatReply {
                text: response.response,
                tokens_used: response.tokens_used,
                provider: response.provider,
            }),
            Err(error) => Err(format!("chat backend request failed: {error}")),
        }
    }
}

fn wire_request(request: &ExchangeRequest) -> ChatRequest {
    let history = request
        .history
        .iter()
        .map(|turn| HistoryTurn {
            role: wire_role(turn),
            content: turn.content.clone(),
        })
        .collect();

    ChatRequest::new(request.message.clone(), history)
}

fn wire_role(turn: &ChatTurn) -> HistoryRole {
    match turn.role {
        TurnRole::User => HistoryRole::User,
        TurnRole::Assistant => HistoryRole::Assistant,
    }
}
