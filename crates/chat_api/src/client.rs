use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::Client;
use tracing::{debug, warn};

use crate::config::ChatApiConfig;
use crate::error::{parse_error_message, ChatApiError};
use crate::payload::{ChatRequest, ChatResponse, HealthResponse};
use crate::url::{chat_url, health_url};

#[derive(Debug)]
pub struct ChatApiClient {
    http: Client,
    config: ChatApiConfig,
}

impl ChatApiClient {
    pub fn new(config: ChatApiConfig) -> Result<Self, ChatApiError> {
        let http = Client::builder()
            .timeout(config.effective_timeout())
            .build()
            .map_err(ChatApiError::from)?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ChatApiConfig {
        &self.config
    }

    pub fn chat_endpoint(&self) -> String {
        chat_url(&self.config.base_url)
    }

    pub fn health_endpoint(&self) -> String {
        health_url(&self.config.base_url)
    }

    pub fn build_headers(&self) -> Result<HeaderMap, ChatApiError> {
        let mut headers = HeaderMap::new();
        if let Some(user_agent) = self.config.user_agent.as_deref() {
            headers.insert(
                USER_AGENT,
                HeaderValue::from_str(user_agent)
                    .map_err(|_| ChatApiError::InvalidHeader("user-agent".to_string()))?,
            );
        }
        for (key, value) in &self.config.extra_headers {
            headers.insert(
                HeaderName::from_bytes(key.as_bytes())
                    .map_err(|_| ChatApiError::InvalidHeader(format!("key: {key}")))?,
                HeaderValue::from_str(value)
                    .map_err(|_| ChatApiError::InvalidHeader(format!("value for {key}")))?,
            );
        }
        Ok(headers)
    }

    pub fn build_request(
        &self,
        request: &ChatRequest,
    ) -> Result<reqwest::RequestBuilder, ChatApiError> {
        let headers = self.build_headers()?;
        Ok(self.http.post(self.chat_endpoint()).headers(headers).json(request))
    }

    /// Sends one chat exchange and parses the reply.
    ///
    /// Non-2xx statuses and unparsable 2xx bodies both surface as errors;
    /// callers treat every variant as the same user-visible failure.
    pub async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, ChatApiError> {
        let response = self.build_request(request)?.send().await.map_err(|error| {
            warn!(endpoint = %self.chat_endpoint(), %error, "chat request transport failure");
            ChatApiError::from(error)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = parse_error_message(status, &body);
            warn!(%status, message = %message, "chat request rejected by backend");
            return Err(ChatApiError::Status(status, message));
        }

        let body = response.text().await.map_err(ChatApiError::from)?;
        let parsed: ChatResponse = serde_json::from_str(&body).map_err(|error| {
            warn!(%error, "chat response body was not the expected shape");
            ChatApiError::MalformedBody(error)
        })?;

        debug!(
            tokens_used = parsed.tokens_used,
            provider = parsed.provider.as_deref().unwrap_or("unknown"),
            "chat exchange completed"
        );
        Ok(parsed)
    }

    /// Probes the backend health endpoint.
    pub async fn health(&self) -> Result<HealthResponse, ChatApiError> {
        let headers = self.build_headers()?;
        let response = self
            .http
            .get(self.health_endpoint())
            .headers(headers)
            .send()
            .await
            .map_err(ChatApiError::from)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChatApiError::Status(status, parse_error_message(status, &body)));
        }

        let body = response.text().await.map_err(ChatApiError::from)?;
        serde_json::from_str(&body).map_err(ChatApiError::MalformedBody)
    }
}
