//! Transport-only client primitives for the portfolio chat backend.
//!
//! This crate owns request building, response parsing, and error taxonomy
//! for the `POST {base}/chat` and `GET {base}/health` endpoints only. It
//! intentionally contains no session state and no UI coupling.
//!
//! The wire contract is the FastAPI backend's: camelCase request/response
//! fields, `tokensUsed` defaulting to zero when absent, and error bodies
//! shaped as `{"detail": ...}`.

pub mod client;
pub mod config;
pub mod error;
pub mod payload;
pub mod url;

pub use client::ChatApiClient;
pub use config::ChatApiConfig;
pub use error::ChatApiError;
pub use payload::{ChatRequest, ChatResponse, HealthResponse, HistoryRole, HistoryTurn};
pub use url::{chat_url, health_url};
