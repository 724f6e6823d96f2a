//! Chat-widget core for a single-page portfolio site.
//!
//! Invariant: append-only transcripts — completed script lines and session
//! messages never change retroactively once rendered.
//!
//! # Public API Overview
//! - Play a scripted agent trace with [`TypewriterEngine`] and drive it
//!   with a teardown-safe [`Player`].
//! - Run a real back-and-forth with [`ChatSession`] over any
//!   [`ChatBackend`] implementation.
//! - Hand snapshots ([`PlaybackSnapshot`], [`SessionSnapshot`]) to any
//!   rendering technology; the host only ever reads them.
//!
//! # Backends
//! [`ChatBackend`] is the provider seam: `chat_provider_http` speaks the
//! portfolio backend's wire contract, `chat_provider_mock` replays
//! scripted outcomes for local runs and tests.

pub mod config;

pub mod pacing;
pub mod player;
pub mod script;
pub mod session;
pub mod typewriter;

/// Environment configuration snapshot.
pub use crate::config::EnvConfig;

/// Playback pacing primitives.
pub use crate::pacing::{Jitter, Pacing};

/// Script model and the default agent trace.
pub use crate::script::{sample_script, LineCategory, ScriptLine};

/// Typewriter engine and its rendered-output contract.
pub use crate::typewriter::{ActiveLine, PlaybackSnapshot, TypewriterEngine};

/// Thread-backed playback driver.
pub use crate::player::Player;

/// Conversational session controller and its rendered-output contract.
pub use crate::session::{
    ChatSession, Message, Role, SessionMetrics, SessionSnapshot, BACKEND_UNAVAILABLE, GREETING,
    USER_ECHO_PREFIX,
};

/// Backend contract re-exported for hosts wiring a real or mock backend.
pub use chat_provider::{
    BackendInitError, BackendProfile, ChatBackend, ChatReply, ChatTurn, ExchangeRequest, TurnRole,
};
