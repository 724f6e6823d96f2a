//! Statically authored playback script for the typewriter engine.

use serde::{Deserialize, Serialize};

/// Semantic category of one script line.
///
/// The category drives per-character pacing and inter-line pause tiers;
/// classification is an explicit tag, never a substring test against the
/// line text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineCategory {
    Command,
    Log,
    Reasoning,
    ToolCall,
    Error,
    Output,
}

impl LineCategory {
    /// Categories that represent deliberate "processing" latency and get
    /// the long inter-line pause.
    #[must_use]
    pub fn is_slow_boundary(self) -> bool {
        matches!(self, Self::ToolCall | Self::Error)
    }
}

/// One unit of simulated log/reasoning output.
///
/// Immutable after construction; the engine consumes lines strictly in
/// order and re-reads from index 0 on replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptLine {
    pub text: String,
    pub category: LineCategory,
    /// Hosts render a shell-prompt marker before command lines.
    pub command_prompt: bool,
}

impl ScriptLine {
    #[must_use]
    pub fn new(text: impl Into<String>, category: LineCategory) -> Self {
        Self {
            text: text.into(),
            command_prompt: matches!(category, LineCategory::Command),
            category,
        }
    }

    #[must_use]
    pub fn command(text: impl Into<String>) -> Self {
        Self::new(text, LineCategory::Command)
    }

    #[must_use]
    pub fn log(text: impl Into<String>) -> Self {
        Self::new(text, LineCategory::Log)
    }

    #[must_use]
    pub fn reasoning(text: impl Into<String>) -> Self {
        Self::new(text, LineCategory::Reasoning)
    }

    #[must_use]
    pub fn tool_call(text: impl Into<String>) -> Self {
        Self::new(text, LineCategory::ToolCall)
    }

    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self::new(text, LineCategory::Error)
    }

    #[must_use]
    pub fn output(text: impl Into<String>) -> Self {
        Self::new(text, LineCategory::Output)
    }
}

/// The default "self-correcting financial agent" trace played by the hero
/// panel. Exactly 14 lines: setup, task, reasoning, a retrieval miss, a
/// tool-call recovery, and final synthesis.
#[must_use]
pub fn sample_script() -> Vec<ScriptLine> {
    vec![
        ScriptLine::command("agent-cli run --mode autonomous --model gpt-4o --temp 0.1"),
        ScriptLine::log(">> [SYSTEM] Initializing vector store (env: production)..."),
        ScriptLine::log(">> [SYSTEM] Memory buffer loaded. Context window: 128k"),
        ScriptLine::log(
            ">> [INPUT] User: 'Compare our Q3 revenue growth against competitor X.'",
        ),
        ScriptLine::reasoning(">> [PLANNER] Step 1: Retrieve internal Q3 reports."),
        ScriptLine::reasoning(">> [PLANNER] Step 2: Search web for competitor X Q3 data."),
        ScriptLine::log(">> [RAG] Querying namespace 'financial-docs'..."),
        ScriptLine::log("   --> Retrieved 4 chunks. Top cosine_similarity: 0.89"),
        ScriptLine::reasoning(">> [CRITIC] Evaluating retrieved context..."),
        ScriptLine::error("!! ERROR: Internal data cutoff is Aug 2024. Q3 data missing."),
        ScriptLine::reasoning(">> [ROUTER] Rerouting to 'Financial_API_Tool'..."),
        ScriptLine::tool_call(">> [TOOL] Executing GET /api/v1/revenue?ticker=COMP_X"),
        ScriptLine::output("   < 200 OK > Data received: $4.2B (+12% YoY)"),
        ScriptLine::output(">> [OUTPUT] Report generated. Audit trail saved to /logs/f8a2.json"),
    ]
}
