//! Scripted typewriter playback engine.
//!
//! A pure, time-driven state machine: each [`TypewriterEngine::tick`]
//! applies exactly one transition (reveal a character, or commit a
//! completed line) and returns the delay a driver should wait before the
//! next tick. The engine performs no I/O and cannot fail; `Finished` is
//! terminal until an explicit [`TypewriterEngine::replay`].

use std::time::Duration;

use serde::Serialize;

use crate::pacing::Pacing;
use crate::script::{sample_script, ScriptLine};

/// Rendered view of one playback instant, suitable for any host renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaybackSnapshot {
    /// Lines revealed in full, in script order. Never changes retroactively.
    pub completed_lines: Vec<ScriptLine>,
    /// The actively-typing line, when playback has not finished.
    pub active_line: Option<ActiveLine>,
    /// True while further transitions remain.
    pub busy: bool,
}

/// The line currently being revealed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveLine {
    pub line: ScriptLine,
    /// Always a prefix of `line.text`.
    pub partial_text: String,
}

#[derive(Debug, Clone)]
pub struct TypewriterEngine {
    script: Vec<ScriptLine>,
    pacing: Pacing,
    completed: Vec<ScriptLine>,
    line_index: usize,
    partial: String,
    pausing: bool,
}

impl TypewriterEngine {
    #[must_use]
    pub fn new(script: Vec<ScriptLine>, pacing: Pacing) -> Self {
        Self {
            script,
            pacing,
            completed: Vec::new(),
            line_index: 0,
            partial: String::new(),
            pausing: false,
        }
    }

    /// Engine playing the default agent trace with default pacing.
    #[must_use]
    pub fn with_sample_script() -> Self {
        Self::new(sample_script(), Pacing::default())
    }

    pub fn script(&self) -> &[ScriptLine] {
        &self.script
    }

    pub fn completed_lines(&self) -> &[ScriptLine] {
        &self.completed
    }

    /// Index of the line currently being revealed; equals the script
    /// length once playback has finished.
    pub fn line_index(&self) -> usize {
        self.line_index
    }

    /// Partial text of the active line. Empty once finished.
    pub fn partial_text(&self) -> &str {
        &self.partial
    }

    pub fn is_finished(&self) -> bool {
        self.line_index >= self.script.len()
    }

    /// Applies one transition; returns the delay before the next tick, or
    /// `None` when playback is finished and nothing further is scheduled.
    pub fn tick(&mut self) -> Option<Duration> {
        if self.is_finished() {
            return None;
        }

        if self.pausing {
            return self.commit_active_line();
        }

        let category = self.script[self.line_index].category;
        let line_text = &self.script[self.line_index].text;

        let Some(next_char) = line_text[self.partial.len()..].chars().next() else {
            // Line fully revealed; pause before committing it.
            self.pausing = true;
            return Some(self.pacing.line_pause(category));
        };

        self.partial.push(next_char);
        if self.partial.len() == line_text.len() {
            self.pausing = true;
            return Some(self.pacing.line_pause(category));
        }

        Some(self.pacing.char_delay(category))
    }

    fn commit_active_line(&mut self) -> Option<Duration> {
        let line = self.script[self.line_index].clone();
        self.completed.push(line);
        self.line_index += 1;
        self.partial.clear();
        self.pausing = false;

        if self.is_finished() {
            return None;
        }

        let category = self.script[self.line_index].category;
        Some(self.pacing.char_delay(category))
    }

    /// Resets playback to the initial state. Valid from any state; the
    /// explicit user "replay" action is the only caller.
    pub fn replay(&mut self) {
        self.completed.clear();
        self.line_index = 0;
        self.partial.clear();
        self.pausing = false;
    }

    #[must_use]
    pub fn snapshot(&self) -> PlaybackSnapshot {
        let active_line = self.script.get(self.line_index).map(|line| ActiveLine {
            line: line.clone(),
            partial_text: self.partial.clone(),
        });

        PlaybackSnapshot {
            completed_lines: self.completed.clone(),
            active_line,
            busy: !self.is_finished(),
        }
    }
}

impl Default for TypewriterEngine {
    fn default() -> Self {
        Self::with_sample_script()
    }
}
