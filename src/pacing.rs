//! Delay selection for human-like script playback.

use std::time::Duration;

use crate::script::LineCategory;

/// Bounded jitter source for per-character delays.
///
/// A small xorshift generator keeps playback non-uniform without pulling
/// in an RNG dependency; tests seed it for reproducible sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Jitter {
    state: u64,
}

impl Jitter {
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            state: seed.max(1),
        }
    }

    /// Next jitter value in `0..bound_ms` milliseconds (zero when the
    /// bound is zero).
    pub fn next_ms(&mut self, bound_ms: u64) -> u64 {
        if bound_ms == 0 {
            return 0;
        }

        // xorshift64
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x % bound_ms
    }
}

impl Default for Jitter {
    fn default() -> Self {
        use std::time::{SystemTime, UNIX_EPOCH};
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|now| now.as_nanos() as u64)
            .unwrap_or(0x5eed);
        Self::seeded(seed)
    }
}

/// Pacing constants for one playback run.
///
/// Command-style lines reveal fast; narrative lines reveal slower, so the
/// trace reads like typed commands followed by deliberate log output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pacing {
    pub command_char: Duration,
    pub narrative_char: Duration,
    pub jitter_bound: Duration,
    pub short_pause: Duration,
    pub long_pause: Duration,
    jitter: Jitter,
}

impl Pacing {
    /// Pacing with zero jitter, for deterministic tests.
    #[must_use]
    pub fn fixed() -> Self {
        Self {
            jitter_bound: Duration::ZERO,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_jitter(mut self, jitter: Jitter) -> Self {
        self.jitter = jitter;
        self
    }

    #[must_use]
    pub fn with_char_delays(mut self, command: Duration, narrative: Duration) -> Self {
        self.command_char = command;
        self.narrative_char = narrative;
        self
    }

    #[must_use]
    pub fn with_pauses(mut self, short: Duration, long: Duration) -> Self {
        self.short_pause = short;
        self.long_pause = long;
        self
    }

    /// Delay before revealing the next character of a line.
    pub fn char_delay(&mut self, category: LineCategory) -> Duration {
        let base = self.char_base(category);
        let jitter_ms = self.jitter.next_ms(self.jitter_bound.as_millis() as u64);
        base + Duration::from_millis(jitter_ms)
    }

    /// Base per-character delay for a category, before jitter.
    #[must_use]
    pub fn char_base(&self, category: LineCategory) -> Duration {
        match category {
            LineCategory::Command => self.command_char,
            _ => self.narrative_char,
        }
    }

    /// Pause inserted after a line completes, before the next line starts.
    #[must_use]
    pub fn line_pause(&self, category: LineCategory) -> Duration {
        if category.is_slow_boundary() {
            self.long_pause
        } else {
            self.short_pause
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            command_char: Duration::from_millis(10),
            narrative_char: Duration::from_millis(30),
            jitter_bound: Duration::from_millis(10),
            short_pause: Duration::from_millis(350),
            long_pause: Duration::from_millis(800),
            jitter: Jitter::default(),
        }
    }
}
