//! Countdown engine for focus sprints.
//!
//! The engine is a passive state machine. It owns no thread or timer;
//! whoever drives it calls `tick()` once per elapsed second.
//!
//! ## State Transitions
//!
//! ```text
//! Paused --start--> Running --pause--> Paused
//! Running --tick (reaches 0)--> Idle
//! Idle --start--> Idle            (guarded no-op)
//! any --reset(p)--> Paused
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new();
//! engine.start();
//! // once per second:
//! if let Some(Event::MinuteElapsed { .. }) = engine.tick() { /* count it */ }
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::preset::STUDY_MINUTES;
use crate::events::Event;

const DEFAULT_PRESET_SECS: u64 = STUDY_MINUTES as u64 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    /// Nothing left to count down; only a reset leaves this state.
    Idle,
    Paused,
    Running,
}

/// Core countdown engine.
///
/// Invariant: `remaining_secs` never underflows, and `running` is
/// false whenever `remaining_secs == 0`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerEngine {
    remaining_secs: u64,
    running: bool,
    /// Duration restored by `reset_to_last()`.
    preset_secs: u64,
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerEngine {
    /// Paused at the default 25 minute preset.
    pub fn new() -> Self {
        Self::with_preset(DEFAULT_PRESET_SECS)
    }

    /// Paused at `preset_secs` (clamped to at least one second).
    pub fn with_preset(preset_secs: u64) -> Self {
        let preset_secs = preset_secs.max(1);
        Self {
            remaining_secs: preset_secs,
            running: false,
            preset_secs,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        if self.running {
            TimerState::Running
        } else if self.remaining_secs == 0 {
            TimerState::Idle
        } else {
            TimerState::Paused
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn preset_secs(&self) -> u64 {
        self.preset_secs
    }

    /// 0.0 .. 1.0 progress through the current sprint.
    pub fn sprint_progress(&self) -> f64 {
        1.0 - (self.remaining_secs as f64 / self.preset_secs as f64)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin counting down. Returns `None` when already running or when
    /// there is nothing left to count.
    pub fn start(&mut self) -> Option<Event> {
        if self.running || self.remaining_secs == 0 {
            return None;
        }
        self.running = true;
        Some(Event::TimerStarted {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Stop counting down. Returns `None` when already stopped.
    pub fn pause(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.running = false;
        Some(Event::TimerPaused {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Stop and rewind to `preset_secs`, which becomes the new default for
    /// `reset_to_last()`. A zero preset is clamped to one second.
    pub fn reset(&mut self, preset_secs: u64) -> Event {
        self.preset_secs = preset_secs.max(1);
        self.reset_to_last()
    }

    /// Stop and rewind to the last explicit preset.
    pub fn reset_to_last(&mut self) -> Event {
        self.running = false;
        self.remaining_secs = self.preset_secs;
        Event::TimerReset {
            preset_secs: self.preset_secs,
            at: Utc::now(),
        }
    }

    /// Apply one elapsed second.
    ///
    /// Returns `MinuteElapsed` when the pre-decrement value is a positive
    /// multiple of 60, `TimerCompleted` when the countdown hits zero, and
    /// `None` otherwise (including every tick delivered while stopped).
    /// Both can never coincide: completion needs a pre-decrement value of 1.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }

        let before = self.remaining_secs;
        self.remaining_secs = before.saturating_sub(1);

        if before > 0 && before % 60 == 0 {
            return Some(Event::MinuteElapsed {
                remaining_secs: before,
                at: Utc::now(),
            });
        }

        if self.remaining_secs == 0 {
            self.running = false;
            return Some(Event::TimerCompleted {
                preset_secs: self.preset_secs,
                at: Utc::now(),
            });
        }
        None
    }
}
