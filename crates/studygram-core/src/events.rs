use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::goal::GoalProgress;
use crate::timer::{Sprint, TimerState};

/// Every state change of the focus timer produces an Event.
/// The presentation layer renders them; the controller routes
/// `MinuteElapsed` into the goal accumulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    TimerStarted {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        preset_secs: u64,
        at: DateTime<Utc>,
    },
    /// The countdown crossed a whole-minute boundary.
    MinuteElapsed {
        /// Remaining seconds before the boundary tick was applied.
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerCompleted {
        preset_secs: u64,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: TimerState,
        sprint: Sprint,
        remaining_secs: u64,
        preset_secs: u64,
        display: String,
        progress: GoalProgress,
        at: DateTime<Utc>,
    },
}

impl Event {
    pub fn is_minute_elapsed(&self) -> bool {
        matches!(self, Event::MinuteElapsed { .. })
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Event::TimerCompleted { .. })
    }
}
