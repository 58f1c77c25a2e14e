//! Daily study goal tracking.
//!
//! Minutes only ever go up within a session; the accumulator is fed one
//! minute at a time by the timer controller.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};

/// Read-only snapshot of goal progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalProgress {
    pub completed_minutes: u32,
    pub daily_goal_minutes: u32,
    pub remaining_minutes: u32,
    /// Whole percent, rounded down and capped at 100.
    pub percent_complete: u32,
}

#[derive(Debug, Clone)]
pub struct GoalAccumulator {
    completed_minutes: u32,
    daily_goal_minutes: u32,
}

impl GoalAccumulator {
    /// # Errors
    ///
    /// Returns a validation error if `daily_goal_minutes` is zero.
    pub fn new(completed_minutes: u32, daily_goal_minutes: u32) -> Result<Self> {
        if daily_goal_minutes == 0 {
            return Err(ValidationError::InvalidValue {
                field: "daily_goal_minutes".into(),
                message: "must be greater than zero".into(),
            }
            .into());
        }
        Ok(Self {
            completed_minutes,
            daily_goal_minutes,
        })
    }

    pub fn on_minute_elapsed(&mut self) {
        self.completed_minutes = self.completed_minutes.saturating_add(1);
    }

    pub fn completed_minutes(&self) -> u32 {
        self.completed_minutes
    }

    pub fn daily_goal_minutes(&self) -> u32 {
        self.daily_goal_minutes
    }

    pub fn progress(&self) -> GoalProgress {
        let completed = self.completed_minutes;
        let goal = self.daily_goal_minutes;
        let percent = (completed as u64 * 100 / goal as u64).min(100) as u32;
        GoalProgress {
            completed_minutes: completed,
            daily_goal_minutes: goal,
            remaining_minutes: goal.saturating_sub(completed),
            percent_complete: percent,
        }
    }
}
