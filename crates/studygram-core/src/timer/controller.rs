//! Facade the presentation layer talks to.
//!
//! Composes the countdown engine with the daily goal and owns the tick
//! subscription: one is opened when a sprint starts running and dropped
//! as soon as the engine stops, so no tick source outlives a running
//! sprint or the controller itself.

use chrono::Utc;
use tracing::{debug, info, warn};

use super::engine::TimerEngine;
use super::format::format_remaining;
use super::preset::{Preset, PresetDurations, Sprint};
use super::tick::{TickSource, TickSubscription};
use crate::error::Result;
use crate::events::Event;
use crate::goal::{GoalAccumulator, GoalProgress};

/// Goal seeded at session start when no history is available.
pub const DEFAULT_COMPLETED_MINUTES: u32 = 240;
pub const DEFAULT_DAILY_GOAL_MINUTES: u32 = 360;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerSettings {
    pub presets: PresetDurations,
    /// Whether minutes elapsed during a Break sprint count toward the goal.
    pub count_break_minutes: bool,
    pub completed_minutes: u32,
    pub daily_goal_minutes: u32,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            presets: PresetDurations::default(),
            count_break_minutes: true,
            completed_minutes: DEFAULT_COMPLETED_MINUTES,
            daily_goal_minutes: DEFAULT_DAILY_GOAL_MINUTES,
        }
    }
}

/// Outcome of applying a single tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub remaining_secs: u64,
    pub event: Option<Event>,
}

pub struct TimerController<S: TickSource> {
    engine: TimerEngine,
    goal: GoalAccumulator,
    source: S,
    subscription: Option<TickSubscription>,
    sprint: Sprint,
    presets: PresetDurations,
    count_break_minutes: bool,
}

impl<S: TickSource> TimerController<S> {
    /// Paused at the Study preset.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the daily goal is zero.
    pub fn new(source: S, settings: TimerSettings) -> Result<Self> {
        let goal = GoalAccumulator::new(settings.completed_minutes, settings.daily_goal_minutes)?;
        Ok(Self {
            engine: TimerEngine::with_preset(settings.presets.seconds(Preset::Study)),
            goal,
            source,
            subscription: None,
            sprint: Sprint::Study,
            presets: settings.presets,
            count_break_minutes: settings.count_break_minutes,
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn engine(&self) -> &TimerEngine {
        &self.engine
    }

    pub fn is_running(&self) -> bool {
        self.engine.is_running()
    }

    pub fn remaining_secs(&self) -> u64 {
        self.engine.remaining_secs()
    }

    pub fn sprint(&self) -> Sprint {
        self.sprint
    }

    /// Whether a tick subscription is currently held.
    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn format_remaining(&self) -> String {
        format_remaining(self.engine.remaining_secs())
    }

    pub fn progress(&self) -> GoalProgress {
        self.goal.progress()
    }

    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.engine.state(),
            sprint: self.sprint,
            remaining_secs: self.engine.remaining_secs(),
            preset_secs: self.engine.preset_secs(),
            display: self.format_remaining(),
            progress: self.goal.progress(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn toggle(&mut self) -> Option<Event> {
        if self.engine.is_running() {
            self.pause()
        } else {
            self.start()
        }
    }

    pub fn start(&mut self) -> Option<Event> {
        let event = self.engine.start()?;
        if self.subscription.is_none() {
            self.subscription = Some(self.source.subscribe());
        }
        debug!(remaining_secs = self.engine.remaining_secs(), sprint = ?self.sprint, "sprint started");
        Some(event)
    }

    pub fn pause(&mut self) -> Option<Event> {
        let event = self.engine.pause();
        self.unsubscribe();
        if event.is_some() {
            debug!(remaining_secs = self.engine.remaining_secs(), "sprint paused");
        }
        event
    }

    /// Rewind to an arbitrary length in minutes. Non-positive input is
    /// clamped to a one second sprint.
    pub fn reset_to_preset(&mut self, minutes: i64) -> Event {
        let secs = if minutes <= 0 {
            warn!(minutes, "non-positive preset clamped to 1 second");
            1
        } else {
            (minutes as u64).saturating_mul(60)
        };
        self.sprint = Sprint::Custom(secs);
        self.rewind(secs)
    }

    pub fn reset_to(&mut self, preset: Preset) -> Event {
        self.sprint = preset.into();
        self.rewind(self.presets.seconds(preset))
    }

    /// Rewind to the last explicit preset.
    pub fn reset(&mut self) -> Event {
        self.unsubscribe();
        self.engine.reset_to_last()
    }

    fn rewind(&mut self, secs: u64) -> Event {
        self.unsubscribe();
        debug!(preset_secs = secs, sprint = ?self.sprint, "timer reset");
        self.engine.reset(secs)
    }

    // ── Ticks ────────────────────────────────────────────────────────

    /// Apply one tick and route its minute boundary into the goal.
    pub fn on_tick(&mut self) -> TickReport {
        let event = self.engine.tick();
        match &event {
            Some(Event::MinuteElapsed { .. }) if self.counts_toward_goal() => {
                self.goal.on_minute_elapsed();
            }
            Some(Event::TimerCompleted { preset_secs, .. }) => {
                info!(preset_secs, sprint = ?self.sprint, "sprint completed");
            }
            _ => {}
        }
        if !self.engine.is_running() {
            self.unsubscribe();
        }
        TickReport {
            remaining_secs: self.engine.remaining_secs(),
            event,
        }
    }

    /// Apply every tick already delivered to the subscription, in order.
    pub fn pump(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        while self.subscription.as_mut().is_some_and(|sub| sub.try_recv()) {
            events.extend(self.on_tick().event);
        }
        events
    }

    /// Wait for the next tick and apply it. Returns `None` when no sprint
    /// is running or the tick source has closed.
    pub async fn next_tick(&mut self) -> Option<TickReport> {
        let sub = self.subscription.as_mut()?;
        if !sub.recv().await {
            self.subscription = None;
            return None;
        }
        Some(self.on_tick())
    }

    fn counts_toward_goal(&self) -> bool {
        self.sprint != Sprint::Break || self.count_break_minutes
    }

    fn unsubscribe(&mut self) {
        if self.subscription.take().is_some() {
            debug!("tick subscription revoked");
        }
    }
}
