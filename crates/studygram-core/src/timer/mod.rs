mod controller;
mod engine;
mod format;
mod preset;
mod tick;

pub use controller::{
    TickReport, TimerController, TimerSettings, DEFAULT_COMPLETED_MINUTES,
    DEFAULT_DAILY_GOAL_MINUTES,
};
pub use engine::{TimerEngine, TimerState};
pub use format::{format_remaining, format_study_time, parse_remaining};
pub use preset::{Preset, PresetDurations, Sprint, BREAK_MINUTES, STUDY_MINUTES};
pub use tick::{
    IntervalTickSource, ManualTickSource, ManualTicker, TickSource, TickSubscription,
};
