//! # StudyGram Core Library
//!
//! Core logic behind the StudyGram focus widget: a pomodoro-style
//! countdown whose elapsed minutes accumulate toward a daily study goal,
//! and the client side of the generative study assistant. The CLI binary
//! is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Timer Engine**: a passive countdown state machine; the caller feeds
//!   it one `tick()` per elapsed second
//! - **Timer Controller**: composes the engine with the goal and owns the
//!   tick subscription, which is revoked whenever the countdown stops
//! - **Goal**: minutes studied today against a fixed daily target
//! - **Assistant**: prompt building and fallback handling around an
//!   injected [`TextGenerator`](assistant::TextGenerator)
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: countdown state machine
//! - [`TimerController`]: what a presentation layer calls
//! - [`GoalAccumulator`]: daily goal bookkeeping
//! - [`Config`]: application configuration

pub mod assistant;
pub mod error;
pub mod events;
pub mod goal;
pub mod stats;
pub mod storage;
pub mod timer;

pub use assistant::{ChatSession, GeminiClient, StudyAssistant};
pub use error::{AssistantError, ConfigError, CoreError, ValidationError};
pub use events::Event;
pub use goal::{GoalAccumulator, GoalProgress};
pub use stats::{focus_week, study_stats, weekly_average, FocusScore, StatTrends, StudyStat};
pub use storage::Config;
pub use timer::{Preset, TimerController, TimerEngine, TimerSettings, TimerState};
