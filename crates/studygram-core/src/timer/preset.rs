use serde::{Deserialize, Serialize};

/// Default "Study" sprint length in minutes.
pub const STUDY_MINUTES: u32 = 25;
/// Default "Break" sprint length in minutes.
pub const BREAK_MINUTES: u32 = 5;

/// Named sprint durations offered by the timer widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Study,
    Break,
}

impl Preset {
    pub fn label(self) -> &'static str {
        match self {
            Preset::Study => "Study",
            Preset::Break => "Break",
        }
    }
}

impl std::str::FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "study" => Ok(Preset::Study),
            "break" => Ok(Preset::Break),
            other => Err(format!("unknown preset '{other}' (expected study or break)")),
        }
    }
}

/// Where the current countdown came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "secs", rename_all = "lowercase")]
pub enum Sprint {
    Study,
    Break,
    /// Arbitrary `reset_to_preset(minutes)` call, holding the clamped
    /// length in seconds.
    Custom(u64),
}

impl Sprint {
    pub fn label(self) -> &'static str {
        match self {
            Sprint::Study => Preset::Study.label(),
            Sprint::Break => Preset::Break.label(),
            Sprint::Custom(_) => "Custom",
        }
    }
}

impl From<Preset> for Sprint {
    fn from(preset: Preset) -> Self {
        match preset {
            Preset::Study => Sprint::Study,
            Preset::Break => Sprint::Break,
        }
    }
}

/// Preset lengths in minutes, usually taken from the `[timer]` config section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresetDurations {
    pub study_minutes: u32,
    pub break_minutes: u32,
}

impl PresetDurations {
    pub fn minutes(&self, preset: Preset) -> u32 {
        match preset {
            Preset::Study => self.study_minutes,
            Preset::Break => self.break_minutes,
        }
    }

    /// Preset length in seconds, never zero.
    pub fn seconds(&self, preset: Preset) -> u64 {
        (self.minutes(preset) as u64).saturating_mul(60).max(1)
    }
}

impl Default for PresetDurations {
    fn default() -> Self {
        Self {
            study_minutes: STUDY_MINUTES,
            break_minutes: BREAK_MINUTES,
        }
    }
}
