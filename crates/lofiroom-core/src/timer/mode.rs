use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The three fixed countdown presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimerMode {
    #[default]
    Work,
    ShortBreak,
    LongBreak,
}

impl TimerMode {
    pub const ALL: [TimerMode; 3] = [TimerMode::Work, TimerMode::ShortBreak, TimerMode::LongBreak];

    /// Full duration of the preset in whole seconds.
    pub fn duration_secs(self) -> u32 {
        match self {
            TimerMode::Work => 25 * 60,
            TimerMode::ShortBreak => 5 * 60,
            TimerMode::LongBreak => 60 * 60,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            TimerMode::Work => "work",
            TimerMode::ShortBreak => "short-break",
            TimerMode::LongBreak => "long-break",
        }
    }

    /// Label on the mode selector button.
    pub fn label(self) -> &'static str {
        match self {
            TimerMode::Work => "Focus",
            TimerMode::ShortBreak => "Short Break",
            TimerMode::LongBreak => "Long Break",
        }
    }

    /// Compact duration shown under the label, e.g. "25m".
    pub fn short_duration(self) -> String {
        format!("{}m", self.duration_secs() / 60)
    }

    /// Caption under the running countdown.
    pub fn status_label(self) -> &'static str {
        match self {
            TimerMode::Work => "Focus Time",
            TimerMode::ShortBreak => "Short Break",
            TimerMode::LongBreak => "Long Break",
        }
    }
}

impl fmt::Display for TimerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for TimerMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "work" | "focus" => Ok(TimerMode::Work),
            "short-break" | "short" | "shortbreak" => Ok(TimerMode::ShortBreak),
            "long-break" | "long" | "longbreak" => Ok(TimerMode::LongBreak),
            other => Err(ValidationError::invalid(
                "mode",
                format!("unknown timer mode '{other}' (expected work, short-break or long-break)"),
            )),
        }
    }
}
