use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::selection::{Appearance, Background, Genre};
use crate::session::SessionSnapshot;
use crate::timer::TimerMode;

/// Every state change in the system produces an Event.
/// The front-end renders from events; nothing else observes the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerModeSelected {
        mode: TimerMode,
        duration_secs: u32,
        at: DateTime<Utc>,
    },
    TimerStarted {
        mode: TimerMode,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerPaused {
        mode: TimerMode,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    /// Countdown reached zero and stopped itself.
    TimerExpired {
        mode: TimerMode,
        at: DateTime<Utc>,
    },
    TimerReset {
        mode: TimerMode,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    /// Running listening total, reported on every active tick.
    ListeningTimeUpdated {
        total_minutes: f64,
        level: u32,
        at: DateTime<Utc>,
    },
    PlaybackStarted {
        index: usize,
        at: DateTime<Utc>,
    },
    PlaybackPaused {
        index: usize,
        at: DateTime<Utc>,
    },
    TrackChanged {
        index: usize,
        title: String,
        artist: String,
        reason: TrackChangeReason,
        at: DateTime<Utc>,
    },
    VolumeChanged {
        volume: f32,
        at: DateTime<Utc>,
    },
    BackgroundSelected {
        background: Background,
        at: DateTime<Utc>,
    },
    GenreSelected {
        genre: Genre,
        at: DateTime<Utc>,
    },
    AppearanceChanged {
        appearance: Appearance,
        at: DateTime<Utc>,
    },
    /// Wall-clock sample for the clock widget.
    ClockTicked {
        time: String,
        date: String,
        at: DateTime<Utc>,
    },
    Snapshot(SessionSnapshot),
}

/// Why the current track changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackChangeReason {
    SkipNext,
    SkipPrevious,
    /// The engine reported the previous track finished on its own.
    AutoAdvance,
}
