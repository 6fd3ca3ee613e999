//! Pomodoro countdown.
//!
//! The countdown is tick-driven, not wall-clock-driven: every call to
//! `tick()` removes exactly one second, and missed ticks are never caught up.
//! The caller owns the one-second interval and arms it only while
//! `needs_ticks()` is true.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> Idle        (toggle_run / reset)
//!         Running -> Expired     (remaining hits 0)
//! Expired -> Idle                (reset / select_mode)
//! any -> Idle(new mode)          (select_mode)
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::mode::TimerMode;
use crate::events::Event;

/// Derived state of the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Expired,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountdownSnapshot {
    pub mode: TimerMode,
    pub state: TimerState,
    pub remaining_secs: u32,
    pub is_running: bool,
    pub display: String,
    pub label: String,
    pub progress_pct: f64,
}

/// Single-timer Pomodoro engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    mode: TimerMode,
    remaining_secs: u32,
    is_running: bool,
}

impl Countdown {
    pub fn new(mode: TimerMode) -> Self {
        Self {
            mode,
            remaining_secs: mode.duration_secs(),
            is_running: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn state(&self) -> TimerState {
        if self.remaining_secs == 0 {
            TimerState::Expired
        } else if self.is_running {
            TimerState::Running
        } else {
            TimerState::Idle
        }
    }

    /// Whether a tick would change anything. The owner keeps its interval
    /// alive only while this holds.
    pub fn needs_ticks(&self) -> bool {
        self.is_running && self.remaining_secs > 0
    }

    /// 0.0 .. 100.0 elapsed share of the current mode.
    pub fn progress_percent(&self) -> f64 {
        let full = f64::from(self.mode.duration_secs());
        (full - f64::from(self.remaining_secs)) / full * 100.0
    }

    /// Remaining time as `MM:SS`.
    pub fn format_remaining(&self) -> String {
        format_mm_ss(self.remaining_secs)
    }

    pub fn snapshot(&self) -> CountdownSnapshot {
        CountdownSnapshot {
            mode: self.mode,
            state: self.state(),
            remaining_secs: self.remaining_secs,
            is_running: self.is_running,
            display: self.format_remaining(),
            label: self.mode.status_label().to_string(),
            progress_pct: self.progress_percent(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn select_mode(&mut self, mode: TimerMode) -> Event {
        debug!(%mode, "countdown mode selected");
        self.mode = mode;
        self.remaining_secs = mode.duration_secs();
        self.is_running = false;
        Event::TimerModeSelected {
            mode,
            duration_secs: self.remaining_secs,
            at: Utc::now(),
        }
    }

    /// Flip between running and paused.
    ///
    /// Starting with nothing left is allowed; the countdown then simply
    /// never ticks.
    pub fn toggle_run(&mut self) -> Event {
        self.is_running = !self.is_running;
        debug!(running = self.is_running, remaining = self.remaining_secs, "countdown toggled");
        if self.is_running {
            Event::TimerStarted {
                mode: self.mode,
                remaining_secs: self.remaining_secs,
                at: Utc::now(),
            }
        } else {
            Event::TimerPaused {
                mode: self.mode,
                remaining_secs: self.remaining_secs,
                at: Utc::now(),
            }
        }
    }

    pub fn reset(&mut self) -> Event {
        self.remaining_secs = self.mode.duration_secs();
        self.is_running = false;
        Event::TimerReset {
            mode: self.mode,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        }
    }

    /// One elapsed second. Returns `Some(Event::TimerExpired)` on the tick
    /// that reaches zero.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.needs_ticks() {
            return None;
        }
        self.remaining_secs -= 1;
        if self.remaining_secs == 0 {
            self.is_running = false;
            info!(mode = %self.mode, "countdown expired");
            return Some(Event::TimerExpired {
                mode: self.mode,
                at: Utc::now(),
            });
        }
        None
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(TimerMode::default())
    }
}

fn format_mm_ss(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
