//! Gamified listening-time counter.
//!
//! Accumulation is rate based: each active tick adds `1/60` of a minute.
//! Ticks lost while the host was suspended are not made up, so leveling
//! speed depends on delivered ticks only.

use chrono::Utc;
use tracing::debug;

use crate::events::Event;

/// Minutes added per active one-second tick.
pub const MINUTES_PER_TICK: f64 = 1.0 / 60.0;

/// Accumulated minutes needed per level.
pub const MINUTES_PER_LEVEL: f64 = 30.0;

/// Level for a listening total: one level per 30 minutes, starting at 1.
pub fn level_for(total_minutes: f64) -> u32 {
    (total_minutes / MINUTES_PER_LEVEL).floor() as u32 + 1
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListeningCounter {
    total_minutes: f64,
    is_active: bool,
}

impl ListeningCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_minutes(&self) -> f64 {
        self.total_minutes
    }

    /// Whole minutes, as shown in "N min listening".
    pub fn whole_minutes(&self) -> u64 {
        self.total_minutes.floor() as u64
    }

    pub fn level(&self) -> u32 {
        level_for(self.total_minutes)
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Mirror the external playback signal.
    pub fn set_active(&mut self, active: bool) {
        if self.is_active != active {
            debug!(active, total = self.total_minutes, "listening counter activity changed");
        }
        self.is_active = active;
    }

    /// One elapsed second. While active, adds to the total and reports it.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.is_active {
            return None;
        }
        self.total_minutes += MINUTES_PER_TICK;
        Some(Event::ListeningTimeUpdated {
            total_minutes: self.total_minutes,
            level: self.level(),
            at: Utc::now(),
        })
    }
}
