//! One listening session: the clock, the listening counter, the player and
//! the Pomodoro timer composed behind a single owner.
//!
//! The session is plain state plus transitions. [`runner::run`] drives it
//! from one-second intervals and a command channel.

mod command;
pub mod runner;

use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::assets::Locator;
use crate::clock;
use crate::config::Config;
use crate::error::Result;
use crate::events::Event;
use crate::listening::ListeningCounter;
use crate::playback::{AudioEngine, PlaybackController};
use crate::selection::{Appearance, Background, Genre, SelectionRegistry};
use crate::timer::{Countdown, CountdownSnapshot};

pub use command::Command;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackInfo {
    pub index: usize,
    pub title: String,
    pub artist: String,
}

/// Everything a front-end needs to draw the screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub username: String,
    pub appearance: Appearance,
    pub background: Background,
    pub background_image: Locator,
    pub genre: Genre,
    pub level: u32,
    pub listening_minutes: u64,
    pub track: TrackInfo,
    pub is_playing: bool,
    pub volume: f32,
    pub timer: CountdownSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clock_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clock_date: Option<String>,
}

pub struct Session<E> {
    username: String,
    appearance: Appearance,
    selection: SelectionRegistry,
    countdown: Countdown,
    listening: ListeningCounter,
    player: PlaybackController<E>,
    clock: Option<(String, String)>,
}

impl<E: AudioEngine> Session<E> {
    /// Build a session from `config`, loading the first track into `engine`.
    ///
    /// # Errors
    ///
    /// Fails if the configured volume or track list is invalid, or the engine
    /// rejects the first track.
    pub fn new(engine: E, config: &Config) -> Result<Self> {
        let tracks = config.track_list()?;
        let player = PlaybackController::new(engine, tracks, config.player.volume)?;
        Ok(Self {
            username: config.ui.username.clone(),
            appearance: Appearance::from_dark_mode(config.ui.dark_mode),
            selection: SelectionRegistry::new(config.ui.background, config.player.genre),
            countdown: Countdown::default(),
            listening: ListeningCounter::new(),
            player,
            clock: None,
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn appearance(&self) -> Appearance {
        self.appearance
    }

    pub fn selection(&self) -> &SelectionRegistry {
        &self.selection
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    pub fn listening(&self) -> &ListeningCounter {
        &self.listening
    }

    pub fn player(&self) -> &PlaybackController<E> {
        &self.player
    }

    /// Whether the countdown interval should be armed.
    pub fn wants_countdown_ticks(&self) -> bool {
        self.countdown.needs_ticks()
    }

    /// Whether the listening interval should be armed.
    pub fn wants_listening_ticks(&self) -> bool {
        self.player.is_playing()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let track = self.player.current_track();
        SessionSnapshot {
            username: self.username.clone(),
            appearance: self.appearance,
            background: self.selection.selected_background(),
            background_image: self.selection.background(self.appearance),
            genre: self.selection.selected_genre(),
            level: self.listening.level(),
            listening_minutes: self.listening.whole_minutes(),
            track: TrackInfo {
                index: self.player.current_index(),
                title: track.title.clone(),
                artist: track.artist.clone(),
            },
            is_playing: self.player.is_playing(),
            volume: self.player.volume(),
            timer: self.countdown.snapshot(),
            clock_time: self.clock.as_ref().map(|(t, _)| t.clone()),
            clock_date: self.clock.as_ref().map(|(_, d)| d.clone()),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Apply a listener command. `Quit` is handled by the runner and yields
    /// nothing here.
    ///
    /// # Errors
    ///
    /// Engine failures and out-of-range values are returned unchanged.
    pub fn apply(&mut self, command: Command) -> Result<Vec<Event>> {
        debug!(?command, "applying command");
        let event = match command {
            Command::PlayPause => self.player.play_pause()?,
            Command::Next => self.player.skip_next()?,
            Command::Previous => self.player.skip_previous()?,
            Command::SetVolume(volume) => self.player.set_volume(volume)?,
            Command::SelectGenre(genre) => self.selection.select_genre(genre),
            Command::SelectBackground(bg) => self.selection.select_background(bg),
            Command::ToggleAppearance => {
                self.appearance = self.appearance.toggled();
                Event::AppearanceChanged {
                    appearance: self.appearance,
                    at: Utc::now(),
                }
            }
            Command::TimerMode(mode) => self.countdown.select_mode(mode),
            Command::TimerToggle => self.countdown.toggle_run(),
            Command::TimerReset => self.countdown.reset(),
            Command::Status => Event::Snapshot(self.snapshot()),
            Command::Quit => return Ok(Vec::new()),
        };
        self.sync_listening();
        Ok(vec![event])
    }

    /// One second of the Pomodoro interval.
    pub fn tick_countdown(&mut self) -> Option<Event> {
        self.countdown.tick()
    }

    /// One second of the listening interval.
    pub fn tick_listening(&mut self) -> Option<Event> {
        self.sync_listening();
        self.listening.tick()
    }

    /// Let the engine play for `elapsed` and react to what it reports.
    ///
    /// # Errors
    ///
    /// Returns the engine error if auto-advancing to the next track fails.
    pub fn poll_player(&mut self, elapsed: Duration) -> Result<Option<Event>> {
        self.player.advance(elapsed);
        let event = self.player.poll()?;
        self.sync_listening();
        Ok(event)
    }

    /// Record a clock sample for display.
    pub fn tick_clock<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) -> Event {
        let time = clock::format_time(&now.time());
        let date = clock::format_date(&now.date_naive());
        self.clock = Some((time.clone(), date.clone()));
        Event::ClockTicked {
            time,
            date,
            at: Utc::now(),
        }
    }

    fn sync_listening(&mut self) {
        self.listening.set_active(self.player.is_playing());
    }
}
