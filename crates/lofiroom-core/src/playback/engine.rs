//! Seam to the external audio engine.
//!
//! The core holds no audio buffers. An engine plays one source at a time and
//! exposes a small status read; the controller reacts to that status.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use serde::Serialize;

use super::track::{Track, TrackList};
use crate::assets::Locator;
use crate::error::EngineError;

/// Status read from an engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EngineStatus {
    pub is_playing: bool,
    /// Raised when the current source played to its natural end. Cleared by
    /// the next `replace_source` or `play`.
    pub did_just_finish: bool,
}

pub trait AudioEngine {
    /// Start or resume the current source.
    fn play(&mut self) -> Result<(), EngineError>;

    fn pause(&mut self);

    /// Swap the current source. Does not start playback by itself.
    fn replace_source(&mut self, source: &Locator) -> Result<(), EngineError>;

    fn set_volume(&mut self, volume: f32);

    fn status(&self) -> EngineStatus;

    /// Let wall-clock time pass. Device-backed engines play on their own and
    /// ignore this.
    fn advance(&mut self, _elapsed: Duration) {}
}

impl<E: AudioEngine + ?Sized> AudioEngine for Box<E> {
    fn play(&mut self) -> Result<(), EngineError> {
        (**self).play()
    }

    fn pause(&mut self) {
        (**self).pause();
    }

    fn replace_source(&mut self, source: &Locator) -> Result<(), EngineError> {
        (**self).replace_source(source)
    }

    fn set_volume(&mut self, volume: f32) {
        (**self).set_volume(volume);
    }

    fn status(&self) -> EngineStatus {
        (**self).status()
    }

    fn advance(&mut self, elapsed: Duration) {
        (**self).advance(elapsed);
    }
}

/// Headless engine that pretends to play each source for its nominal length.
#[derive(Debug, Clone)]
pub struct SimulatedEngine {
    durations: HashMap<Locator, Duration>,
    default_duration: Duration,
    unavailable: HashSet<Locator>,
    source: Option<Locator>,
    position: Duration,
    playing: bool,
    finished: bool,
    volume: f32,
}

impl SimulatedEngine {
    pub fn new(default_duration: Duration) -> Self {
        Self {
            durations: HashMap::new(),
            default_duration,
            unavailable: HashSet::new(),
            source: None,
            position: Duration::ZERO,
            playing: false,
            finished: false,
            volume: 1.0,
        }
    }

    /// Engine that knows the nominal length of every track in `tracks`.
    pub fn for_tracks(tracks: &TrackList) -> Self {
        let default = tracks.iter().map(Track::duration).max().unwrap_or_default();
        Self::new(default).with_durations(tracks.iter().map(|t| (t.source.clone(), t.duration())))
    }

    /// Register known lengths for sources.
    pub fn with_durations<I>(mut self, durations: I) -> Self
    where
        I: IntoIterator<Item = (Locator, Duration)>,
    {
        self.durations.extend(durations);
        self
    }

    /// Make `replace_source` fail for this locator.
    pub fn mark_unavailable(&mut self, source: Locator) {
        self.unavailable.insert(source);
    }

    pub fn source(&self) -> Option<&Locator> {
        self.source.as_ref()
    }

    pub fn position(&self) -> Duration {
        self.position
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    fn current_duration(&self) -> Duration {
        self.source
            .as_ref()
            .and_then(|s| self.durations.get(s))
            .copied()
            .unwrap_or(self.default_duration)
    }
}

impl AudioEngine for SimulatedEngine {
    fn play(&mut self) -> Result<(), EngineError> {
        if self.source.is_none() {
            return Err(EngineError::Device("no source loaded".into()));
        }
        if self.finished {
            // Playing a finished source starts it over.
            self.position = Duration::ZERO;
            self.finished = false;
        }
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn replace_source(&mut self, source: &Locator) -> Result<(), EngineError> {
        if self.unavailable.contains(source) {
            return Err(EngineError::SourceUnavailable {
                locator: source.to_string(),
                reason: "not found".into(),
            });
        }
        self.source = Some(source.clone());
        self.position = Duration::ZERO;
        self.playing = false;
        self.finished = false;
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }

    fn status(&self) -> EngineStatus {
        EngineStatus {
            is_playing: self.playing,
            did_just_finish: self.finished,
        }
    }

    fn advance(&mut self, elapsed: Duration) {
        if !self.playing {
            return;
        }
        let duration = self.current_duration();
        self.position = (self.position + elapsed).min(duration);
        if self.position >= duration {
            self.playing = false;
            self.finished = true;
        }
    }
}
