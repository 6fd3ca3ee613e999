use std::ops::Index;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::assets::Locator;
use crate::error::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub title: String,
    pub artist: String,
    pub source: Locator,
    /// Nominal length, used by engines that cannot probe the source.
    #[serde(default = "default_duration_secs")]
    pub duration_secs: u64,
}

fn default_duration_secs() -> u64 {
    180
}

impl Track {
    pub fn new(title: impl Into<String>, artist: impl Into<String>, source: impl Into<Locator>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            source: source.into(),
            duration_secs: default_duration_secs(),
        }
    }

    pub fn with_duration_secs(mut self, secs: u64) -> Self {
        self.duration_secs = secs;
        self
    }

    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.duration_secs)
    }
}

/// Ordered, non-empty list of tracks, fixed once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TrackList {
    tracks: Vec<Track>,
}

impl TrackList {
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyCollection` if `tracks` is empty.
    pub fn new(tracks: Vec<Track>) -> Result<Self, ValidationError> {
        if tracks.is_empty() {
            return Err(ValidationError::EmptyCollection("track list".into()));
        }
        Ok(Self { tracks })
    }

    /// Tracks bundled with the application.
    pub fn builtin() -> Self {
        Self {
            tracks: vec![
                Track::new("Midnight Pages", "Lofiroom", "tracks/midnight-pages.mp3").with_duration_secs(164),
                Track::new("Steam Over Tea", "Lofiroom", "tracks/steam-over-tea.mp3").with_duration_secs(142),
                Track::new("Window Rain", "Lofiroom", "tracks/window-rain.mp3").with_duration_secs(197),
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }

    /// Index after `index`, wrapping to the start.
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.tracks.len()
    }

    /// Index before `index`, wrapping to the end.
    pub fn previous_index(&self, index: usize) -> usize {
        (index + self.tracks.len() - 1) % self.tracks.len()
    }
}

impl Index<usize> for TrackList {
    type Output = Track;

    fn index(&self, index: usize) -> &Track {
        &self.tracks[index]
    }
}
