//! Track sequencing over an [`AudioEngine`].
//!
//! The controller owns the track list, the current index, the volume and the
//! listener's intended play state. Actual playback state is read back from
//! the engine.

use chrono::Utc;
use tracing::{debug, info, warn};

use super::engine::{AudioEngine, EngineStatus};
use super::track::{Track, TrackList};
use crate::error::{PlaybackError, ValidationError};
use crate::events::{Event, TrackChangeReason};

pub const DEFAULT_VOLUME: f32 = 0.7;

pub struct PlaybackController<E> {
    engine: E,
    tracks: TrackList,
    index: usize,
    /// What the listener asked for; survives track switches.
    wants_play: bool,
    volume: f32,
    /// Set once a completion has been handled, until the engine lowers
    /// `did_just_finish` again.
    finish_handled: bool,
}

impl<E: AudioEngine> PlaybackController<E> {
    /// Load the first track into `engine` and apply `volume`.
    ///
    /// # Errors
    ///
    /// Fails if the volume is out of range or the engine rejects the first
    /// source.
    pub fn new(mut engine: E, tracks: TrackList, volume: f32) -> Result<Self, PlaybackError> {
        let volume = validate_volume(volume)?;
        engine.set_volume(volume);
        engine.replace_source(&tracks[0].source)?;
        Ok(Self {
            engine,
            tracks,
            index: 0,
            wants_play: false,
            volume,
            finish_handled: false,
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn tracks(&self) -> &TrackList {
        &self.tracks
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn current_track(&self) -> &Track {
        &self.tracks[self.index]
    }

    pub fn is_playing(&self) -> bool {
        self.engine.status().is_playing
    }

    pub fn status(&self) -> EngineStatus {
        self.engine.status()
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn play_pause(&mut self) -> Result<Event, PlaybackError> {
        if self.engine.status().is_playing {
            self.engine.pause();
            self.wants_play = false;
            debug!(index = self.index, "playback paused");
            Ok(Event::PlaybackPaused {
                index: self.index,
                at: Utc::now(),
            })
        } else {
            self.engine.play().inspect_err(|e| warn!(error = %e, "engine failed to play"))?;
            self.wants_play = true;
            debug!(index = self.index, "playback started");
            Ok(Event::PlaybackStarted {
                index: self.index,
                at: Utc::now(),
            })
        }
    }

    pub fn skip_next(&mut self) -> Result<Event, PlaybackError> {
        let next = self.tracks.next_index(self.index);
        self.switch_to(next, TrackChangeReason::SkipNext)
    }

    pub fn skip_previous(&mut self) -> Result<Event, PlaybackError> {
        let previous = self.tracks.previous_index(self.index);
        self.switch_to(previous, TrackChangeReason::SkipPrevious)
    }

    /// Observe the engine and auto-advance on natural completion.
    ///
    /// Each completion is handled exactly once, however many times it is
    /// observed.
    pub fn poll(&mut self) -> Result<Option<Event>, PlaybackError> {
        if !self.engine.status().did_just_finish {
            self.finish_handled = false;
            return Ok(None);
        }
        if self.finish_handled {
            return Ok(None);
        }
        self.finish_handled = true;
        let next = self.tracks.next_index(self.index);
        self.switch_to(next, TrackChangeReason::AutoAdvance).map(Some)
    }

    /// Set output volume in `[0, 1]`, applied to the engine immediately.
    pub fn set_volume(&mut self, volume: f32) -> Result<Event, PlaybackError> {
        let volume = validate_volume(volume)?;
        self.volume = volume;
        self.engine.set_volume(volume);
        Ok(Event::VolumeChanged {
            volume,
            at: Utc::now(),
        })
    }

    /// Forward elapsed wall-clock time to the engine.
    pub fn advance(&mut self, elapsed: std::time::Duration) {
        self.engine.advance(elapsed);
    }

    /// The index only moves once the engine holds the new source, so a
    /// rejected switch leaves the current track in place and can be retried.
    fn switch_to(&mut self, index: usize, reason: TrackChangeReason) -> Result<Event, PlaybackError> {
        let track = self.tracks[index].clone();
        self.engine
            .replace_source(&track.source)
            .inspect_err(|e| warn!(error = %e, source = %track.source, "engine rejected source"))?;
        self.index = index;
        if self.wants_play {
            self.engine.play()?;
        }
        info!(index, title = %track.title, ?reason, "track changed");
        Ok(Event::TrackChanged {
            index,
            title: track.title,
            artist: track.artist,
            reason,
            at: Utc::now(),
        })
    }
}

fn validate_volume(volume: f32) -> Result<f32, ValidationError> {
    if volume.is_finite() && (0.0..=1.0).contains(&volume) {
        Ok(volume)
    } else {
        Err(ValidationError::invalid("volume", format!("{volume} is outside 0.0..=1.0")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::Locator;
    use crate::error::EngineError;
    use crate::playback::SimulatedEngine;
    use proptest::prelude::*;

    /// Engine that records calls and lets the test raise completion.
    #[derive(Default)]
    struct FakeEngine {
        calls: Vec<String>,
        playing: bool,
        finished: bool,
        volume: f32,
        fail_on: Option<String>,
    }

    impl FakeEngine {
        fn finish_track(&mut self) {
            self.playing = false;
            self.finished = true;
        }
    }

    impl AudioEngine for FakeEngine {
        fn play(&mut self) -> Result<(), EngineError> {
            self.calls.push("play".into());
            self.playing = true;
            self.finished = false;
            Ok(())
        }

        fn pause(&mut self) {
            self.calls.push("pause".into());
            self.playing = false;
        }

        fn replace_source(&mut self, source: &Locator) -> Result<(), EngineError> {
            if self.fail_on.as_deref() == Some(source.as_str()) {
                return Err(EngineError::SourceUnavailable {
                    locator: source.to_string(),
                    reason: "missing".into(),
                });
            }
            self.calls.push(format!("replace:{source}"));
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
    }

    fn tracks(n: usize) -> TrackList {
        TrackList::new(
            (0..n)
                .map(|i| Track::new(format!("Track {i}"), "Artist", format!("t{i}.mp3")))
                .collect(),
        )
        .unwrap()
    }

    fn controller(n: usize) -> PlaybackController<FakeEngine> {
        PlaybackController::new(FakeEngine::default(), tracks(n), DEFAULT_VOLUME).unwrap()
    }

    #[test]
    fn new_loads_first_track_and_volume() {
        let c = controller(3);
        assert_eq!(c.current_index(), 0);
        assert_eq!(c.engine().calls, vec!["replace:t0.mp3"]);
        assert!((c.engine().volume - 0.7).abs() < f32::EPSILON);
        assert!(!c.is_playing());
    }

    #[test]
    fn skip_previous_wraps_backwards() {
        let mut c = controller(3);
        c.skip_previous().unwrap();
        assert_eq!(c.current_index(), 2);
        assert_eq!(c.current_track().title, "Track 2");
    }

    #[test]
    fn play_pause_toggles_engine() {
        let mut c = controller(2);
        assert!(matches!(c.play_pause().unwrap(), Event::PlaybackStarted { .. }));
        assert!(c.is_playing());
        assert!(matches!(c.play_pause().unwrap(), Event::PlaybackPaused { .. }));
        assert!(!c.is_playing());
    }

    #[test]
    fn skip_while_playing_resumes_new_track() {
        let mut c = controller(3);
        c.play_pause().unwrap();
        c.skip_next().unwrap();
        assert!(c.is_playing());
        let calls = &c.engine().calls;
        assert_eq!(&calls[calls.len() - 2..], ["replace:t1.mp3", "play"]);
    }

    #[test]
    fn skip_while_paused_stays_paused() {
        let mut c = controller(3);
        c.skip_next().unwrap();
        assert!(!c.is_playing());
        assert_eq!(c.engine().calls.last().map(String::as_str), Some("replace:t1.mp3"));
    }

    #[test]
    fn completion_advances_once_and_keeps_playing() {
        let mut c = controller(3);
        c.play_pause().unwrap();
        c.engine_mut().finish_track();
        let event = c.poll().unwrap();
        assert!(matches!(
            event,
            Some(Event::TrackChanged {
                index: 1,
                reason: TrackChangeReason::AutoAdvance,
                ..
            })
        ));
        assert!(c.is_playing());
        assert!(c.poll().unwrap().is_none());
        assert_eq!(c.current_index(), 1);
    }

    #[test]
    fn sticky_finish_flag_does_not_double_skip() {
        let mut c = controller(4);
        c.engine_mut().finish_track();
        c.poll().unwrap();
        // engine that keeps the flag raised after replace
        c.engine_mut().finished = true;
        assert!(c.poll().unwrap().is_none());
        assert!(c.poll().unwrap().is_none());
        assert_eq!(c.current_index(), 1);
    }

    #[test]
    fn manual_pause_never_advances() {
        let mut c = controller(3);
        c.play_pause().unwrap();
        c.play_pause().unwrap();
        assert!(c.poll().unwrap().is_none());
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn volume_must_be_in_unit_range() {
        let mut c = controller(1);
        assert!(matches!(c.set_volume(0.25).unwrap(), Event::VolumeChanged { .. }));
        assert!((c.engine().volume - 0.25).abs() < f32::EPSILON);
        assert!(matches!(c.set_volume(1.5), Err(PlaybackError::Validation(_))));
        assert!(matches!(c.set_volume(f32::NAN), Err(PlaybackError::Validation(_))));
        assert!((c.volume() - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn volume_is_independent_of_track_changes() {
        let mut c = controller(3);
        c.set_volume(0.1).unwrap();
        c.skip_next().unwrap();
        assert!((c.volume() - 0.1).abs() < f32::EPSILON);
    }

    #[test]
    fn engine_failure_is_surfaced_unchanged() {
        let mut engine = FakeEngine::default();
        engine.fail_on = Some("t1.mp3".into());
        let mut c = PlaybackController::new(engine, tracks(3), 0.5).unwrap();
        let err = c.skip_next().unwrap_err();
        assert_eq!(
            err,
            PlaybackError::Engine(EngineError::SourceUnavailable {
                locator: "t1.mp3".into(),
                reason: "missing".into(),
            })
        );
    }

    #[test]
    fn rejected_skip_keeps_current_track() {
        let tracks = TrackList::new(vec![
            Track::new("One", "A", "one.mp3"),
            Track::new("Two", "B", "two.mp3"),
            Track::new("Three", "C", "three.mp3"),
        ])
        .unwrap();
        let mut engine = SimulatedEngine::for_tracks(&tracks);
        engine.mark_unavailable(Locator::new("two.mp3"));
        let mut c = PlaybackController::new(engine, tracks, DEFAULT_VOLUME).unwrap();
        c.play_pause().unwrap();

        assert!(c.skip_next().is_err());
        assert_eq!(c.current_index(), 0);
        assert_eq!(c.current_track().title, "One");
        assert_eq!(c.engine().source().map(Locator::as_str), Some("one.mp3"));
        assert!(c.is_playing());

        // Retrying hits the same track again instead of moving further on.
        assert!(c.skip_next().is_err());
        assert_eq!(c.current_index(), 0);
    }

    proptest! {
        #[test]
        fn next_then_previous_restores_index(len in 1usize..12, start in 0usize..12) {
            let mut c = controller(len);
            for _ in 0..(start % len) {
                c.skip_next().unwrap();
            }
            let before = c.current_index();
            c.skip_next().unwrap();
            c.skip_previous().unwrap();
            prop_assert_eq!(c.current_index(), before);
        }

        #[test]
        fn n_completions_land_on_n_mod_len(len in 1usize..8, n in 0usize..40) {
            let mut c = controller(len);
            c.play_pause().unwrap();
            for _ in 0..n {
                c.engine_mut().finish_track();
                c.poll().unwrap();
                c.poll().unwrap();
            }
            prop_assert_eq!(c.current_index(), n % len);
        }
    }
}
