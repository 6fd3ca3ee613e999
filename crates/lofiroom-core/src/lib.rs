//! # Lofiroom Core Library
//!
//! This library provides the core logic of the Lofiroom ambient listening
//! companion: a Pomodoro countdown, a gamified listening-time counter, track
//! sequencing over an external audio engine, and the background/genre
//! selection. Front-ends (the CLI today) are thin layers over it.
//!
//! ## Architecture
//!
//! - **Countdown**: tick-driven Pomodoro state machine with three presets
//! - **Listening counter**: rate-based accumulator mirrored from playback
//! - **Playback controller**: circular track sequencing and auto-advance over
//!   the [`AudioEngine`] seam
//! - **Session**: composes the above and is driven by [`session::runner::run`]
//!
//! ## Key Components
//!
//! - [`Countdown`]: Pomodoro timer state machine
//! - [`ListeningCounter`]: listening minutes and level
//! - [`PlaybackController`]: track list sequencing
//! - [`SelectionRegistry`]: current background and genre
//! - [`Config`]: start-up preferences

pub mod assets;
pub mod clock;
pub mod config;
pub mod error;
pub mod events;
pub mod listening;
pub mod playback;
pub mod selection;
pub mod session;
pub mod timer;

pub use assets::Locator;
pub use config::Config;
pub use error::{ConfigError, CoreError, EngineError, PlaybackError, ValidationError};
pub use events::{Event, TrackChangeReason};
pub use listening::ListeningCounter;
pub use playback::{AudioEngine, EngineStatus, PlaybackController, SimulatedEngine, Track, TrackList};
pub use selection::{Appearance, Background, Choice, Genre, SelectionRegistry};
pub use session::{Command, Session, SessionSnapshot};
pub use timer::{Countdown, CountdownSnapshot, TimerMode, TimerState};
