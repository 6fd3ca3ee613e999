mod controller;
mod engine;
mod track;

pub use controller::{PlaybackController, DEFAULT_VOLUME};
pub use engine::{AudioEngine, EngineStatus, SimulatedEngine};
pub use track::{Track, TrackList};
