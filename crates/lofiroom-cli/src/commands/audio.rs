//! Audio engine backed by the default output device.
//!
//! Locators are treated as local file paths.

use std::fs::File;
use std::io::BufReader;

use lofiroom_core::{AudioEngine, EngineError, EngineStatus, Locator};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

pub struct RodioEngine {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    sink: Sink,
    source: Option<Locator>,
    volume: f32,
}

impl RodioEngine {
    pub fn open() -> Result<Self, EngineError> {
        let (stream, handle) =
            OutputStream::try_default().map_err(|e| EngineError::Device(e.to_string()))?;
        let sink = Sink::try_new(&handle).map_err(|e| EngineError::Device(e.to_string()))?;
        sink.pause();
        Ok(Self {
            _stream: stream,
            handle,
            sink,
            source: None,
            volume: 1.0,
        })
    }

    fn load(&mut self, source: &Locator) -> Result<(), EngineError> {
        let unavailable = |reason: String| EngineError::SourceUnavailable {
            locator: source.to_string(),
            reason,
        };
        let file = File::open(source.as_str()).map_err(|e| unavailable(e.to_string()))?;
        let decoder = Decoder::new(BufReader::new(file)).map_err(|e| unavailable(e.to_string()))?;

        let sink = Sink::try_new(&self.handle).map_err(|e| EngineError::Device(e.to_string()))?;
        sink.pause();
        sink.set_volume(self.volume);
        sink.append(decoder);
        self.sink.stop();
        self.sink = sink;
        tracing::debug!(%source, "source loaded");
        Ok(())
    }
}

impl AudioEngine for RodioEngine {
    fn play(&mut self) -> Result<(), EngineError> {
        let source = self
            .source
            .clone()
            .ok_or_else(|| EngineError::Device("no source loaded".into()))?;
        if self.sink.empty() {
            // Finished: start the same source over.
            self.load(&source)?;
        }
        self.sink.play();
        Ok(())
    }

    fn pause(&mut self) {
        self.sink.pause();
    }

    fn replace_source(&mut self, source: &Locator) -> Result<(), EngineError> {
        self.load(source)?;
        self.source = Some(source.clone());
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        self.sink.set_volume(volume);
    }

    fn status(&self) -> EngineStatus {
        let loaded = self.source.is_some();
        let empty = self.sink.empty();
        let paused = self.sink.is_paused();
        EngineStatus {
            is_playing: loaded && !empty && !paused,
            did_just_finish: loaded && empty && !paused,
        }
    }
}
