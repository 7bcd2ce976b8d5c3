use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink, Source, mixer::Mixer};
use tracing::{debug, warn};

use crate::library::{SourceHandle, TrackId};

use super::backend::{AudioBackend, BackendError};
use super::sink::{create_sink_at, open_source, probe_duration};

/// One track's sink plus what is needed to rebuild it.
struct Voice {
    path: PathBuf,
    sink: Sink,
    /// Where the current sink's source starts within the file. Non-zero
    /// after a seek that had to rebuild the sink with `skip_duration`.
    offset: Duration,
    duration: Option<Duration>,
    volume: f32,
}

impl Voice {
    fn position(&self) -> Duration {
        let pos = self.offset + self.sink.get_pos();
        match self.duration {
            Some(d) => pos.min(d),
            None => pos,
        }
    }
}

/// `AudioBackend` over the default output device.
pub struct RodioBackend {
    // Keeps the device pulling from `mixer`. `None` when detached.
    _stream: Option<OutputStream>,
    mixer: Mixer,
    voices: HashMap<TrackId, Voice>,
}

impl RodioBackend {
    pub fn open() -> Result<Self, BackendError> {
        let mut stream = OutputStreamBuilder::open_default_stream()?;
        // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
        // but noisy for a TUI app.
        stream.log_on_drop(false);

        let mixer = stream.mixer().clone();
        Ok(Self {
            _stream: Some(stream),
            mixer,
            voices: HashMap::new(),
        })
    }

    /// A backend whose voices feed `mixer` instead of a device; whoever
    /// holds the mixer's output drives playback.
    #[cfg(test)]
    pub(crate) fn with_mixer(mixer: Mixer) -> Self {
        Self {
            _stream: None,
            mixer,
            voices: HashMap::new(),
        }
    }

    /// Replace the voice's sink with a fresh one starting at `at`, keeping
    /// its paused/playing state.
    fn rebuild(&mut self, id: TrackId, at: Duration) {
        let Some(voice) = self.voices.get_mut(&id) else {
            return;
        };
        let resume = !voice.sink.is_paused();

        match create_sink_at(&self.mixer, &voice.path, at, voice.volume) {
            Ok(sink) => {
                voice.sink.stop();
                if resume {
                    sink.play();
                }
                voice.sink = sink;
                voice.offset = at;
            }
            Err(e) => warn!(track = %id, error = %e, "could not rebuild voice"),
        }
    }
}

impl AudioBackend for RodioBackend {
    fn load(
        &mut self,
        id: TrackId,
        source: &SourceHandle,
        volume: f32,
    ) -> Result<(), BackendError> {
        let path = source.path();
        let duration = open_source(path)?
            .total_duration()
            .or_else(|| probe_duration(path));
        let sink = create_sink_at(&self.mixer, path, Duration::ZERO, volume)?;

        debug!(track = %id, path = %path.display(), ?duration, "voice loaded");
        self.voices.insert(
            id,
            Voice {
                path: path.to_path_buf(),
                sink,
                offset: Duration::ZERO,
                duration,
                volume,
            },
        );
        Ok(())
    }

    fn play(&mut self, id: TrackId) {
        let finished = match self.voices.get(&id) {
            Some(voice) => voice.sink.empty(),
            None => return,
        };
        if finished {
            self.rebuild(id, Duration::ZERO);
        }
        if let Some(voice) = self.voices.get(&id) {
            voice.sink.play();
        }
    }

    fn pause(&mut self, id: TrackId) {
        if let Some(voice) = self.voices.get(&id) {
            voice.sink.pause();
        }
    }

    fn seek(&mut self, id: TrackId, position: Duration) {
        let Some(voice) = self.voices.get_mut(&id) else {
            return;
        };
        let target = match voice.duration {
            Some(d) => position.min(d),
            None => position,
        };

        if !voice.sink.empty() && voice.offset.is_zero() {
            match voice.sink.try_seek(target) {
                Ok(()) => return,
                Err(e) => debug!(track = %id, error = %e, "decoder cannot seek, rebuilding"),
            }
        }
        self.rebuild(id, target);
    }

    fn set_volume(&mut self, id: TrackId, level: f32) {
        if let Some(voice) = self.voices.get_mut(&id) {
            voice.volume = level.clamp(0.0, 1.0);
            voice.sink.set_volume(voice.volume);
        }
    }

    fn release(&mut self, id: TrackId) {
        if let Some(voice) = self.voices.remove(&id) {
            voice.sink.stop();
            debug!(track = %id, "voice released");
        }
    }

    fn is_playing(&self, id: TrackId) -> bool {
        self.voices
            .get(&id)
            .map(|v| !v.sink.is_paused() && !v.sink.empty())
            .unwrap_or(false)
    }

    fn position(&self, id: TrackId) -> Duration {
        self.voices
            .get(&id)
            .map(Voice::position)
            .unwrap_or(Duration::ZERO)
    }

    fn duration(&self, id: TrackId) -> Option<Duration> {
        self.voices.get(&id).and_then(|v| v.duration)
    }

    fn is_finished(&self, id: TrackId) -> bool {
        self.voices
            .get(&id)
            .map(|v| v.sink.empty())
            .unwrap_or(false)
    }
}
