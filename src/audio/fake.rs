//! In-memory backend for controller and app tests.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::{AudioBackend, BackendError};
use crate::library::{SourceHandle, TrackId};

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Call {
    Load(TrackId),
    Play(TrackId),
    Pause(TrackId),
    Seek(TrackId, Duration),
    SetVolume(TrackId, f32),
    Release(TrackId),
}

#[derive(Debug, Clone, Default)]
pub struct FakeVoice {
    pub playing: bool,
    pub position: Duration,
    pub duration: Option<Duration>,
    pub finished: bool,
    pub volume: f32,
}

/// Every voice reports `length` as its duration unless told otherwise.
#[derive(Debug, Default)]
pub struct FakeBackend {
    pub voices: HashMap<TrackId, FakeVoice>,
    pub calls: Vec<Call>,
    length: Option<Duration>,
    failing: HashSet<PathBuf>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::with_length(Some(Duration::from_secs(100)))
    }

    pub fn with_length(length: Option<Duration>) -> Self {
        Self {
            length,
            ..Self::default()
        }
    }

    /// Loading `path` will fail with a decode-style error.
    pub fn fail_on(mut self, path: impl AsRef<Path>) -> Self {
        self.failing.insert(path.as_ref().to_path_buf());
        self
    }

    pub fn voice(&self, id: TrackId) -> Option<&FakeVoice> {
        self.voices.get(&id)
    }

    pub fn playing(&self) -> Vec<TrackId> {
        let mut ids: Vec<_> = self
            .voices
            .iter()
            .filter(|(_, v)| v.playing)
            .map(|(&id, _)| id)
            .collect();
        ids.sort();
        ids
    }

    /// Move a playing voice forward as if audio had been rendered.
    pub fn advance(&mut self, id: TrackId, by: Duration) {
        if let Some(v) = self.voices.get_mut(&id).filter(|v| v.playing) {
            v.position += by;
            if let Some(d) = v.duration {
                if v.position >= d {
                    v.position = d;
                    v.playing = false;
                    v.finished = true;
                }
            }
        }
    }

    pub fn set_duration(&mut self, id: TrackId, duration: Option<Duration>) {
        if let Some(v) = self.voices.get_mut(&id) {
            v.duration = duration;
        }
    }
}

impl AudioBackend for FakeBackend {
    fn load(
        &mut self,
        id: TrackId,
        source: &SourceHandle,
        volume: f32,
    ) -> Result<(), BackendError> {
        self.calls.push(Call::Load(id));
        if self.failing.contains(source.path()) {
            return Err(BackendError::Open {
                path: source.path().to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::InvalidData, "bad file"),
            });
        }
        self.voices.insert(
            id,
            FakeVoice {
                duration: self.length,
                volume,
                ..FakeVoice::default()
            },
        );
        Ok(())
    }

    fn play(&mut self, id: TrackId) {
        self.calls.push(Call::Play(id));
        if let Some(v) = self.voices.get_mut(&id) {
            if v.finished {
                v.finished = false;
                v.position = Duration::ZERO;
            }
            v.playing = true;
        }
    }

    fn pause(&mut self, id: TrackId) {
        self.calls.push(Call::Pause(id));
        if let Some(v) = self.voices.get_mut(&id) {
            v.playing = false;
        }
    }

    fn seek(&mut self, id: TrackId, position: Duration) {
        self.calls.push(Call::Seek(id, position));
        if let Some(v) = self.voices.get_mut(&id) {
            v.position = match v.duration {
                Some(d) => position.min(d),
                None => position,
            };
            v.finished = false;
        }
    }

    fn set_volume(&mut self, id: TrackId, level: f32) {
        self.calls.push(Call::SetVolume(id, level));
        if let Some(v) = self.voices.get_mut(&id) {
            v.volume = level;
        }
    }

    fn release(&mut self, id: TrackId) {
        self.calls.push(Call::Release(id));
        self.voices.remove(&id);
    }

    fn is_playing(&self, id: TrackId) -> bool {
        self.voices.get(&id).is_some_and(|v| v.playing)
    }

    fn position(&self, id: TrackId) -> Duration {
        self.voices.get(&id).map(|v| v.position).unwrap_or_default()
    }

    fn duration(&self, id: TrackId) -> Option<Duration> {
        self.voices.get(&id).and_then(|v| v.duration)
    }

    fn is_finished(&self, id: TrackId) -> bool {
        self.voices.get(&id).is_some_and(|v| v.finished)
    }
}
