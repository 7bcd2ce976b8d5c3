use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::library::{SourceHandle, TrackId};

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("no audio output device: {0}")]
    Output(#[from] rodio::StreamError),
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },
}

/// The host audio primitive each track wraps.
///
/// Every method addresses one track's voice. Calls for an id that was never
/// loaded, or was already released, do nothing.
pub trait AudioBackend {
    /// Prepare a paused voice for `id` positioned at zero.
    fn load(&mut self, id: TrackId, source: &SourceHandle, volume: f32)
    -> Result<(), BackendError>;

    /// Start or resume from the current position. A voice that ran to the
    /// end starts over from zero.
    fn play(&mut self, id: TrackId);

    fn pause(&mut self, id: TrackId);

    /// Move to `position` without changing the paused/playing state.
    fn seek(&mut self, id: TrackId, position: Duration);

    fn set_volume(&mut self, id: TrackId, level: f32);

    /// Stop and drop the voice.
    fn release(&mut self, id: TrackId);

    fn is_playing(&self, id: TrackId) -> bool;

    fn position(&self, id: TrackId) -> Duration;

    /// `None` until the decoder or container reports a length.
    fn duration(&self, id: TrackId) -> Option<Duration>;

    /// The voice played through its source and fell silent.
    fn is_finished(&self, id: TrackId) -> bool;
}
