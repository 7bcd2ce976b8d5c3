//! Utilities for creating `rodio` sinks from track sources.
//!
//! The helpers here encapsulate opening/decoding a file and preparing a
//! paused `Sink` at the requested start position.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use lofty::prelude::AudioFile;
use rodio::{Decoder, Sink, Source, mixer::Mixer};

use super::backend::BackendError;

pub(super) type FileDecoder = Decoder<BufReader<File>>;

pub(super) fn open_source(path: &Path) -> Result<FileDecoder, BackendError> {
    let file = File::open(path).map_err(|source| BackendError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    Decoder::new(BufReader::new(file)).map_err(|source| BackendError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Length from the container's audio properties, for decoders that cannot
/// tell (VBR mp3 without a Xing header, for one).
pub(super) fn probe_duration(path: &Path) -> Option<Duration> {
    let tagged = lofty::read_from_path(path).ok()?;
    let duration = tagged.properties().duration();
    (!duration.is_zero()).then_some(duration)
}

/// Create a paused `Sink` for `path` that starts playback at `start_at`.
pub(super) fn create_sink_at(
    mixer: &Mixer,
    path: &Path,
    start_at: Duration,
    volume: f32,
) -> Result<Sink, BackendError> {
    // `skip_duration` is the fallback seeking primitive; even Duration::ZERO is fine.
    let source = open_source(path)?.skip_duration(start_at);

    let sink = Sink::connect_new(mixer);
    sink.set_volume(volume);
    sink.append(source);
    sink.pause();
    Ok(sink)
}
