use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Stable identifier of a track, assigned by the playlist on append.
///
/// Ids are never reused within a session, so a stale id simply stops
/// matching anything.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrackId(pub(crate) u64);

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The file a track plays from. Owned by the playlist; dropping it is the
/// release point for the track's source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceHandle {
    path: PathBuf,
}

impl SourceHandle {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[derive(Debug, Clone)]
pub struct Track {
    pub id: TrackId,
    pub display_name: String,
    pub source: SourceHandle,
    /// Unknown until the backend reports it.
    pub duration: Option<Duration>,
}
