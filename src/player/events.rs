use std::time::Duration;

use crate::library::TrackId;

use super::state::PlayState;

/// State changes a view renders, in the order they happened.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    TrackAdded(TrackId),
    TrackRemoved(TrackId),
    /// Fired once per track, the first time the backend knows the length.
    DurationKnown { id: TrackId, duration: Duration },
    PositionChanged {
        id: TrackId,
        position: Duration,
        progress: f64,
    },
    PlayStateChanged { id: TrackId, state: PlayState },
    VolumeChanged { id: TrackId, level: f32 },
}
