use std::time::Duration;

use crate::library::TrackId;

/// Per-track transport state.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum PlayState {
    #[default]
    Stopped,
    Playing,
    PausedAt(Duration),
}

impl PlayState {
    pub fn is_playing(self) -> bool {
        self == Self::Playing
    }
}

/// What the controller knows about one track's voice.
#[derive(Debug, Clone)]
pub struct TrackStatus {
    pub play: PlayState,
    pub position: Duration,
    pub duration: Option<Duration>,
    pub volume: f32,
    /// The backend could not open or decode the file.
    pub unplayable: bool,
    pub(super) duration_announced: bool,
}

impl TrackStatus {
    pub(super) fn new(volume: f32) -> Self {
        Self {
            play: PlayState::Stopped,
            position: Duration::ZERO,
            duration: None,
            volume,
            unplayable: false,
            duration_announced: false,
        }
    }

    /// `position / duration` in `[0, 1]`; zero while the length is unknown or zero.
    pub fn progress(&self) -> f64 {
        match self.duration {
            Some(d) if !d.is_zero() => {
                (self.position.as_secs_f64() / d.as_secs_f64()).clamp(0.0, 1.0)
            }
            _ => 0.0,
        }
    }
}

/// An open drag on a track's progress bar.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SeekGesture {
    pub track: TrackId,
    /// The track was audible when the drag began and resumes when it ends.
    pub was_playing: bool,
    /// Last fraction the pointer reported, already clamped.
    pub fraction: f64,
}

/// Process-wide playback state, mutated only by the controller.
#[derive(Debug, Clone)]
pub struct PlaybackState {
    pub(super) active: Option<TrackId>,
    pub(super) current_time: Duration,
    pub(super) volume: f32,
    pub(super) seeking: Option<SeekGesture>,
}

impl PlaybackState {
    pub(super) fn new(volume: f32) -> Self {
        Self {
            active: None,
            current_time: Duration::ZERO,
            volume,
            seeking: None,
        }
    }

    /// The track currently permitted to produce audio.
    pub fn active(&self) -> Option<TrackId> {
        self.active
    }

    pub fn current_time(&self) -> Duration {
        self.current_time
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn is_seeking(&self) -> bool {
        self.seeking.is_some()
    }

    pub fn seek_gesture(&self) -> Option<&SeekGesture> {
        self.seeking.as_ref()
    }
}
