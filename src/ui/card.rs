use std::time::Duration;

use crate::library::{Track, TrackId};
use crate::player::{PlayState, TrackStatus};

const ICON_PLAY: &str = "▶";
const ICON_PAUSE: &str = "⏸";
const ICON_ERROR: &str = "✖";

/// Everything one card shows, already formatted.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackCard {
    pub id: TrackId,
    pub title: String,
    /// The action the play button performs: pause while playing, play otherwise.
    pub icon: &'static str,
    pub elapsed: String,
    pub total: String,
    pub progress: f64,
    pub volume_percent: u8,
    pub playing: bool,
    pub active: bool,
    pub selected: bool,
    pub unplayable: bool,
}

/// Builds a `TrackCard` from a track and the controller's view of it.
pub struct TrackCardBuilder<'a> {
    track: &'a Track,
    status: Option<&'a TrackStatus>,
    selected: bool,
    active: bool,
}

impl<'a> TrackCardBuilder<'a> {
    pub fn new(track: &'a Track) -> Self {
        Self {
            track,
            status: None,
            selected: false,
            active: false,
        }
    }

    pub fn status(mut self, status: Option<&'a TrackStatus>) -> Self {
        self.status = status;
        self
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn build(self) -> TrackCard {
        let status = self.status;
        let playing = status.is_some_and(|s| s.play == PlayState::Playing);
        let unplayable = status.is_some_and(|s| s.unplayable);
        let position = status.map(|s| s.position).unwrap_or_default();
        let duration = status.and_then(|s| s.duration).or(self.track.duration);

        let icon = if unplayable {
            ICON_ERROR
        } else if playing {
            ICON_PAUSE
        } else {
            ICON_PLAY
        };
        let title = if unplayable {
            format!("{} (error)", self.track.display_name)
        } else {
            self.track.display_name.clone()
        };

        TrackCard {
            id: self.track.id,
            title,
            icon,
            elapsed: format_time(position),
            total: format_time(duration.unwrap_or_default()),
            progress: status.map(TrackStatus::progress).unwrap_or(0.0),
            volume_percent: volume_percent(status.map(|s| s.volume).unwrap_or(1.0)),
            playing,
            active: self.active,
            selected: self.selected,
            unplayable,
        }
    }
}

/// `M:SS`, minutes unbounded.
pub fn format_time(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

fn volume_percent(level: f32) -> u8 {
    (level.clamp(0.0, 1.0) * 100.0).round() as u8
}
