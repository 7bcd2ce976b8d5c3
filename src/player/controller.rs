use std::collections::HashMap;
use std::time::Duration;

use tracing::{debug, info, trace, warn};

use crate::audio::AudioBackend;
use crate::config::Settings;
use crate::library::{ImportEntry, Track, TrackId};
use crate::playlist::{Direction, PlaylistStore};

use super::events::PlayerEvent;
use super::state::{PlayState, PlaybackState, SeekGesture, TrackStatus};

/// Knobs the controller takes from `Settings`.
#[derive(Debug, Clone, Copy)]
pub struct ControllerOptions {
    /// Volume new cards start at.
    pub default_volume: f32,
    /// Play the next card when the active one runs out.
    pub auto_advance: bool,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            default_volume: 1.0,
            auto_advance: true,
        }
    }
}

impl ControllerOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            default_volume: settings.audio.default_volume.clamp(0.0, 1.0),
            auto_advance: settings.playback.auto_advance,
        }
    }
}

/// Owns the playlist, the backend voices and the `PlaybackState`.
///
/// Every operation on an unknown id is a no-op. Nothing here returns an
/// error: the view cannot name a track that does not exist, and backend
/// failures only mark the track unplayable.
pub struct Controller<B: AudioBackend> {
    backend: B,
    playlist: PlaylistStore,
    statuses: HashMap<TrackId, TrackStatus>,
    state: PlaybackState,
    events: Vec<PlayerEvent>,
    options: ControllerOptions,
}

impl<B: AudioBackend> Controller<B> {
    pub fn new(backend: B, playlist: PlaylistStore, options: ControllerOptions) -> Self {
        Self {
            backend,
            playlist,
            statuses: HashMap::new(),
            state: PlaybackState::new(options.default_volume),
            events: Vec::new(),
            options,
        }
    }

    // ---- queries ----

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn tracks(&self) -> &[Track] {
        self.playlist.list()
    }

    pub fn track(&self, id: TrackId) -> Option<&Track> {
        self.playlist.get(id)
    }

    pub fn status(&self, id: TrackId) -> Option<&TrackStatus> {
        self.statuses.get(&id)
    }

    pub fn is_playing(&self, id: TrackId) -> bool {
        self.statuses
            .get(&id)
            .map(|s| s.play.is_playing())
            .unwrap_or(false)
    }

    /// Number of tracks in the `Playing` state. Never more than one.
    #[cfg(test)]
    pub(crate) fn playing_count(&self) -> usize {
        self.statuses.values().filter(|s| s.play.is_playing()).count()
    }

    pub fn progress(&self, id: TrackId) -> f64 {
        self.statuses.get(&id).map(TrackStatus::progress).unwrap_or(0.0)
    }

    #[cfg(test)]
    pub(crate) fn backend(&self) -> &B {
        &self.backend
    }

    #[cfg(test)]
    pub(crate) fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Drain the queued state-change notifications.
    pub fn take_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.events)
    }

    // ---- playlist ----

    /// Append entries to the playlist and give each new track a voice.
    pub fn import(&mut self, entries: Vec<ImportEntry>) -> Vec<TrackId> {
        let ids = self.playlist.append(entries);
        for &id in &ids {
            let mut status = TrackStatus::new(self.options.default_volume);
            if let Some(track) = self.playlist.get(id) {
                let source = track.source.clone();
                if let Err(e) = self.backend.load(id, &source, status.volume) {
                    warn!(track = %id, error = %e, "track cannot be played");
                    status.unplayable = true;
                }
            }
            self.statuses.insert(id, status);
            self.events.push(PlayerEvent::TrackAdded(id));
        }
        if !ids.is_empty() {
            info!(added = ids.len(), total = self.playlist.len(), "imported tracks");
        }
        ids
    }

    /// Stop the track if it plays, release its voice and drop it from the playlist.
    pub fn remove(&mut self, id: TrackId) {
        if !self.playlist.contains(id) {
            trace!(track = %id, "remove: unknown track");
            return;
        }
        if self.state.seeking.is_some_and(|g| g.track == id) {
            self.state.seeking = None;
        }
        // Silence first, then release.
        self.backend.pause(id);
        if self.state.active == Some(id) {
            self.state.active = None;
            self.state.current_time = Duration::ZERO;
        }
        self.backend.release(id);
        self.statuses.remove(&id);
        self.playlist.remove(id);
        self.events.push(PlayerEvent::TrackRemoved(id));
        debug!(track = %id, "track removed");
    }

    /// Remove every track.
    pub fn clear(&mut self) {
        self.state.seeking = None;
        self.state.active = None;
        self.state.current_time = Duration::ZERO;
        for track in self.playlist.clear() {
            self.backend.pause(track.id);
            self.backend.release(track.id);
            self.statuses.remove(&track.id);
            self.events.push(PlayerEvent::TrackRemoved(track.id));
        }
        info!("playlist cleared");
    }

    // ---- transport ----

    /// Pause whatever else is playing, then start `id` from where it stands.
    pub fn play(&mut self, id: TrackId) {
        let Some(status) = self.statuses.get(&id) else {
            trace!(track = %id, "play: unknown track");
            return;
        };
        if status.unplayable {
            debug!(track = %id, "play: track is unplayable");
            return;
        }
        // A dragged track resumes when the drag ends.
        if let Some(gesture) = self.state.seeking.as_mut().filter(|g| g.track == id) {
            gesture.was_playing = true;
            return;
        }

        let others: Vec<TrackId> = self
            .statuses
            .iter()
            .filter(|&(&other, s)| other != id && (s.play.is_playing() || self.backend.is_playing(other)))
            .map(|(&other, _)| other)
            .collect();
        for other in others {
            self.pause_voice(other);
        }

        self.backend.play(id);
        let position = self.backend.position(id);
        if let Some(status) = self.statuses.get_mut(&id) {
            status.play = PlayState::Playing;
            status.position = position;
            self.state.volume = status.volume;
        }
        self.state.active = Some(id);
        self.state.current_time = position;
        self.events.push(PlayerEvent::PlayStateChanged {
            id,
            state: PlayState::Playing,
        });
    }

    /// Pause `id` if it is the active track. A track under an open drag
    /// stays paused when the drag ends.
    pub fn pause(&mut self, id: TrackId) {
        if let Some(gesture) = self.state.seeking.as_mut().filter(|g| g.track == id) {
            gesture.was_playing = false;
            return;
        }
        if self.state.active != Some(id) {
            trace!(track = %id, "pause: not the active track");
            return;
        }
        self.pause_voice(id);
    }

    pub fn toggle_play_pause(&mut self, id: TrackId) {
        if let Some(gesture) = self.state.seeking.as_mut().filter(|g| g.track == id) {
            gesture.was_playing = !gesture.was_playing;
            return;
        }
        if self.is_playing(id) {
            self.pause(id);
        } else {
            self.play(id);
        }
    }

    /// Start the track after `id` in playlist order, resetting `id` to zero.
    pub fn next(&mut self, id: TrackId) {
        self.step(id, Direction::Next);
    }

    /// Start the track before `id` in playlist order, resetting `id` to zero.
    pub fn previous(&mut self, id: TrackId) {
        self.step(id, Direction::Previous);
    }

    fn step(&mut self, id: TrackId, direction: Direction) {
        let Some(target) = self.playable_neighbour(id, direction) else {
            trace!(track = %id, ?direction, "no neighbour to move to");
            return;
        };
        self.stop_voice(id);
        self.play(target);
    }

    /// Nearest neighbour in `direction` that has a working voice.
    fn playable_neighbour(&self, id: TrackId, direction: Direction) -> Option<TrackId> {
        let mut cursor = self.playlist.neighbour(id, direction)?;
        loop {
            if self.statuses.get(&cursor).is_some_and(|s| !s.unplayable) {
                return Some(cursor);
            }
            cursor = self.playlist.neighbour(cursor, direction)?;
        }
    }

    /// Per-card volume, clamped to `[0, 1]`.
    pub fn set_volume(&mut self, id: TrackId, level: f32) {
        if level.is_nan() {
            return;
        }
        let level = level.clamp(0.0, 1.0);
        let Some(status) = self.statuses.get_mut(&id) else {
            trace!(track = %id, "set_volume: unknown track");
            return;
        };
        status.volume = level;
        self.backend.set_volume(id, level);
        if self.state.active == Some(id) {
            self.state.volume = level;
        }
        self.events.push(PlayerEvent::VolumeChanged { id, level });
    }

    // ---- seeking ----

    /// Move `id` to `fraction` of its length.
    ///
    /// While a drag on `id` is open this only previews the position; the
    /// backend is moved when the drag ends.
    pub fn seek(&mut self, id: TrackId, fraction: f64) {
        if !self.statuses.contains_key(&id) {
            trace!(track = %id, "seek: unknown track");
            return;
        }
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        let target = self.position_at(id, fraction);

        if let Some(gesture) = self.state.seeking.as_mut().filter(|g| g.track == id) {
            gesture.fraction = fraction;
            self.set_position(id, target);
            return;
        }
        self.seek_to(id, target);
    }

    /// Move `id` by `offset_secs` seconds, clamped to the track.
    pub fn seek_by(&mut self, id: TrackId, offset_secs: i64) {
        let Some(status) = self.statuses.get(&id) else {
            return;
        };
        let magnitude = Duration::from_secs(offset_secs.unsigned_abs());
        let mut target = if offset_secs >= 0 {
            status.position.saturating_add(magnitude)
        } else {
            status.position.saturating_sub(magnitude)
        };
        if let Some(d) = status.duration {
            target = target.min(d);
        }
        self.seek_to(id, target);
    }

    /// Open a drag on `id`'s progress bar, pausing it if it plays.
    pub fn begin_seek(&mut self, id: TrackId) {
        let Some(status) = self.statuses.get(&id) else {
            trace!(track = %id, "begin_seek: unknown track");
            return;
        };
        if status.unplayable {
            return;
        }
        if self.state.seeking.is_some() {
            self.end_seek();
        }

        let was_playing = self.is_playing(id);
        let fraction = self.progress(id);
        if was_playing {
            self.pause_voice(id);
        }
        self.state.seeking = Some(SeekGesture {
            track: id,
            was_playing,
            fraction,
        });
        debug!(track = %id, was_playing, "seek drag started");
    }

    /// Close the open drag: commit the position and resume if the track
    /// was playing when the drag began.
    pub fn end_seek(&mut self) {
        let Some(gesture) = self.state.seeking.take() else {
            return;
        };
        if !self.statuses.contains_key(&gesture.track) {
            return;
        }
        let target = self.position_at(gesture.track, gesture.fraction);
        self.seek_to(gesture.track, target);
        if gesture.was_playing {
            self.play(gesture.track);
        }
        debug!(track = %gesture.track, fraction = gesture.fraction, "seek drag finished");
    }

    /// A drag that was abandoned (pointer released elsewhere, focus lost)
    /// is finished like a normal release at the last reported position.
    pub fn cancel_seek(&mut self) {
        self.end_seek();
    }

    // ---- backend signals ----

    /// Poll every voice: announce lengths once, mirror positions, and
    /// handle the active track running out.
    pub fn tick(&mut self) {
        let ids: Vec<TrackId> = self.playlist.list().iter().map(|t| t.id).collect();
        let dragging = self.state.seeking.map(|g| g.track);
        let mut finished = Vec::new();

        for id in ids {
            let Some(status) = self.statuses.get_mut(&id) else {
                continue;
            };
            if status.unplayable {
                continue;
            }

            if !status.duration_announced {
                if let Some(duration) = self.backend.duration(id) {
                    status.duration = Some(duration);
                    status.duration_announced = true;
                    if let Some(track) = self.playlist.get_mut(id) {
                        track.duration = Some(duration);
                    }
                    self.events.push(PlayerEvent::DurationKnown { id, duration });
                }
            }

            if dragging == Some(id) || !status.play.is_playing() {
                continue;
            }
            if self.backend.is_finished(id) {
                finished.push(id);
                continue;
            }

            let position = self.backend.position(id);
            if position != status.position {
                status.position = position;
                let progress = status.progress();
                self.events.push(PlayerEvent::PositionChanged {
                    id,
                    position,
                    progress,
                });
            }
        }

        for id in finished {
            self.track_ended(id);
        }

        if let Some(active) = self.state.active {
            if let Some(status) = self.statuses.get(&active) {
                self.state.current_time = status.position;
            }
        }
    }

    fn track_ended(&mut self, id: TrackId) {
        debug!(track = %id, "track finished");
        self.stop_voice(id);
        if !self.options.auto_advance {
            return;
        }
        if let Some(next) = self.playable_neighbour(id, Direction::Next) {
            self.play(next);
        }
    }

    // ---- helpers ----

    fn position_at(&self, id: TrackId, fraction: f64) -> Duration {
        let duration = self
            .statuses
            .get(&id)
            .and_then(|s| s.duration)
            .or_else(|| self.backend.duration(id));
        match duration {
            Some(d) if !d.is_zero() => d.mul_f64(fraction).min(d),
            _ => Duration::ZERO,
        }
    }

    fn seek_to(&mut self, id: TrackId, target: Duration) {
        self.backend.seek(id, target);
        if let Some(status) = self.statuses.get_mut(&id) {
            if let PlayState::PausedAt(_) = status.play {
                status.play = PlayState::PausedAt(target);
            }
        }
        self.set_position(id, target);
    }

    fn set_position(&mut self, id: TrackId, position: Duration) {
        let Some(status) = self.statuses.get_mut(&id) else {
            return;
        };
        status.position = position;
        let progress = status.progress();
        if self.state.active == Some(id) {
            self.state.current_time = position;
        }
        self.events.push(PlayerEvent::PositionChanged {
            id,
            position,
            progress,
        });
    }

    fn pause_voice(&mut self, id: TrackId) {
        self.backend.pause(id);
        let position = self.backend.position(id);
        if let Some(status) = self.statuses.get_mut(&id) {
            status.position = position;
            status.play = PlayState::PausedAt(position);
        }
        if self.state.active == Some(id) {
            self.state.active = None;
            self.state.current_time = position;
        }
        self.events.push(PlayerEvent::PlayStateChanged {
            id,
            state: PlayState::PausedAt(position),
        });
    }

    /// Silence `id` and rewind it to zero.
    fn stop_voice(&mut self, id: TrackId) {
        self.backend.pause(id);
        self.backend.seek(id, Duration::ZERO);
        if let Some(status) = self.statuses.get_mut(&id) {
            status.play = PlayState::Stopped;
        }
        if self.state.active == Some(id) {
            self.state.active = None;
        }
        self.set_position(id, Duration::ZERO);
        self.events.push(PlayerEvent::PlayStateChanged {
            id,
            state: PlayState::Stopped,
        });
    }
}
