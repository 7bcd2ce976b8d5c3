use tracing::debug;

use crate::library::{ImportEntry, MediaFilter, SourceHandle, Track, TrackId, display_name};

/// Which neighbour to resolve.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// Owns every imported `Track` and its source handle.
#[derive(Debug)]
pub struct PlaylistStore {
    tracks: Vec<Track>,
    next_id: u64,
    filter: MediaFilter,
    skip_duplicates: bool,
}

impl PlaylistStore {
    pub fn new(filter: MediaFilter) -> Self {
        Self {
            tracks: Vec::new(),
            next_id: 1,
            filter,
            skip_duplicates: false,
        }
    }

    /// Skip entries whose path is already on the playlist.
    pub fn with_skip_duplicates(mut self, skip: bool) -> Self {
        self.skip_duplicates = skip;
        self
    }

    /// Append `entries` in the given order and return the ids they received.
    ///
    /// Entries that are not recognised audio are dropped without error.
    pub fn append(&mut self, entries: Vec<ImportEntry>) -> Vec<TrackId> {
        let mut added = Vec::with_capacity(entries.len());
        for entry in entries {
            if !self.filter.accepts(&entry) {
                debug!(name = %entry.name, "dropping unsupported file");
                continue;
            }
            if self.skip_duplicates && self.tracks.iter().any(|t| t.source.path() == entry.path) {
                debug!(path = %entry.path.display(), "already on the playlist, skipping");
                continue;
            }

            let id = TrackId(self.next_id);
            self.next_id += 1;
            self.tracks.push(Track {
                id,
                display_name: display_name(&entry.name),
                source: SourceHandle::new(entry.path),
                duration: None,
            });
            added.push(id);
        }
        added
    }

    /// Remove the track; `None` when the id is unknown.
    pub fn remove(&mut self, id: TrackId) -> Option<Track> {
        let pos = self.position(id)?;
        Some(self.tracks.remove(pos))
    }

    /// Remove every track, handing them back so their resources can be released.
    pub fn clear(&mut self) -> Vec<Track> {
        std::mem::take(&mut self.tracks)
    }

    pub fn list(&self) -> &[Track] {
        &self.tracks
    }

    pub fn get(&self, id: TrackId) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == id)
    }

    pub fn get_mut(&mut self, id: TrackId) -> Option<&mut Track> {
        self.tracks.iter_mut().find(|t| t.id == id)
    }

    pub fn contains(&self, id: TrackId) -> bool {
        self.get(id).is_some()
    }

    pub fn position(&self, id: TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == id)
    }

    /// The adjacent track in playlist order; `None` at either end.
    pub fn neighbour(&self, id: TrackId, direction: Direction) -> Option<TrackId> {
        let pos = self.position(id)?;
        let target = match direction {
            Direction::Next => pos.checked_add(1)?,
            Direction::Previous => pos.checked_sub(1)?,
        };
        self.tracks.get(target).map(|t| t.id)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

impl Default for PlaylistStore {
    fn default() -> Self {
        Self::new(MediaFilter::default())
    }
}
