//! Application model types: `App` and `ImportDialog`.

use std::path::PathBuf;

use ratatui::layout::{Position, Rect};

use crate::library::{ImportMode, ImportRequest, Track, TrackId};
use crate::player::{PlayState, PlayerEvent};

/// The import prompt: a mode choice and a line of typed paths.
#[derive(Debug, Clone, Default)]
pub struct ImportDialog {
    pub open: bool,
    pub mode: Option<ImportMode>,
    pub input: String,
}

/// The main application model.
#[derive(Debug)]
pub struct App {
    pub selected: usize,
    pub dark: bool,
    pub import: ImportDialog,
    /// One-line prompt shown in the status bar until the next action.
    pub message: Option<String>,
    /// Move the cursor to whatever starts playing.
    pub follow_playback: bool,
    progress_areas: Vec<(TrackId, Rect)>,
}

impl App {
    pub fn new(dark: bool) -> Self {
        Self {
            selected: 0,
            dark,
            import: ImportDialog::default(),
            message: None,
            follow_playback: true,
            progress_areas: Vec::new(),
        }
    }

    pub fn selected_id(&self, tracks: &[Track]) -> Option<TrackId> {
        tracks.get(self.selected).map(|t| t.id)
    }

    /// Move selection down, wrapping to the top.
    pub fn next(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
            return;
        }
        self.selected = (self.selected + 1) % len;
    }

    /// Move selection up, wrapping to the bottom.
    pub fn prev(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
            return;
        }
        self.selected = if self.selected == 0 {
            len - 1
        } else {
            self.selected - 1
        };
    }

    pub fn clamp_selection(&mut self, len: usize) {
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    /// Fold a controller event into the view state.
    pub fn apply_event(&mut self, event: &PlayerEvent, tracks: &[Track]) {
        match event {
            PlayerEvent::TrackRemoved(_) => self.clamp_selection(tracks.len()),
            PlayerEvent::PlayStateChanged {
                id,
                state: PlayState::Playing,
            } if self.follow_playback => {
                if let Some(pos) = tracks.iter().position(|t| t.id == *id) {
                    self.selected = pos;
                }
            }
            _ => {}
        }
    }

    pub fn toggle_theme(&mut self) -> bool {
        self.dark = !self.dark;
        self.dark
    }

    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    // ---- import dialog ----

    pub fn open_import(&mut self) {
        self.import = ImportDialog {
            open: true,
            ..ImportDialog::default()
        };
        self.clear_message();
    }

    pub fn close_import(&mut self) {
        self.import = ImportDialog::default();
    }

    pub fn set_import_mode(&mut self, mode: ImportMode) {
        self.import.mode = Some(mode);
    }

    pub fn push_import_char(&mut self, c: char) {
        self.import.input.push(c);
    }

    pub fn pop_import_char(&mut self) {
        self.import.input.pop();
    }

    /// Close the dialog and hand back what was entered. Paths are
    /// separated by `;`; blank pieces are ignored.
    pub fn submit_import(&mut self) -> ImportRequest {
        let dialog = std::mem::take(&mut self.import);
        let paths = dialog
            .input
            .split(';')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(expand_home)
            .collect();
        ImportRequest::new(dialog.mode, paths)
    }

    // ---- progress-bar hit areas ----

    pub fn clear_progress_areas(&mut self) {
        self.progress_areas.clear();
    }

    pub fn push_progress_area(&mut self, id: TrackId, area: Rect) {
        self.progress_areas.push((id, area));
    }

    #[cfg(test)]
    pub(crate) fn progress_areas(&self) -> &[(TrackId, Rect)] {
        &self.progress_areas
    }

    /// The progress bar under `(column, row)` and the fraction it points at.
    pub fn progress_hit(&self, column: u16, row: u16) -> Option<(TrackId, f64)> {
        let pos = Position::new(column, row);
        self.progress_areas
            .iter()
            .find(|(_, area)| area.contains(pos))
            .map(|&(id, area)| (id, fraction_in(area, column)))
    }

    /// Fraction along `id`'s bar for `column`, even when the pointer has
    /// left the bar during a drag.
    pub fn progress_fraction(&self, id: TrackId, column: u16) -> Option<f64> {
        self.progress_areas
            .iter()
            .find(|(track, _)| *track == id)
            .map(|&(_, area)| fraction_in(area, column))
    }
}

fn fraction_in(area: Rect, column: u16) -> f64 {
    if area.width == 0 {
        return 0.0;
    }
    let offset = f64::from(column) - f64::from(area.x);
    (offset / f64::from(area.width)).clamp(0.0, 1.0)
}

fn expand_home(raw: &str) -> PathBuf {
    if let Some(rest) = raw.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(rest);
        }
    }
    PathBuf::from(raw)
}
