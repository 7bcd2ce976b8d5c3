//! Track model and the import side of the player.
//!
//! `import` turns a file/folder selection into `ImportEntry` values and
//! `media` decides which of them are audio the player can hand to a backend.

mod display;
mod import;
mod media;
mod model;

pub use display::display_name;
pub use import::{Collected, ImportEntry, ImportError, ImportMode, ImportRequest, collect};
pub use media::{MediaFilter, sniff_content_type};
pub use model::{SourceHandle, Track, TrackId};
