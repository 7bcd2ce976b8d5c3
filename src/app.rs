//! Application module: the view-side state the TUI and runtime share.
//!
//! `App` holds the selection, the import dialog, the one-line prompt and
//! the progress-bar areas recorded by the last draw.

mod model;

pub use model::*;
