//! Ordered playlist of imported tracks.
//!
//! Insertion order is playback order: `next`/`previous` are defined by it.

mod store;

pub use store::{Direction, PlaylistStore};

#[cfg(test)]
mod tests;
