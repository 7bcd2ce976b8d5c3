//! Playback controller: the single-active-track state machine.
//!
//! Each track moves through `Stopped -> Playing <-> PausedAt(t) -> Stopped`,
//! and the controller guarantees that at most one of them is audible.
//! Views read `PlaybackState`/`TrackStatus` and drain `PlayerEvent`s; they
//! never touch the backend directly.

mod controller;
mod events;
mod state;

pub use controller::{Controller, ControllerOptions};
pub use events::PlayerEvent;
pub use state::{PlayState, PlaybackState, SeekGesture, TrackStatus};
