//! Terminal rendering with `ratatui`.
//!
//! `card` turns tracks into plain view data; `draw` lays the cards out and
//! records where each progress bar landed so mouse drags can be routed.

mod card;
mod draw;

pub use card::{TrackCard, TrackCardBuilder, format_time};
pub use draw::{CARD_HEIGHT, controls_text, draw};
