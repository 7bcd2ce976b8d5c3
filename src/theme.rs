//! Theme preference: one persisted flag plus the two colour palettes.
//!
//! The flag lives in a small TOML state file under the fixed key
//! `darkMode`, holding `"enabled"` or nothing at all.

mod palette;
mod store;

pub use palette::Palette;
pub use store::{DARK_MODE_KEY, ThemeError, ThemeStore};
