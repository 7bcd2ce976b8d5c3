use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/musicova/config.toml` or `~/.config/musicova/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `MUSICOVA__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub audio: AudioSettings,
    pub playback: PlaybackSettings,
    pub controls: ControlsSettings,
    pub import: ImportSettings,
    pub ui: UiSettings,
    pub theme: ThemeSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Volume every newly imported card starts at (0.0..=1.0).
    pub default_volume: f32,
    /// How often the event loop polls the backend for position updates (milliseconds).
    pub tick_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            default_volume: 1.0,
            tick_ms: 100,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Start the next card when the playing one reaches its end.
    pub auto_advance: bool,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self { auto_advance: true }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Number of seconds to scrub when pressing `H` / `L`.
    pub scrub_seconds: u64,
    /// Volume change applied by `-` / `+`.
    pub volume_step: f32,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            scrub_seconds: 5,
            volume_step: 0.05,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImportSettings {
    /// File extensions recognised as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether folder imports descend into subdirectories.
    pub recursive: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to follow symlinks while walking a folder.
    pub follow_links: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
    /// Skip entries whose path is already on the playlist.
    pub skip_duplicates: bool,
    /// Probe the file header when the extension is not recognised.
    pub sniff_content_type: bool,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            extensions: vec!["mp3".into(), "wav".into(), "ogg".into(), "m4a".into()],
            recursive: true,
            include_hidden: false,
            follow_links: true,
            max_depth: None,
            skip_duplicates: false,
            sniff_content_type: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Theme used when no preference has been stored yet.
    pub start_dark: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " Your Personal Music Space ".to_string(),
            start_dark: false,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ThemeSettings {
    /// Where the theme flag is stored. Defaults to `<state dir>/state.toml`.
    pub state_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing` filter directive used when `RUST_LOG` is not set.
    pub level: String,
    /// Log file. Defaults to `<state dir>/musicova.log`.
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "musicova=info".to_string(),
            file: None,
        }
    }
}
