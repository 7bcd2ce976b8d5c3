use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::config::{Settings, default_state_dir};

pub const DARK_MODE_KEY: &str = "darkMode";
const ENABLED: &str = "enabled";

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("theme state {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("theme state {} is not valid TOML: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to serialize theme state: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Reads and writes the dark-mode flag.
#[derive(Debug, Clone)]
pub struct ThemeStore {
    path: PathBuf,
}

impl ThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `theme.state_path`, else `state.toml` in the state directory.
    pub fn from_settings(settings: &Settings) -> Self {
        let path = settings
            .theme
            .state_path
            .clone()
            .or_else(|| default_state_dir().map(|d| d.join("state.toml")))
            .unwrap_or_else(|| PathBuf::from("musicova-state.toml"));
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether dark mode is enabled. A missing file means it is not.
    pub fn load(&self) -> Result<bool, ThemeError> {
        let map = self.read()?;
        Ok(map.get(DARK_MODE_KEY).is_some_and(|v| v == ENABLED))
    }

    /// Persist the flag, keeping any other keys in the file.
    pub fn save(&self, dark: bool) -> Result<(), ThemeError> {
        let mut map = self.read()?;
        if dark {
            map.insert(DARK_MODE_KEY.to_string(), ENABLED.to_string());
        } else {
            map.remove(DARK_MODE_KEY);
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| self.io(source))?;
        }
        let text = toml::to_string(&map)?;
        fs::write(&self.path, text).map_err(|source| self.io(source))?;
        debug!(path = %self.path.display(), dark, "saved theme");
        Ok(())
    }

    fn read(&self) -> Result<BTreeMap<String, String>, ThemeError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(t) => t,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => return Err(self.io(source)),
        };
        toml::from_str(&text).map_err(|source| ThemeError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    fn io(&self, source: io::Error) -> ThemeError {
        ThemeError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
