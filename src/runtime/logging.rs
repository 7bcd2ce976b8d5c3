use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::{LoggingSettings, default_state_dir};

/// Send `tracing` output to the log file; the terminal belongs to the UI.
///
/// Returns the file in use, or `None` when logging stays off because the
/// file could not be opened.
pub fn init(settings: &LoggingSettings) -> Option<PathBuf> {
    let path = settings
        .file
        .clone()
        .or_else(|| default_state_dir().map(|d| d.join("musicova.log")))?;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            eprintln!("musicova: cannot create log dir {}: {e}", parent.display());
            return None;
        }
    }
    let file = match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("musicova: cannot open log file {}: {e}", path.display());
            return None;
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .unwrap_or_else(|_| EnvFilter::new("musicova=info"));

    let installed = tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_env_filter(filter)
        .try_init();

    installed.is_ok().then_some(path)
}
