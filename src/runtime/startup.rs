use std::path::PathBuf;

use tracing::{info, warn};

use crate::app::App;
use crate::audio::AudioBackend;
use crate::config::ImportSettings;
use crate::library::{self, ImportMode, ImportRequest};
use crate::player::Controller;

/// Run one import request through the adapter and into the controller.
///
/// Adapter errors become the app's one-line prompt; nothing else changes.
/// Missing paths in an otherwise valid request are named in the prompt.
pub fn apply_import<B: AudioBackend>(
    request: &ImportRequest,
    settings: &ImportSettings,
    controller: &mut Controller<B>,
    app: &mut App,
) -> usize {
    match library::collect(request, settings) {
        Ok(collected) => {
            if let Some(first) = collected.missing.first() {
                warn!(missing = collected.missing.len(), "import skipped missing paths");
                let more = collected.missing.len() - 1;
                let suffix = if more > 0 { format!(" (+{more} more)") } else { String::new() };
                app.set_message(format!("skipped missing {}{suffix}", first.display()));
            }
            let ids = controller.import(collected.entries);
            app.clamp_selection(controller.tracks().len());
            ids.len()
        }
        Err(e) => {
            warn!(error = %e, "import aborted");
            app.set_message(e.to_string());
            0
        }
    }
}

/// Import the paths given on the command line: folders as folders, anything
/// else as a file.
pub fn import_args<B: AudioBackend>(
    args: &[PathBuf],
    settings: &ImportSettings,
    controller: &mut Controller<B>,
    app: &mut App,
) {
    if args.is_empty() {
        return;
    }
    let (folders, files): (Vec<PathBuf>, Vec<PathBuf>) =
        args.iter().cloned().partition(|p| p.is_dir());

    let mut added = 0;
    if !files.is_empty() {
        let request = ImportRequest::new(Some(ImportMode::Files), files);
        added += apply_import(&request, settings, controller, app);
    }
    for folder in folders {
        let request = ImportRequest::new(Some(ImportMode::Folder), vec![folder]);
        added += apply_import(&request, settings, controller, app);
    }
    info!(added, "imported command-line paths");
}
