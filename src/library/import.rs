use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

use crate::config::ImportSettings;

use super::media::{MediaFilter, sniff_content_type};

/// How the user asked to import.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ImportMode {
    /// Every path is a file to add as-is.
    Files,
    /// Every path is a folder whose audio files are added.
    Folder,
}

/// A pending import as the dialog hands it over.
#[derive(Debug, Clone, Default)]
pub struct ImportRequest {
    pub mode: Option<ImportMode>,
    pub paths: Vec<PathBuf>,
}

impl ImportRequest {
    pub fn new(mode: Option<ImportMode>, paths: Vec<PathBuf>) -> Self {
        Self { mode, paths }
    }
}

/// One candidate file: `(name, content type or extension, source)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportEntry {
    pub name: String,
    pub content_type: Option<String>,
    pub path: PathBuf,
}

impl ImportEntry {
    /// Entry for `path`, named after its file name, with no content type.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .and_then(|s| s.to_str())
            .map(str::to_string)
            .unwrap_or_else(|| path.display().to_string());
        Self {
            name,
            content_type: None,
            path,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// What an import request resolved to.
#[derive(Debug, Default)]
pub struct Collected {
    pub entries: Vec<ImportEntry>,
    /// Requested paths that did not exist and were left out.
    pub missing: Vec<PathBuf>,
}

#[derive(Debug, Error)]
pub enum ImportError {
    /// The user confirmed the dialog without picking files or folder.
    #[error("choose whether to import files or a folder first")]
    MissingSelection,
    #[error("no such file or folder: {}", .0.display())]
    NotFound(PathBuf),
    #[error("not a folder: {}", .0.display())]
    NotAFolder(PathBuf),
}

/// Resolve an import request into candidate entries, in selection order.
///
/// Entries are not filtered here beyond what a folder walk skips (hidden
/// files, directories); the playlist decides what counts as audio.
///
/// Paths that do not exist are skipped and listed in `missing`; only a
/// request where every path is missing fails with `NotFound`.
pub fn collect(request: &ImportRequest, settings: &ImportSettings) -> Result<Collected, ImportError> {
    let mode = request.mode.ok_or(ImportError::MissingSelection)?;
    let filter = MediaFilter::from_settings(settings);

    let mut entries = Vec::new();
    let mut missing = Vec::new();
    for path in &request.paths {
        if !path.exists() {
            debug!(path = %path.display(), "skipping missing path");
            missing.push(path.clone());
            continue;
        }
        match mode {
            ImportMode::Files => {
                if path.is_file() {
                    entries.push(describe(path, &filter, settings));
                } else {
                    debug!(path = %path.display(), "skipping non-file in file import");
                }
            }
            ImportMode::Folder => {
                if !path.is_dir() {
                    return Err(ImportError::NotAFolder(path.clone()));
                }
                entries.extend(walk_folder(path, &filter, settings));
            }
        }
    }

    if !request.paths.is_empty() && missing.len() == request.paths.len() {
        return Err(ImportError::NotFound(missing.swap_remove(0)));
    }

    debug!(count = entries.len(), missing = missing.len(), ?mode, "collected import entries");
    Ok(Collected { entries, missing })
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn walk_folder(dir: &Path, filter: &MediaFilter, settings: &ImportSettings) -> Vec<ImportEntry> {
    let mut walker = WalkDir::new(dir)
        .follow_links(settings.follow_links)
        .sort_by_file_name();

    // Non-recursive = only the folder itself.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file() || e.path().is_file())
        .map(|e| describe(e.path(), filter, settings))
        .collect()
}

fn describe(path: &Path, filter: &MediaFilter, settings: &ImportSettings) -> ImportEntry {
    let mut entry = ImportEntry::from_path(path);
    if settings.sniff_content_type && !filter.has_known_extension(&entry.name) {
        entry.content_type = sniff_content_type(path);
    }
    entry
}
