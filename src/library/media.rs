use std::path::Path;

use lofty::file::FileType;
use lofty::probe::Probe;

use crate::config::ImportSettings;

use super::import::ImportEntry;

/// Decides whether an import entry is audio the player accepts.
///
/// An entry passes when its extension is one of the configured ones or its
/// content type carries the generic `audio/` prefix.
#[derive(Debug, Clone)]
pub struct MediaFilter {
    extensions: Vec<String>,
}

impl MediaFilter {
    pub fn new(extensions: &[String]) -> Self {
        let extensions = extensions
            .iter()
            .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        Self { extensions }
    }

    pub fn from_settings(settings: &ImportSettings) -> Self {
        Self::new(&settings.extensions)
    }

    pub fn has_known_extension(&self, name: &str) -> bool {
        Path::new(name)
            .extension()
            .and_then(|s| s.to_str())
            .map(|ext| {
                let ext = ext.to_ascii_lowercase();
                self.extensions.iter().any(|e| e == &ext)
            })
            .unwrap_or(false)
    }

    pub fn accepts(&self, entry: &ImportEntry) -> bool {
        if self.has_known_extension(&entry.name) {
            return true;
        }
        entry
            .content_type
            .as_deref()
            .map(|ct| ct.trim().to_ascii_lowercase().starts_with("audio/"))
            .unwrap_or(false)
    }
}

impl Default for MediaFilter {
    fn default() -> Self {
        Self::from_settings(&ImportSettings::default())
    }
}

/// Guess a content type from the file header.
///
/// Only the container signature is read; tags are never parsed.
pub fn sniff_content_type(path: &Path) -> Option<String> {
    let probe = Probe::open(path).ok()?.guess_file_type().ok()?;
    let mime = match probe.file_type()? {
        FileType::Aac => "audio/aac",
        FileType::Aiff => "audio/aiff",
        FileType::Flac => "audio/flac",
        FileType::Mpeg => "audio/mpeg",
        FileType::Mp4 => "audio/mp4",
        FileType::Opus => "audio/opus",
        FileType::Vorbis => "audio/ogg",
        FileType::Speex => "audio/speex",
        FileType::Wav => "audio/wav",
        FileType::WavPack => "audio/wavpack",
        FileType::Ape => "audio/ape",
        FileType::Mpc => "audio/musepack",
        _ => "audio/x-unknown",
    };
    Some(mime.to_string())
}
