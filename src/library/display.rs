use std::path::Path;

/// Card title for a file: its name with the extension stripped.
///
/// Dotfiles such as `.hidden.mp3` keep their leading dot in the stem, and a
/// name with no usable stem falls back to the full file name.
pub fn display_name(name: &str) -> String {
    let file_name = Path::new(name)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(name);

    match Path::new(file_name).file_stem().and_then(|s| s.to_str()) {
        Some(stem) if !stem.trim().is_empty() => stem.to_string(),
        _ => file_name.to_string(),
    }
}
