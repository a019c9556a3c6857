//! Markdown export of script content.

use std::path::{Path, PathBuf};

use scriptos_core::Script;

use crate::error::StoreError;

/// Longest stem kept from a title, in characters.
pub const MAX_FILE_STEM_CHARS: usize = 120;

/// File name a script exports to: its title with path-hostile characters
/// replaced and cut to [`MAX_FILE_STEM_CHARS`], or `script` when the title is
/// blank, plus `.md`.
#[must_use]
pub fn export_file_name(script: &Script) -> String {
    let stem: String = script
        .title
        .trim()
        .trim_matches('.')
        .chars()
        .take(MAX_FILE_STEM_CHARS)
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let stem = stem.trim_end().trim_matches('.');
    if stem.is_empty() {
        "script.md".to_string()
    } else {
        format!("{stem}.md")
    }
}

/// Writes the script's content to `<dir>/<export_file_name>` and returns the path.
///
/// # Errors
///
/// Returns [`StoreError::Io`] if the directory or file cannot be written.
pub fn export_script_markdown(script: &Script, dir: &Path) -> Result<PathBuf, StoreError> {
    std::fs::create_dir_all(dir).map_err(|source| StoreError::Io {
        path: dir.display().to_string(),
        source,
    })?;
    let path = dir.join(export_file_name(script));
    std::fs::write(&path, &script.content).map_err(|source| StoreError::Io {
        path: path.display().to_string(),
        source,
    })?;
    tracing::info!(path = %path.display(), script_id = %script.id, "exported script");
    Ok(path)
}
