//! Path and file-name sanitization
//!
//! The invalid-character set is the portable one (ASCII control characters
//! plus `"`, `<`, `>` and `|`) on every platform, so an exported tree can be
//! copied between systems without renaming.

use std::path::{Path, PathBuf};

/// Replacement for every rejected character
const REPLACEMENT: char = '_';

/// Characters rejected anywhere in a path
fn is_invalid_path_char(c: char) -> bool {
    (c as u32) < 0x20 || matches!(c, '"' | '<' | '>' | '|')
}

/// Replace characters that are illegal in paths with `_`
pub fn sanitize_path(path: &str) -> String {
    path.chars()
        .map(|c| if is_invalid_path_char(c) { REPLACEMENT } else { c })
        .collect()
}

/// Make a note title usable as a bare file-name component
///
/// Applies [`sanitize_path`] and additionally replaces path separators and
/// dots, so the result can neither climb directories nor fake an extension.
pub fn sanitize_title(title: &str) -> String {
    sanitize_path(title)
        .chars()
        .map(|c| match c {
            '/' | '\\' | '.' => REPLACEMENT,
            c => c,
        })
        .collect()
}

/// [`sanitize_path`] for `Path` values
pub fn sanitize_path_buf(path: &Path) -> PathBuf {
    PathBuf::from(sanitize_path(&path.to_string_lossy()))
}
