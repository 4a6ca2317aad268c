//! Discovery of PGN files in a directory.

use glob::{MatchOptions, Pattern};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when scanning a games directory.
#[derive(Error, Debug)]
pub enum LibraryError {
    /// The path does not name a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
    /// The directory name could not be turned into a search pattern.
    #[error("Invalid search pattern: {0}")]
    Pattern(#[from] glob::PatternError),
    /// An entry could not be read while scanning.
    #[error("Failed to read directory entry: {0}")]
    Entry(#[from] glob::GlobError),
}

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// Lists the `.pgn` files directly inside `dir`, sorted by path.
///
/// The extension is matched case-insensitively. Hidden files and
/// subdirectories are skipped.
pub fn list_pgn_files(dir: &Path) -> Result<Vec<PathBuf>, LibraryError> {
    if !dir.is_dir() {
        return Err(LibraryError::NotADirectory(dir.to_path_buf()));
    }

    let escaped = Pattern::escape(&dir.to_string_lossy());
    let pattern = Path::new(&escaped).join("*.pgn");

    let mut files = Vec::new();
    for entry in glob::glob_with(&pattern.to_string_lossy(), MATCH_OPTIONS)? {
        let path = entry?;
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();

    tracing::debug!(dir = %dir.display(), files = files.len(), "scanned games directory");
    Ok(files)
}
