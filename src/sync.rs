//! File discovery and synchronization across input directories.
//!
//! Locates files under a set of base directories matching a glob pattern,
//! and copies single files into the distribution tree — flattened to their
//! base name (scripts, includes) or preserving their input-relative path
//! (assets).

use crate::paths::{resolve_relative, PathError};
use glob::glob;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Glob pattern matching Pawn script sources.
pub const SCRIPT_PATTERN: &str = "**/*.sma";
/// Glob pattern matching Pawn include files.
pub const INCLUDE_PATTERN: &str = "**/*.inc";
/// Glob pattern matching asset files of any kind.
pub const ASSET_PATTERN: &str = "**/*";

/// Error during discovery or file synchronization.
#[derive(Debug)]
pub enum SyncError {
    /// Invalid glob pattern
    InvalidPattern(String, glob::PatternError),
    /// IO error during enumeration or copy
    Io(std::io::Error),
    /// Target file is outside every configured base directory
    Path(PathError),
}

impl std::fmt::Display for SyncError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncError::InvalidPattern(pattern, err) => {
                write!(f, "Invalid glob pattern '{}': {}", pattern, err)
            }
            SyncError::Io(err) => write!(f, "IO error during sync: {}", err),
            SyncError::Path(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for SyncError {}

impl From<std::io::Error> for SyncError {
    fn from(err: std::io::Error) -> Self {
        SyncError::Io(err)
    }
}

impl From<PathError> for SyncError {
    fn from(err: PathError) -> Self {
        SyncError::Path(err)
    }
}

/// Check if a path is a Pawn script source (`.sma`).
pub fn is_script_file(path: &Path) -> bool {
    matches!(path.extension().and_then(|e| e.to_str()), Some("sma"))
}

/// Check if a path is a Pawn include file (`.inc`).
pub fn is_include_file(path: &Path) -> bool {
    matches!(path.extension().and_then(|e| e.to_str()), Some("inc"))
}

/// Discover files matching a glob pattern under a set of base directories.
///
/// Non-directory entries only. The result is deduplicated and sorted, so
/// scan order is deterministic regardless of filesystem enumeration order.
pub fn scan(bases: &[PathBuf], pattern: &str) -> Result<Vec<PathBuf>, SyncError> {
    let mut matches = BTreeSet::new();

    for base in bases {
        let full_pattern = base.join(pattern);
        let pattern_str = full_pattern.to_string_lossy();

        let paths = glob(&pattern_str)
            .map_err(|e| SyncError::InvalidPattern(pattern.to_string(), e))?;

        for entry in paths {
            match entry {
                Ok(path) => {
                    if path.is_file() {
                        matches.insert(path);
                    }
                }
                Err(e) => {
                    return Err(SyncError::Io(e.into_error()));
                }
            }
        }
    }

    Ok(matches.into_iter().collect())
}

/// Copy a file into `dest_root` under its base name, flattening any
/// sub-directory structure.
///
/// The destination directory is created first (idempotently) and an
/// existing destination file is always replaced. Returns the path written.
pub fn copy_flat(source: &Path, dest_root: &Path) -> Result<PathBuf, SyncError> {
    let name = source
        .file_name()
        .ok_or_else(|| SyncError::Path(PathError::NotContained(source.to_path_buf())))?;
    let dest = dest_root.join(name);
    copy_file(source, &dest)?;
    Ok(dest)
}

/// Copy a file into `dest_root`, preserving its path relative to whichever
/// base directory contains it.
///
/// Fails with [`SyncError::Path`] when no base contains the source.
/// Returns the path written.
pub fn copy_relative(
    source: &Path,
    bases: &[PathBuf],
    dest_root: &Path,
) -> Result<PathBuf, SyncError> {
    let rel = resolve_relative(bases, source)?;
    let dest = dest_root.join(rel);
    copy_file(source, &dest)?;
    Ok(dest)
}

/// Byte-for-byte copy with idempotent parent directory creation.
fn copy_file(source: &Path, dest: &Path) -> Result<(), SyncError> {
    if let Some(parent) = dest.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::copy(source, dest)?;
    Ok(())
}
