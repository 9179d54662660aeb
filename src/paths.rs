//! Path placement against configured base directories.
//!
//! Input files can live under any of several configured base directories;
//! output placement and diagnostic display both need the path of a file
//! relative to whichever base contains it.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for path resolution failures
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum PathError {
    /// No configured base directory contains the target path
    #[error("path '{}' is not under any configured base directory", .0.display())]
    NotContained(PathBuf),
}

/// Compute `target` relative to the first base directory that contains it.
///
/// Candidates are checked in the order supplied; the first base that is an
/// ancestor of `target` wins. Returns [`PathError::NotContained`] when no
/// base is an ancestor — a misconfiguration, fatal for the operation that
/// asked, never a silent fallback.
///
/// # Examples
///
/// ```
/// use std::path::{Path, PathBuf};
/// use amxbuild::paths::resolve_relative;
///
/// let bases = vec![PathBuf::from("/proj/assets")];
/// let rel = resolve_relative(&bases, Path::new("/proj/assets/textures/foo.wad")).unwrap();
/// assert_eq!(rel, PathBuf::from("textures/foo.wad"));
/// ```
pub fn resolve_relative(bases: &[PathBuf], target: &Path) -> Result<PathBuf, PathError> {
    for base in bases {
        if let Ok(rel) = target.strip_prefix(base) {
            return Ok(rel.to_path_buf());
        }
    }
    Err(PathError::NotContained(target.to_path_buf()))
}

/// Short display form of a path for log lines.
///
/// Uses the path relative to its containing base when one matches, the full
/// path otherwise.
pub fn display_name(bases: &[PathBuf], target: &Path) -> String {
    match resolve_relative(bases, target) {
        Ok(rel) => rel.display().to_string(),
        Err(_) => target.display().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative_single_base() {
        let bases = vec![PathBuf::from("/proj/src/scripts")];
        let rel =
            resolve_relative(&bases, Path::new("/proj/src/scripts/maps/de_dust.sma")).unwrap();
        assert_eq!(rel, PathBuf::from("maps/de_dust.sma"));
    }

    #[test]
    fn test_resolve_relative_first_match_wins() {
        let bases = vec![PathBuf::from("/a"), PathBuf::from("/a/b")];
        // /a is checked first and also contains the target
        let rel = resolve_relative(&bases, Path::new("/a/b/file.sma")).unwrap();
        assert_eq!(rel, PathBuf::from("b/file.sma"));
    }

    #[test]
    fn test_resolve_relative_second_base() {
        let bases = vec![PathBuf::from("/one"), PathBuf::from("/two")];
        let rel = resolve_relative(&bases, Path::new("/two/x.inc")).unwrap();
        assert_eq!(rel, PathBuf::from("x.inc"));
    }

    #[test]
    fn test_resolve_relative_not_contained() {
        let bases = vec![PathBuf::from("/one"), PathBuf::from("/two")];
        let result = resolve_relative(&bases, Path::new("/elsewhere/x.sma"));
        assert!(matches!(result, Err(PathError::NotContained(_))));
    }

    #[test]
    fn test_resolve_relative_no_bases() {
        let result = resolve_relative(&[], Path::new("/x.sma"));
        assert!(matches!(result, Err(PathError::NotContained(_))));
    }

    #[test]
    fn test_resolve_relative_base_itself() {
        let bases = vec![PathBuf::from("/proj")];
        let rel = resolve_relative(&bases, Path::new("/proj")).unwrap();
        assert_eq!(rel, PathBuf::new());
    }

    #[test]
    fn test_display_name_relative() {
        let bases = vec![PathBuf::from("/proj/scripts")];
        assert_eq!(display_name(&bases, Path::new("/proj/scripts/admin.sma")), "admin.sma");
    }

    #[test]
    fn test_display_name_fallback_full_path() {
        let bases = vec![PathBuf::from("/proj/scripts")];
        assert_eq!(display_name(&bases, Path::new("/other/admin.sma")), "/other/admin.sma");
    }
}
