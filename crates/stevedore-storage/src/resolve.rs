//! Source pattern resolution for publish operations.
//!
//! A plan's source is resolved against the agent working directory in
//! three forms:
//! - an existing file: that single file
//! - an existing directory: every file under it, recursively
//! - anything else: a glob matched against the working tree
//!
//! Matched files keep their structure relative to the working directory,
//! which is what the remote key preserves.

use std::path::{Component, Path, PathBuf};

use globset::{Glob, GlobMatcher};
use walkdir::WalkDir;

use stevedore_model::is_blank;

use crate::error::StorageError;
use crate::paths::{lexical_normalize, to_posix_path};

/// One local file matched by a source pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFile {
    /// Full path on disk.
    pub path: PathBuf,
    /// POSIX-style path relative to the working directory. Becomes the
    /// key suffix on publish.
    pub relative_path: String,
}

/// Resolve a source pattern into the set of local files it matches.
///
/// # Arguments
/// * `working_dir` - Agent working directory the pattern is relative to
/// * `pattern` - Path or glob from the artifact plan
///
/// # Returns
/// Matched files in a stable (walk) order. May be empty; the caller
/// decides whether that is an error.
///
/// # Errors
/// Returns an error for patterns escaping the working directory, invalid
/// globs, or filesystem failures during the walk.
pub fn resolve_source(
    working_dir: &Path,
    pattern: &str,
) -> Result<Vec<ResolvedFile>, StorageError> {
    if is_blank(pattern) {
        return Ok(Vec::new());
    }

    let relative: PathBuf = relative_to_working_dir(working_dir, pattern)?;
    let candidate: PathBuf = working_dir.join(&relative);

    if candidate.is_file() {
        return Ok(vec![ResolvedFile {
            relative_path: to_posix_path(&relative),
            path: candidate,
        }]);
    }

    if candidate.is_dir() {
        return collect_files(working_dir, &candidate, None);
    }

    let matcher: GlobMatcher = Glob::new(pattern.trim())
        .map_err(|e| StorageError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?
        .compile_matcher();

    collect_files(working_dir, working_dir, Some(&matcher))
}

/// Walk `root` and collect files, keyed relative to `working_dir`.
fn collect_files(
    working_dir: &Path,
    root: &Path,
    matcher: Option<&GlobMatcher>,
) -> Result<Vec<ResolvedFile>, StorageError> {
    let mut files: Vec<ResolvedFile> = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| StorageError::Io {
            path: e
                .path()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            message: e.to_string(),
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let relative: &Path = entry
            .path()
            .strip_prefix(working_dir)
            .unwrap_or_else(|_| entry.path());
        let relative_path: String = to_posix_path(relative);

        if let Some(matcher) = matcher {
            if !matcher.is_match(&relative_path) {
                continue;
            }
        }

        files.push(ResolvedFile {
            path: entry.path().to_path_buf(),
            relative_path,
        });
    }

    Ok(files)
}

/// Normalize a source path relative to the working directory, rejecting
/// paths that escape it.
fn relative_to_working_dir(working_dir: &Path, pattern: &str) -> Result<PathBuf, StorageError> {
    let pattern_path: &Path = Path::new(pattern.trim());

    let relative: PathBuf = if pattern_path.is_absolute() {
        pattern_path
            .strip_prefix(working_dir)
            .map_err(|_| StorageError::PathOutsideRoot {
                path: pattern_path.display().to_string(),
                root: working_dir.display().to_string(),
            })?
            .to_path_buf()
    } else {
        pattern_path.to_path_buf()
    };

    let normalized: PathBuf = lexical_normalize(&relative);
    if normalized.components().next() == Some(Component::ParentDir) {
        return Err(StorageError::PathOutsideRoot {
            path: pattern.to_string(),
            root: working_dir.display().to_string(),
        });
    }

    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn workspace() -> TempDir {
        let dir: TempDir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("alpine-build.json"), b"{}").unwrap();
        fs::create_dir_all(dir.path().join("build/out")).unwrap();
        fs::write(dir.path().join("build/app.zip"), b"zip").unwrap();
        fs::write(dir.path().join("build/out/report.txt"), b"report").unwrap();
        fs::write(dir.path().join("notes.txt"), b"notes").unwrap();
        dir
    }

    fn relative_paths(files: &[ResolvedFile]) -> Vec<&str> {
        files.iter().map(|f| f.relative_path.as_str()).collect()
    }

    #[test]
    fn test_single_file() {
        let dir: TempDir = workspace();
        let files = resolve_source(dir.path(), "alpine-build.json").unwrap();
        assert_eq!(relative_paths(&files), vec!["alpine-build.json"]);
        assert_eq!(files[0].path, dir.path().join("alpine-build.json"));
    }

    #[test]
    fn test_single_file_with_dot_prefix() {
        let dir: TempDir = workspace();
        let files = resolve_source(dir.path(), "./alpine-build.json").unwrap();
        assert_eq!(relative_paths(&files), vec!["alpine-build.json"]);
    }

    #[test]
    fn test_directory_recursive() {
        let dir: TempDir = workspace();
        let files = resolve_source(dir.path(), "build").unwrap();
        assert_eq!(
            relative_paths(&files),
            vec!["build/app.zip", "build/out/report.txt"]
        );
    }

    #[test]
    fn test_glob() {
        let dir: TempDir = workspace();
        let files = resolve_source(dir.path(), "**/*.txt").unwrap();
        assert_eq!(
            relative_paths(&files),
            vec!["build/out/report.txt", "notes.txt"]
        );
    }

    #[test]
    fn test_glob_no_match_is_empty() {
        let dir: TempDir = workspace();
        let files = resolve_source(dir.path(), "*.tar.gz").unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_blank_pattern_is_empty() {
        let dir: TempDir = workspace();
        assert!(resolve_source(dir.path(), "  ").unwrap().is_empty());
    }

    #[test]
    fn test_invalid_glob_rejected() {
        let dir: TempDir = workspace();
        let err = resolve_source(dir.path(), "[invalid").unwrap_err();
        assert!(matches!(err, StorageError::InvalidPattern { .. }));
    }

    #[test]
    fn test_traversal_pattern_rejected() {
        let dir: TempDir = workspace();
        let err = resolve_source(dir.path(), "../outside.txt").unwrap_err();
        assert!(matches!(err, StorageError::PathOutsideRoot { .. }));
    }

    #[test]
    fn test_absolute_pattern_inside_working_dir() {
        let dir: TempDir = workspace();
        let absolute: String = dir.path().join("notes.txt").display().to_string();
        let files = resolve_source(dir.path(), &absolute).unwrap();
        assert_eq!(relative_paths(&files), vec!["notes.txt"]);
    }

    #[test]
    fn test_absolute_pattern_outside_working_dir_rejected() {
        let dir: TempDir = workspace();
        let err = resolve_source(dir.path(), "/etc/passwd").unwrap_err();
        assert!(matches!(err, StorageError::PathOutsideRoot { .. }));
    }
}
