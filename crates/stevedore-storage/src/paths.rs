//! Path normalization utilities for key construction and downloads.
//!
//! Remote keys always use POSIX separators; local paths use the host OS
//! format. Normalization here is lexical only, it never touches the
//! filesystem or resolves symlinks.

use std::path::{Component, Path, PathBuf};

/// Lexical path normalization without filesystem access.
///
/// Removes `.` components and resolves `..` components lexically.
pub fn lexical_normalize(path: &Path) -> PathBuf {
    let mut components: Vec<Component> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => { /* skip . */ }
            Component::ParentDir => {
                if !components.is_empty()
                    && !matches!(
                        components.last(),
                        Some(Component::ParentDir) | Some(Component::RootDir)
                    )
                {
                    components.pop();
                } else {
                    components.push(component);
                }
            }
            _ => components.push(component),
        }
    }

    components.iter().collect()
}

/// Convert a path to POSIX-style string (forward slashes).
///
/// Used for remote keys, which are always POSIX format.
pub fn to_posix_path(path: &Path) -> String {
    path.components()
        .map(|c: Component| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Convert a remote key suffix (POSIX format) to a local path under the
/// destination root, using OS-native separators.
pub fn from_posix_path(key_suffix: &str, destination_root: &Path) -> PathBuf {
    let mut result: PathBuf = destination_root.to_path_buf();

    for component in key_suffix.split('/') {
        if !component.is_empty() {
            result.push(component);
        }
    }

    result
}

/// Check if a path is within a root directory (security validation).
///
/// Uses lexical comparison, does not access the filesystem. Downloaded
/// keys must never write outside the destination directory.
pub fn is_within_root(path: &Path, root: &Path) -> bool {
    let norm_path: PathBuf = lexical_normalize(path);
    let norm_root: PathBuf = lexical_normalize(root);
    norm_path.starts_with(&norm_root)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexical_normalize_removes_dot() {
        assert_eq!(
            lexical_normalize(Path::new("/a/./b/./c")),
            PathBuf::from("/a/b/c")
        );
    }

    #[test]
    fn test_lexical_normalize_resolves_dotdot() {
        assert_eq!(
            lexical_normalize(Path::new("/a/b/../c")),
            PathBuf::from("/a/c")
        );
    }

    #[test]
    fn test_to_posix_path() {
        assert_eq!(to_posix_path(Path::new("a/b/c")), "a/b/c");
    }

    #[test]
    fn test_from_posix_path() {
        assert_eq!(
            from_posix_path("a/b/c", Path::new("/dest")),
            PathBuf::from("/dest/a/b/c")
        );
    }

    #[test]
    fn test_from_posix_path_skips_empty_components() {
        assert_eq!(
            from_posix_path("a//b", Path::new("/dest")),
            PathBuf::from("/dest/a/b")
        );
    }

    #[test]
    fn test_is_within_root_true() {
        assert!(is_within_root(
            Path::new("/agent/files/app.zip"),
            Path::new("/agent")
        ));
    }

    #[test]
    fn test_is_within_root_false() {
        assert!(!is_within_root(Path::new("/etc/passwd"), Path::new("/agent")));
    }

    #[test]
    fn test_is_within_root_with_dotdot() {
        assert!(!is_within_root(
            Path::new("/agent/../etc/passwd"),
            Path::new("/agent")
        ));
    }

    #[test]
    fn test_traversal_key_escapes_root() {
        let local: PathBuf = from_posix_path("../outside.txt", Path::new("/agent/dest"));
        assert!(!is_within_root(&local, Path::new("/agent/dest")));
    }
}
