//! Destination path resolution

use std::io;
use std::path::{Component, Path, PathBuf};

/// Resolve a project name against the current working directory
pub fn resolve_project_path(name: &str) -> io::Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    Ok(resolve_project_path_from(&cwd, name))
}

/// Resolve a project name against `base`, normalising `.` and `..` lexically.
/// Absolute names ignore `base`.
pub fn resolve_project_path_from(base: &Path, name: &str) -> PathBuf {
    let joined = base.join(name);
    let mut resolved = PathBuf::new();

    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // Popping past the root keeps the root, as `path.resolve` does
                if !matches!(resolved.components().next_back(), Some(Component::RootDir) | None) {
                    resolved.pop();
                }
            }
            other => resolved.push(other.as_os_str()),
        }
    }

    resolved
}

/// Number of entries in `dir`; 0 when it does not exist or cannot be read.
/// Advisory only: scaffolding never refuses a non-empty destination.
pub fn directory_entry_count(dir: &Path) -> usize {
    std::fs::read_dir(dir)
        .map(|entries| entries.count())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolves_against_base() {
        let base = Path::new("/work/projects");
        assert_eq!(
            resolve_project_path_from(base, "my-app"),
            PathBuf::from("/work/projects/my-app")
        );
    }

    #[test]
    fn test_handles_nested_and_relative_segments() {
        let base = Path::new("/work/projects");
        assert_eq!(
            resolve_project_path_from(base, "folder/my-app"),
            PathBuf::from("/work/projects/folder/my-app")
        );
        assert_eq!(
            resolve_project_path_from(base, "./a/../my-app"),
            PathBuf::from("/work/projects/my-app")
        );
        assert_eq!(
            resolve_project_path_from(Path::new("/"), "../../my-app"),
            PathBuf::from("/my-app")
        );
    }

    #[test]
    fn test_absolute_names_ignore_base() {
        assert_eq!(
            resolve_project_path_from(Path::new("/work"), "/tmp/my-app"),
            PathBuf::from("/tmp/my-app")
        );
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let first = resolve_project_path("my-app").unwrap();
        let second = resolve_project_path("my-app").unwrap();
        assert_eq!(first, second);
        assert!(first.is_absolute());
    }

    #[test]
    fn test_directory_entry_count() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(directory_entry_count(dir.path()), 0);
        assert_eq!(directory_entry_count(&dir.path().join("missing")), 0);

        std::fs::write(dir.path().join("notes.txt"), "hi").unwrap();
        std::fs::create_dir(dir.path().join("src")).unwrap();
        assert_eq!(directory_entry_count(dir.path()), 2);
    }
}
