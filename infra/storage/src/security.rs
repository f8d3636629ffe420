use crate::error::StorageError;
use std::path::{Component, Path, PathBuf};

/// Collapses `.` and `..` lexically, refusing anything that climbs above the root.
fn normalize_relative(path: &Path) -> Result<PathBuf, StorageError> {
    let mut out = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {},
            Component::Normal(segment) => out.push(segment),
            Component::ParentDir => {
                if !out.pop() {
                    return Err(StorageError::PathTraversalAttempt {
                        message: path.display().to_string().into(),
                        context: Some("Path attempted to escape sandbox via '..'".into()),
                    });
                }
            },
            Component::RootDir | Component::Prefix(_) => {
                return Err(StorageError::PathTraversalAttempt {
                    message: path.display().to_string().into(),
                    context: Some("Absolute paths are not allowed in sandbox".into()),
                });
            },
        }
    }

    if out.as_os_str().is_empty() {
        return Err(StorageError::FileNotFound {
            message: path.display().to_string().into(),
            context: Some("Target must be a file inside the sandbox".into()),
        });
    }

    Ok(out)
}

/// Joins `path` onto the (canonical) `root` and proves the result stays inside it.
pub(crate) fn resolve_path(root: &Path, path: impl AsRef<Path>) -> Result<PathBuf, StorageError> {
    let joined = root.join(normalize_relative(path.as_ref())?);

    // The nearest existing ancestor decides: a symlink pointing outside is caught here.
    let mut ancestor = Some(joined.as_path());
    while let Some(current) = ancestor {
        if current == root {
            return Ok(joined);
        }
        if current.exists() {
            let canonical = current.canonicalize().map_err(|source| StorageError::Io {
                source,
                context: Some("Failed to verify parent directory".into()),
            })?;
            return if canonical.starts_with(root) {
                Ok(joined)
            } else {
                Err(StorageError::PathTraversalAttempt {
                    message: canonical.display().to_string().into(),
                    context: Some("Existing ancestor resolves outside sandbox".into()),
                })
            };
        }
        ancestor = current.parent();
    }

    Err(StorageError::PathTraversalAttempt {
        message: joined.display().to_string().into(),
        context: Some("Path is outside sandbox boundaries".into()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_inner_parent_segments() {
        let out = normalize_relative(Path::new("a/./b/../c.json")).unwrap();
        assert_eq!(out, PathBuf::from("a/c.json"));
    }

    #[test]
    fn rejects_escape_and_absolute_paths() {
        assert!(matches!(
            normalize_relative(Path::new("../etc/passwd")),
            Err(StorageError::PathTraversalAttempt { .. })
        ));
        assert!(matches!(
            normalize_relative(Path::new("/etc/passwd")),
            Err(StorageError::PathTraversalAttempt { .. })
        ));
    }

    #[test]
    fn rejects_empty_target() {
        let result = normalize_relative(Path::new("a/.."));
        assert!(matches!(result, Err(StorageError::FileNotFound { .. })));
    }
}
