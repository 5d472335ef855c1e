//! Guarded removal of regenerable directory trees.
//!
//! The pipeline wipes `out` and `bin` before rebuilding. Removal is
//! idempotent so repeated cleanup costs nothing, and it refuses to operate on
//! a filesystem root so that a misconfigured install root cannot delete the
//! machine out from under the caller.

use camino::Utf8Path;
use tracing::debug;

use crate::error::{GantryError, Result};

/// Outcome of a tree removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeRemoval {
    /// The target existed and was removed.
    Removed,
    /// The target was already absent.
    Missing,
}

/// Removes a file or a whole directory tree.
///
/// A missing target reports [`TreeRemoval::Missing`] rather than an error.
///
/// # Errors
///
/// Returns [`GantryError::UnsafeDeletion`] when the target resolves to a
/// filesystem root, and [`GantryError::Io`] when the removal itself fails.
pub fn remove_tree(path: &Utf8Path) -> Result<TreeRemoval> {
    let absolute = std::path::absolute(path.as_std_path())?;
    if absolute.parent().is_none() {
        return Err(GantryError::UnsafeDeletion {
            path: path.to_owned(),
        });
    }
    let metadata = match std::fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            return Ok(TreeRemoval::Missing);
        }
        Err(error) => return Err(error.into()),
    };
    debug!(%path, "removing tree");
    if metadata.is_dir() {
        std::fs::remove_dir_all(path)?;
    } else {
        std::fs::remove_file(path)?;
    }
    Ok(TreeRemoval::Removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;

    fn temp_root() -> (tempfile::TempDir, Utf8PathBuf) {
        let temp = tempfile::tempdir().expect("temporary directory");
        let root = Utf8Path::from_path(temp.path())
            .expect("UTF-8 temporary path")
            .to_owned();
        (temp, root)
    }

    #[test]
    fn missing_target_is_a_no_op() {
        let (_temp, root) = temp_root();

        let outcome = remove_tree(&root.join("absent")).expect("missing target to be tolerated");

        assert_eq!(outcome, TreeRemoval::Missing);
    }

    #[test]
    fn removes_a_file_target() {
        let (_temp, root) = temp_root();
        let file = root.join("artefact.jar");
        std::fs::write(&file, b"bytes").expect("file creation");

        let outcome = remove_tree(&file).expect("file removal");

        assert_eq!(outcome, TreeRemoval::Removed);
        assert!(!file.exists());
    }

    #[test]
    fn removes_a_directory_tree() {
        let (_temp, root) = temp_root();
        let tree = root.join("out").join("run").join("classes");
        std::fs::create_dir_all(&tree).expect("tree creation");
        std::fs::write(tree.join("Main.class"), b"bytes").expect("file creation");

        let outcome = remove_tree(&root.join("out")).expect("tree removal");

        assert_eq!(outcome, TreeRemoval::Removed);
        assert!(!root.join("out").exists());
    }

    #[test]
    fn refuses_to_remove_a_filesystem_root() {
        let outcome = remove_tree(Utf8Path::new("/"));

        assert!(matches!(
            outcome,
            Err(GantryError::UnsafeDeletion { path }) if path == Utf8PathBuf::from("/")
        ));
    }
}
