//! Deterministic folder layout beneath the install root.
//!
//! Everything Gantry manages lives under one root directory: `bin` holds
//! installed and locally built executable modules, `out` holds transient
//! compiler output, and `tool/<namespace>/<name>@<version>` holds the output
//! of tool installers. A tool identity always resolves to the same path, so
//! repeated installations short-circuit on the existing folder. The layout is
//! a cache: `bin` and `out` are regenerable and safe to delete wholesale.

use camino::{Utf8Path, Utf8PathBuf};

use crate::error::Result;

/// Folder layout rooted at a single install directory.
///
/// # Examples
///
/// ```
/// use gantry::folders::Folders;
///
/// let folders = Folders::of_root(".gantry");
/// assert_eq!(folders.bin(), ".gantry/bin");
/// assert_eq!(
///     folders.tool_dir("org.example", "demo", "1.0.0"),
///     ".gantry/tool/org.example/demo@1.0.0",
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Folders {
    root: Utf8PathBuf,
}

impl Folders {
    /// Creates the layout for the given root directory.
    ///
    /// Nothing is touched on disk; directories appear on demand when an
    /// identity is resolved.
    #[must_use]
    pub fn of_root(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The install root itself.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Folder holding installed and built executable modules.
    #[must_use]
    pub fn bin(&self) -> Utf8PathBuf {
        self.root.join("bin")
    }

    /// Folder holding transient compiler output.
    #[must_use]
    pub fn out(&self) -> Utf8PathBuf {
        self.root.join("out")
    }

    /// Install directory for a tool identity, computed without touching the
    /// disk.
    ///
    /// Identical identities always resolve to the identical path.
    #[must_use]
    pub fn tool_dir(&self, namespace: &str, name: &str, version: &str) -> Utf8PathBuf {
        self.root
            .join("tool")
            .join(namespace)
            .join(format!("{name}@{version}"))
    }

    /// Resolves a tool identity to its install directory, creating the
    /// directory and any missing parents.
    ///
    /// # Errors
    ///
    /// Returns [`GantryError::Io`](crate::error::GantryError::Io) when the
    /// directory cannot be created.
    pub fn resolve_tool(&self, namespace: &str, name: &str, version: &str) -> Result<Utf8PathBuf> {
        let dir = self.tool_dir(namespace, name, version);
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::release("org.jreleaser", "jreleaser", "1.2.3", "tool/org.jreleaser/jreleaser@1.2.3")]
    #[case::snapshot("org.kordamp", "pomchecker", "2.0.0-SNAPSHOT", "tool/org.kordamp/pomchecker@2.0.0-SNAPSHOT")]
    fn tool_directories_embed_the_identity(
        #[case] namespace: &str,
        #[case] name: &str,
        #[case] version: &str,
        #[case] expected: &str,
    ) {
        let folders = Folders::of_root(".gantry");

        let dir = folders.tool_dir(namespace, name, version);

        assert_eq!(dir, Utf8PathBuf::from(".gantry").join(expected));
    }

    #[rstest]
    fn identical_identities_resolve_to_identical_paths() {
        let folders = Folders::of_root(".gantry");

        let first = folders.tool_dir("org.kordamp", "jarviz", "0.3.0");
        let second = folders.tool_dir("org.kordamp", "jarviz", "0.3.0");

        assert_eq!(first, second);
    }

    #[rstest]
    fn resolve_tool_creates_missing_parents() {
        let temp = tempfile::tempdir().expect("temporary directory");
        let root = Utf8Path::from_path(temp.path()).expect("UTF-8 temporary path");
        let folders = Folders::of_root(root);

        let dir = folders
            .resolve_tool("org.example", "demo", "1.0.0")
            .expect("directory creation to succeed");

        assert!(dir.is_dir());
        let again = folders
            .resolve_tool("org.example", "demo", "1.0.0")
            .expect("repeated resolution to succeed");
        assert_eq!(dir, again);
    }
}
