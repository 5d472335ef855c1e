//! Workbench handed to tool installers.
//!
//! Installer plugins never touch the network or the folder layout directly;
//! they compose the three primitives offered here. The [`ToolInstaller`]
//! trait is the capability contract each plugin implements: given a version
//! string, compute the tool's release location, drive the workbench, and
//! hand back a finder over the installed folder.

use camino::{Utf8Path, Utf8PathBuf};

use crate::browser::Browser;
use crate::error::Result;
use crate::finder::ToolFinder;
use crate::folders::Folders;

/// Aggregate of the folder layout and remote fetcher offered to installers.
pub struct Workbench<'a> {
    folders: &'a Folders,
    browser: &'a dyn Browser,
}

impl<'a> Workbench<'a> {
    /// Bundles a folder layout and a browser for installer use.
    #[must_use]
    pub const fn new(folders: &'a Folders, browser: &'a dyn Browser) -> Self {
        Self { folders, browser }
    }

    /// The folder layout of the current install root.
    #[must_use]
    pub const fn folders(&self) -> &Folders {
        self.folders
    }

    /// Resolves a tool identity to its install directory, creating missing
    /// parents.
    ///
    /// # Errors
    ///
    /// Returns [`GantryError::Io`](crate::error::GantryError::Io) when the
    /// directory cannot be created.
    pub fn resolve(&self, namespace: &str, name: &str, version: &str) -> Result<Utf8PathBuf> {
        self.folders.resolve_tool(namespace, name, version)
    }

    /// Copies a remote artefact to `target`.
    ///
    /// # Errors
    ///
    /// Returns [`GantryError::TransferFailure`](crate::error::GantryError::TransferFailure)
    /// on any transport or file fault.
    pub fn fetch(&self, source: &str, target: &Utf8Path) -> Result<()> {
        self.browser.copy(source, target)
    }

    /// Builds a finder over an installed folder.
    ///
    /// # Errors
    ///
    /// Returns [`GantryError::Io`](crate::error::GantryError::Io) when the
    /// folder cannot be read.
    pub fn finder(&self, folder: &Utf8Path) -> Result<ToolFinder> {
        ToolFinder::of_folder(folder)
    }
}

/// Capability contract for tool installer plugins.
///
/// Each implementation is fixed to one `(namespace, name)` pair and encodes
/// that tool's release tag and filename conventions.
pub trait ToolInstaller {
    /// Namespace segment of the tool identity.
    fn namespace(&self) -> &str;

    /// Tool name within the namespace.
    fn name(&self) -> &str;

    /// Installs `version` of the tool and returns a finder over the result.
    ///
    /// Installation either succeeds fully or fails; fetch failures propagate
    /// unmodified, with no fallback tag and no retry.
    ///
    /// # Errors
    ///
    /// Returns [`GantryError::TransferFailure`](crate::error::GantryError::TransferFailure)
    /// when the artefact cannot be fetched, and
    /// [`GantryError::Io`](crate::error::GantryError::Io) when the install
    /// directory cannot be prepared or scanned.
    fn install(&self, workbench: &Workbench<'_>, version: &str) -> Result<ToolFinder>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::MockBrowser;
    use crate::error::GantryError;
    use rstest::rstest;
    use tempfile::TempDir;

    #[rstest]
    fn resolve_creates_the_identity_directory() {
        let temp = TempDir::new().expect("temporary directory");
        let root = Utf8PathBuf::try_from(temp.path().to_owned()).expect("non-UTF8 temp path");
        let folders = Folders::of_root(&root);
        let browser = MockBrowser::new();
        let workbench = Workbench::new(&folders, &browser);

        let dir = workbench
            .resolve("org.kordamp", "jarviz", "0.3.0")
            .expect("resolution");

        assert!(dir.is_dir());
        assert_eq!(dir, folders.tool_dir("org.kordamp", "jarviz", "0.3.0"));
    }

    #[rstest]
    fn fetch_delegates_to_the_browser() {
        let folders = Folders::of_root(".gantry");
        let mut browser = MockBrowser::new();
        browser
            .expect_copy()
            .withf(|source, target| {
                source == "https://example.invalid/demo.jar"
                    && target == Utf8Path::new(".gantry/tool/demo.jar")
            })
            .once()
            .returning(|_, _| Ok(()));
        let workbench = Workbench::new(&folders, &browser);

        workbench
            .fetch(
                "https://example.invalid/demo.jar",
                Utf8Path::new(".gantry/tool/demo.jar"),
            )
            .expect("fetch");
    }

    #[rstest]
    fn fetch_failures_propagate_unmodified() {
        let folders = Folders::of_root(".gantry");
        let mut browser = MockBrowser::new();
        browser.expect_copy().returning(|source, _| {
            Err(GantryError::TransferFailure {
                url: source.to_owned(),
                reason: "connection refused".to_owned(),
            })
        });
        let workbench = Workbench::new(&folders, &browser);

        let outcome = workbench.fetch("https://example.invalid/demo.jar", Utf8Path::new("x.jar"));

        assert!(matches!(
            outcome,
            Err(GantryError::TransferFailure { reason, .. }) if reason == "connection refused"
        ));
    }
}
