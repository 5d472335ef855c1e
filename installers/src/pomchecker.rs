//! Installer for the PomChecker tool provider.

use gantry::browser::release_asset_url;
use gantry::error::Result;
use gantry::finder::ToolFinder;
use gantry::workbench::{ToolInstaller, Workbench};

/// GitHub repository publishing PomChecker releases.
const REPOSITORY: &str = "kordamp/pomchecker";

/// Installs the `pomchecker` POM validator from its GitHub releases.
///
/// PomChecker versions its rolling builds as Maven snapshots, so any version
/// containing `SNAPSHOT` maps to the `early-access` tag. Its artefact is
/// named `pomchecker-toolprovider`, without the hyphen the other providers
/// carry.
#[derive(Debug, Clone, Copy, Default)]
pub struct PomcheckerInstaller;

impl ToolInstaller for PomcheckerInstaller {
    fn namespace(&self) -> &str {
        "org.kordamp"
    }

    fn name(&self) -> &str {
        "pomchecker"
    }

    fn install(&self, workbench: &Workbench<'_>, version: &str) -> Result<ToolFinder> {
        let jar = format!("pomchecker-toolprovider-{version}.jar");
        let source = release_asset_url(REPOSITORY, &release_tag(version), &jar);
        let folder = workbench.resolve(self.namespace(), self.name(), version)?;
        workbench.fetch(&source, &folder.join(&jar))?;
        workbench.finder(&folder)
    }
}

/// Release tag for a version: snapshots map to `early-access`, everything
/// else gains a `v` prefix.
fn release_tag(version: &str) -> String {
    if version.contains("SNAPSHOT") {
        "early-access".to_owned()
    } else {
        format!("v{version}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use gantry::folders::Folders;
    use gantry::test_support::RecordingBrowser;
    use rstest::rstest;
    use tempfile::TempDir;

    #[rstest]
    #[case::snapshot("SNAPSHOT-1", "early-access")]
    #[case::maven_snapshot("2.0.0-SNAPSHOT", "early-access")]
    #[case::release("1.14.0", "v1.14.0")]
    fn snapshots_map_to_the_early_access_tag(#[case] version: &str, #[case] expected: &str) {
        assert_eq!(release_tag(version), expected);
    }

    #[rstest]
    fn installing_a_snapshot_fetches_from_the_early_access_tag() {
        let temp = TempDir::new().expect("temporary directory");
        let root = Utf8PathBuf::try_from(temp.path().to_owned()).expect("non-UTF8 temp path");
        let folders = Folders::of_root(&root);
        let browser = RecordingBrowser::default();
        let workbench = Workbench::new(&folders, &browser);

        let finder = PomcheckerInstaller
            .install(&workbench, "2.0.0-SNAPSHOT")
            .expect("installation");

        let copies = browser.copies();
        assert_eq!(copies.len(), 1);
        let (source, target) = copies.first().expect("recorded copy");
        assert_eq!(
            source,
            "https://github.com/kordamp/pomchecker/releases/download/early-access/pomchecker-toolprovider-2.0.0-SNAPSHOT.jar",
        );
        assert_eq!(
            *target,
            folders
                .tool_dir("org.kordamp", "pomchecker", "2.0.0-SNAPSHOT")
                .join("pomchecker-toolprovider-2.0.0-SNAPSHOT.jar"),
        );
        assert!(finder.find("pomchecker").is_some());
    }

    #[rstest]
    fn reinstalling_the_same_version_fails_rather_than_overwrites() {
        let temp = TempDir::new().expect("temporary directory");
        let root = Utf8PathBuf::try_from(temp.path().to_owned()).expect("non-UTF8 temp path");
        let folders = Folders::of_root(&root);
        let browser = RecordingBrowser::default();
        let workbench = Workbench::new(&folders, &browser);
        PomcheckerInstaller
            .install(&workbench, "1.14.0")
            .expect("first installation");

        let outcome = PomcheckerInstaller.install(&workbench, "1.14.0");

        assert!(outcome.is_err(), "the fetch contract forbids overwriting");
        assert_eq!(browser.copies().len(), 1);
    }
}
