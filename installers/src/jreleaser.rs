//! Installer for the JReleaser tool provider.

use gantry::browser::release_asset_url;
use gantry::error::Result;
use gantry::finder::ToolFinder;
use gantry::workbench::{ToolInstaller, Workbench};

/// GitHub repository publishing JReleaser releases.
const REPOSITORY: &str = "jreleaser/jreleaser";

/// Installs the `jreleaser` tool provider from its GitHub releases.
///
/// JReleaser publishes tagged releases as `v<version>` and its rolling
/// builds under the literal `early-access` tag; the artefact filename embeds
/// the version string either way.
#[derive(Debug, Clone, Copy, Default)]
pub struct JReleaserInstaller;

impl ToolInstaller for JReleaserInstaller {
    fn namespace(&self) -> &str {
        "org.jreleaser"
    }

    fn name(&self) -> &str {
        "jreleaser"
    }

    fn install(&self, workbench: &Workbench<'_>, version: &str) -> Result<ToolFinder> {
        let jar = format!("jreleaser-tool-provider-{version}.jar");
        let source = release_asset_url(REPOSITORY, &release_tag(version), &jar);
        let folder = workbench.resolve(self.namespace(), self.name(), version)?;
        workbench.fetch(&source, &folder.join(&jar))?;
        workbench.finder(&folder)
    }
}

/// Release tag for a version: the `early-access` sentinel passes through,
/// everything else gains a `v` prefix.
fn release_tag(version: &str) -> String {
    if version == "early-access" {
        version.to_owned()
    } else {
        format!("v{version}")
    }
}
