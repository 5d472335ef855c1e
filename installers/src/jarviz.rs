//! Installer for the Jarviz tool provider.

use gantry::browser::release_asset_url;
use gantry::error::Result;
use gantry::finder::ToolFinder;
use gantry::workbench::{ToolInstaller, Workbench};

/// GitHub repository publishing Jarviz releases.
const REPOSITORY: &str = "kordamp/jarviz";

/// Installs the `jarviz` jar analyser from its GitHub releases.
///
/// Jarviz follows the same tagging convention as JReleaser: `v<version>`
/// for tagged releases, the literal `early-access` tag for rolling builds.
#[derive(Debug, Clone, Copy, Default)]
pub struct JarvizInstaller;

impl ToolInstaller for JarvizInstaller {
    fn namespace(&self) -> &str {
        "org.kordamp"
    }

    fn name(&self) -> &str {
        "jarviz"
    }

    fn install(&self, workbench: &Workbench<'_>, version: &str) -> Result<ToolFinder> {
        let jar = format!("jarviz-tool-provider-{version}.jar");
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
