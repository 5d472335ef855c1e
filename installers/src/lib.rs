//! Tool installer plugins for the Gantry launcher.
//!
//! Each plugin fixes one external tool's `(namespace, name)` identity and
//! encodes that tool's release tag and artefact filename conventions. The
//! plugins share nothing beyond the [`ToolInstaller`] capability contract:
//! given a version string they compute the release location, drive the
//! workbench to fetch the artefact, and return a finder over the installed
//! folder.
//!
//! The registry is static: [`builtin_installers`] lists every plugin in
//! registration order and [`find_installer`] answers lookups by tool name.

pub mod jarviz;
pub mod jreleaser;
pub mod pomchecker;

pub use jarviz::JarvizInstaller;
pub use jreleaser::JReleaserInstaller;
pub use pomchecker::PomcheckerInstaller;

use gantry::workbench::ToolInstaller;

/// Built-in installers in registration order.
#[must_use]
pub fn builtin_installers() -> Vec<Box<dyn ToolInstaller>> {
    vec![
        Box::new(JReleaserInstaller),
        Box::new(JarvizInstaller),
        Box::new(PomcheckerInstaller),
    ]
}

/// Finds a built-in installer by its tool name.
#[must_use]
pub fn find_installer(name: &str) -> Option<Box<dyn ToolInstaller>> {
    builtin_installers()
        .into_iter()
        .find(|installer| installer.name() == name)
}
