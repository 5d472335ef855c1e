//! Explicit launcher configuration.
//!
//! Gantry keeps no implicit global state: the binary assembles one [`Config`]
//! at entry from flags and environment variables and passes it by reference
//! to every component. Flags take precedence over environment variables,
//! which take precedence over the built-in defaults recorded here.

use camino::{Utf8Path, Utf8PathBuf};

/// Default install root, relative to the working directory.
pub const DEFAULT_ROOT: &str = ".gantry";
/// Default runner artefact version when none is configured.
pub const DEFAULT_RUNNER_VERSION: &str = "early-access";
/// Default numeric release number for source builds.
pub const DEFAULT_BUILD_NUMBER: &str = "0";
/// Default pre-release label for source builds.
pub const DEFAULT_BUILD_PRE_RELEASE: &str = "ea";

/// Environment variable controlling the `verbose` switch.
pub const ENV_VERBOSE: &str = "GANTRY_VERBOSE";
/// Environment variable controlling the `dry-run` switch.
pub const ENV_DRY_RUN: &str = "GANTRY_DRY_RUN";
/// Environment variable overriding the install root.
pub const ENV_DIRECTORY: &str = "GANTRY_DIRECTORY";
/// Environment variable overriding the runner artefact version.
pub const ENV_RUNNER_VERSION: &str = "GANTRY_VERSION";
/// Environment variable overriding the build release number.
pub const ENV_BUILD_NUMBER: &str = "GANTRY_BUILD_VERSION_NUMBER";
/// Environment variable overriding the build pre-release label.
pub const ENV_BUILD_PRE_RELEASE: &str = "GANTRY_BUILD_VERSION_PRE_RELEASE";
/// Conventional CI variable supplying the VCS revision for build metadata.
pub const ENV_VCS_SHA: &str = "GITHUB_SHA";

/// Resolved launcher configuration.
///
/// # Examples
///
/// ```
/// use gantry::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.root.as_str(), ".gantry");
/// assert_eq!(config.runner_version, "early-access");
/// assert!(!config.verbose);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Emit debug-level diagnostics and extended status output.
    pub verbose: bool,
    /// Report mutating steps without performing them.
    pub dry_run: bool,
    /// Install root holding `bin`, `out`, and `tool` folders.
    pub root: Utf8PathBuf,
    /// Version of the runner artefact to fetch or stamp on source builds.
    pub runner_version: String,
    /// Numeric release number used when building the runner from source.
    pub build_number: String,
    /// Pre-release label used when building the runner from source.
    ///
    /// A blank label is omitted from the assembled version string.
    pub build_pre_release: String,
    /// VCS revision supplying build metadata, when the environment knows one.
    pub vcs_sha: Option<String>,
}

impl Config {
    /// Returns the install root as a path.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            verbose: false,
            dry_run: false,
            root: Utf8PathBuf::from(DEFAULT_ROOT),
            runner_version: DEFAULT_RUNNER_VERSION.to_owned(),
            build_number: DEFAULT_BUILD_NUMBER.to_owned(),
            build_pre_release: DEFAULT_BUILD_PRE_RELEASE.to_owned(),
            vcs_sha: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_baseline() {
        let config = Config::default();

        assert!(!config.verbose);
        assert!(!config.dry_run);
        assert_eq!(config.root, Utf8PathBuf::from(DEFAULT_ROOT));
        assert_eq!(config.runner_version, DEFAULT_RUNNER_VERSION);
        assert_eq!(config.build_number, DEFAULT_BUILD_NUMBER);
        assert_eq!(config.build_pre_release, DEFAULT_BUILD_PRE_RELEASE);
        assert!(config.vcs_sha.is_none());
    }

    #[test]
    fn environment_names_carry_the_fixed_prefix() {
        for name in [
            ENV_VERBOSE,
            ENV_DRY_RUN,
            ENV_DIRECTORY,
            ENV_RUNNER_VERSION,
            ENV_BUILD_NUMBER,
            ENV_BUILD_PRE_RELEASE,
        ] {
            assert!(name.starts_with("GANTRY_"), "unprefixed variable: {name}");
        }
    }
}
