//! Module version construction for source builds.
//!
//! Downloaded runners carry an opaque configured version string. Versions are
//! only assembled here when the runner is compiled from local sources, in the
//! shape `<number>[-<pre-release>]+<build>`.

use std::fmt;

use chrono::{SecondsFormat, Utc};

/// Version stamped on modules built from source.
///
/// # Examples
///
/// ```
/// use gantry::version::ModuleVersion;
///
/// let version = ModuleVersion::new("0", "ea", Some("0123456789abcdef"));
/// assert_eq!(version.to_string(), "0-ea+0123456");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleVersion {
    /// Numeric release number.
    pub number: String,
    /// Pre-release label; blank labels are dropped during construction.
    pub pre_release: Option<String>,
    /// Build metadata: a short VCS revision or a UTC timestamp.
    pub build: String,
}

impl ModuleVersion {
    /// Assembles a version from configuration values.
    ///
    /// A blank `pre_release` is omitted. Build metadata takes the first
    /// seven characters of `vcs_sha` when a revision is known, otherwise the
    /// current UTC time in RFC 3339 format truncated to whole seconds.
    #[must_use]
    pub fn new(number: &str, pre_release: &str, vcs_sha: Option<&str>) -> Self {
        Self {
            number: number.to_owned(),
            pre_release: (!pre_release.trim().is_empty()).then(|| pre_release.to_owned()),
            build: build_metadata(vcs_sha),
        }
    }
}

impl fmt::Display for ModuleVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number)?;
        if let Some(pre_release) = &self.pre_release {
            write!(f, "-{pre_release}")?;
        }
        write!(f, "+{}", self.build)
    }
}

/// Short VCS revision when one is known, current UTC time otherwise.
fn build_metadata(vcs_sha: Option<&str>) -> String {
    vcs_sha.map_or_else(
        || Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        |sha| sha.get(..7).unwrap_or(sha).to_owned(),
    )
}
