//! Remote artefact retrieval.
//!
//! Provides a trait-based abstraction over the single transfer primitive the
//! rest of the system needs: copy one remote resource to one local file. The
//! transfer is one-shot HTTPS with no retries, no resumption, and no checksum
//! verification, and it never overwrites an existing target.

use std::sync::OnceLock;
use std::time::Duration;

use camino::Utf8Path;

use crate::error::{GantryError, Result};

/// Network timeout for artefact transfers.
const TRANSFER_TIMEOUT: Duration = Duration::from_secs(30);

/// Copies remote artefacts onto the local disk.
///
/// Abstracting the transfer allows tests to observe and stub downloads
/// without network access.
///
/// # Examples
///
/// ```
/// use gantry::browser::{Browser, HttpBrowser};
///
/// let browser: &dyn Browser = &HttpBrowser;
/// // Use browser.copy(url, &target) in production.
/// ```
#[cfg_attr(test, mockall::automock)]
pub trait Browser {
    /// Copies the resource at `source` to the file at `target`.
    ///
    /// Parent directories of `target` are created as needed. The copy never
    /// overwrites: an existing target fails the transfer.
    ///
    /// # Errors
    ///
    /// Returns [`GantryError::TransferFailure`] on any transport or file
    /// fault.
    fn copy(&self, source: &str, target: &Utf8Path) -> Result<()>;
}

/// HTTPS-based browser using `ureq`.
#[derive(Debug, Default, Clone, Copy)]
pub struct HttpBrowser;

impl Browser for HttpBrowser {
    fn copy(&self, source: &str, target: &Utf8Path) -> Result<()> {
        if target.exists() {
            return Err(GantryError::TransferFailure {
                url: source.to_owned(),
                reason: format!("target {target} already exists"),
            });
        }
        let response = http_agent()
            .get(source)
            .call()
            .map_err(|error| transport_failure(source, &error))?;
        if let Some(parent) = target.parent().filter(|parent| !parent.as_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|error| file_failure(source, &error))?;
        }
        let mut file =
            std::fs::File::create_new(target).map_err(|error| file_failure(source, &error))?;
        std::io::copy(&mut response.into_body().as_reader(), &mut file)
            .map_err(|error| file_failure(source, &error))?;
        Ok(())
    }
}

/// Builds a GitHub release asset URL.
///
/// # Examples
///
/// ```
/// use gantry::browser::release_asset_url;
///
/// let url = release_asset_url("kordamp/jarviz", "v0.3.0", "jarviz-tool-provider-0.3.0.jar");
/// assert_eq!(
///     url,
///     "https://github.com/kordamp/jarviz/releases/download/v0.3.0/jarviz-tool-provider-0.3.0.jar",
/// );
/// ```
#[must_use]
pub fn release_asset_url(repository: &str, tag: &str, filename: &str) -> String {
    format!("https://github.com/{repository}/releases/download/{tag}/{filename}")
}

/// Shared `ureq` agent with transfer timeout configuration.
fn http_agent() -> &'static ureq::Agent {
    static AGENT: OnceLock<ureq::Agent> = OnceLock::new();
    AGENT.get_or_init(|| {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(TRANSFER_TIMEOUT))
            .build();
        ureq::Agent::new_with_config(config)
    })
}

/// Maps a transport error to a [`GantryError::TransferFailure`].
fn transport_failure(url: &str, error: &ureq::Error) -> GantryError {
    GantryError::TransferFailure {
        url: url.to_owned(),
        reason: error.to_string(),
    }
}

/// Maps a local file error to a [`GantryError::TransferFailure`].
fn file_failure(url: &str, error: &std::io::Error) -> GantryError {
    GantryError::TransferFailure {
        url: url.to_owned(),
        reason: error.to_string(),
    }
}
