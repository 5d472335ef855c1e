//! Test doubles shared across the workspace.
//!
//! Compiled for this crate's own tests and, behind the `test-support`
//! feature, for member crates that need to drive the library without network
//! access or a JDK on the path.

use std::io::Write;
use std::sync::{Mutex, PoisonError};

use camino::{Utf8Path, Utf8PathBuf};

use crate::browser::Browser;
use crate::error::{GantryError, Result};
use crate::toolbox::Tool;

/// Browser double that records copies instead of touching the network.
///
/// Successful copies write the source URL as the target's bytes, so
/// downstream folder scans observe a real file and assertions can recover
/// the origin of each artefact.
#[derive(Debug, Default)]
pub struct RecordingBrowser {
    copies: Mutex<Vec<(String, Utf8PathBuf)>>,
    failure: Option<String>,
}

impl RecordingBrowser {
    /// Browser double that fails every copy with the given reason.
    #[must_use]
    pub fn failing(reason: &str) -> Self {
        Self {
            copies: Mutex::new(Vec::new()),
            failure: Some(reason.to_owned()),
        }
    }

    /// The `(source, target)` pairs recorded so far, in copy order.
    #[must_use]
    pub fn copies(&self) -> Vec<(String, Utf8PathBuf)> {
        self.copies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Browser for RecordingBrowser {
    fn copy(&self, source: &str, target: &Utf8Path) -> Result<()> {
        if let Some(reason) = &self.failure {
            return Err(GantryError::TransferFailure {
                url: source.to_owned(),
                reason: reason.clone(),
            });
        }
        if target.exists() {
            return Err(GantryError::TransferFailure {
                url: source.to_owned(),
                reason: format!("target {target} already exists"),
            });
        }
        if let Some(parent) = target.parent().filter(|parent| !parent.as_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(target, source.as_bytes())?;
        self.copies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((source.to_owned(), target.to_owned()));
        Ok(())
    }
}

/// Tool double that writes scripted output and reports a fixed exit code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubTool {
    name: String,
    output: String,
    code: i32,
}

impl StubTool {
    /// Builds a stub answering to `name`.
    #[must_use]
    pub fn new(name: &str, output: &str, code: i32) -> Self {
        Self {
            name: name.to_owned(),
            output: output.to_owned(),
            code,
        }
    }
}

impl Tool for StubTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn run(
        &self,
        _args: &[String],
        out: &mut dyn Write,
        _err: &mut dyn Write,
    ) -> std::io::Result<i32> {
        out.write_all(self.output.as_bytes())?;
        Ok(self.code)
    }
}
