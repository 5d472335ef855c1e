//! Error types shared across the Gantry workspace.
//!
//! Every fatal condition in the pipeline maps to one of these variants; none
//! is retried or downgraded. The launcher reports the display text on its
//! error stream and terminates the current operation.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur while bootstrapping, installing, or running tools.
#[derive(Debug, Error)]
pub enum GantryError {
    /// A remote fetch failed. Transfers are one-shot: no retry, no fallback.
    #[error("transfer failed for {url}: {reason}")]
    TransferFailure {
        /// The URL that was requested.
        url: String,
        /// A human-readable description of the failure.
        reason: String,
    },

    /// The requested tool provider is not registered.
    #[error("tool `{tool}` was not found")]
    ToolNotFound {
        /// Name of the missing tool.
        tool: String,
    },

    /// A tool or subprocess returned a non-zero exit status.
    #[error("{command} finished with error code: {code}")]
    NonZeroExit {
        /// The command that failed.
        command: String,
        /// Its exit code.
        code: i32,
    },

    /// A tree removal resolved to a filesystem root and was refused.
    ///
    /// Callers treat the target as already clean rather than aborting; the
    /// refusal itself is logged.
    #[error("refusing to delete filesystem root {path}")]
    UnsafeDeletion {
        /// The path whose removal was refused.
        path: Utf8PathBuf,
    },

    /// A search pattern failed to parse.
    #[error("invalid search pattern `{pattern}`: {reason}")]
    InvalidPattern {
        /// The pattern as given on the command line.
        pattern: String,
        /// Parser diagnostic describing the fault.
        reason: String,
    },

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using [`GantryError`].
pub type Result<T> = std::result::Result<T, GantryError>;
