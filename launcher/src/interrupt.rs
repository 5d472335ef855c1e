//! Cooperative interrupt flag for the pipeline.
//!
//! An interrupt never kills work mid-stage. The handler only records that a
//! signal arrived; the pipeline checks the flag between stages and stops with
//! a logged notice instead of proceeding. A child process that is already
//! running shares the terminal's process group, receives the signal directly,
//! and its exit status is reported through the normal non-zero-exit path.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared flag recording that an interrupt was requested.
///
/// Clones share the same underlying flag.
///
/// # Examples
///
/// ```
/// use gantry_launcher::interrupt::InterruptFlag;
///
/// let flag = InterruptFlag::new();
/// assert!(!flag.is_triggered());
/// flag.trigger();
/// assert!(flag.is_triggered());
/// ```
#[derive(Clone, Debug, Default)]
pub struct InterruptFlag {
    interrupted: Arc<AtomicBool>,
}

impl InterruptFlag {
    /// Creates a fresh, untriggered flag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that an interrupt was requested.
    pub fn trigger(&self) {
        self.interrupted.store(true, Ordering::SeqCst);
    }

    /// Whether an interrupt has been requested.
    #[must_use]
    pub fn is_triggered(&self) -> bool {
        self.interrupted.load(Ordering::SeqCst)
    }

    /// Installs a Ctrl-C handler that triggers this flag.
    ///
    /// # Errors
    ///
    /// Returns [`ctrlc::Error`] when a handler is already installed or the
    /// platform refuses one.
    pub fn install_handler(&self) -> Result<(), ctrlc::Error> {
        let flag = self.clone();
        ctrlc::set_handler(move || flag.trigger())
    }
}
