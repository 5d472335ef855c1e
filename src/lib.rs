//! Gantry core library.
//!
//! Gantry is a self-bootstrapping launcher for modular JVM projects: it
//! builds or fetches the project's runner module, compiles any additional
//! project modules, and launches the runner as a child process with streamed
//! output. This crate provides the building blocks; the `gantry` binary in
//! the `launcher` member wires them to a command line, and the
//! `gantry-installers` member packages the release-download plugins.
//!
//! # Modules
//!
//! - [`browser`] - Remote fetcher for release artefacts
//! - [`config`] - Explicit launcher configuration
//! - [`error`] - Semantic error types shared across the workspace
//! - [`finder`] - Lookup view over installed tool artefacts
//! - [`folders`] - Install-root layout and tool directory resolution
//! - [`fs`] - Guarded recursive tree removal
//! - [`process`] - Tool invocation and subprocess launching
//! - [`toolbox`] - Named tool providers backed by JDK commands
//! - [`units`] - Module compilation unit discovery
//! - [`version`] - Module version assembly for source builds
//! - [`workbench`] - Aggregate handed to tool installer plugins

pub mod browser;
pub mod config;
pub mod error;
pub mod finder;
pub mod folders;
pub mod fs;
pub mod process;
pub mod toolbox;
pub mod units;
pub mod version;
pub mod workbench;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
