//! Library backing the `gantry` binary.
//!
//! The launcher parses a deliberately thin command line (flags plus one raw
//! trailing operation vector), dispatches to an operation handler, and, for
//! `run`, drives the three-stage bootstrap pipeline that builds or fetches
//! the runner module before launching it. All output goes to injected sinks
//! so the operations stay testable without capturing the process streams.

pub mod cli;
pub mod interrupt;
pub mod operations;
pub mod pipeline;
