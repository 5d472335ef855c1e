//! Gantry launcher entrypoint.
//!
//! The binary parses the command line, resolves the configuration, and
//! dispatches exactly one operation. Operation output goes to stdout; logs
//! and error reports go to stderr.

use std::io::Write;

use camino::Utf8Path;
use clap::Parser;
use gantry::browser::HttpBrowser;
use gantry::config::Config;
use gantry::error::Result;
use gantry::toolbox::{self, Toolbox};
use gantry_launcher::cli::{Cli, Operation};
use gantry_launcher::interrupt::InterruptFlag;
use gantry_launcher::operations;
use gantry_launcher::pipeline::{self, RunContext};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    let config = cli.config();
    init_tracing(config.verbose);
    if config.verbose {
        debug!(?config, "resolved configuration");
    }
    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();
    let run_result = dispatch(&cli, &config, &mut stdout, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

/// Initialises the stderr logger.
///
/// `RUST_LOG` takes precedence; otherwise `verbose` selects `debug` over the
/// default `info` level.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Routes the selected operation to its handler.
fn dispatch(
    cli: &Cli,
    config: &Config,
    out: &mut (dyn Write + Send),
    err: &mut (dyn Write + Send),
) -> Result<()> {
    match cli.operation() {
        Operation::Usage => operations::usage(config, &mut *out),
        Operation::Find { pattern } => {
            operations::find(Utf8Path::new("."), pattern.as_deref(), &mut *out)
        }
        Operation::Help => operations::help(&mut *out),
        Operation::Run { args } => run_pipeline(config, &args, out, err),
        Operation::Status => operations::status(config, &mut *out),
        Operation::Version => operations::version(config, &mut *out),
        Operation::Unsupported(name) => operations::report_unsupported(&name, &mut *err),
    }
}

/// Assembles the real collaborators and runs the bootstrap pipeline.
fn run_pipeline(
    config: &Config,
    args: &[String],
    out: &mut (dyn Write + Send),
    err: &mut (dyn Write + Send),
) -> Result<()> {
    let java_home = toolbox::java_home();
    let toolbox = Toolbox::jdk(java_home.as_deref());
    let java_command = toolbox::java_launcher(java_home.as_deref());
    let browser = HttpBrowser;
    let interrupt = InterruptFlag::new();
    if let Err(error) = interrupt.install_handler() {
        warn!(%error, "could not install the interrupt handler");
    }
    let context = RunContext {
        config,
        toolbox: &toolbox,
        browser: &browser,
        interrupt: &interrupt,
        java_command: &java_command,
        runner_sources: Utf8Path::new(pipeline::RUNNER_SOURCES),
    };
    pipeline::run(&context, args, out, err)
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_stderr_line(stderr, err);
            1
        }
    }
}

fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort logging; ignore write failures.
    }
}
