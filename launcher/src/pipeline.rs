//! Three-stage bootstrap pipeline behind the `run` operation.
//!
//! Stage one ensures the runner module exists in `bin`, building it from
//! local sources when they are present or fetching its release archive when
//! they are not. Stage two compiles any project modules into `bin` so they
//! resolve alongside the runner. Stage three launches the runner as a child
//! process with the remaining arguments. Stages execute strictly in order
//! and are not independently retryable: a failure in any stage aborts the
//! whole operation, and an interrupt stops the pipeline before its next
//! stage. The install root is a single-writer resource; concurrent
//! invocations targeting the same root are not protected.

use std::io::Write;

use camino::Utf8Path;
use gantry::browser::{Browser, release_asset_url};
use gantry::config::Config;
use gantry::error::{GantryError, Result};
use gantry::finder::ToolFinder;
use gantry::folders::Folders;
use gantry::fs::remove_tree;
use gantry::process;
use gantry::toolbox::Toolbox;
use gantry::units;
use gantry::version::ModuleVersion;
use tracing::{debug, info, warn};

use crate::interrupt::InterruptFlag;
use crate::operations;

/// Module name of the runner the pipeline builds or fetches.
pub const RUNNER_MODULE: &str = "run.gantry";
/// Entry point recorded in the runner archive manifest.
pub const RUNNER_MAIN_CLASS: &str = "run.gantry.Main";
/// GitHub repository hosting runner release archives.
pub const RUNNER_REPOSITORY: &str = "gantry-build/gantry";
/// Local runner sources, relative to the working directory.
pub const RUNNER_SOURCES: &str = "src/run.gantry/main/java";

/// Collaborators and settings for one `run` invocation.
pub struct RunContext<'a> {
    /// Resolved launcher configuration.
    pub config: &'a Config,
    /// Tool registry answering the compile and package steps.
    pub toolbox: &'a Toolbox,
    /// Fetcher used when the runner release archive must be downloaded.
    pub browser: &'a dyn Browser,
    /// Interrupt flag checked between stages.
    pub interrupt: &'a InterruptFlag,
    /// Command launching the runner in stage three.
    pub java_command: &'a Utf8Path,
    /// Location of local runner sources; relative paths resolve against the
    /// working directory.
    pub runner_sources: &'a Utf8Path,
}

/// Runs the pipeline: ensure the runner, compile project modules, launch.
///
/// # Errors
///
/// Any stage failure aborts the operation:
/// [`GantryError::TransferFailure`] from a runner fetch,
/// [`GantryError::ToolNotFound`] or [`GantryError::NonZeroExit`] from a
/// compile, package, or launch step, and [`GantryError::Io`] from the
/// filesystem.
pub fn run(
    context: &RunContext<'_>,
    args: &[String],
    out: &mut (dyn Write + Send),
    err: &mut (dyn Write + Send),
) -> Result<()> {
    let folders = Folders::of_root(context.config.root());
    ensure_runner(context, &folders, &mut *out, &mut *err)?;
    if context.interrupt.is_triggered() {
        info!("interrupted; stopping before project compilation");
        return Ok(());
    }
    compile_project_modules(context, &folders, &mut *out, &mut *err)?;
    if context.interrupt.is_triggered() {
        info!("interrupted; stopping before the runner launch");
        return Ok(());
    }
    launch_runner(context, &folders, args, out, err)
}

/// Ensures the runner module is present in `bin`.
///
/// Local sources always win: they trigger a rebuild even over an installed
/// runner. Without sources the release archive is fetched once; an installed
/// runner with no sources short-circuits the stage.
fn ensure_runner(
    context: &RunContext<'_>,
    folders: &Folders,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<()> {
    if context.runner_sources.is_dir() {
        return build_runner(context, folders, out, err);
    }
    let installed = ToolFinder::of_folder(&folders.bin())?
        .find(RUNNER_MODULE)
        .is_some();
    if installed {
        debug!("runner module already installed; skipping bootstrap");
        return Ok(());
    }
    fetch_runner(context, folders)
}

/// Compiles and packages the runner module from local sources.
fn build_runner(
    context: &RunContext<'_>,
    folders: &Folders,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<()> {
    let config = context.config;
    let version = ModuleVersion::new(
        &config.build_number,
        &config.build_pre_release,
        config.vcs_sha.as_deref(),
    );
    if config.dry_run {
        info!(%version, "dry run; would rebuild the runner module");
        return Ok(());
    }
    clear_tree(&folders.bin())?;
    clear_tree(&folders.out())?;
    let classes = folders.out().join("run").join("classes");
    // The asterisk is passed through for the compiler to expand.
    let source_pattern = context.runner_sources.as_str().replace(RUNNER_MODULE, "*");
    process::run_tool(
        context.toolbox,
        "javac",
        &[
            "--release=17".to_owned(),
            format!("--module={RUNNER_MODULE}"),
            format!("--module-source-path={source_pattern}"),
            format!("--module-version={version}"),
            "-d".to_owned(),
            classes.to_string(),
        ],
        out,
        err,
    )?;
    std::fs::create_dir_all(folders.bin())?;
    let archive = folders
        .bin()
        .join(runner_archive_name(&config.runner_version));
    process::run_tool(
        context.toolbox,
        "jar",
        &[
            "--create".to_owned(),
            format!("--file={archive}"),
            format!("--main-class={RUNNER_MAIN_CLASS}"),
            "-C".to_owned(),
            classes.join(RUNNER_MODULE).to_string(),
            ".".to_owned(),
        ],
        out,
        err,
    )
}

/// Fetches the runner release archive into `bin`.
fn fetch_runner(context: &RunContext<'_>, folders: &Folders) -> Result<()> {
    let version = &context.config.runner_version;
    let filename = runner_archive_name(version);
    let source = release_asset_url(RUNNER_REPOSITORY, version, &filename);
    let target = folders.bin().join(&filename);
    if context.config.dry_run {
        info!(%source, %target, "dry run; would fetch the runner module");
        return Ok(());
    }
    debug!(%source, "fetching the runner module");
    context.browser.copy(&source, &target)
}

/// Compiles discovered project modules into `bin`.
fn compile_project_modules(
    context: &RunContext<'_>,
    folders: &Folders,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<()> {
    let root = context.config.root();
    let units = units::module_compilation_units(root)?;
    if units.is_empty() {
        debug!("no module compilation units; skipping project compilation");
        return Ok(());
    }
    let names = units::module_names(&units).join(",");
    if context.config.dry_run {
        info!(modules = %names, "dry run; would compile project modules");
        return Ok(());
    }
    let bin = folders.bin();
    process::run_tool(
        context.toolbox,
        "javac",
        &[
            format!("--module={names}"),
            format!("--module-source-path={}", module_source_path(root)),
            format!("--module-path={bin}"),
            "-d".to_owned(),
            bin.to_string(),
        ],
        out,
        err,
    )
}

/// Launches the runner module as a child process.
fn launch_runner(
    context: &RunContext<'_>,
    folders: &Folders,
    args: &[String],
    out: &mut (dyn Write + Send),
    err: &mut (dyn Write + Send),
) -> Result<()> {
    if context.config.verbose {
        operations::report_installed_modules(folders, &mut *out)?;
    }
    let bin = folders.bin();
    let mut arguments = vec![
        "--module-path".to_owned(),
        bin.to_string(),
        "--add-modules".to_owned(),
        "ALL-DEFAULT".to_owned(),
        "--module".to_owned(),
        RUNNER_MODULE.to_owned(),
    ];
    arguments.extend(args.iter().cloned());
    if context.config.dry_run {
        info!(command = %context.java_command, "dry run; would launch the runner");
        return Ok(());
    }
    process::run_command(context.java_command.as_str(), &arguments, out, err)
}

/// Archive filename for a runner version.
fn runner_archive_name(version: &str) -> String {
    format!("{RUNNER_MODULE}@{version}.jar")
}

/// Joins the project root and its `sub` directory with the platform
/// path-list separator.
fn module_source_path(root: &Utf8Path) -> String {
    let separator = if cfg!(windows) { ';' } else { ':' };
    format!("{root}{separator}{}", root.join("sub"))
}

/// Removes a regenerable tree, tolerating a refused filesystem root.
fn clear_tree(path: &Utf8Path) -> Result<()> {
    match remove_tree(path) {
        Ok(_) => Ok(()),
        Err(GantryError::UnsafeDeletion { path: refused }) => {
            warn!(%refused, "refusing to delete a filesystem root; leaving it in place");
            Ok(())
        }
        Err(error) => Err(error),
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
