//! Operation handlers behind the launcher dispatch.
//!
//! Each handler writes a complete report to an injected sink: the usage and
//! help texts, the `find` listing, the status report, and the version line.
//! Operation output never goes through the logger, so it stays capturable
//! and pipe-friendly.

use std::io::Write;

use camino::{Utf8Component, Utf8Path};
use gantry::config::Config;
use gantry::error::{GantryError, Result};
use gantry::finder::ToolFinder;
use gantry::folders::Folders;
use gantry::toolbox;
use gantry::units;
use globset::{GlobBuilder, GlobMatcher};
use ignore::WalkBuilder;
use regex::Regex;

use crate::pipeline::RUNNER_MODULE;

/// Launcher version reported by `status` and `version`.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Pattern applied when `find` is given none.
const DEFAULT_FIND_PATTERN: &str = "glob:**/*";

/// Maximum directory depth the `find` walk descends to.
const FIND_MAX_DEPTH: usize = 99;

/// Usage text printed when no operation is given.
///
/// `find` is deliberately undocumented here.
const USAGE: &str = "Usage: gantry <operation> [<arguments>]

Supported operations include:
  help      Show more helpful information
  run       Run a sequence of tools with their arguments
  status    Show the working directory status
  version   Show version information
";

/// Extended help appended to the usage text by the `help` operation.
const OPERATION_HELP: &str = "Operations in detail:
  find [<pattern>]
        List paths below the working directory, sorted, one per line.
        Bare patterns and `glob:` prefixed patterns use glob syntax;
        `regex:` prefixed patterns must match the whole relative path.
        Paths under `.git/` are never listed.
  help
        Show this information. Aliases: ?, -h, --help
  run [<arguments>...]
        Ensure the runner module is present, building it from local
        sources or fetching its release archive, compile any project
        modules, and launch the runner with the given arguments.
        Alias: +
  status
        Show version, runtime, and module information for the working
        directory. Alias: ~
  version
        Show version information. Aliases: -v, --version

Environment:
  GANTRY_VERBOSE     Log configuration details and extend reports
  GANTRY_DRY_RUN     Report planned work without mutating anything
  GANTRY_DIRECTORY   Install root (default: .gantry)
  GANTRY_VERSION     Runner artefact version (default: early-access)
";

/// Prints the usage text; verbose configurations append the status report.
///
/// # Errors
///
/// Returns [`GantryError::Io`] when the sink rejects a write or, under
/// `verbose`, when the status scan fails.
pub fn usage(config: &Config, out: &mut dyn Write) -> Result<()> {
    write!(out, "{USAGE}")?;
    if config.verbose {
        writeln!(out)?;
        status(config, out)?;
    }
    out.flush()?;
    Ok(())
}

/// Prints the usage text plus extended operation help.
///
/// # Errors
///
/// Returns [`GantryError::Io`] when the sink rejects a write.
pub fn help(out: &mut dyn Write) -> Result<()> {
    write!(out, "{USAGE}")?;
    writeln!(out)?;
    write!(out, "{OPERATION_HELP}")?;
    out.flush()?;
    Ok(())
}

/// Lists paths below `start` matching `pattern`, sorted, one per line.
///
/// Bare patterns and `glob:` prefixed patterns select glob syntax; `regex:`
/// prefixed patterns must match the whole relative path. Paths under the
/// top-level `.git` directory are always excluded, and paths that are not
/// valid UTF-8 are skipped.
///
/// # Errors
///
/// Returns [`GantryError::InvalidPattern`] when the pattern fails to parse
/// and [`GantryError::Io`] when the walk or the sink fails.
pub fn find(start: &Utf8Path, pattern: Option<&str>, out: &mut dyn Write) -> Result<()> {
    let filter = PathFilter::parse(pattern.unwrap_or(DEFAULT_FIND_PATTERN))?;
    let mut matches = Vec::new();
    let walker = WalkBuilder::new(start)
        .standard_filters(false)
        .max_depth(Some(FIND_MAX_DEPTH))
        .build();
    for entry in walker {
        let entry = entry.map_err(|error| GantryError::Io(std::io::Error::other(error)))?;
        if entry.depth() == 0 {
            continue;
        }
        let Some(path) = Utf8Path::from_path(entry.path()) else {
            continue;
        };
        let relative = path.strip_prefix(start).unwrap_or(path);
        if hidden_by_git(relative) || !filter.matches(relative) {
            continue;
        }
        matches.push(relative.to_owned());
    }
    matches.sort();
    for path in &matches {
        writeln!(out, "{path}")?;
    }
    out.flush()?;
    Ok(())
}

/// Prints the working directory status report.
///
/// Lines appear in a fixed order: the version line, the executable location
/// (verbose only), the Java home, the operating system, the module
/// compilation units, and the installed module inventory.
///
/// # Errors
///
/// Returns [`GantryError::Io`] when a folder scan or the sink fails.
pub fn status(config: &Config, out: &mut dyn Write) -> Result<()> {
    let folders = Folders::of_root(config.root());
    writeln!(out, "gantry {}", version_report(&folders)?)?;
    if config.verbose {
        report_executable_location(out)?;
    }
    match toolbox::java_home() {
        Some(home) => writeln!(out, "Java home: {home}")?,
        None => writeln!(out, "No Java home found")?,
    }
    writeln!(out, "{} ({})", std::env::consts::OS, std::env::consts::ARCH)?;
    let units = units::module_compilation_units(config.root())?;
    writeln!(out, "Module compilation units: {}", units.len())?;
    for unit in &units {
        writeln!(out, "  {unit}")?;
    }
    report_installed_modules(&folders, out)?;
    out.flush()?;
    Ok(())
}

/// Prints the version line.
///
/// The launcher's own version is suffixed with the installed runner's
/// `name@version` identity when one is present in `bin`.
///
/// # Errors
///
/// Returns [`GantryError::Io`] when the folder scan or the sink fails.
pub fn version(config: &Config, out: &mut dyn Write) -> Result<()> {
    let folders = Folders::of_root(config.root());
    writeln!(out, "{}", version_report(&folders)?)?;
    out.flush()?;
    Ok(())
}

/// Writes the installed module inventory for the `bin` folder.
///
/// # Errors
///
/// Returns [`GantryError::Io`] when the folder scan or the sink fails.
pub fn report_installed_modules(folders: &Folders, out: &mut dyn Write) -> Result<()> {
    let bin = folders.bin();
    let finder = ToolFinder::of_folder(&bin)?;
    writeln!(out, "Modules in {bin}: {}", finder.artefacts().len())?;
    for artefact in finder.artefacts() {
        writeln!(out, "  {artefact}")?;
    }
    Ok(())
}

/// Reports an unsupported operation name on the error stream.
///
/// An unknown operation is reported, not fatal; the launcher terminates
/// normally afterwards.
///
/// # Errors
///
/// Returns [`GantryError::Io`] when the sink rejects the write.
pub fn report_unsupported(operation: &str, err: &mut dyn Write) -> Result<()> {
    writeln!(err, "Operation `{operation}` is not supported.")?;
    err.flush()?;
    Ok(())
}

/// Version line body: the launcher version, suffixed with the installed
/// runner identity when one is present.
fn version_report(folders: &Folders) -> Result<String> {
    let finder = ToolFinder::of_folder(&folders.bin())?;
    Ok(finder.find(RUNNER_MODULE).map_or_else(
        || VERSION.to_owned(),
        |artefact| format!("{VERSION} ({artefact})"),
    ))
}

/// Reports where the running launcher binary lives.
fn report_executable_location(out: &mut dyn Write) -> Result<()> {
    match std::env::current_exe() {
        Ok(path) => writeln!(out, "Executable location: {}", path.display())?,
        Err(error) => writeln!(out, "No executable location available: {error}")?,
    }
    Ok(())
}

/// Whether `relative` sits inside the top-level `.git` directory.
fn hidden_by_git(relative: &Utf8Path) -> bool {
    matches!(
        relative.components().next(),
        Some(Utf8Component::Normal(".git"))
    )
}

/// Compiled form of a `find` pattern.
enum PathFilter {
    Glob(GlobMatcher),
    Regex(Regex),
}

impl PathFilter {
    /// Parses a pattern, defaulting bare text to glob syntax.
    ///
    /// A glob `*` stays within one path component; only `**` crosses
    /// separators.
    fn parse(pattern: &str) -> Result<Self> {
        if let Some(expression) = pattern.strip_prefix("regex:") {
            // Anchored so the expression must cover the whole path.
            let anchored = format!("\\A(?:{expression})\\z");
            let regex =
                Regex::new(&anchored).map_err(|error| invalid_pattern(pattern, &error))?;
            return Ok(Self::Regex(regex));
        }
        let glob = pattern.strip_prefix("glob:").unwrap_or(pattern);
        let matcher = GlobBuilder::new(glob)
            .literal_separator(true)
            .build()
            .map_err(|error| invalid_pattern(pattern, &error))?
            .compile_matcher();
        Ok(Self::Glob(matcher))
    }

    /// Whether the relative path satisfies the pattern.
    fn matches(&self, path: &Utf8Path) -> bool {
        match self {
            Self::Glob(matcher) => matcher.is_match(path.as_str()),
            Self::Regex(regex) => regex.is_match(path.as_str()),
        }
    }
}

/// Maps a pattern parser diagnostic to [`GantryError::InvalidPattern`].
fn invalid_pattern(pattern: &str, error: &dyn std::fmt::Display) -> GantryError {
    GantryError::InvalidPattern {
        pattern: pattern.to_owned(),
        reason: error.to_string(),
    }
}

#[cfg(test)]
#[path = "operations_tests.rs"]
mod tests;
