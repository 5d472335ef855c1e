//! Command-line definitions for the `gantry` binary.
//!
//! The surface is deliberately thin: three configuration flags and one raw
//! trailing argument vector. The first trailing argument selects the
//! operation and everything after it is forwarded untouched, which keeps the
//! short alias forms (`+`, `~`, `?`, `-v`) and pass-through `run` arguments
//! working exactly as typed. Clap's built-in help and version handling is
//! disabled because `help` and `version` are operations here, not flags.

use camino::Utf8PathBuf;
use clap::Parser;
use clap::builder::FalseyValueParser;
use gantry::config::{self, Config};

/// Build-and-run launcher for modular Java projects.
#[derive(Parser, Debug, Clone)]
#[command(name = "gantry")]
#[command(disable_help_flag = true, disable_version_flag = true)]
#[command(about = "Build-and-run launcher for modular Java projects")]
pub struct Cli {
    /// Log configuration details and extend reports.
    #[arg(long, env = config::ENV_VERBOSE, value_parser = FalseyValueParser::new())]
    pub verbose: bool,

    /// Resolve configuration and report planned work without mutating
    /// anything.
    #[arg(long, env = config::ENV_DRY_RUN, value_parser = FalseyValueParser::new())]
    pub dry_run: bool,

    /// Install root holding runner and project artefacts.
    #[arg(long, value_name = "DIR", env = config::ENV_DIRECTORY)]
    pub directory: Option<Utf8PathBuf>,

    /// Operation name followed by its arguments.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "OPERATION")]
    pub arguments: Vec<String>,
}

impl Cli {
    /// Resolves the launcher configuration from flags and environment.
    ///
    /// Flags win over environment variables, which win over the built-in
    /// defaults. The runner version and build stamp values have no flag form
    /// and resolve from the environment alone.
    #[must_use]
    pub fn config(&self) -> Config {
        Config {
            verbose: self.verbose,
            dry_run: self.dry_run,
            root: self
                .directory
                .clone()
                .unwrap_or_else(|| Utf8PathBuf::from(config::DEFAULT_ROOT)),
            runner_version: env_or(config::ENV_RUNNER_VERSION, config::DEFAULT_RUNNER_VERSION),
            build_number: env_or(config::ENV_BUILD_NUMBER, config::DEFAULT_BUILD_NUMBER),
            build_pre_release: env_or(
                config::ENV_BUILD_PRE_RELEASE,
                config::DEFAULT_BUILD_PRE_RELEASE,
            ),
            vcs_sha: std::env::var(config::ENV_VCS_SHA)
                .ok()
                .filter(|sha| !sha.is_empty()),
        }
    }

    /// Selects the operation from the trailing arguments.
    #[must_use]
    pub fn operation(&self) -> Operation {
        Operation::from_arguments(&self.arguments)
    }
}

impl Default for Cli {
    /// Creates a `Cli` with all switches off and no operation selected.
    ///
    /// # Examples
    ///
    /// ```
    /// use gantry_launcher::cli::Cli;
    ///
    /// let cli = Cli::default();
    /// assert!(!cli.verbose);
    /// assert!(cli.arguments.is_empty());
    /// ```
    fn default() -> Self {
        Self {
            verbose: false,
            dry_run: false,
            directory: None,
            arguments: Vec::new(),
        }
    }
}

/// Operation selected by the first trailing argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// No operation given; print the usage text.
    Usage,
    /// List files below the working directory.
    Find {
        /// Optional `glob:` or `regex:` pattern; bare patterns select glob
        /// syntax.
        pattern: Option<String>,
    },
    /// Print the usage text plus extended operation help.
    Help,
    /// Ensure the runner module is present, then launch it.
    Run {
        /// Arguments forwarded to the runner module.
        args: Vec<String>,
    },
    /// Report the working directory status.
    Status,
    /// Print version information.
    Version,
    /// Anything unrecognised; reported on the error stream.
    Unsupported(String),
}

impl Operation {
    /// Maps the raw trailing arguments onto an operation.
    ///
    /// # Examples
    ///
    /// ```
    /// use gantry_launcher::cli::Operation;
    ///
    /// let arguments = vec!["+".to_owned(), "--help".to_owned()];
    /// assert_eq!(
    ///     Operation::from_arguments(&arguments),
    ///     Operation::Run { args: vec!["--help".to_owned()] },
    /// );
    /// assert_eq!(Operation::from_arguments(&[]), Operation::Usage);
    /// ```
    #[must_use]
    pub fn from_arguments(arguments: &[String]) -> Self {
        let Some((operation, rest)) = arguments.split_first() else {
            return Self::Usage;
        };
        match operation.as_str() {
            "find" => Self::Find {
                pattern: rest.first().cloned(),
            },
            "help" | "?" | "-h" | "--help" => Self::Help,
            "run" | "+" => Self::Run {
                args: rest.to_vec(),
            },
            "status" | "~" => Self::Status,
            "version" | "-v" | "--version" => Self::Version,
            _ => Self::Unsupported(operation.clone()),
        }
    }
}

/// Reads an environment variable, falling back to a default when unset.
fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_owned())
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
