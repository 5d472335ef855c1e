//! Tests for launcher CLI parsing, operation selection, and configuration.

use super::*;
use rstest::rstest;

/// Parses `args` with the configuration environment cleared.
fn parse(args: &[&str]) -> Cli {
    temp_env::with_vars(
        [
            (config::ENV_VERBOSE, None::<&str>),
            (config::ENV_DRY_RUN, None),
            (config::ENV_DIRECTORY, None),
        ],
        || Cli::parse_from(args),
    )
}

#[test]
fn cli_parses_defaults() {
    let cli = parse(&["gantry"]);
    assert!(!cli.verbose);
    assert!(!cli.dry_run);
    assert!(cli.directory.is_none());
    assert!(cli.arguments.is_empty());
    assert_eq!(cli.operation(), Operation::Usage);
}

#[test]
fn flags_before_the_operation_are_parsed() {
    let cli = parse(&["gantry", "--verbose", "--directory", "work/.gantry", "status"]);
    assert!(cli.verbose);
    assert_eq!(cli.directory, Some(Utf8PathBuf::from("work/.gantry")));
    assert_eq!(cli.arguments, ["status"]);
    assert_eq!(cli.operation(), Operation::Status);
}

#[test]
fn flags_after_the_operation_are_forwarded_untouched() {
    let cli = parse(&["gantry", "run", "--verbose", "clean"]);
    assert!(!cli.verbose);
    assert_eq!(cli.arguments, ["run", "--verbose", "clean"]);
    assert_eq!(
        cli.operation(),
        Operation::Run {
            args: vec!["--verbose".to_owned(), "clean".to_owned()],
        },
    );
}

#[rstest]
#[case::long_help(&["gantry", "--help"], Operation::Help)]
#[case::short_version(&["gantry", "-v"], Operation::Version)]
#[case::long_version(&["gantry", "--version"], Operation::Version)]
fn hyphenated_operations_bypass_clap(#[case] args: &[&str], #[case] expected: Operation) {
    let cli = parse(args);
    assert_eq!(cli.operation(), expected);
}

#[test]
fn environment_switches_enable_the_flags() {
    temp_env::with_vars(
        [
            (config::ENV_VERBOSE, Some("true")),
            (config::ENV_DRY_RUN, Some("1")),
        ],
        || {
            let cli = Cli::parse_from(["gantry"]);
            assert!(cli.verbose);
            assert!(cli.dry_run);
        },
    );
    temp_env::with_vars(
        [
            (config::ENV_VERBOSE, Some("false")),
            (config::ENV_DRY_RUN, Some("")),
        ],
        || {
            let cli = Cli::parse_from(["gantry"]);
            assert!(!cli.verbose);
            assert!(!cli.dry_run);
        },
    );
}

#[test]
fn the_directory_flag_wins_over_the_environment() {
    temp_env::with_var(config::ENV_DIRECTORY, Some("env/.gantry"), || {
        let from_env = Cli::parse_from(["gantry"]);
        assert_eq!(from_env.directory, Some(Utf8PathBuf::from("env/.gantry")));

        let from_flag = Cli::parse_from(["gantry", "--directory", "flag/.gantry"]);
        assert_eq!(from_flag.directory, Some(Utf8PathBuf::from("flag/.gantry")));
    });
}

#[rstest]
#[case::empty(vec![], Operation::Usage)]
#[case::find(vec!["find"], Operation::Find { pattern: None })]
#[case::find_pattern(
    vec!["find", "glob:**/*.java"],
    Operation::Find { pattern: Some("glob:**/*.java".to_owned()) },
)]
#[case::help(vec!["help"], Operation::Help)]
#[case::help_question(vec!["?"], Operation::Help)]
#[case::help_short(vec!["-h"], Operation::Help)]
#[case::help_long(vec!["--help"], Operation::Help)]
#[case::run(
    vec!["run", "build", "--fast"],
    Operation::Run { args: vec!["build".to_owned(), "--fast".to_owned()] },
)]
#[case::run_alias(vec!["+"], Operation::Run { args: Vec::new() })]
#[case::status(vec!["status"], Operation::Status)]
#[case::status_alias(vec!["~"], Operation::Status)]
#[case::version(vec!["version"], Operation::Version)]
#[case::version_short(vec!["-v"], Operation::Version)]
#[case::version_long(vec!["--version"], Operation::Version)]
#[case::unknown(vec!["explode"], Operation::Unsupported("explode".to_owned()))]
fn operations_map_from_the_first_argument(#[case] raw: Vec<&str>, #[case] expected: Operation) {
    let arguments: Vec<String> = raw.into_iter().map(str::to_owned).collect();
    assert_eq!(Operation::from_arguments(&arguments), expected);
}

#[test]
fn config_resolves_runner_version_from_the_environment() {
    temp_env::with_vars(
        [
            (config::ENV_RUNNER_VERSION, Some("1.2.3")),
            (config::ENV_BUILD_NUMBER, None::<&str>),
            (config::ENV_BUILD_PRE_RELEASE, None),
            (config::ENV_VCS_SHA, None),
        ],
        || {
            let resolved = Cli::default().config();
            assert_eq!(resolved.runner_version, "1.2.3");
            assert_eq!(resolved.build_number, config::DEFAULT_BUILD_NUMBER);
            assert_eq!(resolved.build_pre_release, config::DEFAULT_BUILD_PRE_RELEASE);
            assert!(resolved.vcs_sha.is_none());
        },
    );
}

#[test]
fn config_honours_a_blank_pre_release_label() {
    temp_env::with_var(config::ENV_BUILD_PRE_RELEASE, Some(""), || {
        assert_eq!(Cli::default().config().build_pre_release, "");
    });
}

#[test]
fn config_ignores_a_blank_vcs_revision() {
    temp_env::with_var(config::ENV_VCS_SHA, Some(""), || {
        assert!(Cli::default().config().vcs_sha.is_none());
    });
    temp_env::with_var(config::ENV_VCS_SHA, Some("0123456789abcdef"), || {
        assert_eq!(
            Cli::default().config().vcs_sha.as_deref(),
            Some("0123456789abcdef"),
        );
    });
}

#[test]
fn config_defaults_the_install_root() {
    assert_eq!(Cli::default().config().root.as_str(), ".gantry");

    let directed = Cli {
        directory: Some(Utf8PathBuf::from("work/.gantry")),
        ..Cli::default()
    };
    assert_eq!(directed.config().root.as_str(), "work/.gantry");
}
