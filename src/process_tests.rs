//! Tests for the execution policies, driving a real shell child.

use crate::error::GantryError;
use crate::process::{run_command, run_tool};
use crate::test_support::StubTool;
use crate::toolbox::Toolbox;
use rstest::rstest;

fn shell_args(script: &str) -> Vec<String> {
    vec!["-c".to_owned(), script.to_owned()]
}

fn lines(sink: &[u8]) -> Vec<String> {
    String::from_utf8(sink.to_vec())
        .expect("sink to hold UTF-8")
        .lines()
        .map(str::to_owned)
        .collect()
}

#[rstest]
fn a_clean_exit_forwards_every_line_in_stream_order() {
    let mut out = Vec::new();
    let mut err = Vec::new();

    run_command(
        "/bin/sh",
        &shell_args("echo one; echo two; echo three 1>&2"),
        &mut out,
        &mut err,
    )
    .expect("clean exit");

    let forwarded = lines(&out);
    assert_eq!(
        forwarded.first().map(String::as_str),
        Some("* /bin/sh -c echo one; echo two; echo three 1>&2"),
    );
    assert_eq!(forwarded.get(1..), Some(&["one".to_owned(), "two".to_owned()][..]));
    assert_eq!(lines(&err), ["three"]);
}

#[rstest]
fn a_non_zero_exit_carries_the_command_and_code() {
    let mut out = Vec::new();
    let mut err = Vec::new();

    let outcome = run_command("/bin/sh", &shell_args("exit 17"), &mut out, &mut err);

    assert!(matches!(
        outcome,
        Err(GantryError::NonZeroExit { command, code: 17 }) if command == "/bin/sh"
    ));
}

#[rstest]
fn output_written_before_failure_is_still_forwarded() {
    let mut out = Vec::new();
    let mut err = Vec::new();

    let outcome = run_command(
        "/bin/sh",
        &shell_args("echo partial; exit 2"),
        &mut out,
        &mut err,
    );

    assert!(outcome.is_err());
    assert_eq!(lines(&out).get(1).map(String::as_str), Some("partial"));
}

#[rstest]
fn an_unknown_command_surfaces_the_spawn_fault() {
    let mut out = Vec::new();
    let mut err = Vec::new();

    let outcome = run_command(
        "/nonexistent/gantry-no-such-command",
        &[],
        &mut out,
        &mut err,
    );

    assert!(matches!(outcome, Err(GantryError::Io(_))));
}

#[rstest]
fn tools_echo_their_invocation_before_running() {
    let mut toolbox = Toolbox::empty();
    toolbox.register(Box::new(StubTool::new("demo", "body\n", 0)));
    let mut out = Vec::new();
    let mut err = Vec::new();

    run_tool(
        &toolbox,
        "demo",
        &["--flag".to_owned(), "value".to_owned()],
        &mut out,
        &mut err,
    )
    .expect("tool run");

    assert_eq!(lines(&out), ["* demo --flag value", "body"]);
}

#[rstest]
fn a_missing_tool_is_reported_by_name() {
    let toolbox = Toolbox::empty();
    let mut out = Vec::new();
    let mut err = Vec::new();

    let outcome = run_tool(&toolbox, "javac", &[], &mut out, &mut err);

    assert!(matches!(
        outcome,
        Err(GantryError::ToolNotFound { tool }) if tool == "javac"
    ));
    assert!(out.is_empty(), "no echo line for a tool that never ran");
}

#[rstest]
fn a_failing_tool_raises_its_exit_code() {
    let mut toolbox = Toolbox::empty();
    toolbox.register(Box::new(StubTool::new("demo", "", 5)));
    let mut out = Vec::new();
    let mut err = Vec::new();

    let outcome = run_tool(&toolbox, "demo", &[], &mut out, &mut err);

    assert!(matches!(
        outcome,
        Err(GantryError::NonZeroExit { command, code: 5 }) if command == "demo"
    ));
}
