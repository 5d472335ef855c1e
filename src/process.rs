//! Tool and subprocess execution policies.
//!
//! Two policies cover every invocation the pipeline makes. In-process tools
//! run synchronously on the calling thread with no subprocess management.
//! External subprocesses get exactly two transient forwarding threads, one
//! per output stream, each relaying lines to its destination sink as they
//! arrive; both threads are joined before the exit status is inspected, so
//! no output is lost when the child finishes. Line order is preserved within
//! each stream; interleaving across the two streams is unspecified. Every
//! blocking wait is unbounded.
//!
//! Both policies write an echo line `* <command> <args…>` to the output sink
//! before the invocation starts, and both convert a non-zero exit code into
//! [`GantryError::NonZeroExit`].

use std::io::{BufRead, BufReader, Read, Write};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::{GantryError, Result};
use crate::toolbox::Toolbox;

/// Runs a named tool from `toolbox` synchronously.
///
/// # Errors
///
/// Returns [`GantryError::ToolNotFound`] when no tool answers to `name`,
/// [`GantryError::NonZeroExit`] when the tool reports a non-zero exit code,
/// and [`GantryError::Io`] when the tool cannot be executed.
pub fn run_tool(
    toolbox: &Toolbox,
    name: &str,
    args: &[String],
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<()> {
    let tool = toolbox.find(name).ok_or_else(|| GantryError::ToolNotFound {
        tool: name.to_owned(),
    })?;
    echo(out, name, args)?;
    debug!(tool = name, "running in-process tool");
    let code = tool.run(args, out, err)?;
    if code != 0 {
        return Err(GantryError::NonZeroExit {
            command: name.to_owned(),
            code,
        });
    }
    Ok(())
}

/// Spawns `command` as a subprocess and forwards its output streams.
///
/// The calling thread blocks until the child exits and both forwarding
/// threads have drained their streams.
///
/// # Errors
///
/// Returns [`GantryError::NonZeroExit`] when the child reports a non-zero
/// exit status, and [`GantryError::Io`] when it cannot be spawned.
pub fn run_command(
    command: &str,
    args: &[String],
    out: &mut (dyn Write + Send),
    err: &mut (dyn Write + Send),
) -> Result<()> {
    echo(out, command, args)?;
    debug!(command, "spawning subprocess");
    let mut child = Command::new(command)
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;
    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| missing_stream("standard output"))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| missing_stream("standard error"))?;
    let status = std::thread::scope(|scope| {
        scope.spawn(move || forward_lines(stdout, out));
        scope.spawn(move || forward_lines(stderr, err));
        child.wait()
    })?;
    if !status.success() {
        return Err(GantryError::NonZeroExit {
            command: command.to_owned(),
            code: status.code().unwrap_or(-1),
        });
    }
    Ok(())
}

/// Writes the echo line announcing an invocation.
fn echo(sink: &mut dyn Write, command: &str, args: &[String]) -> std::io::Result<()> {
    write!(sink, "* {command}")?;
    for arg in args {
        write!(sink, " {arg}")?;
    }
    writeln!(sink)?;
    sink.flush()
}

/// Relays lines from a child stream to a sink until either side closes.
fn forward_lines(stream: impl Read, sink: &mut (dyn Write + Send)) {
    for line in BufReader::new(stream).lines() {
        let Ok(text) = line else { return };
        if writeln!(sink, "{text}").and_then(|()| sink.flush()).is_err() {
            return;
        }
    }
}

/// Error for a child stream that was not captured despite piping.
fn missing_stream(stream: &str) -> GantryError {
    GantryError::Io(std::io::Error::other(format!(
        "subprocess {stream} was not captured"
    )))
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;
