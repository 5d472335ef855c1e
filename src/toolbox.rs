//! In-process tool invocation surface.
//!
//! The pipeline drives `javac` and `jar` as named tools rather than bare
//! subprocesses: a [`Toolbox`] answers lookups by name, and each [`Tool`]
//! runs synchronously against injected output sinks. JDK commands resolve
//! under the Java home's `bin` directory when one is known, falling back to
//! the bare command name on the search path.

use std::io::Write;
use std::process::Command;

use camino::{Utf8Path, Utf8PathBuf};

/// A named tool runnable against injected output sinks.
pub trait Tool {
    /// Name used for lookup and echo lines.
    fn name(&self) -> &str;

    /// Runs the tool with `args`, writing its output to the sinks.
    ///
    /// Returns the tool's exit code; policy around non-zero codes belongs to
    /// the caller.
    ///
    /// # Errors
    ///
    /// Returns an error when the tool cannot be executed or a sink rejects a
    /// write.
    fn run(
        &self,
        args: &[String],
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> std::io::Result<i32>;
}

/// A JDK command exposed as an in-process tool.
///
/// The command runs to completion and its captured output is replayed to
/// the sinks afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JdkTool {
    name: String,
    program: Utf8PathBuf,
}

impl JdkTool {
    /// Binds `name` to the JDK command resolved from `java_home`.
    #[must_use]
    pub fn new(name: &str, java_home: Option<&Utf8Path>) -> Self {
        Self {
            name: name.to_owned(),
            program: jdk_command(java_home, name),
        }
    }
}

impl Tool for JdkTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn run(
        &self,
        args: &[String],
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> std::io::Result<i32> {
        let output = Command::new(&self.program).args(args).output()?;
        out.write_all(&output.stdout)?;
        err.write_all(&output.stderr)?;
        Ok(output.status.code().unwrap_or(-1))
    }
}

/// Set of tools resolvable by name.
pub struct Toolbox {
    tools: Vec<Box<dyn Tool>>,
}

impl Toolbox {
    /// Empty toolbox for callers that register their own tools.
    #[must_use]
    pub const fn empty() -> Self {
        Self { tools: Vec::new() }
    }

    /// Toolbox exposing the JDK `javac` and `jar` commands.
    #[must_use]
    pub fn jdk(java_home: Option<&Utf8Path>) -> Self {
        let mut toolbox = Self::empty();
        toolbox.register(Box::new(JdkTool::new("javac", java_home)));
        toolbox.register(Box::new(JdkTool::new("jar", java_home)));
        toolbox
    }

    /// Adds `tool` to the lookup set.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        self.tools.push(tool);
    }

    /// Finds a tool by name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&dyn Tool> {
        self.tools
            .iter()
            .find(|tool| tool.name() == name)
            .map(|tool| &**tool)
    }
}

impl std::fmt::Debug for Toolbox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.tools.iter().map(|tool| tool.name()).collect();
        f.debug_struct("Toolbox").field("tools", &names).finish()
    }
}

/// Reads the Java installation folder from the `JAVA_HOME` environment
/// variable.
///
/// Blank values count as unset.
#[must_use]
pub fn java_home() -> Option<Utf8PathBuf> {
    std::env::var("JAVA_HOME")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(Utf8PathBuf::from)
}

/// Resolves a JDK command, preferring `java_home`'s `bin` directory and
/// falling back to the bare command name on the search path.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use gantry::toolbox::jdk_command;
///
/// let command = jdk_command(None, "javac");
/// assert!(command.as_str().starts_with("javac"));
/// ```
#[must_use]
pub fn jdk_command(java_home: Option<&Utf8Path>, name: &str) -> Utf8PathBuf {
    java_home.map_or_else(
        || Utf8PathBuf::from(executable_name(name)),
        |home| home.join("bin").join(executable_name(name)),
    )
}

/// Resolves the `java` launcher command for subprocess use.
#[must_use]
pub fn java_launcher(java_home: Option<&Utf8Path>) -> Utf8PathBuf {
    jdk_command(java_home, "java")
}

/// Platform executable name for a command.
fn executable_name(name: &str) -> String {
    if cfg!(windows) {
        format!("{name}.exe")
    } else {
        name.to_owned()
    }
}
