use crate::env::Environment;
use anyhow::Result;
use std::io::Write;

/// Conventional exit code type used by this crate.
///
/// A value of 0 indicates success; any non-zero value indicates failure.
pub type ExitCode = i32;

/// Object-safe trait for any command the shell can execute.
///
/// Implemented for built-ins via a blanket impl, and for the placeholder that
/// reports argument parsing failures.
pub trait ExecutableCommand {
    /// Executes the command, writing its report to `stdout`.
    fn execute(self: Box<Self>, stdout: &mut dyn Write, env: &mut Environment)
    -> Result<ExitCode>;
}

/// Factory that tries to create a command from a name and its arguments.
///
/// Returns `None` when the factory doesn't recognize `name`. The interpreter
/// asks each registered factory in turn, which makes the list of factories the
/// shell's dispatch table.
pub trait CommandFactory {
    /// Attempt to create a command instance for the provided name and arguments.
    fn try_create(&self, name: &str, args: &[&str]) -> Option<Box<dyn ExecutableCommand>>;
}
