//! Process invoker - runs one benchmark executable for one config point
//!
//! The invoker builds the argument vector from the implementation's
//! [`CliContract`](crate::config::CliContract), runs the child in the
//! implementation's directory, blocks until it exits and hands back whatever
//! it printed. It does not judge the result: exit status and output are
//! returned as-is for the sweep driver to classify.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ConfigPoint;
use crate::Result;

/// Where and how to launch a benchmark executable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Executable {
    program: String,
    leading_args: Vec<String>,
    working_dir: PathBuf,
}

impl Executable {
    /// Run `program` directly inside `working_dir`.
    #[must_use]
    pub fn new(program: impl Into<String>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            leading_args: Vec::new(),
            working_dir: working_dir.into(),
        }
    }

    /// `cargo run --release --` inside the crate at `dir`.
    #[must_use]
    pub fn cargo_release(dir: impl Into<PathBuf>) -> Self {
        Self::new("cargo", dir).leading_args(["run", "--release", "--"])
    }

    /// Arguments placed before the config point's argument vector.
    #[must_use]
    pub fn leading_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.leading_args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Get the program name or path.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Get the working directory.
    #[must_use]
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }
}

/// Text and exit code captured from one child process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedOutput {
    /// Standard output, lossily decoded as UTF-8
    pub stdout: String,
    /// Standard error, lossily decoded as UTF-8
    pub stderr: String,
    /// Exit code, `None` if the process was killed by a signal
    pub exit_code: Option<i32>,
}

impl CapturedOutput {
    /// Whether the process exited with code zero.
    #[must_use]
    pub const fn success(&self) -> bool {
        matches!(self.exit_code, Some(0))
    }
}

/// Runs a config point against an executable.
///
/// [`ProcessInvoker`] is the real implementation; tests substitute their own.
pub trait Invoke {
    /// Run `point` and wait for it to finish.
    ///
    /// # Errors
    ///
    /// Returns an error if the argument vector cannot be built or the process
    /// cannot be spawned. A process that runs and fails is not an error here.
    fn run(&self, point: &ConfigPoint, executable: &Executable) -> Result<CapturedOutput>;
}

/// Blocking child-process invoker. No timeout: a hung benchmark hangs the sweep.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessInvoker;

impl ProcessInvoker {
    /// Create a new invoker.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Full argument list (leading arguments, then the contract's arguments).
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the point lacks a field the contract needs.
    pub fn arguments(point: &ConfigPoint, executable: &Executable) -> Result<Vec<String>> {
        let mut args = executable.leading_args.clone();
        args.extend(point.implementation().contract().build_args(point)?);
        Ok(args)
    }

    /// The command that [`Invoke::run`] would spawn.
    ///
    /// # Errors
    ///
    /// Same as [`ProcessInvoker::arguments`].
    pub fn command(point: &ConfigPoint, executable: &Executable) -> Result<Command> {
        let mut command = Command::new(&executable.program);
        command
            .args(Self::arguments(point, executable)?)
            .current_dir(&executable.working_dir)
            .stdin(Stdio::null());
        Ok(command)
    }
}

impl Invoke for ProcessInvoker {
    fn run(&self, point: &ConfigPoint, executable: &Executable) -> Result<CapturedOutput> {
        let mut command = Self::command(point, executable)?;
        debug!(?command, "spawning benchmark");
        let output = command.output()?;
        Ok(CapturedOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Implementation;

    fn baseline() -> ConfigPoint {
        ConfigPoint::builder(Implementation::Baseline)
            .send_count(1024)
            .fetch_count(16)
            .thread_count(4)
            .run_count(3)
            .build()
    }

    #[test]
    fn test_cargo_release_prefix() {
        let exe = Executable::cargo_release("baseline");
        let args = ProcessInvoker::arguments(&baseline(), &exe).unwrap();
        assert_eq!(
            args,
            ["run", "--release", "--", "1024", "16", "4", "-r", "3", "-w", "0"]
        );
    }

    #[test]
    fn test_echo_captures_stdout() {
        let exe = Executable::new("echo", std::env::temp_dir());
        let out = ProcessInvoker::new().run(&baseline(), &exe).unwrap();
        assert!(out.success());
        assert_eq!(out.stdout, "1024 16 4 -r 3 -w 0\n");
        assert!(out.stderr.is_empty());
    }

    #[test]
    fn test_nonzero_exit_is_returned_not_raised() {
        let exe = Executable::new("sh", std::env::temp_dir())
            .leading_args(["-c", "echo boom >&2; exit 3", "sh"]);
        let out = ProcessInvoker::new().run(&baseline(), &exe).unwrap();
        assert_eq!(out.exit_code, Some(3));
        assert_eq!(out.stderr, "boom\n");
    }

    #[test]
    fn test_missing_program_is_io_error() {
        let exe = Executable::new("definitely-not-a-benchmark-binary", std::env::temp_dir());
        let err = ProcessInvoker::new().run(&baseline(), &exe).unwrap_err();
        assert!(matches!(err, crate::Error::Io(_)));
    }
}
