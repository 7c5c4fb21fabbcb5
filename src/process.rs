//! External process launching.
//!
//! Every external tool invocation is described as a [`PipelineStep`] and handed to a
//! [`Launcher`]. The real launcher spawns processes; tests swap in a recording fake that
//! returns scripted exit codes.

use log::debug;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// What happens to a child's stdout/stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputPolicy {
    Silent,
    Echo,
}

impl OutputPolicy {
    pub fn echo_if(echo: bool) -> Self {
        if echo {
            OutputPolicy::Echo
        } else {
            OutputPolicy::Silent
        }
    }
}

/// A single external command: argv, working directory and output policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineStep {
    pub command: Vec<String>,
    pub cwd: Option<PathBuf>,
    pub output: OutputPolicy,
}

impl PipelineStep {
    pub fn new<I, S>(command: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            command: command.into_iter().map(Into::into).collect(),
            cwd: None,
            output: OutputPolicy::Silent,
        }
    }

    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn output(mut self, policy: OutputPolicy) -> Self {
        self.output = policy;
        self
    }

    pub fn program(&self) -> &str {
        self.command.first().map(String::as_str).unwrap_or_default()
    }

    /// Command line as a single string, for messages.
    pub fn display(&self) -> String {
        self.command.join(" ")
    }
}

/// Exit status of a finished child. `code` is `None` when killed by a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitStatus {
    pub code: Option<i32>,
}

impl ExitStatus {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<std::process::ExitStatus> for ExitStatus {
    fn from(status: std::process::ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

/// Result of a command whose stdout was captured.
#[derive(Debug, Clone)]
pub struct Captured {
    pub status: ExitStatus,
    pub stdout: String,
}

pub trait Launcher {
    /// Run a step to completion, honoring its output policy.
    ///
    /// `Err` means the process could not be started at all.
    fn run(&self, step: &PipelineStep) -> io::Result<ExitStatus>;

    /// Run a command with stdout captured and stderr discarded.
    fn capture(&self, command: &[String], cwd: Option<&Path>) -> io::Result<Captured>;
}

/// Spawns real child processes. Blocks until each child exits; there is no timeout.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLauncher;

impl SystemLauncher {
    fn command(argv: &[String], cwd: Option<&Path>) -> io::Result<Command> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "empty command"))?;
        let mut cmd = Command::new(program);
        cmd.args(args).stdin(Stdio::inherit());
        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }
        Ok(cmd)
    }
}

impl Launcher for SystemLauncher {
    fn run(&self, step: &PipelineStep) -> io::Result<ExitStatus> {
        debug!(
            "running `{}` in {}",
            step.display(),
            step.cwd
                .as_deref()
                .map(|d| d.display().to_string())
                .unwrap_or_else(|| ".".to_string())
        );
        let mut cmd = Self::command(&step.command, step.cwd.as_deref())?;
        if step.output == OutputPolicy::Silent {
            cmd.stdout(Stdio::null()).stderr(Stdio::null());
        }
        let status = cmd.status()?;
        debug!("`{}` exited with {:?}", step.program(), status.code());
        Ok(status.into())
    }

    fn capture(&self, command: &[String], cwd: Option<&Path>) -> io::Result<Captured> {
        debug!("capturing `{}`", command.join(" "));
        let output = Self::command(command, cwd)?
            .stderr(Stdio::null())
            .output()?;
        Ok(Captured {
            status: output.status.into(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        })
    }
}
