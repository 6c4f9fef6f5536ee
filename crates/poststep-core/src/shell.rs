// ── Shell runner ──
//
// Commands come from workflow inputs as a single string, so they are handed
// to a shell instead of being split into argv here.

use std::process::{ExitStatus, Stdio};

use tokio::process::Command;

use crate::error::CoreError;

/// Exit code used when the child vanished without a code or a signal.
const UNKNOWN_EXIT: i32 = 1;

/// Offset shells add to a terminating signal number.
const SIGNAL_EXIT_BASE: i32 = 128;

/// How a command string is executed: `program args... <command>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shell {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for Shell {
    #[cfg(windows)]
    fn default() -> Self {
        Self::new("cmd.exe", ["/d", "/s", "/c"])
    }

    #[cfg(not(windows))]
    fn default() -> Self {
        Self::new("sh", ["-c"])
    }
}

/// Result of running one phase's command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The command string was blank and nothing was spawned.
    Skipped,
    /// The child exited with this code.
    Exited(i32),
    /// The child was terminated by this signal.
    Signaled(i32),
    /// The platform reported neither a code nor a signal.
    Unknown,
}

impl Outcome {
    /// Code the helper process should exit with.
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Skipped => 0,
            Self::Exited(code) => code,
            Self::Signaled(signal) => SIGNAL_EXIT_BASE.saturating_add(signal),
            Self::Unknown => UNKNOWN_EXIT,
        }
    }

    pub fn success(self) -> bool {
        self.exit_code() == 0
    }

    fn from_status(status: ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return Self::Exited(code);
        }

        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return Self::Signaled(signal);
            }
        }

        Self::Unknown
    }
}

impl Shell {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Run `command` with inherited stdio and wait for it to exit.
    ///
    /// A blank command is not spawned and yields [`Outcome::Skipped`].
    pub async fn run(&self, command: &str) -> Result<Outcome, CoreError> {
        if command.trim().is_empty() {
            tracing::info!(shell = %self.program, "command is empty, nothing to run");
            return Ok(Outcome::Skipped);
        }

        let mut child = Command::new(&self.program);
        child
            .args(&self.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        self.push_command(&mut child, command);

        tracing::debug!(shell = %self.program, args = ?self.args, command, "spawning");

        let status = child.status().await.map_err(|source| CoreError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        let outcome = Outcome::from_status(status);
        tracing::debug!(?outcome, "command finished");
        Ok(outcome)
    }

    #[cfg(not(windows))]
    #[allow(clippy::unused_self)]
    fn push_command(&self, child: &mut Command, command: &str) {
        child.arg(command);
    }

    // cmd.exe does its own parsing; `/s` strips exactly one pair of outer
    // quotes, so the command must reach it verbatim.
    #[cfg(windows)]
    fn push_command(&self, child: &mut Command, command: &str) {
        let is_cmd = std::path::Path::new(&self.program)
            .file_stem()
            .is_some_and(|stem| stem.eq_ignore_ascii_case("cmd"));
        if is_cmd {
            child.raw_arg(format!("\"{command}\""));
        } else {
            child.arg(command);
        }
    }
}
