//! The module responsible for the actual run of an [`Invocation`]

use std::os::unix::process::ExitStatusExt;
use std::process::{Command, ExitStatus, Output, Stdio};

use log::{debug, log_enabled, trace};

use super::plan::Invocation;
use crate::error::Error;
use crate::util::{self, resolve_binary_path};

/// How an [`Invocation`] ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// The executable exited with code `0`
    Success,
    /// The executable exited with a non-zero exit code or was terminated by a signal
    Failed(ExitStatus),
    /// The executable couldn't be resolved or started
    LaunchFailed(String),
}

/// The result of running an [`Invocation`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationOutcome {
    /// The [`Invocation`]
    pub invocation: Invocation,
    /// The [`Status`]
    pub status: Status,
    /// The captured `stderr`
    pub stderr: Vec<u8>,
    /// The captured `stdout`
    pub stdout: Vec<u8>,
}

impl Status {
    /// Return true if this status is not a [`Status::Success`]
    pub fn is_failure(&self) -> bool {
        !matches!(self, Self::Success)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Failed(status) => {
                if let Some(code) = status.code() {
                    write!(f, "exit code {code}")
                } else if let Some(signal) = status.signal() {
                    write!(f, "terminated by signal {signal}")
                } else {
                    write!(f, "terminated abnormally")
                }
            }
            Self::LaunchFailed(message) => write!(f, "launch failed: {message}"),
        }
    }
}

impl InvocationOutcome {
    /// Return true if the invocation didn't succeed
    pub fn is_failure(&self) -> bool {
        self.status.is_failure()
    }

    /// Convert a failed outcome into the matching [`Error`]
    ///
    /// Returns `None` if the invocation succeeded.
    pub fn to_error(&self) -> Option<Error> {
        match &self.status {
            Status::Success => None,
            Status::Failed(status) => Some(Error::ProcessError(
                self.invocation.to_string(),
                Some(Output {
                    status: *status,
                    stdout: self.stdout.clone(),
                    stderr: self.stderr.clone(),
                }),
                *status,
            )),
            Status::LaunchFailed(message) => Some(Error::LaunchError(
                self.invocation.executable.clone(),
                message.clone(),
            )),
        }
    }

    /// Dump the captured `stderr` if the [`log::Level`] matches
    pub fn dump_stderr(&self, log_level: log::Level) {
        if !self.stderr.is_empty() && log_enabled!(log_level) {
            log::log!(log_level, "{}: Output on stderr:", self.invocation);
            util::write_all_to_stderr(&self.stderr);
        }
    }
}

/// Run the `invocation` as child process and wait for it to finish
///
/// The executable is started directly with the arguments of the invocation, without a shell in
/// between. `stdout` is drained completely before this function returns. Failures to launch the
/// executable and unsuccessful exits are not errors but recorded in the [`Status`] of the
/// returned [`InvocationOutcome`]. The `stderr` of a successful invocation is dumped with
/// [`log::Level::Debug`].
pub fn execute(invocation: Invocation) -> InvocationOutcome {
    debug!("{invocation}: Running '{}'", invocation.to_command_line());

    let executable = match resolve_binary_path(&invocation.executable) {
        Ok(executable) => executable,
        Err(error) => {
            return InvocationOutcome {
                invocation,
                status: Status::LaunchFailed(error.to_string()),
                stderr: vec![],
                stdout: vec![],
            }
        }
    };

    let result = Command::new(&executable)
        .args(&invocation.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output();

    let outcome = match result {
        Ok(output) => {
            trace!("{invocation}: Exited with '{}'", output.status);
            InvocationOutcome {
                invocation,
                status: if output.status.success() {
                    Status::Success
                } else {
                    Status::Failed(output.status)
                },
                stderr: output.stderr,
                stdout: output.stdout,
            }
        }
        Err(error) => InvocationOutcome {
            invocation,
            status: Status::LaunchFailed(error.to_string()),
            stderr: vec![],
            stdout: vec![],
        },
    };

    // The stderr of failed invocations is dumped by the sweep
    if !outcome.is_failure() {
        outcome.dump_stderr(log::Level::Debug);
    }
    outcome
}
