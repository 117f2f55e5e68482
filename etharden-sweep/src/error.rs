//! The module containing the crate main [`Error`] type

use std::fmt::Display;
use std::os::unix::process::ExitStatusExt;
use std::path::PathBuf;
use std::process::{ExitStatus, Output};

use crate::util::write_all_to_stderr;

/// The main etharden-sweep error type
#[derive(Debug, PartialEq, Clone, Eq)]
pub enum Error {
    /// An invalid sweep configuration detected before any process was started
    ///
    /// `ConfigurationError(message)`
    ConfigurationError(String),
    /// The error when trying to start an external [`std::process::Command`] fails
    ///
    /// `LaunchError(executable_path, message)`
    LaunchError(PathBuf, String),
    /// The error when reading or parsing a sweep file fails
    ///
    /// `ParseError(file_path, message)`
    ParseError(PathBuf, String),
    /// The error after a successful launch of an external [`std::process::Command`]
    ///
    /// `ProcessError(invocation_id, std::process::Output, std::process::ExitStatus)`
    ProcessError(String, Option<Output>, ExitStatus),
    /// Issued at the end of a sweep with failed invocations if failures are reported
    ///
    /// `SweepFailed(number_of_failed_invocations)`
    SweepFailed(usize),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConfigurationError(message) => {
                write!(f, "Misconfiguration of the sweep: {message}")
            }
            Self::LaunchError(exec, message) => {
                write!(f, "Error launching '{}': {message}", exec.display())
            }
            Self::ParseError(path, message) => {
                write!(f, "Error parsing file '{}': {message}", path.display())
            }
            Self::ProcessError(id, output, status) => {
                if let Some(output) = output {
                    write_all_to_stderr(&output.stderr);
                }

                if let Some(code) = status.code() {
                    write!(f, "Error running '{id}': Exit code was: '{code}'")
                } else if let Some(signal) = status.signal() {
                    write!(f, "Error running '{id}': Terminated by a signal '{signal}'")
                } else {
                    write!(f, "Error running '{id}': Terminated abnormally")
                }
            }
            Self::SweepFailed(count) => {
                if *count == 1 {
                    write!(f, "1 invocation failed")
                } else {
                    write!(f, "{count} invocations failed")
                }
            }
        }
    }
}

impl std::error::Error for Error {}
