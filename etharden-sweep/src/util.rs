//! This module provides common utility functions
use std::ffi::{OsStr, OsString};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use log::debug;
use which::which;

/// Dump all data to the `writer` appending a newline if the data doesn't end with one
pub fn write_all_to<W>(writer: &mut W, bytes: &[u8]) -> io::Result<()>
where
    W: Write,
{
    if !bytes.is_empty() {
        writer.write_all(bytes)?;
        if bytes.last().is_some_and(|l| *l != b'\n') {
            writer.write_all(b"\n")?;
        }
    }
    writer.flush()
}

/// Dump all data to `stderr`
pub fn write_all_to_stderr(bytes: &[u8]) {
    if !bytes.is_empty() {
        let stderr = io::stderr();
        let stderr = stderr.lock();
        let mut writer = BufWriter::new(stderr);
        // Nothing sensible is left to do if writing to stderr fails
        let _ = write_all_to(&mut writer, bytes);
    }
}

/// Try to resolve the absolute path of a binary from the `PATH` and relative paths
///
/// If the binary is a name without path separators the PATH is tried, otherwise if not absolute
/// a relative path is tried. If the path is already absolute checks if it is executable.
pub fn resolve_binary_path<T>(binary: T) -> Result<PathBuf>
where
    T: AsRef<OsStr>,
{
    let binary = binary.as_ref();
    match which(binary) {
        Ok(path) => {
            debug!("Found '{}': '{}'", binary.to_string_lossy(), path.display());
            Ok(path)
        }
        Err(error) => Err(
            anyhow! {"{error}: '{0}' could not be found. Is '{0}' installed, executable and in the PATH?",
                binary.to_string_lossy()
            },
        ),
    }
}

/// Replace a leading `~` of the `path` with the home directory
///
/// Only `~` and `~/...` are expanded. If the home directory is unknown, the `path` is returned
/// unchanged.
pub fn expand_home<T>(path: T, home: Option<&Path>) -> PathBuf
where
    T: AsRef<Path>,
{
    let path = path.as_ref();
    match (path.strip_prefix("~"), home) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_owned(),
    }
}

/// Like [`expand_home`] with the home directory taken from the `HOME` environment variable
pub fn expand_home_from_env<T>(path: T) -> PathBuf
where
    T: AsRef<Path>,
{
    let home = std::env::var_os("HOME").map(PathBuf::from);
    expand_home(path, home.as_deref())
}

/// Render the `executable` and its `args` as a single shell-quoted command line
///
/// The command line is meant for humans only and never passed to a shell.
pub fn to_command_line(executable: &Path, args: &[OsString]) -> String {
    let parts = std::iter::once(executable.as_os_str())
        .chain(args.iter().map(OsString::as_os_str))
        .map(OsStr::to_string_lossy)
        .collect::<Vec<_>>();

    shlex::try_join(parts.iter().map(|part| &**part)).unwrap_or_else(|_| parts.join(" "))
}
