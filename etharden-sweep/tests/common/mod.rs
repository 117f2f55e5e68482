use std::ffi::OsStr;

use assert_cmd::assert::Assert;
use assert_cmd::Command;

pub const ROOT: &str = "/root/transformed";

/// The `etharden-sweep` binary with a clean environment
pub struct Runner {
    command: Command,
}

impl Runner {
    pub fn new() -> Self {
        Self::with_root(ROOT)
    }

    pub fn with_root<T>(root: T) -> Self
    where
        T: AsRef<OsStr>,
    {
        let mut command = Command::cargo_bin("etharden-sweep").unwrap();
        for (key, _) in std::env::vars_os() {
            if key.to_string_lossy().starts_with("ETHARDEN_SWEEP_") {
                command.env_remove(key);
            }
        }
        command
            .env("ETHARDEN_SWEEP_COLOR", "never")
            .env("ETHARDEN_SWEEP_LOG", "warn")
            .arg("--root")
            .arg(root);
        Self { command }
    }

    pub fn args<I, T>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<OsStr>,
    {
        self.command.args(args);
        self
    }

    pub fn env<K, V>(mut self, key: K, value: V) -> Self
    where
        K: AsRef<OsStr>,
        V: AsRef<OsStr>,
    {
        self.command.env(key, value);
        self
    }

    pub fn run(mut self) -> Assert {
        self.command.assert()
    }
}

/// The line `echo` prints for an invocation of `benchmark` built with `compiler`/`O3`
pub fn echo_line(benchmark: &str, compiler: &str, transformed: bool) -> String {
    let role = if transformed { "transformed" } else { "control" };
    format!(
        "-m {}{ROOT}/{benchmark}/O3/{benchmark}_{compiler}_orig_O3 \
         {ROOT}/{benchmark}/O3/{benchmark}_{compiler}_{role}_O3\n",
        if transformed { "--gadget-reduction " } else { "" },
    )
}
