//! The runner of `etharden-sweep`

pub mod args;
pub mod config;
pub mod format;
pub mod invoke;
pub mod plan;
pub mod sweep;

use std::io::{stderr, stdout, Write};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use self::args::CommandLineArgs;
use self::config::Config;
use self::format::FailureReport;
use self::sweep::Sweep;

/// The environment variables read by `etharden-sweep` outside of the command line options
pub mod envs {
    /// Set the color mode of the log output and the sweep output (`always`, `never`, `auto`)
    pub const ETHARDEN_SWEEP_COLOR: &str = "ETHARDEN_SWEEP_COLOR";
    /// Set the log level like `RUST_LOG`
    pub const ETHARDEN_SWEEP_LOG: &str = "ETHARDEN_SWEEP_LOG";

    /// The color mode used if `ETHARDEN_SWEEP_COLOR` is not set
    pub const CARGO_TERM_COLOR: &str = "CARGO_TERM_COLOR";
}

/// Parse the command line, run the sweep and print the outputs to `stdout`
///
/// In list mode the command lines of the sweep are printed instead of running them.
pub fn run() -> Result<()> {
    let config = Config::from_args(CommandLineArgs::parse())?;
    let sweep = Sweep::new(config)?;

    let mut stdout = stdout().lock();
    if sweep.config().list {
        let plan = sweep.plan();
        format::write_plan(&mut stdout, &plan).context("Failed to write to stdout")?;
        info!(
            "Listed {} invocations ({} benchmarks filtered)",
            plan.len(),
            plan.num_filtered
        );
        return Ok(());
    }

    let quiet_headers = sweep.config().quiet_headers;
    let summary = sweep.run(|outcome| {
        format::write_outcome(&mut stdout, outcome, quiet_headers)
            .context("Failed to write to stdout")
    })?;

    info!(
        "Finished {} invocations: {} failed, {} benchmarks filtered",
        summary.outcomes.len(),
        summary.num_failures(),
        summary.num_filtered
    );

    let result = summary.check(sweep.config().on_failure);
    if result.is_err() {
        let mut stderr = stderr().lock();
        write!(stderr, "{}", FailureReport::new(&summary))
            .and_then(|()| stderr.flush())
            .context("Failed to write to stderr")?;
    }
    result
}
