//! Formatting of the sweep output for the terminal

use std::fmt::Display;
use std::io::{self, Write};

use colored::Colorize;

use super::invoke::InvocationOutcome;
use super::plan::{Invocation, Plan};
use super::sweep::SweepSummary;
use crate::util::write_all_to;

/// The header line printed before the output of an [`Invocation`]
pub struct Header<'a>(&'a Invocation);

/// The report of all failed invocations of a sweep
pub struct FailureReport<'a>(&'a SweepSummary);

impl<'a> Header<'a> {
    /// Create a new `Header`
    pub fn new(invocation: &'a Invocation) -> Self {
        Self(invocation)
    }
}

impl Display for Header<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.0.benchmark.green(),
            self.0.variant.to_string().cyan(),
            self.0.mode.to_string().bold().blue()
        )
    }
}

impl<'a> FailureReport<'a> {
    /// Create a new `FailureReport`
    pub fn new(summary: &'a SweepSummary) -> Self {
        Self(summary)
    }
}

impl Display for FailureReport<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let num_failures = self.0.num_failures();
        writeln!(
            f,
            "{} {num_failures} of {} invocations failed:",
            "Failures:".red().bold(),
            self.0.outcomes.len()
        )?;
        for outcome in self.0.failures() {
            writeln!(
                f,
                "  {} ({})",
                Header::new(&outcome.invocation),
                outcome.status.to_string().yellow()
            )?;
        }
        Ok(())
    }
}

/// Write the captured `stdout` of the `outcome` preceded by a [`Header`] unless `quiet_headers`
///
/// With `quiet_headers` the captured bytes are written exactly as they are. Otherwise, a missing
/// final newline is added, so the next header starts on its own line.
pub fn write_outcome<W>(
    writer: &mut W,
    outcome: &InvocationOutcome,
    quiet_headers: bool,
) -> io::Result<()>
where
    W: Write,
{
    if quiet_headers {
        writer.write_all(&outcome.stdout)?;
        return writer.flush();
    }

    writeln!(writer, "{}", Header::new(&outcome.invocation))?;
    write_all_to(writer, &outcome.stdout)
}

/// Write the command lines of all invocations of the `plan`, one per line
pub fn write_plan<W>(writer: &mut W, plan: &Plan) -> io::Result<()>
where
    W: Write,
{
    for invocation in &plan.invocations {
        writeln!(writer, "{}", invocation.to_command_line())?;
    }
    writer.flush()
}
