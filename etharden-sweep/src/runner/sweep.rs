//! The sequential driver of a sweep

use anyhow::Result;
use log::{info, warn};

use super::config::Config;
use super::invoke::{self, InvocationOutcome};
use super::plan::Plan;
use crate::api::FailurePolicy;
use crate::error::Error;

/// A sweep over all benchmarks, variants and modes of a [`Config`]
#[derive(Debug, Clone)]
pub struct Sweep {
    config: Config,
}

/// The outcomes of a sweep in execution order
#[derive(Debug, Default)]
pub struct SweepSummary {
    /// The amount of benchmarks skipped by the filter
    pub num_filtered: usize,
    /// The outcome of each executed invocation
    pub outcomes: Vec<InvocationOutcome>,
}

impl Sweep {
    /// Create a new `Sweep` validating the `config`
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The [`Config`] of this sweep
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The [`Plan`] of this sweep
    pub fn plan(&self) -> Plan {
        Plan::new(&self.config)
    }

    /// Run all invocations one after another
    ///
    /// The `sink` receives each [`InvocationOutcome`] as soon as the invocation has finished. An
    /// error returned by the `sink` aborts the sweep. Failed invocations are handled according to
    /// the [`FailurePolicy`] of the [`Config`]: With [`FailurePolicy::FailFast`] the first failure
    /// aborts the sweep with the matching [`Error`], otherwise the sweep continues.
    pub fn run<F>(&self, mut sink: F) -> Result<SweepSummary>
    where
        F: FnMut(&InvocationOutcome) -> Result<()>,
    {
        let plan = self.plan();
        let total = plan.len();
        info!(
            "Running {total} invocations of '{}' ({} benchmarks filtered)",
            self.config.executable.display(),
            plan.num_filtered
        );

        let mut summary = SweepSummary {
            num_filtered: plan.num_filtered,
            outcomes: Vec::with_capacity(total),
        };

        for (index, invocation) in plan.invocations.into_iter().enumerate() {
            info!("[{}/{total}] {invocation}", index + 1);
            let outcome = invoke::execute(invocation);
            sink(&outcome)?;

            if outcome.is_failure() {
                match self.config.on_failure {
                    FailurePolicy::FailFast => {
                        if let Some(error) = outcome.to_error() {
                            return Err(error.into());
                        }
                    }
                    FailurePolicy::Ignore | FailurePolicy::Report => {
                        warn!("{}: {}", outcome.invocation, outcome.status);
                        outcome.dump_stderr(log::Level::Warn);
                    }
                }
            }

            summary.outcomes.push(outcome);
        }

        Ok(summary)
    }
}

impl SweepSummary {
    /// The failed outcomes in execution order
    pub fn failures(&self) -> impl Iterator<Item = &InvocationOutcome> {
        self.outcomes.iter().filter(|o| o.is_failure())
    }

    /// The amount of failed invocations
    pub fn num_failures(&self) -> usize {
        self.failures().count()
    }

    /// The captured `stdout` of each invocation in execution order
    pub fn outputs(&self) -> impl Iterator<Item = &[u8]> {
        self.outcomes.iter().map(|o| o.stdout.as_slice())
    }

    /// Check the summary against the [`FailurePolicy`]
    ///
    /// Only [`FailurePolicy::Report`] turns failed invocations into an [`Error::SweepFailed`].
    pub fn check(&self, policy: FailurePolicy) -> Result<()> {
        match (policy, self.num_failures()) {
            (FailurePolicy::Report, count) if count > 0 => Err(Error::SweepFailed(count).into()),
            _ => Ok(()),
        }
    }
}
