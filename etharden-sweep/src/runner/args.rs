//! The command line arguments of `etharden-sweep`
//!
//! Each option can also be set with an environment variable. Values which are not given here fall
//! back to the sweep file and then to the built-in defaults.

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use regex::Regex;

use crate::api::{FailurePolicy, Generation, Mode, Technique, Variant};

/// The command line arguments of `etharden-sweep`
#[derive(Parser, Debug, Clone, Default)]
#[command(
    author,
    version,
    about = "Run etharden over a sweep of benchmarks and build variants",
    long_about = None,
)]
pub struct CommandLineArgs {
    /// The benchmark names in execution order, separated by `,`
    #[arg(
        long = "benchmarks",
        env = "ETHARDEN_SWEEP_BENCHMARKS",
        value_delimiter = ',',
        value_name = "NAMES"
    )]
    pub benchmarks: Option<Vec<String>>,

    /// A sweep file in JSON format
    #[arg(long = "config", env = "ETHARDEN_SWEEP_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// The path to the etharden executable [default: ./etharden]
    #[arg(long = "executable", env = "ETHARDEN_SWEEP_EXECUTABLE", value_name = "PATH")]
    pub executable: Option<PathBuf>,

    /// Run only the benchmarks matching this regular expression
    #[arg(
        long = "filter",
        env = "ETHARDEN_SWEEP_FILTER",
        value_name = "REGEX",
        value_parser = parse_filter
    )]
    pub filter: Option<Regex>,

    /// The ELF generation of etharden [default: mirror]
    #[arg(long = "generation", env = "ETHARDEN_SWEEP_GENERATION", value_name = "mirror|union")]
    pub generation: Option<Generation>,

    /// Print the command lines of the sweep without running them
    #[arg(
        long = "list",
        env = "ETHARDEN_SWEEP_LIST",
        action = ArgAction::SetTrue,
        default_value_t = false
    )]
    pub list: bool,

    /// The modes of each variant in execution order [default: control,transformed]
    #[arg(
        long = "modes",
        env = "ETHARDEN_SWEEP_MODES",
        value_delimiter = ',',
        value_name = "MODES"
    )]
    pub modes: Option<Vec<Mode>>,

    /// What to do with failed invocations [default: ignore]
    #[arg(
        long = "on-failure",
        env = "ETHARDEN_SWEEP_ON_FAILURE",
        value_name = "ignore|report|fail-fast"
    )]
    pub on_failure: Option<FailurePolicy>,

    /// Don't print a header line before the output of each invocation
    #[arg(
        long = "quiet-headers",
        env = "ETHARDEN_SWEEP_QUIET_HEADERS",
        action = ArgAction::SetTrue,
        default_value_t = false
    )]
    pub quiet_headers: bool,

    /// The root directory of all artifacts [default: ~/cs8903/transformed]
    #[arg(long = "root", env = "ETHARDEN_SWEEP_ROOT", value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// The techniques applied in transformed runs [default: gadget-reduction]
    #[arg(
        long = "techniques",
        env = "ETHARDEN_SWEEP_TECHNIQUES",
        value_delimiter = ',',
        value_name = "TECHNIQUES"
    )]
    pub techniques: Option<Vec<Technique>>,

    /// An alternative root directory of the transformed artifacts
    #[arg(
        long = "transformed-root",
        env = "ETHARDEN_SWEEP_TRANSFORMED_ROOT",
        value_name = "DIR"
    )]
    pub transformed_root: Option<PathBuf>,

    /// The build variants in execution order like `gcc/O3,clang/O3` [default: gcc/O3,clang/O3]
    #[arg(
        long = "variants",
        env = "ETHARDEN_SWEEP_VARIANTS",
        value_delimiter = ',',
        value_name = "VARIANTS"
    )]
    pub variants: Option<Vec<Variant>>,
}

fn parse_filter(value: &str) -> Result<Regex, String> {
    Regex::new(value).map_err(|error| format!("Invalid filter: {error}"))
}
