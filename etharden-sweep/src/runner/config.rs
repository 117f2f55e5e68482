//! The module containing the sweep [`Config`]

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use anyhow::Result;
use log::{debug, warn};
use regex::Regex;

use super::args::CommandLineArgs;
use super::plan::ArtifactLayout;
use crate::api::{
    Compiler, FailurePolicy, Generation, Mode, Optimization, SweepFile, Technique, Variant,
};
use crate::error::Error;
use crate::util::expand_home_from_env;

mod defaults {
    pub const BENCHMARKS: [&str; 18] = [
        "bftpd",
        "git",
        "gzip",
        "httpd",
        "libcurl",
        "lmdb",
        "sqlite",
        "401.bzip2",
        "403.gcc",
        "429.mcf",
        "433.milc",
        "444.namd",
        "445.gobmk",
        "456.hmmer",
        "458.sjeng",
        "462.libquantum",
        "470.lbm",
        "482.sphinx",
    ];
    pub const EXECUTABLE: &str = "./etharden";
    pub const ROOT: &str = "~/cs8903/transformed";
}

/// The complete configuration of a sweep
///
/// A `Config` is validated once by [`super::sweep::Sweep::new`].
#[derive(Debug, Clone)]
pub struct Config {
    /// The benchmark names in execution order
    pub benchmarks: Vec<String>,
    /// The `etharden` executable
    pub executable: PathBuf,
    /// If present, run only the benchmarks matching this filter
    pub filter: Option<Regex>,
    /// The ELF generation passed to each invocation
    pub generation: Generation,
    /// Where to find the artifacts
    pub layout: ArtifactLayout,
    /// If true, don't run anything but print the command lines
    pub list: bool,
    /// The modes of each variant in execution order
    pub modes: Vec<Mode>,
    /// The [`FailurePolicy`]
    pub on_failure: FailurePolicy,
    /// If true, print only the raw output of each invocation
    pub quiet_headers: bool,
    /// The techniques applied in transformed runs
    pub techniques: Vec<Technique>,
    /// The benchmark names of single variants replacing `benchmarks` for these variants
    pub variant_benchmarks: HashMap<Variant, Vec<String>>,
    /// The enabled variants in execution order
    pub variants: Vec<Variant>,
}

impl Config {
    /// Create a new `Config` from the command line arguments
    ///
    /// If a sweep file is given, it is loaded and command line arguments take precedence over the
    /// values in the sweep file. Missing values are filled in with the defaults. Benchmarks given
    /// on the command line replace the per-variant benchmarks of the sweep file, too.
    ///
    /// The returned `Config` is not validated yet.
    pub fn from_args(args: CommandLineArgs) -> Result<Self> {
        let file = match &args.config {
            Some(path) => load_sweep_file(path)?,
            None => SweepFile::default(),
        };

        let fallback = Self::default();
        let layout = match (
            args.root.or(file.root),
            args.transformed_root.or(file.transformed_root),
        ) {
            (None, None) => fallback.layout,
            (root, transformed_root) => ArtifactLayout::new(
                expand_home_from_env(root.unwrap_or_else(|| PathBuf::from(defaults::ROOT))),
                transformed_root.map(expand_home_from_env),
            ),
        };

        let variant_benchmarks = if args.benchmarks.is_some() {
            HashMap::new()
        } else {
            file.variant_benchmarks.unwrap_or_default()
        };

        let config = Self {
            benchmarks: args
                .benchmarks
                .or(file.benchmarks)
                .unwrap_or(fallback.benchmarks),
            executable: args
                .executable
                .or(file.executable)
                .unwrap_or(fallback.executable),
            filter: args.filter,
            generation: args
                .generation
                .or(file.generation)
                .unwrap_or(fallback.generation),
            layout,
            list: args.list,
            modes: args.modes.or(file.modes).unwrap_or(fallback.modes),
            on_failure: args
                .on_failure
                .or(file.on_failure)
                .unwrap_or(fallback.on_failure),
            quiet_headers: args.quiet_headers,
            techniques: args
                .techniques
                .or(file.techniques)
                .unwrap_or(fallback.techniques),
            variant_benchmarks,
            variants: args.variants.or(file.variants).unwrap_or(fallback.variants),
        };

        debug!("Sweep configuration: {config:?}");
        Ok(config)
    }

    /// The benchmark names run with the `variant` in execution order
    pub fn benchmarks_of(&self, variant: &Variant) -> &[String] {
        self.variant_benchmarks
            .get(variant)
            .unwrap_or(&self.benchmarks)
    }

    /// All benchmark names of the sweep in execution order
    ///
    /// These are the `benchmarks` followed by the names which are only listed for single variants.
    pub fn all_benchmarks(&self) -> Vec<&str> {
        let mut all = self.benchmarks.iter().map(String::as_str).collect::<Vec<_>>();
        for variant in &self.variants {
            for benchmark in self.variant_benchmarks.get(variant).into_iter().flatten() {
                if !all.contains(&benchmark.as_str()) {
                    all.push(benchmark.as_str());
                }
            }
        }
        all
    }

    /// Check that the sweep would run at least one invocation and all benchmark names are usable
    ///
    /// Duplicate benchmark names are allowed but result in redundant runs, so we only warn about
    /// them.
    pub fn validate(&self) -> Result<()> {
        if self.variants.is_empty() {
            return Err(Error::ConfigurationError("No variants given".to_owned()).into());
        }
        if self
            .variants
            .iter()
            .all(|variant| self.benchmarks_of(variant).is_empty())
        {
            return Err(Error::ConfigurationError("No benchmarks given".to_owned()).into());
        }
        if self.modes.is_empty() {
            return Err(Error::ConfigurationError("No modes given".to_owned()).into());
        }

        check_benchmarks(&self.benchmarks, None)?;
        for variant in &self.variants {
            if let Some(benchmarks) = self.variant_benchmarks.get(variant) {
                check_benchmarks(benchmarks, Some(variant))?;
            }
        }
        for variant in self.variant_benchmarks.keys() {
            if !self.variants.contains(variant) {
                debug!("Ignoring the benchmarks of variant '{variant}': Not enabled");
            }
        }

        let mut seen = HashSet::new();
        for variant in &self.variants {
            if !seen.insert(variant) {
                warn!("Variant '{variant}' is listed more than once and will run repeatedly");
            }
        }

        Ok(())
    }
}

/// Check the benchmark names which are run with the `variant` or with all variants if `None`
fn check_benchmarks(benchmarks: &[String], variant: Option<&Variant>) -> Result<()> {
    let mut seen = HashSet::new();
    for benchmark in benchmarks {
        if benchmark.trim().is_empty() {
            return Err(
                Error::ConfigurationError("Empty benchmark names are invalid".to_owned()).into(),
            );
        }
        if benchmark.contains('/') {
            return Err(Error::ConfigurationError(format!(
                "Invalid benchmark name '{benchmark}': Path separators are not allowed"
            ))
            .into());
        }
        if benchmark == "." || benchmark == ".." {
            return Err(Error::ConfigurationError(format!(
                "Invalid benchmark name '{benchmark}': Relative path components are not allowed"
            ))
            .into());
        }
        if !seen.insert(benchmark.as_str()) {
            match variant {
                Some(variant) => warn!(
                    "Benchmark '{benchmark}' is listed more than once for variant '{variant}'"
                ),
                None => warn!(
                    "Benchmark '{benchmark}' is listed more than once and will run repeatedly"
                ),
            }
        }
    }
    Ok(())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            benchmarks: defaults::BENCHMARKS.iter().map(|&b| b.to_owned()).collect(),
            executable: PathBuf::from(defaults::EXECUTABLE),
            filter: None,
            generation: Generation::default(),
            layout: ArtifactLayout::new(expand_home_from_env(defaults::ROOT), None),
            list: false,
            modes: vec![Mode::Control, Mode::Transformed],
            on_failure: FailurePolicy::default(),
            quiet_headers: false,
            techniques: vec![Technique::GadgetReduction],
            variant_benchmarks: HashMap::new(),
            variants: vec![
                Variant::new(Compiler::Gcc, Optimization::O3),
                Variant::new(Compiler::Clang, Optimization::O3),
            ],
        }
    }
}

/// Read and deserialize a [`SweepFile`]
pub fn load_sweep_file(path: &Path) -> Result<SweepFile> {
    debug!("Loading sweep file '{}'", path.display());
    let content = std::fs::read_to_string(path)
        .map_err(|error| Error::ParseError(path.to_owned(), error.to_string()))?;
    let file = serde_json::from_str(&content)
        .map_err(|error| Error::ParseError(path.to_owned(), error.to_string()))?;
    Ok(file)
}
