//! The planning of a sweep
//!
//! A [`Plan`] is the ordered list of all [`Invocation`]s of a sweep. Planning is pure: the same
//! [`Config`] always results in the same sequence of invocations.

use std::ffi::OsString;
use std::fmt::Display;
use std::path::{Path, PathBuf};

use itertools::iproduct;
use log::debug;

use super::config::Config;
use crate::api::{Generation, Mode, Role, Technique, Variant};
use crate::util::to_command_line;

/// The directory layout of the benchmark artifacts
///
/// An artifact is located at
///
/// ```text
/// <root>/<benchmark>/<optimization dir>/<benchmark>_<compiler>_<role>_<optimization tag>
/// ```
///
/// Transformed artifacts are looked up in `transformed_root` instead of `root` if present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactLayout {
    root: PathBuf,
    transformed_root: Option<PathBuf>,
}

/// A single run of `etharden`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// All arguments passed to the executable
    pub args: Vec<OsString>,
    /// The benchmark name
    pub benchmark: String,
    /// The path of the executable as configured
    pub executable: PathBuf,
    /// The [`Mode`]
    pub mode: Mode,
    /// The [`Variant`]
    pub variant: Variant,
}

/// The ordered invocations of a sweep
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Plan {
    /// The invocations in execution order
    pub invocations: Vec<Invocation>,
    /// The amount of benchmarks skipped by the filter
    pub num_filtered: usize,
}

impl ArtifactLayout {
    /// Create a new `ArtifactLayout`
    pub fn new(root: PathBuf, transformed_root: Option<PathBuf>) -> Self {
        Self {
            root,
            transformed_root,
        }
    }

    /// The root directory of the original and control artifacts
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The root directory of the transformed artifacts
    pub fn transformed_root(&self) -> &Path {
        self.transformed_root.as_deref().unwrap_or(&self.root)
    }

    /// The path of the artifact of `benchmark` built as `variant` in the given `role`
    pub fn artifact_path(&self, benchmark: &str, variant: Variant, role: Role) -> PathBuf {
        let root = match role {
            Role::Transformed => self.transformed_root(),
            Role::Orig | Role::Control => self.root(),
        };

        root.join(benchmark)
            .join(variant.optimization.dir_name())
            .join(format!(
                "{benchmark}_{}_{role}_{}",
                variant.compiler,
                variant.optimization.tag()
            ))
    }
}

impl Invocation {
    /// Create the `Invocation` of `benchmark` in the given `variant` and `mode`
    ///
    /// The arguments are the `generation` flag, the flags of the `techniques` for transformed runs
    /// only and finally the path to the original artifact followed by the path to the artifact of
    /// the `mode`.
    pub fn new(
        benchmark: &str,
        variant: Variant,
        mode: Mode,
        executable: &Path,
        generation: Generation,
        techniques: &[Technique],
        layout: &ArtifactLayout,
    ) -> Self {
        let mut args = vec![OsString::from(generation.flag())];
        if mode == Mode::Transformed {
            args.extend(techniques.iter().map(|t| OsString::from(t.flag())));
        }
        args.push(layout.artifact_path(benchmark, variant, Role::Orig).into());
        args.push(layout.artifact_path(benchmark, variant, mode.role()).into());

        Self {
            args,
            benchmark: benchmark.to_owned(),
            executable: executable.to_owned(),
            mode,
            variant,
        }
    }

    /// The human readable command line of this invocation
    pub fn to_command_line(&self) -> String {
        to_command_line(&self.executable, &self.args)
    }
}

impl Display for Invocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.benchmark, self.variant, self.mode)
    }
}

impl Plan {
    /// Create the `Plan` of the sweep described by the `config`
    ///
    /// The invocations are ordered by benchmark, then by variant and then by mode, each in the
    /// order of the `config`. A benchmark runs with a variant only if it is one of the
    /// [`Config::benchmarks_of`] this variant.
    pub fn new(config: &Config) -> Self {
        let (selected, filtered): (Vec<&str>, Vec<&str>) =
            config.all_benchmarks().into_iter().partition(|benchmark| {
                config
                    .filter
                    .as_ref()
                    .map_or(true, |filter| filter.is_match(benchmark))
            });

        for benchmark in &filtered {
            debug!("Skipping benchmark '{benchmark}': Doesn't match the filter");
        }

        let invocations = iproduct!(selected, &config.variants, &config.modes)
            .filter(|(benchmark, variant, _)| {
                config
                    .benchmarks_of(variant)
                    .iter()
                    .any(|name| name == benchmark)
            })
            .map(|(benchmark, variant, mode)| {
                Invocation::new(
                    benchmark,
                    *variant,
                    *mode,
                    &config.executable,
                    config.generation,
                    &config.techniques,
                    &config.layout,
                )
            })
            .collect();

        Self {
            invocations,
            num_filtered: filtered.len(),
        }
    }

    /// Return true if there is nothing to run
    pub fn is_empty(&self) -> bool {
        self.invocations.is_empty()
    }

    /// The amount of invocations
    pub fn len(&self) -> usize {
        self.invocations.len()
    }
}
