//! The declarative elements of a sweep
//!
//! Everything in here can be read from a sweep file or parsed from the command line. The
//! elements are closed enumerations mirroring the naming scheme of the benchmark artifacts and the
//! command line of `etharden`.

use std::collections::HashMap;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The compiler with which the benchmark artifacts were built
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Compiler {
    /// The GNU compiler collection
    Gcc,
    /// The LLVM C frontend
    Clang,
}

/// The optimization setting of a build
///
/// Each setting has its own directory below the benchmark directory and a short tag which is
/// part of the artifact file names.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
pub enum Optimization {
    /// `-O3`
    #[serde(rename = "O3")]
    #[strum(to_string = "O3")]
    O3,
    /// `-O3 -fomit-frame-pointer`
    #[serde(rename = "omit-fp", alias = "ofp")]
    #[strum(to_string = "omit-fp", serialize = "ofp")]
    OmitFramePointer,
}

/// A build variant, the pair of [`Compiler`] and [`Optimization`]
///
/// The textual form is `<compiler>/<optimization>` like `gcc/O3` or `clang/omit-fp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Variant {
    /// The compiler
    pub compiler: Compiler,
    /// The optimization
    pub optimization: Optimization,
}

/// The role of an artifact in a comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    /// The original build
    Orig,
    /// The unmodified rebuild
    Control,
    /// The rebuild with the hardening technique applied
    Transformed,
}

/// The kind of run
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    /// Compare the original against the control rebuild without any technique
    Control,
    /// Compare the original against the transformed rebuild with all configured techniques
    Transformed,
}

/// A hardening technique understood by `etharden`
///
/// The [`Display`] form is the flag without the leading `--`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Technique {
    /// No transformation
    Nop,
    /// Inline retpolines
    Retpolines,
    /// Endbr based control-flow integrity
    Cfi,
    /// The default shadow stack
    Ss,
    /// XOR based shadow stack
    SsXor,
    /// GS shadow stack without endbr
    SsGs,
    /// Constant offset shadow stack
    SsConst,
    /// The default control-flow enforcement
    Cet,
    /// Control-flow enforcement with the GS shadow stack
    CetGs,
    /// Control-flow enforcement with the constant offset shadow stack
    CetConst,
    /// Randomize the order of global variables in `.data`
    PermuteData,
    /// Profiling counters in each function
    Profile,
    /// Conditional watchpoints
    CondWatchpoint,
    /// Reduce number and quality of residual gadgets
    GadgetReduction,
}

/// The ELF generation of `etharden`
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Generation {
    /// Mirror generation (1:1 output)
    #[default]
    Mirror,
    /// Union generation (merged output)
    Union,
}

/// What to do if an invocation fails to launch or exits unsuccessfully
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum FailurePolicy {
    /// Log the failure and continue. The sweep itself succeeds.
    #[default]
    Ignore,
    /// Continue but report all failures at the end and let the sweep fail
    Report,
    /// Stop at the first failure
    FailFast,
}

/// The content of a sweep file
///
/// All fields are optional. Missing fields fall back to the built-in defaults and anything given
/// on the command line takes precedence over the values in here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SweepFile {
    /// The benchmark names in execution order
    pub benchmarks: Option<Vec<String>>,
    /// The path to the `etharden` executable
    pub executable: Option<PathBuf>,
    /// The ELF generation
    pub generation: Option<Generation>,
    /// The modes of each variant in execution order
    pub modes: Option<Vec<Mode>>,
    /// The failure policy
    pub on_failure: Option<FailurePolicy>,
    /// The root directory of all artifacts
    pub root: Option<PathBuf>,
    /// The techniques applied in transformed runs
    pub techniques: Option<Vec<Technique>>,
    /// An alternative root directory for the transformed artifacts
    pub transformed_root: Option<PathBuf>,
    /// The benchmark names of single variants replacing `benchmarks` for these variants
    pub variant_benchmarks: Option<HashMap<Variant, Vec<String>>>,
    /// The enabled variants in execution order
    pub variants: Option<Vec<Variant>>,
}

impl Optimization {
    /// The name of the directory containing the artifacts of this optimization
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::O3 => "O3",
            Self::OmitFramePointer => "omit-fp",
        }
    }

    /// The tag used in the artifact file names
    pub fn tag(self) -> &'static str {
        match self {
            Self::O3 => "O3",
            Self::OmitFramePointer => "ofp",
        }
    }
}

impl Variant {
    /// Create a new `Variant`
    pub fn new(compiler: Compiler, optimization: Optimization) -> Self {
        Self {
            compiler,
            optimization,
        }
    }
}

impl Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.compiler, self.optimization)
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((compiler, optimization)) = s.trim().split_once('/') else {
            return Err(format!(
                "Invalid variant '{s}': Expected '<compiler>/<optimization>' like 'gcc/O3'"
            ));
        };

        let compiler = compiler
            .parse::<Compiler>()
            .map_err(|_| format!("Invalid compiler '{compiler}' in variant '{s}'"))?;
        let optimization = optimization
            .parse::<Optimization>()
            .map_err(|_| format!("Invalid optimization '{optimization}' in variant '{s}'"))?;

        Ok(Self::new(compiler, optimization))
    }
}

impl TryFrom<String> for Variant {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Variant> for String {
    fn from(value: Variant) -> Self {
        value.to_string()
    }
}

impl Mode {
    /// The [`Role`] of the artifact compared against the original one
    pub fn role(self) -> Role {
        match self {
            Self::Control => Role::Control,
            Self::Transformed => Role::Transformed,
        }
    }
}

impl Technique {
    /// The command line flag of this technique
    pub fn flag(self) -> String {
        format!("--{self}")
    }
}

impl Generation {
    /// The command line flag of this generation
    pub fn flag(self) -> &'static str {
        match self {
            Self::Mirror => "-m",
            Self::Union => "-u",
        }
    }
}
