//! The etharden-sweep library
//!
//! Runs the `etharden` binary hardening tool over a list of benchmarks and their build variants.
//! For every benchmark and every enabled [`api::Variant`] a control and a transformed run are
//! planned ([`runner::plan`]), executed one after another ([`runner::invoke`]) and the captured
//! output is forwarded to the caller ([`runner::sweep`]).

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod api;
pub mod error;
pub mod runner;
pub mod util;
