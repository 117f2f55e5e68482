//! The `etharden-sweep` binary
use std::io::Write;

use colored::{control, Colorize};
use env_logger::Env;
use etharden_sweep::error::Error;
use etharden_sweep::runner::envs;
use log::error;

/// The main function of the `etharden-sweep` binary
///
/// We initialize the logging interface and configure the usage of colors as early as possible here.
/// Then we call the main [`etharden_sweep::runner::run`] library function catching and printing
/// [`etharden_sweep::error::Error`]s.
fn main() {
    // Configure the colored crate to respect ETHARDEN_SWEEP_COLOR and CARGO_TERM_COLOR
    let sweep_color = std::env::var(envs::ETHARDEN_SWEEP_COLOR).ok();
    if let Some(var) = sweep_color
        .clone()
        .or_else(|| std::env::var(envs::CARGO_TERM_COLOR).ok())
    {
        if var == "never" {
            control::set_override(false);
        } else if var == "always" {
            control::set_override(true);
        } else {
            // do nothing
        }
    }

    // Configure the env_logger crate to respect ETHARDEN_SWEEP_COLOR and CARGO_TERM_COLOR
    env_logger::Builder::from_env(
        Env::default()
            .filter_or(envs::ETHARDEN_SWEEP_LOG, "warn")
            .write_style(
                sweep_color.map_or(envs::CARGO_TERM_COLOR, |_| envs::ETHARDEN_SWEEP_COLOR),
            ),
    )
    .format(|buf, record| {
        writeln!(
            buf,
            "{}: {:<5}: {}",
            record
                .module_path()
                .unwrap_or_else(|| record.module_path_static().unwrap_or("???")),
            match record.level() {
                log::Level::Error => "Error".red().bold(),
                log::Level::Warn => "Warn".yellow().bold(),
                log::Level::Info => "Info".green().bold(),
                log::Level::Debug => "Debug".blue().bold(),
                log::Level::Trace => "Trace".cyan().bold(),
            },
            record.args()
        )
    })
    .init();

    match etharden_sweep::runner::run() {
        Ok(()) => {}
        Err(error) => {
            error!("{error}");
            if let Some(Error::SweepFailed(_)) = error.downcast_ref::<Error>() {
                std::process::exit(2)
            } else {
                std::process::exit(1)
            }
        }
    }
}
