//! Startup plumbing for clap applications: global `--config`, `--logfile`,
//! `--loglevel` and `--verbose` flags, a one-line log format, config file
//! discovery with environment overrides, and run bookkeeping (tool, version,
//! host, user, elapsed time).

pub mod cli;
pub mod config;
pub mod error;
pub mod params;
pub mod session;
pub mod telemetry;

use std::process::ExitCode;

use clap::Parser;
use tracing::error;

pub use cli::{initialise, GlobalArgs};
pub use error::{StartupError, UnknownLevel};
pub use params::RunParameters;
pub use session::Session;

/// Entry point of the `cmdh` binary.
pub fn run() -> ExitCode {
    let mut params = RunParameters::new();
    params.set_tool(env!("CARGO_PKG_NAME"));
    params.set_version(env!("CARGO_PKG_VERSION"));

    let cli = cli::Cli::parse();
    let session = match Session::start(&cli.global, params) {
        Ok(session) => session,
        Err(err) => return startup_failed(&err),
    };

    let outcome = match &cli.command {
        Some(command) => command.execute(&session),
        None => Ok(()),
    };
    session.finish();

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn startup_failed(err: &StartupError) -> ExitCode {
    match err {
        // no subscriber yet
        StartupError::LogFile { .. } => println!("{err}"),
        StartupError::LoggerInstalled => eprintln!("{err}"),
        _ => error!("{err}"),
    }
    ExitCode::FAILURE
}
