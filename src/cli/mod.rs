mod args;
pub mod commands;

use clap::{Args as _, Command};

use crate::params::RunParameters;

pub use args::{Cli, GlobalArgs};
pub use commands::Commands;

/// Registers `--config`, `--logfile`, `--loglevel` and `--verbose` as global
/// options on `root` and captures the run parameters for `tool`/`version`.
///
/// Call this before parsing; read the values back with
/// [`clap::FromArgMatches::from_arg_matches`] on [`GlobalArgs`].
///
/// ```
/// use clap::{Command, FromArgMatches};
/// use cmdh::GlobalArgs;
///
/// let (cmd, params) = cmdh::initialise(Command::new("myapp"), "myapp", "v0.1.0-dev");
/// let matches = cmd.try_get_matches_from(["myapp", "--loglevel", "debug"]).unwrap();
/// let args = GlobalArgs::from_arg_matches(&matches).unwrap();
/// assert_eq!(args.loglevel, "debug");
/// assert_eq!(params.tool(), "myapp");
/// ```
pub fn initialise(root: Command, tool: &str, version: &str) -> (Command, RunParameters) {
    let mut params = RunParameters::new();
    params.set_tool(tool);
    params.set_version(version);
    (GlobalArgs::augment_args(root), params)
}
