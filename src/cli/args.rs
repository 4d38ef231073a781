use std::path::{Path, PathBuf};

use clap::{Args, Parser};

use crate::cli::commands::Commands;

/// Options every command inherits.
#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct GlobalArgs {
    /// config file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// log file (defaults to STDERR if no file specified)
    #[arg(long, global = true, value_name = "FILE")]
    pub logfile: Option<PathBuf>,

    /// log level: FATAL, WARN, DEBUG or INFO
    #[arg(long, global = true, value_name = "LEVEL", default_value = "INFO")]
    pub loglevel: String,

    /// turn on verbose messaging
    #[arg(long, global = true)]
    pub verbose: bool,
}

impl Default for GlobalArgs {
    fn default() -> Self {
        Self {
            config: None,
            logfile: None,
            loglevel: "INFO".to_owned(),
            verbose: false,
        }
    }
}

impl GlobalArgs {
    /// `--config`, with an empty value treated as absent.
    pub fn config_path(&self) -> Option<&Path> {
        non_empty(self.config.as_deref())
    }

    /// `--logfile`, with an empty value treated as absent.
    pub fn log_path(&self) -> Option<&Path> {
        non_empty(self.logfile.as_deref())
    }
}

fn non_empty(path: Option<&Path>) -> Option<&Path> {
    path.filter(|p| !p.as_os_str().is_empty())
}

#[derive(Debug, Parser)]
#[command(
    name = "cmdh",
    version,
    about = "Show what the cmdh startup sequence records",
    long_about = None
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
