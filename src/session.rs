//! Logging bootstrap and teardown around one command run.
//!
//! ```no_run
//! use clap::Parser;
//! use cmdh::{GlobalArgs, RunParameters, Session};
//!
//! #[derive(Parser)]
//! struct Cli {
//!     #[command(flatten)]
//!     global: GlobalArgs,
//! }
//!
//! let mut params = RunParameters::new();
//! params.set_tool("myapp");
//! params.set_version("v0.1.0-dev");
//! let cli = Cli::parse();
//!
//! let session = Session::start(&cli.global, params).unwrap_or_else(|e| {
//!     eprintln!("{e}");
//!     std::process::exit(1);
//! });
//! // ... do the work ...
//! session.finish();
//! ```

use std::time::Duration;

use tracing::info;
use tracing::subscriber::DefaultGuard;

use crate::cli::GlobalArgs;
use crate::config::{load as load_config, ConfigSource, Settings};
use crate::error::StartupError;
use crate::params::RunParameters;
use crate::telemetry::logging::{self, LogSink};
use crate::telemetry::{LineFormat, LogLevel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Install {
    Global,
    Scoped,
}

/// State established by [`Session::start`] and read until [`Session::finish`].
pub struct Session {
    params: RunParameters,
    args: GlobalArgs,
    level: LogLevel,
    settings: Settings,
    // Dropping this uninstalls a scoped subscriber and closes its log file.
    _guard: Option<DefaultGuard>,
}

impl Session {
    /// Installs the line formatter as the process-wide subscriber, applies
    /// the log level, logs the run parameters and loads configuration.
    ///
    /// Must be called once, after argument parsing.
    pub fn start(args: &GlobalArgs, params: RunParameters) -> Result<Self, StartupError> {
        Self::start_with(args, params, Install::Global)
    }

    /// Like [`Session::start`], but the subscriber only applies to the
    /// current thread and only while the session is alive.
    pub fn start_scoped(args: &GlobalArgs, params: RunParameters) -> Result<Self, StartupError> {
        Self::start_with(args, params, Install::Scoped)
    }

    fn start_with(args: &GlobalArgs, params: RunParameters, install: Install) -> Result<Self, StartupError> {
        let format = LineFormat::default();

        let sink = match args.log_path() {
            Some(path) => LogSink::create_exclusive(path).map_err(|source| StartupError::LogFile {
                path: path.to_path_buf(),
                source,
            })?,
            None => LogSink::Stderr,
        };

        let (guard, logger) = match install {
            Install::Global => (None, logging::init_global_logging(format, sink)?),
            Install::Scoped => {
                let (guard, logger) = logging::init_scoped_logging(format, sink);
                (Some(guard), logger)
            }
        };

        let level: LogLevel = args.loglevel.parse()?;
        logger.set_level(level)?;

        info!("Tool: {} {}", params.tool(), params.version());
        info!("Cmdline: {}", params.cmdline());
        info!("Host: {}", params.host_name());
        info!("User: {} ({})", params.user_id(), params.user_name());
        info!("Group: {} ({})", params.group_id(), params.group_name());

        let source = ConfigSource::resolve(args.config_path())?;
        let settings = load_config(&source);
        info!(
            "Config file: {}",
            settings
                .file_used()
                .map(|p| p.display().to_string())
                .unwrap_or_default()
        );

        Ok(Self {
            params,
            args: args.clone(),
            level,
            settings,
            _guard: guard,
        })
    }

    /// Logs and returns the time elapsed since the run parameters were
    /// captured. May be called more than once.
    pub fn finish(&self) -> Duration {
        let elapsed = self.params.elapsed();
        info!("Elapsed time: {elapsed:?}");
        elapsed
    }

    pub fn params(&self) -> &RunParameters {
        &self.params
    }

    pub fn args(&self) -> &GlobalArgs {
        &self.args
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}
