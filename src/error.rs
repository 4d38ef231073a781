use std::path::PathBuf;

use thiserror::Error;
use tracing_subscriber::reload;

/// A log level string outside `FATAL`, `WARN`, `DEBUG`, `INFO`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0} is not a recognised loglevel")]
pub struct UnknownLevel(pub String);

/// Failures that abort the logging bootstrap.
///
/// None of these are retried. The caller decides how to report them and
/// whether to exit; see [`crate::run`] for the binary's policy.
#[derive(Debug, Error)]
pub enum StartupError {
    /// The requested log file could not be created exclusively.
    #[error("unable to log to file {} : {source}", path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Level(#[from] UnknownLevel),

    /// No `--config` was given and the home directory could not be found.
    #[error("unable to determine home directory")]
    HomeDirUnavailable,

    #[error("a global logger is already installed")]
    LoggerInstalled,

    #[error("unable to apply log level: {0}")]
    LevelReload(#[from] reload::Error),
}
