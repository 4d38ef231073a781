//! Subscriber assembly: line format, output sink and a reloadable threshold.

use std::{
    fs::{File, OpenOptions},
    io::{self, Write},
    path::Path,
    sync::Arc,
};

use tracing::Subscriber;
use tracing_subscriber::{
    filter::LevelFilter,
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
    reload,
    util::SubscriberInitExt,
    Registry,
};

use crate::error::StartupError;
use crate::telemetry::format::LineFormat;
use crate::telemetry::level::LogLevel;

/// Where formatted lines go: stderr, or a log file opened once at startup.
#[derive(Debug, Clone, Default)]
pub enum LogSink {
    #[default]
    Stderr,
    File(Arc<File>),
}

impl LogSink {
    /// Opens `path` for appending, refusing to touch a file that already
    /// exists.
    pub fn create_exclusive(path: &Path) -> io::Result<Self> {
        let mut options = OpenOptions::new();
        options.append(true).create_new(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o644);
        }
        Ok(Self::File(Arc::new(options.open(path)?)))
    }
}

pub enum SinkWriter {
    Stderr(io::Stderr),
    File(Arc<File>),
}

impl Write for SinkWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Stderr(err) => err.write(buf),
            Self::File(file) => (&**file).write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Stderr(err) => err.flush(),
            Self::File(file) => (&**file).flush(),
        }
    }
}

impl<'a> MakeWriter<'a> for LogSink {
    type Writer = SinkWriter;

    fn make_writer(&'a self) -> Self::Writer {
        match self {
            Self::Stderr => SinkWriter::Stderr(io::stderr()),
            Self::File(file) => SinkWriter::File(Arc::clone(file)),
        }
    }
}

/// Changes the threshold of an installed subscriber.
#[derive(Clone)]
pub struct LoggerHandle {
    filter: reload::Handle<LevelFilter, Registry>,
}

impl LoggerHandle {
    pub fn set_level(&self, level: LogLevel) -> Result<(), StartupError> {
        self.filter.reload(level.filter())?;
        Ok(())
    }
}

/// Builds the subscriber without installing it.
///
/// The threshold starts at INFO; use the returned handle to change it.
pub fn build_subscriber(
    format: LineFormat,
    sink: LogSink,
) -> (impl Subscriber + Send + Sync + 'static, LoggerHandle) {
    let (filter_layer, filter) = reload::Layer::new(LogLevel::default().filter());

    let fmt_layer = fmt::layer()
        .with_ansi(false)
        .event_format(format)
        .with_writer(sink);

    let subscriber = Registry::default().with(filter_layer).with(fmt_layer);
    (subscriber, LoggerHandle { filter })
}

/// Builds the subscriber and makes it the process-wide default.
pub fn init_global_logging(format: LineFormat, sink: LogSink) -> Result<LoggerHandle, StartupError> {
    let (subscriber, handle) = build_subscriber(format, sink);
    subscriber
        .try_init()
        .map_err(|_| StartupError::LoggerInstalled)?;
    Ok(handle)
}

/// Builds the subscriber and makes it the default for the current thread
/// until the guard is dropped.
pub fn init_scoped_logging(
    format: LineFormat,
    sink: LogSink,
) -> (tracing::subscriber::DefaultGuard, LoggerHandle) {
    let (subscriber, handle) = build_subscriber(format, sink);
    (tracing::subscriber::set_default(subscriber), handle)
}
