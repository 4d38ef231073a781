pub mod format;
pub mod level;
pub mod logging;

pub use format::{LineFormat, LogRecord, DEFAULT_TIMESTAMP_FORMAT};
pub use level::LogLevel;
pub use logging::{LogSink, LoggerHandle};
