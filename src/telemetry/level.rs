use std::fmt;
use std::str::FromStr;

use tracing_subscriber::filter::LevelFilter;

use crate::error::UnknownLevel;

/// Severity threshold accepted by `--loglevel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Fatal,
    Warn,
    Debug,
    #[default]
    Info,
}

impl LogLevel {
    /// Filter applied to the subscriber. tracing has no fatal level, so
    /// `Fatal` lets only error events through.
    pub fn filter(self) -> LevelFilter {
        match self {
            Self::Fatal => LevelFilter::ERROR,
            Self::Warn => LevelFilter::WARN,
            Self::Debug => LevelFilter::DEBUG,
            Self::Info => LevelFilter::INFO,
        }
    }
}

impl FromStr for LogLevel {
    type Err = UnknownLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "FATAL" => Ok(Self::Fatal),
            "WARN" => Ok(Self::Warn),
            "DEBUG" => Ok(Self::Debug),
            "INFO" => Ok(Self::Info),
            _ => Err(UnknownLevel(s.to_owned())),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Fatal => "FATAL",
            Self::Warn => "WARN",
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("info")]
    #[case("INFO")]
    #[case("Info")]
    fn parse_ignores_case(#[case] input: &str) {
        assert_eq!(input.parse::<LogLevel>(), Ok(LogLevel::Info));
    }

    #[rstest]
    #[case("fatal", LevelFilter::ERROR)]
    #[case("Warn", LevelFilter::WARN)]
    #[case("DEBUG", LevelFilter::DEBUG)]
    #[case("info", LevelFilter::INFO)]
    fn maps_to_filter(#[case] input: &str, #[case] expected: LevelFilter) {
        let level: LogLevel = input.parse().unwrap_or_else(|e| panic!("parse {input}: {e}"));
        assert_eq!(level.filter(), expected);
    }

    #[rstest]
    #[case("CHATTY")]
    #[case("")]
    #[case("trace")]
    #[case("error")]
    fn rejects_unknown(#[case] input: &str) {
        let err = input.parse::<LogLevel>().expect_err("level should be rejected");
        assert_eq!(err, UnknownLevel(input.to_owned()));
    }

    #[rstest]
    fn unknown_level_names_the_value() {
        let err = "CHATTY".parse::<LogLevel>().expect_err("level should be rejected");
        assert_eq!(err.to_string(), "CHATTY is not a recognised loglevel");
    }

    #[rstest]
    fn default_is_info() {
        assert_eq!(LogLevel::default(), LogLevel::Info);
    }
}
