use std::env;
use std::path::{Path, PathBuf};

use config::{Config as RawConfig, ConfigError, Value};
use serde::Deserialize;

/// Loaded configuration plus the file it came from, if any.
///
/// Lookups check the environment first, at lookup time, so variables set
/// after loading are still honoured.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    raw: RawConfig,
    file_used: Option<PathBuf>,
}

impl Settings {
    pub(crate) fn new(raw: RawConfig, file_used: Option<PathBuf>) -> Self {
        Self { raw, file_used }
    }

    pub fn file_used(&self) -> Option<&Path> {
        self.file_used.as_deref()
    }

    pub fn get<'de, T: Deserialize<'de>>(&self, key: &str) -> Result<T, ConfigError> {
        match env_value(key) {
            Some(value) => Value::new(None, value).try_deserialize(),
            None => self.raw.get(key),
        }
    }

    pub fn get_string(&self, key: &str) -> Result<String, ConfigError> {
        self.get(key)
    }

    /// Deserializes the whole configuration, environment snapshot included.
    pub fn try_deserialize<'de, T: Deserialize<'de>>(&self) -> Result<T, ConfigError> {
        self.raw.clone().try_deserialize()
    }
}

/// `server.port` -> `SERVER_PORT`
pub(crate) fn env_key(key: &str) -> String {
    key.chars()
        .map(|c| match c {
            '.' | '-' => '_',
            c => c.to_ascii_uppercase(),
        })
        .collect()
}

pub(crate) fn env_value(key: &str) -> Option<String> {
    let name = env_key(key);
    if name.is_empty() || name.contains(['=', '\0']) {
        return None;
    }
    env::var(name).ok()
}
