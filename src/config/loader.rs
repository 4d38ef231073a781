use std::path::{Path, PathBuf};

use config::{Config as RawConfig, ConfigError, File, Map, Value};
use tracing::{debug, info, warn};

use crate::config::settings::{env_value, Settings};
use crate::error::StartupError;

/// Base name searched for in the home directory.
pub const CONFIG_NAME: &str = "config";
/// Extensions tried, in order, when searching. Follows viper's search order
/// for the formats both support, then the config-crate-only ones.
pub const CONFIG_EXTENSIONS: &[&str] = &["json", "toml", "yaml", "yml", "ini", "ron", "json5"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Path given on the command line, used verbatim.
    Explicit(PathBuf),
    /// Directory searched for `config.<ext>`.
    Search(PathBuf),
}

impl ConfigSource {
    /// An empty explicit path counts as absent. Without one, the home
    /// directory is required.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, StartupError> {
        match explicit.filter(|p| !p.as_os_str().is_empty()) {
            Some(path) => Ok(Self::Explicit(path.to_path_buf())),
            None => home_dir()
                .map(Self::Search)
                .ok_or(StartupError::HomeDirUnavailable),
        }
    }

    fn locate(&self) -> Option<PathBuf> {
        match self {
            Self::Explicit(path) => path.is_file().then(|| path.clone()),
            Self::Search(dir) => CONFIG_EXTENSIONS
                .iter()
                .map(|ext| dir.join(format!("{CONFIG_NAME}.{ext}")))
                .find(|candidate| candidate.is_file()),
        }
    }
}

fn home_dir() -> Option<PathBuf> {
    directories::UserDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
}

/// Reads the config file (if one is found) with the environment layered on
/// top of the keys it defines. A missing or unreadable file is not an error:
/// lookups then fall back to the environment alone.
pub fn load(source: &ConfigSource) -> Settings {
    let Some(path) = source.locate() else {
        debug!(?source, "no config file found");
        return Settings::default();
    };

    match read_file(&path) {
        Ok(raw) => {
            info!("Using config file: {}", path.display());
            Settings::new(raw, Some(path))
        }
        Err(err) => {
            warn!("unable to read config file {}: {err}", path.display());
            Settings::default()
        }
    }
}

fn read_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let file_only = RawConfig::builder().add_source(File::from(path)).build()?;
    let table: Map<String, Value> = file_only.try_deserialize()?;

    let mut leaves = Vec::new();
    collect_leaves("", table, &mut leaves);

    // environment wins over file values
    let mut builder = RawConfig::builder().add_source(File::from(path));
    for key in leaves {
        if let Some(value) = env_value(&key) {
            builder = builder.set_override(key, value)?;
        }
    }
    builder.build()
}

/// Dotted paths of every non-table value, e.g. `server.port`.
fn collect_leaves(prefix: &str, table: Map<String, Value>, out: &mut Vec<String>) {
    for (name, value) in table {
        let key = if prefix.is_empty() {
            name
        } else {
            format!("{prefix}.{name}")
        };
        match value.into_table() {
            Ok(nested) => collect_leaves(&key, nested, out),
            Err(_) => out.push(key),
        }
    }
}
