mod loader;
mod settings;

pub use loader::{load, ConfigSource, CONFIG_NAME, CONFIG_EXTENSIONS};
pub use settings::Settings;
