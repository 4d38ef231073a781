use anyhow::{Context, Result};
use clap::Parser;

use crate::session::Session;

#[derive(Debug, Parser)]
pub struct Get {
    /// Key to look up; the environment variable KEY (upper-cased, dots as
    /// underscores) takes precedence over the config file
    #[arg(value_name = "KEY")]
    pub key: String,
}

impl Get {
    pub fn execute(&self, session: &Session) -> Result<()> {
        let value = session
            .settings()
            .get_string(&self.key)
            .with_context(|| format!("no value for config key {}", self.key))?;
        println!("{value}");
        Ok(())
    }
}
