mod get;
mod show;

use anyhow::Result;
use clap::Subcommand;

use crate::session::Session;

pub use get::Get;
pub use show::Show;

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the captured run parameters
    Show(Show),
    /// Print one configuration value
    Get(Get),
}

impl Commands {
    pub fn execute(&self, session: &Session) -> Result<()> {
        match self {
            Self::Show(cmd) => cmd.execute(session),
            Self::Get(cmd) => cmd.execute(session),
        }
    }
}
