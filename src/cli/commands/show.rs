use std::io::{self, Write};

use anyhow::Result;
use clap::Parser;

use crate::session::Session;

#[derive(Debug, Parser)]
pub struct Show {}

impl Show {
    pub fn execute(&self, session: &Session) -> Result<()> {
        let params = session.params();
        let config = session
            .settings()
            .file_used()
            .map(|p| p.display().to_string())
            .unwrap_or_default();

        let mut out = io::stdout().lock();
        writeln!(out, "tool: {} {}", params.tool(), params.version())?;
        writeln!(out, "cmdline: {}", params.cmdline())?;
        writeln!(out, "host: {}", params.host_name())?;
        writeln!(out, "user: {} ({})", params.user_id(), params.user_name())?;
        writeln!(out, "group: {} ({})", params.group_id(), params.group_name())?;
        writeln!(out, "config: {config}")?;
        if session.args().verbose {
            writeln!(out, "started: {}", params.started_at().format("%Y-%m-%d %H:%M:%S%.3f"))?;
            writeln!(out, "loglevel: {}", session.level())?;
        }
        Ok(())
    }
}
