//! Facts about one invocation: who ran what, where, and when it started.

mod identity;

use std::env;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};

pub use identity::Identity;

/// Captured once at startup. Only `tool` and `version` change afterwards.
#[derive(Debug, Clone)]
pub struct RunParameters {
    tool: String,
    version: String,
    args: Vec<String>,
    identity: Identity,
    start: Instant,
    started_at: DateTime<Local>,
}

impl Default for RunParameters {
    fn default() -> Self {
        Self::new()
    }
}

impl RunParameters {
    /// Captures the current time, process arguments (without the program
    /// name) and host/user/group identity. Never fails.
    pub fn new() -> Self {
        let args = env::args_os()
            .skip(1)
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        Self::with_args(args)
    }

    /// Like [`RunParameters::new`] but with caller-supplied arguments.
    pub fn with_args(args: Vec<String>) -> Self {
        Self {
            tool: String::new(),
            version: String::new(),
            args,
            identity: Identity::current(),
            start: Instant::now(),
            started_at: Local::now(),
        }
    }

    pub fn set_tool(&mut self, tool: impl Into<String>) {
        self.tool = tool.into();
    }

    pub fn set_version(&mut self, version: impl Into<String>) {
        self.version = version.into();
    }

    pub fn tool(&self) -> &str {
        &self.tool
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn host_name(&self) -> &str {
        &self.identity.host_name
    }

    pub fn user_id(&self) -> u32 {
        self.identity.user_id
    }

    pub fn user_name(&self) -> &str {
        &self.identity.user_name
    }

    pub fn group_id(&self) -> u32 {
        self.identity.group_id
    }

    pub fn group_name(&self) -> &str {
        &self.identity.group_name
    }

    pub fn start(&self) -> Instant {
        self.start
    }

    /// Wall-clock start, for display only. Durations use [`Self::elapsed`].
    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Arguments as `[a b c]`.
    pub fn cmdline(&self) -> String {
        format!("[{}]", self.args.join(" "))
    }
}
