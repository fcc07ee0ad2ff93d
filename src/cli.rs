//! Command line arguments and log setup.
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::error::{Context, Result, simple_error};
use crate::source::{DEFAULT_CONNECT_TIMEOUT, DEFAULT_ENDPOINT};

/// Browse user records from a remote API in the terminal.
#[derive(Parser, Debug)]
#[command(name = "user-roster", version, about)]
pub struct Cli {
    /// URL returning a JSON array of users.
    #[arg(long, env = "USER_ROSTER_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Seconds to wait for the TCP connection to the endpoint.
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_CONNECT_TIMEOUT.as_secs())]
    pub connect_timeout: u64,

    /// Theme file; written with defaults when missing.
    #[arg(long, value_name = "PATH", default_value = "theme.conf")]
    pub theme: PathBuf,

    /// Keybindings file; written with defaults when missing.
    #[arg(long, value_name = "PATH", default_value = "keybinds.conf")]
    pub keybinds: PathBuf,

    /// Append logs to this file. Logging is off without it.
    #[arg(long, value_name = "PATH", env = "USER_ROSTER_LOG")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout)
    }
}

/// Send `tracing` output to `path`, filtered by `RUST_LOG` (default `info`).
///
/// Does nothing without a path: stdout and stderr belong to the TUI.
pub fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_ctx(|| format!("open log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| simple_error(format!("init logging: {e}")))
}
