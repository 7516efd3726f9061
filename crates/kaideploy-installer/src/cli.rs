//! Command-line surface.
//!
//! Flags override the optional YAML config, which overrides built-in defaults.

use std::path::PathBuf;

use clap::Parser;

use kaideploy_core::error::Result;
use kaideploy_core::protocol::LengthPolicy;

use crate::config::{self, DeployConfig};
use crate::obs::Verbosity;

#[derive(Debug, Parser)]
#[command(name = "kaideploy")]
#[command(version)]
#[command(about = "Push a packaged app directory to a device over its debugger socket")]
pub struct Cli {
    /// Debugger socket (host:port), usually forwarded with `adb forward`
    #[arg(long)]
    pub socket: Option<String>,

    /// App directory to package and install
    #[arg(long)]
    pub path: PathBuf,

    /// Launch the app after install
    #[arg(long)]
    pub launch: bool,

    /// Report every protocol step
    #[arg(long)]
    pub verbose: bool,

    /// YAML config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Reject malformed frame length prefixes instead of reading them as 0
    #[arg(long)]
    pub strict_length: bool,

    /// Per-step reply timeout in milliseconds (0 waits forever)
    #[arg(long)]
    pub step_timeout_ms: Option<u64>,
}

impl Cli {
    pub fn verbosity(&self) -> Verbosity {
        if self.verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Quiet
        }
    }

    /// Resolve the effective config: file (if any), then flags, then validate.
    pub fn resolve_config(&self) -> Result<DeployConfig> {
        let mut cfg = match &self.config {
            Some(path) => config::load_from_file(path)?,
            None => DeployConfig::default(),
        };

        if let Some(socket) = &self.socket {
            cfg.device.socket = socket.clone();
        }
        if let Some(ms) = self.step_timeout_ms {
            cfg.device.step_timeout_ms = ms;
        }
        if self.strict_length {
            cfg.protocol.length_prefix = LengthPolicy::Strict;
        }

        cfg.validate()?;
        Ok(cfg)
    }
}
