//! Command-line argument parsing.

use crate::config::{ConfigError, ServerConfig};
use clap::Parser;
use std::path::PathBuf;

/// sdfix server - remediates retired sales-document table references.
#[derive(Debug, Parser)]
#[command(name = "sdfix-server")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path (TOML)
    #[arg(short, long, env = "SDFIX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the bind address from the config file
    #[arg(long)]
    pub bind_address: Option<String>,

    /// Override the bind port from the config file
    #[arg(short, long)]
    pub port: Option<u16>,
}

impl Cli {
    /// Resolve the effective configuration.
    ///
    /// Starts from the config file (or the built-in defaults) and applies
    /// command-line overrides on top.
    pub fn load_config(&self) -> Result<ServerConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::from_file(path)?,
            None => ServerConfig::default_config(),
        };

        if let Some(address) = &self.bind_address {
            config.bind_address = address.clone();
        }
        if let Some(port) = self.port {
            config.bind_port = port;
        }

        Ok(config)
    }
}
