//! CLI commands and argument parsing

use crate::config::AppConfig;
use crate::error::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Evotor cloud export tool
#[derive(Parser, Debug)]
#[command(name = "evotor-export")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true, env = "EVOTOR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Application token; prompted for when absent
    #[arg(long, global = true, env = "EVOTOR_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// API base URL
    #[arg(long, global = true, env = "EVOTOR_BASE_URL")]
    pub base_url: Option<String>,

    /// Directory for log files
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// Attempts before giving up on remote errors
    #[arg(long, global = true)]
    pub max_attempts: Option<u32>,

    /// Exit without waiting for Enter
    #[arg(long, global = true)]
    pub no_wait: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print every store with the devices registered to it
    Devices,

    /// Save every good of a store to a JSON file
    Goods {
        /// Store to export; prompted for when absent
        #[arg(long)]
        store_id: Option<String>,

        /// Output file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl Cli {
    /// Load the config file (if any) and apply flag overrides
    pub fn load_config(&self) -> Result<AppConfig> {
        let mut config = AppConfig::load(self.config.as_deref())?;
        self.apply_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// Apply flag values on top of file configuration
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(base_url) = &self.base_url {
            config.api.base_url.clone_from(base_url);
        }
        if let Some(dir) = &self.log_dir {
            config.logging.dir.clone_from(dir);
        }
        if let Some(max_attempts) = self.max_attempts {
            config.session.max_attempts = max_attempts;
        }
        if self.no_wait {
            config.session.wait_on_exit = false;
        }
        if let Commands::Goods {
            output: Some(output),
            ..
        } = &self.command
        {
            config.session.goods_output.clone_from(output);
        }
    }
}
