//! CLI runner - drives one interactive session

use crate::auth::{AuthConfig, BearerToken};
use crate::cli::commands::{Cli, Commands};
use crate::cli::console::Console;
use crate::config::AppConfig;
use crate::engine::Fetcher;
use crate::error::{Error, Result};
use crate::join::join_stores_devices;
use crate::output::OutputTarget;
use crate::pagination::CursorPaginator;
use crate::types::Resource;
use crate::VERSION;
use std::path::PathBuf;
use tracing::{error, info, warn};

/// What the session does on each attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    /// Fetch stores and devices, join them, print the result
    StoresAndDevices,
    /// Fetch every good of a store and save them to a file
    Goods {
        /// Store to export; prompted for when absent
        store_id: Option<String>,
        /// Output file
        output: PathBuf,
    },
}

impl Flow {
    /// Title shown in the banner
    pub fn title(&self) -> &'static str {
        match self {
            Flow::StoresAndDevices => "GetStoresAndDevices",
            Flow::Goods { .. } => "GetAllGoods",
        }
    }
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The flow finished
    Completed,
    /// The operator declined to retry, or attempts ran out
    Declined,
    /// Input closed or the process was interrupted
    Interrupted,
}

impl Outcome {
    /// Process exit status for this outcome
    pub fn exit_code(self) -> i32 {
        match self {
            Outcome::Completed | Outcome::Interrupted => 0,
            Outcome::Declined => 1,
        }
    }
}

/// CLI runner
pub struct Runner<C: Console> {
    config: AppConfig,
    flow: Flow,
    token: Option<String>,
    console: C,
}

impl<C: Console> Runner<C> {
    /// Create a new runner
    pub fn new(config: AppConfig, flow: Flow, console: C) -> Self {
        Self {
            config,
            flow,
            token: None,
            console,
        }
    }

    /// Build a runner from parsed arguments and loaded config
    pub fn from_cli(cli: &Cli, config: AppConfig, console: C) -> Self {
        let flow = match &cli.command {
            Commands::Devices => Flow::StoresAndDevices,
            Commands::Goods { store_id, .. } => Flow::Goods {
                store_id: store_id.clone(),
                output: config.session.goods_output.clone(),
            },
        };
        Self::new(config, flow, console).with_token(cli.token.clone())
    }

    /// Use this token instead of prompting for one
    #[must_use]
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    /// Get the console
    pub fn console(&self) -> &C {
        &self.console
    }

    /// Run the flow, offering a retry after each recoverable error
    ///
    /// At most `session.max_attempts` runs are made. Fatal errors (malformed
    /// payloads, unwritable output) are returned as `Err`.
    pub async fn run(&mut self) -> Result<Outcome> {
        let max_attempts = self.config.session.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            let err = match self.run_once().await {
                Ok(()) => {
                    self.wait_for_exit().await?;
                    return Ok(Outcome::Completed);
                }
                Err(err) => err,
            };

            if matches!(err, Error::Interrupted) {
                info!("Exiting...");
                return Ok(Outcome::Interrupted);
            }
            if !err.is_recoverable() {
                return Err(err);
            }

            error!("Error: {err}");

            if attempt >= max_attempts {
                warn!("Giving up after {attempt} attempts");
                info!("Exiting...");
                return Ok(Outcome::Declined);
            }

            match self.console.confirm("An error occurred. Retry? (y/n): ").await {
                Ok(true) => {
                    attempt += 1;
                    info!("Retrying (attempt {attempt} of {max_attempts})");
                }
                Ok(false) => {
                    info!("Exiting...");
                    return Ok(Outcome::Declined);
                }
                Err(Error::Interrupted) => {
                    info!("Exiting...");
                    return Ok(Outcome::Interrupted);
                }
                Err(other) => return Err(other),
            }
        }
    }

    /// One pass through the flow, prompts included
    async fn run_once(&mut self) -> Result<()> {
        let title = self.flow.title();
        writeln!(self.console.out(), "\n{title} v{VERSION}\n")?;

        match self.flow.clone() {
            Flow::StoresAndDevices => self.stores_and_devices().await,
            Flow::Goods { store_id, output } => self.goods(store_id, output).await,
        }
    }

    async fn stores_and_devices(&mut self) -> Result<()> {
        let mut fetcher = self.fetcher().await?;

        let stores = fetcher.fetch_envelope(&Resource::Stores).await?;
        let devices = fetcher.fetch_envelope(&Resource::Devices).await?;
        let joined = join_stores_devices(&stores, &devices)?;

        info!("Joined {} stores", joined.len());

        let out = self.console.out();
        writeln!(out, "\nResult:\n")?;
        OutputTarget::Console.emit(&joined, out)
    }

    async fn goods(&mut self, store_id: Option<String>, output: PathBuf) -> Result<()> {
        let mut fetcher = self.fetcher().await?;

        let store_id = match store_id {
            Some(id) => id,
            None => self.console.prompt("Input store_id, please: ").await?,
        };
        let store_id = store_id.trim().to_string();
        if store_id.is_empty() {
            return Err(Error::invalid_input("store_id must not be empty"));
        }

        let goods = fetcher
            .fetch_all(&Resource::Goods { store_id }, &CursorPaginator::evotor())
            .await?;

        OutputTarget::File(output.clone()).emit(&goods, self.console.out())?;
        writeln!(self.console.out(), "Saved to {}", output.display())?;
        Ok(())
    }

    /// Fetcher authenticated with the configured or prompted token
    async fn fetcher(&mut self) -> Result<Fetcher> {
        let raw = match &self.token {
            Some(token) => token.clone(),
            None => self.console.prompt("Input token, please: ").await?,
        };
        let token = match BearerToken::new(raw) {
            Ok(token) => token,
            Err(err) => {
                // A rejected configured token is not reused; the next attempt prompts.
                self.token = None;
                return Err(err);
            }
        };
        let auth = AuthConfig::Bearer { token };

        let fetcher = Fetcher::new(self.config.api.http_client_config(), auth)
            .with_config(self.config.api.fetch_config());
        Ok(fetcher)
    }

    async fn wait_for_exit(&mut self) -> Result<()> {
        if !self.config.session.wait_on_exit {
            return Ok(());
        }
        match self.console.prompt("\nPress Enter to exit...").await {
            Ok(_) | Err(Error::Interrupted) => Ok(()),
            Err(other) => Err(other),
        }
    }
}

impl<C: Console> std::fmt::Debug for Runner<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runner")
            .field("flow", &self.flow)
            .field("has_token", &self.token.is_some())
            .finish_non_exhaustive()
    }
}
