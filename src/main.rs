//! evotor-export CLI
//!
//! Runs one interactive export session against the Evotor cloud API

use clap::Parser;
use evotor_export::cli::{Cli, Runner, StdinConsole};
use evotor_export::logging::Logging;
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let config = match cli.load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let logging = match Logging::init(&config.logging) {
        Ok(logging) => logging,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    info!("Logging to {}", logging.log_path().display());

    let mut runner = Runner::from_cli(&cli, config, StdinConsole::new());

    // Pending stdin reads keep the runtime from shutting down, so every
    // path leaves through process::exit once the log worker is flushed.
    let code = tokio::select! {
        result = runner.run() => match result {
            Ok(outcome) => outcome.exit_code(),
            Err(e) => {
                error!("Error: {e}");
                1
            }
        },
        _ = tokio::signal::ctrl_c() => {
            info!("Exiting...");
            0
        }
    };

    drop(logging);
    std::process::exit(code);
}
