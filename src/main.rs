use clap::Parser;
use std::process::ExitCode;
use tracing::error;

use market_helper_lib::commands::{Cli, execute};
use market_helper_lib::infrastructure::logging::{init_logging_with_config, log_system_info};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match cli.load_config().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logging_with_config(config.logging.clone()) {
        eprintln!("Failed to initialize logging: {:#}", e);
    }
    log_system_info();

    match execute(&cli, &config).await {
        Ok(result) if result.is_error() => ExitCode::FAILURE,
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
