// VetStock - Veterinary Medicine Inventory
// Copyright (c) 2025 VetStock Contributors
// Licensed under the MIT License

use vetstock::cli::commands::{EXIT_CONFIG, EXIT_FATAL};
use vetstock::cli::{Cli, Commands};
use vetstock::config::{load_config_or_default, VetStockConfig};
use vetstock::logging::init_logging;
use clap::Parser;
use std::process;

fn main() {
    // Load environment variables from .env file if present
    // This is optional - if .env doesn't exist, it's silently ignored
    let _ = dotenvy::dotenv();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Logging settings come from the config file when it loads; commands report a
    // broken config themselves, so fall back to defaults here
    let config = match &cli.command {
        Commands::Init(_) => VetStockConfig::default(),
        _ => load_config_or_default(&cli.config).unwrap_or_default(),
    };

    let log_level = cli
        .log_level
        .as_deref()
        .unwrap_or(&config.application.log_level);
    let guard = match init_logging(log_level, &config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(EXIT_CONFIG);
        }
    };

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        "VetStock - Veterinary Medicine Inventory"
    );

    // Execute command and get exit code
    let exit_code = match cli.command.execute(&cli.config) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            EXIT_FATAL
        }
    };

    // Flush file logs before exiting
    drop(guard);
    process::exit(exit_code);
}
