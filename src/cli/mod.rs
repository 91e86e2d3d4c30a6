//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for VetStock using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// VetStock - Veterinary Medicine Inventory
#[derive(Parser, Debug)]
#[command(name = "vetstock")]
#[command(version, about, long_about = None)]
#[command(author = "VetStock Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "vetstock.toml", env = "VETSTOCK_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "VETSTOCK_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List medicines in stock
    List(commands::list::ListArgs),

    /// Add a medicine
    Add(commands::add::AddArgs),

    /// Change fields of an existing medicine
    Update(commands::update::UpdateArgs),

    /// Remove a medicine
    Delete(commands::delete::DeleteArgs),

    /// Record that a medicine was dispensed
    Use(commands::usage::UseArgs),

    /// Check stored data for inconsistencies and duplicates
    Check(commands::check::CheckArgs),

    /// Show inventory totals, expiry, and stock levels
    Summary(commands::summary::SummaryArgs),

    /// Suggest medicine names from the catalog
    Suggest(commands::suggest::SuggestArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

impl Commands {
    /// Runs the command and returns the process exit code
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        match self {
            Commands::List(args) => args.execute(config_path),
            Commands::Add(args) => args.execute(config_path),
            Commands::Update(args) => args.execute(config_path),
            Commands::Delete(args) => args.execute(config_path),
            Commands::Use(args) => args.execute(config_path),
            Commands::Check(args) => args.execute(config_path),
            Commands::Summary(args) => args.execute(config_path),
            Commands::Suggest(args) => args.execute(),
            Commands::ValidateConfig(args) => args.execute(config_path),
            Commands::Init(args) => args.execute(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use commands::list::SortOrder;

    #[test]
    fn test_cli_parse_list() {
        let cli = Cli::parse_from(["vetstock", "list"]);
        assert_eq!(cli.config, "vetstock.toml");
        assert!(matches!(cli.command, Commands::List(_)));
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["vetstock", "--config", "custom.toml", "summary"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["vetstock", "--log-level", "debug", "check"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_list_filters() {
        let cli = Cli::parse_from([
            "vetstock",
            "list",
            "--category",
            "Antibiotics",
            "--low-stock",
            "--sort",
            "quantity",
        ]);
        let Commands::List(args) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(args.category.as_deref(), Some("Antibiotics"));
        assert!(args.low_stock);
        assert_eq!(args.sort, SortOrder::Quantity);
    }

    #[test]
    fn test_cli_parse_add() {
        let cli = Cli::parse_from([
            "vetstock",
            "add",
            "--name",
            "Carprofen",
            "--mrp",
            "2.50",
            "--quantity",
            "4",
            "--expiry",
            "2027-01-31",
        ]);
        let Commands::Add(args) = cli.command else {
            panic!("expected add");
        };
        assert_eq!(args.id, None);
        assert_eq!(args.fields.name.as_deref(), Some("Carprofen"));
        assert_eq!(args.fields.expiry.as_deref(), Some("2027-01-31"));
    }

    #[test]
    fn test_cli_parse_update_and_use() {
        let cli = Cli::parse_from(["vetstock", "update", "m1", "--quantity", "8"]);
        let Commands::Update(args) = cli.command else {
            panic!("expected update");
        };
        assert_eq!(args.id, "m1");
        assert_eq!(args.fields.quantity.as_deref(), Some("8"));

        let cli = Cli::parse_from(["vetstock", "use", "m1"]);
        assert!(matches!(cli.command, Commands::Use(_)));
    }

    #[test]
    fn test_cli_parse_suggest() {
        let cli = Cli::parse_from(["vetstock", "suggest", "amox", "-n", "3"]);
        let Commands::Suggest(args) = cli.command else {
            panic!("expected suggest");
        };
        assert_eq!(args.query.as_deref(), Some("amox"));
        assert_eq!(args.limit, 3);
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["vetstock", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["vetstock", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }
}
