//! Command-line interface definitions.

pub mod check;
pub mod run;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// FundLess - savings-plan control plane for a crypto index portfolio.
#[derive(Parser, Debug)]
#[command(name = "fundless")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, default_value = "config.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Run every surface enabled in the configuration
    Run,
    /// Run only the Telegram bot
    Bot,
    /// Run only the web dashboard
    Dashboard,
    /// Validate the configuration and print a summary
    Check,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_flag_is_global() {
        let cli = Cli::try_parse_from(["fundless", "check", "--config", "other.toml"]).unwrap();
        assert_eq!(cli.command, Commands::Check);
        assert_eq!(cli.config, PathBuf::from("other.toml"));

        let cli = Cli::try_parse_from(["fundless", "-c", "x.toml", "bot"]).unwrap();
        assert_eq!(cli.command, Commands::Bot);
        assert_eq!(cli.config, PathBuf::from("x.toml"));
    }

    #[test]
    fn config_defaults_to_config_toml() {
        let cli = Cli::try_parse_from(["fundless", "run"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("config.toml"));
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["fundless"]).is_err());
    }
}
