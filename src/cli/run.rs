//! Handlers for the long-running commands.

use std::path::Path;

use tokio::signal;
use tracing::info;

use crate::cli::Commands;
use crate::error::Result;
use crate::infrastructure::bootstrap::{self, Surfaces};
use crate::infrastructure::config::Config;

/// Surfaces selected by a command, given the configuration.
#[must_use]
pub fn surfaces(command: Commands, config: &Config) -> Surfaces {
    match command {
        Commands::Bot => Surfaces {
            bot: true,
            dashboard: false,
        },
        Commands::Dashboard => Surfaces {
            bot: false,
            dashboard: true,
        },
        Commands::Run | Commands::Check => Surfaces::from_config(config),
    }
}

/// Load the configuration and run until ctrl-c or a fatal error.
pub async fn execute<P: AsRef<Path>>(config_path: P, command: Commands) -> Result<()> {
    let config = Config::load(config_path)?;
    config.init_logging();
    info!(version = env!("CARGO_PKG_VERSION"), "fundless starting");

    tokio::select! {
        result = bootstrap::run(&config, surfaces(command, &config)) => result?,
        _ = signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }

    info!("fundless stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bot_and_dashboard_commands_select_one_surface() {
        let config = Config::default();
        assert_eq!(
            surfaces(Commands::Bot, &config),
            Surfaces {
                bot: true,
                dashboard: false
            }
        );
        assert_eq!(
            surfaces(Commands::Dashboard, &config),
            Surfaces {
                bot: false,
                dashboard: true
            }
        );
    }

    #[test]
    fn run_uses_enabled_flags() {
        let mut config = Config::default();
        config.dashboard.enabled = false;
        assert_eq!(
            surfaces(Commands::Run, &config),
            Surfaces {
                bot: true,
                dashboard: false
            }
        );
    }
}
