//! Handler for the `check` command.

use std::path::Path;

use crate::error::Result;
use crate::infrastructure::config::Config;

/// Validate the configuration file without starting anything.
pub fn execute<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let path = config_path.as_ref();
    println!("Checking configuration: {}", path.display());
    println!();

    let config = Config::load(path)?;
    println!("✓ Configuration file is valid");
    println!();
    println!("Summary:");
    println!("  Exchange: {}", config.savings_plan.exchange);
    println!(
        "  Savings plan: {} {}",
        config.savings_plan.cost,
        config.savings_plan.base_symbol.to_uppercase()
    );
    println!(
        "  Retry: {} attempts, {} ms apart",
        config.retry.max_attempts, config.retry.delay_ms
    );

    if config.telegram.enabled {
        println!("✓ Telegram bot enabled");
        match config.telegram.reminder_interval_hours {
            Some(hours) => println!("  Reminder: every {hours} h"),
            None => println!("  Reminder: disabled"),
        }
    } else {
        println!("  Telegram: disabled");
    }

    if config.dashboard.enabled {
        println!("✓ Dashboard enabled on {}", config.dashboard.bind);
        if config.dashboard.secret_key.is_none() {
            println!("⚠ No DASHBOARD_SECRET_KEY set; a random key is generated at startup");
        }
    } else {
        println!("  Dashboard: disabled");
    }

    let index_assets = config
        .paper
        .assets
        .iter()
        .filter(|asset| asset.index_weight.is_some())
        .count();
    println!(
        "  Paper account: {} assets ({index_assets} in index)",
        config.paper.assets.len()
    );

    println!();
    println!("Configuration is ready to use.");
    Ok(())
}
