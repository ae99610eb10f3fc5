//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file with environment variable overrides
//! for secrets such as `TELEGRAM_BOT_TOKEN` and `DASHBOARD_SECRET_KEY`.
//!
//! # Example
//!
//! ```no_run
//! use fundless::infrastructure::config::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;

use super::dashboard::DashboardConfig;
use super::logging::LoggingConfig;
use super::paper::PaperConfig;
use super::retry::RetryConfig;
use super::savings_plan::SavingsPlanConfig;
use super::telegram::{TelegramAppConfig, MAX_REMINDER_INTERVAL_HOURS};
use crate::error::{ConfigError, Result};

/// Minimum length of the session signing key.
pub const MIN_SECRET_KEY_LEN: usize = 32;

/// Main application configuration.
///
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`]. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Chat bot settings.
    #[serde(default)]
    pub telegram: TelegramAppConfig,

    /// Savings-plan budget, currency and exchange name.
    #[serde(default)]
    pub savings_plan: SavingsPlanConfig,

    /// Retry policy for calls that may fail with network errors.
    #[serde(default)]
    pub retry: RetryConfig,

    /// Web dashboard settings.
    #[serde(default)]
    pub dashboard: DashboardConfig,

    /// Paper account backing the trading service.
    #[serde(default)]
    pub paper: PaperConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// Applies environment overrides before validating.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.telegram.apply_env()?;
        config.dashboard.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the content is malformed
    /// or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Initialize tracing from the `[logging]` section.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    /// Validate configuration values.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        if self.savings_plan.cost <= Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "savings_plan.cost",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.savings_plan.base_symbol.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "savings_plan.base_symbol",
            }
            .into());
        }
        if self.retry.max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "retry.max_attempts",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        if self.telegram.enabled {
            self.require_telegram_credentials()?;
        }
        if let Some(hours) = self.telegram.reminder_interval_hours {
            if hours == 0 || hours > MAX_REMINDER_INTERVAL_HOURS {
                return Err(ConfigError::InvalidValue {
                    field: "telegram.reminder_interval_hours",
                    reason: format!("must be between 1 and {MAX_REMINDER_INTERVAL_HOURS}"),
                }
                .into());
            }
        }

        // Checked even when disabled: the `dashboard` command serves it anyway.
        if let Some(ref secret) = self.dashboard.secret_key {
            if secret.len() < MIN_SECRET_KEY_LEN {
                return Err(ConfigError::InvalidValue {
                    field: "dashboard.secret_key",
                    reason: format!("must be at least {MIN_SECRET_KEY_LEN} characters"),
                }
                .into());
            }
        }
        for (field, secs) in [
            (
                "dashboard.allocation_refresh_secs",
                self.dashboard.allocation_refresh_secs,
            ),
            (
                "dashboard.performance_refresh_secs",
                self.dashboard.performance_refresh_secs,
            ),
            ("dashboard.session_ttl_secs", self.dashboard.session_ttl_secs),
        ] {
            if secs == 0 {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: "must be greater than 0".to_string(),
                }
                .into());
            }
        }
        if self.dashboard.username.is_empty() {
            return Err(ConfigError::MissingField {
                field: "dashboard.username",
            }
            .into());
        }

        let weights: Vec<Decimal> = self
            .paper
            .assets
            .iter()
            .filter_map(|asset| asset.index_weight)
            .collect();
        if weights.iter().any(|w| *w < Decimal::ZERO) {
            return Err(ConfigError::InvalidValue {
                field: "paper.assets.index_weight",
                reason: "must be 0 or greater".to_string(),
            }
            .into());
        }
        let total: Decimal = weights.iter().sum();
        if !weights.is_empty() && (total - Decimal::ONE).abs() > Decimal::new(1, 4) {
            return Err(ConfigError::InvalidValue {
                field: "paper.assets.index_weight",
                reason: format!("weights must sum to 1, got {total}"),
            }
            .into());
        }

        Ok(())
    }

    /// Fail unless the bot token and the authorized chat are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] naming the first missing secret.
    #[allow(clippy::result_large_err)]
    pub fn require_telegram_credentials(&self) -> Result<()> {
        if self.telegram.bot_token.as_deref().map_or(true, str::is_empty) {
            return Err(ConfigError::MissingField {
                field: "TELEGRAM_BOT_TOKEN",
            }
            .into());
        }
        if self.telegram.chat_id.is_none() {
            return Err(ConfigError::MissingField {
                field: "TELEGRAM_CHAT_ID",
            }
            .into());
        }
        Ok(())
    }
}
