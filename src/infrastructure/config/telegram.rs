//! Telegram bot configuration.

use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

/// Upper bound for `reminder_interval_hours` (one year).
pub const MAX_REMINDER_INTERVAL_HOURS: u64 = 24 * 365;

const SECS_PER_HOUR: u64 = 60 * 60;

const fn default_true() -> bool {
    true
}

/// Telegram bot configuration.
///
/// The bot token and the authorized chat are secrets; they are read from
/// `TELEGRAM_BOT_TOKEN` and `TELEGRAM_CHAT_ID` and override the file values.
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramAppConfig {
    /// Run the chat bot.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Bot API token obtained from BotFather.
    #[serde(default)]
    pub bot_token: Option<String>,
    /// The only chat allowed to talk to the bot.
    #[serde(default)]
    pub chat_id: Option<i64>,
    /// Hours between proactive savings-plan reminders; disabled when unset.
    #[serde(default)]
    pub reminder_interval_hours: Option<u64>,
}

impl Default for TelegramAppConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            bot_token: None,
            chat_id: None,
            reminder_interval_hours: None,
        }
    }
}

impl TelegramAppConfig {
    /// Overlay `TELEGRAM_BOT_TOKEN` and `TELEGRAM_CHAT_ID` when set.
    ///
    /// # Errors
    ///
    /// Returns an error if `TELEGRAM_CHAT_ID` is not an integer.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(token) = std::env::var("TELEGRAM_BOT_TOKEN") {
            self.bot_token = Some(token);
        }
        if let Ok(raw) = std::env::var("TELEGRAM_CHAT_ID") {
            let chat_id = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                field: "TELEGRAM_CHAT_ID",
                reason: format!("expected an integer chat id, got {raw:?}"),
            })?;
            self.chat_id = Some(chat_id);
        }
        Ok(())
    }

    /// Period between reminders, if enabled.
    #[must_use]
    pub fn reminder_interval(&self) -> Option<Duration> {
        self.reminder_interval_hours
            .map(|hours| Duration::from_secs(hours.saturating_mul(SECS_PER_HOUR)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reminder_interval_converts_hours() {
        let config = TelegramAppConfig {
            reminder_interval_hours: Some(24),
            ..TelegramAppConfig::default()
        };
        assert_eq!(config.reminder_interval(), Some(Duration::from_secs(86_400)));
        assert_eq!(TelegramAppConfig::default().reminder_interval(), None);
    }

    #[test]
    fn huge_reminder_interval_saturates() {
        let config = TelegramAppConfig {
            reminder_interval_hours: Some(u64::MAX),
            ..TelegramAppConfig::default()
        };
        assert_eq!(config.reminder_interval(), Some(Duration::from_secs(u64::MAX)));
    }
}
