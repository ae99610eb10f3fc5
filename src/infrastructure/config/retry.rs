//! Retry settings for calls that may hit transient network failures.

use std::time::Duration;

use serde::Deserialize;

/// Fixed-delay retry configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RetryConfig {
    /// Total attempts including the first one.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Pause between attempts (milliseconds).
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

const fn default_max_attempts() -> u32 {
    5
}

const fn default_delay_ms() -> u64 {
    4000
}

impl RetryConfig {
    #[must_use]
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            delay_ms: default_delay_ms(),
        }
    }
}
