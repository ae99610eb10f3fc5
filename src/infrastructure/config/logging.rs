//! Tracing subscriber setup.

use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};

/// Output format of log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines for a terminal.
    #[default]
    Pretty,
    /// One JSON object per line for log shippers.
    Json,
}

/// `[logging]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive, e.g. `info` or `fundless=debug,tower_http=info`.
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

fn default_level() -> String {
    "info".into()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}

impl LoggingConfig {
    /// Filter from `RUST_LOG`, falling back to the configured level.
    #[must_use]
    pub fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level))
    }

    /// Install the global subscriber. A second call leaves the first in place.
    pub fn init(&self) {
        let builder = fmt().with_env_filter(self.filter());
        let installed = match self.format {
            LogFormat::Json => builder.json().try_init(),
            LogFormat::Pretty => builder.try_init(),
        };

        if installed.is_err() {
            tracing::debug!("Tracing subscriber already installed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Wrapper {
        logging: LoggingConfig,
    }

    #[test]
    fn format_parses_lowercase_names() {
        let parsed: Wrapper = toml::from_str("[logging]\nformat = \"json\"").unwrap();
        assert_eq!(parsed.logging.format, LogFormat::Json);
        assert_eq!(parsed.logging.level, "info");
    }

    #[test]
    fn unknown_format_is_rejected() {
        assert!(toml::from_str::<Wrapper>("[logging]\nformat = \"xml\"").is_err());
    }

    #[test]
    fn init_twice_does_not_panic() {
        let config = LoggingConfig::default();
        config.init();
        config.init();
    }
}
