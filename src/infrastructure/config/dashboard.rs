//! Web dashboard configuration.

use std::time::Duration;

use serde::Deserialize;

const fn default_true() -> bool {
    true
}

/// Web dashboard configuration.
///
/// Credentials and the session secret can be overridden through
/// `DASHBOARD_USERNAME`, `DASHBOARD_PASSWORD` and `DASHBOARD_SECRET_KEY`.
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Serve the dashboard.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Socket address to bind.
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Login username.
    #[serde(default = "default_credential")]
    pub username: String,
    /// Login password.
    #[serde(default = "default_credential")]
    pub password: String,
    /// Key used to sign session cookies. At least 32 characters.
    #[serde(default)]
    pub secret_key: Option<String>,
    /// Allocation chart refresh interval in seconds (default: 20).
    #[serde(default = "default_allocation_refresh_secs")]
    pub allocation_refresh_secs: u64,
    /// Performance chart refresh interval in seconds (default: 300).
    #[serde(default = "default_performance_refresh_secs")]
    pub performance_refresh_secs: u64,
    /// Seconds a session may stay idle before it is dropped (default: 1 day).
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,
}

fn default_bind() -> String {
    "0.0.0.0:8050".to_string()
}

// Placeholder pair until a directory-backed verifier is configured.
fn default_credential() -> String {
    "test".to_string()
}

const fn default_allocation_refresh_secs() -> u64 {
    20
}

const fn default_performance_refresh_secs() -> u64 {
    5 * 60
}

const fn default_session_ttl_secs() -> u64 {
    24 * 60 * 60
}

impl DashboardConfig {
    /// Overlay credential and secret environment variables when set.
    pub fn apply_env(&mut self) {
        if let Ok(username) = std::env::var("DASHBOARD_USERNAME") {
            self.username = username;
        }
        if let Ok(password) = std::env::var("DASHBOARD_PASSWORD") {
            self.password = password;
        }
        if let Ok(secret) = std::env::var("DASHBOARD_SECRET_KEY") {
            self.secret_key = Some(secret);
        }
    }

    #[must_use]
    pub fn allocation_refresh(&self) -> Duration {
        Duration::from_secs(self.allocation_refresh_secs)
    }

    #[must_use]
    pub fn performance_refresh(&self) -> Duration {
        Duration::from_secs(self.performance_refresh_secs)
    }

    #[must_use]
    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            bind: default_bind(),
            username: default_credential(),
            password: default_credential(),
            secret_key: None,
            allocation_refresh_secs: default_allocation_refresh_secs(),
            performance_refresh_secs: default_performance_refresh_secs(),
            session_ttl_secs: default_session_ttl_secs(),
        }
    }
}
