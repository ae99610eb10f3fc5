//! Composition root: builds services from [`Config`] and runs the surfaces.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::adapter::inbound::dashboard::{
    self, spawn_refresh, spawn_sweeper, ChartCache, DashboardState, RefreshSchedule, SessionStore,
    StaticCredentials,
};
use crate::adapter::inbound::dashboard::session::SWEEP_PERIOD;
use crate::adapter::outbound::{HoldingsAnalytics, PaperTradingBot};
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::settings::{Config, MIN_SECRET_KEY_LEN};
use crate::port::{PortfolioAnalytics, TradingBot};

/// Which surfaces to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Surfaces {
    pub bot: bool,
    pub dashboard: bool,
}

impl Surfaces {
    /// Everything enabled in the configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            bot: config.telegram.enabled,
            dashboard: config.dashboard.enabled,
        }
    }
}

/// Shared outbound services.
#[derive(Clone)]
pub struct Services {
    pub trading: Arc<dyn TradingBot>,
    pub analytics: Arc<dyn PortfolioAnalytics>,
}

impl Services {
    /// Paper account plus analytics derived from it.
    #[must_use]
    pub fn paper(config: &Config) -> Self {
        let trading: Arc<dyn TradingBot> = Arc::new(PaperTradingBot::new(
            &config.paper,
            config.savings_plan.cost,
            config.savings_plan.base_symbol.clone(),
        ));
        let analytics: Arc<dyn PortfolioAnalytics> =
            Arc::new(HoldingsAnalytics::new(Arc::clone(&trading)));
        Self { trading, analytics }
    }
}

/// Configured session key, or a random one valid for this process only.
#[must_use]
pub fn session_secret(config: &Config) -> String {
    if let Some(secret) = &config.dashboard.secret_key {
        return secret.clone();
    }

    warn!("No dashboard secret key configured; sessions will not survive a restart");
    let mut secret = String::with_capacity(MIN_SECRET_KEY_LEN * 2);
    while secret.len() < MIN_SECRET_KEY_LEN {
        secret.push_str(&uuid::Uuid::new_v4().simple().to_string());
    }
    secret
}

/// Build the dashboard state and start its chart refresh and session sweep tasks.
#[must_use]
pub fn dashboard_state(config: &Config, services: &Services) -> DashboardState {
    let schedule = RefreshSchedule::from(&config.dashboard);
    let charts = Arc::new(ChartCache::new());
    let sessions = Arc::new(
        SessionStore::new(session_secret(config)).with_ttl(config.dashboard.session_ttl()),
    );
    // Tasks run for the process lifetime
    let _tasks = spawn_refresh(Arc::clone(&services.analytics), Arc::clone(&charts), schedule);
    let _sweeper = spawn_sweeper(Arc::clone(&sessions), SWEEP_PERIOD);

    DashboardState::new(
        sessions,
        Arc::new(StaticCredentials::new(
            config.dashboard.username.clone(),
            config.dashboard.password.clone(),
        )),
        charts,
        schedule,
    )
}

/// Serve the web dashboard.
pub async fn run_dashboard(config: &Config, services: &Services) -> Result<()> {
    let listener = TcpListener::bind(&config.dashboard.bind).await?;
    let state = dashboard_state(config, services);
    dashboard::serve(listener, state).await?;
    Ok(())
}

/// Run the Telegram bot.
#[cfg(feature = "telegram")]
pub async fn run_bot(config: &Config, services: &Services) -> Result<()> {
    use crate::adapter::inbound::telegram::bot::{run_command_listener, TelegramTransport};
    use crate::adapter::inbound::telegram::{spawn_reminder, CommandRouter};
    use crate::domain::ChatId;
    use crate::infrastructure::retry::RetryPolicy;

    let token = config
        .telegram
        .bot_token
        .clone()
        .filter(|token| !token.is_empty())
        .ok_or(ConfigError::MissingField {
            field: "TELEGRAM_BOT_TOKEN",
        })?;
    let chat = config.telegram.chat_id.map(ChatId::new).ok_or(ConfigError::MissingField {
        field: "TELEGRAM_CHAT_ID",
    })?;

    let bot = teloxide::Bot::new(token);
    let router = Arc::new(CommandRouter::new(
        chat,
        Arc::clone(&services.trading),
        Arc::new(TelegramTransport::new(bot.clone())),
        config.savings_plan.clone(),
        RetryPolicy::from(&config.retry),
    ));

    if let Some(period) = config.telegram.reminder_interval() {
        spawn_reminder(Arc::clone(&router), period);
    }

    run_command_listener(bot, router).await;
    Ok(())
}

/// Run the Telegram bot (stub when the feature is disabled).
#[cfg(not(feature = "telegram"))]
pub async fn run_bot(_config: &Config, _services: &Services) -> Result<()> {
    warn!("Built without the telegram feature; chat bot disabled");
    Ok(())
}

/// Run the selected surfaces until one of them stops.
pub async fn run(config: &Config, surfaces: Surfaces) -> Result<()> {
    if !surfaces.bot && !surfaces.dashboard {
        return Err(ConfigError::InvalidValue {
            field: "telegram.enabled / dashboard.enabled",
            reason: "nothing to run".to_string(),
        }
        .into());
    }
    // The `bot` command runs the bot even when `telegram.enabled` is false.
    if surfaces.bot {
        config.require_telegram_credentials()?;
    }

    let services = Services::paper(config);
    info!(
        bot = surfaces.bot,
        dashboard = surfaces.dashboard,
        exchange = %config.savings_plan.exchange,
        "Starting FundLess"
    );

    match (surfaces.bot, surfaces.dashboard) {
        (true, true) => {
            tokio::try_join!(run_bot(config, &services), run_dashboard(config, &services))?;
        }
        (true, false) => run_bot(config, &services).await?,
        _ => run_dashboard(config, &services).await?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_secret_is_long_enough() {
        let config = Config::default();
        let secret = session_secret(&config);
        assert!(secret.len() >= MIN_SECRET_KEY_LEN);
        assert_ne!(secret, session_secret(&config));
    }

    #[test]
    fn configured_secret_wins() {
        let mut config = Config::default();
        config.dashboard.secret_key = Some("k".repeat(40));
        assert_eq!(session_secret(&config), "k".repeat(40));
    }

    #[tokio::test]
    async fn bot_surface_requires_credentials_even_when_disabled() {
        let mut config = Config::default();
        config.telegram.enabled = false;
        let err = run(
            &config,
            Surfaces {
                bot: true,
                dashboard: false,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::Config(ConfigError::MissingField {
                field: "TELEGRAM_BOT_TOKEN"
            })
        ));
    }

    #[test]
    fn surfaces_follow_enabled_flags() {
        let mut config = Config::default();
        config.telegram.enabled = false;
        assert_eq!(
            Surfaces::from_config(&config),
            Surfaces {
                bot: false,
                dashboard: true
            }
        );
    }
}
