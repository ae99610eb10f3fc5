//! Proactive savings-plan reminders.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{error, info};

use super::router::CommandRouter;

/// Ask the authorized chat about the savings plan every `period`.
///
/// The first reminder is sent one full period after startup.
pub fn spawn_reminder(router: Arc<CommandRouter>, period: Duration) -> JoinHandle<()> {
    info!(period_secs = period.as_secs(), "Savings-plan reminder scheduled");
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            if let Err(e) = router.ask_savings_plan_execution().await {
                error!(
                    chat_id = router.allowed_chat().get(),
                    error = %e,
                    "Failed to send savings-plan reminder"
                );
            }
        }
    })
}
