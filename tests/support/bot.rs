//! Chat router wired to test doubles.

use std::sync::Arc;
use std::time::Duration;

use fundless::adapter::inbound::telegram::{ChatMessage, CommandRouter};
use fundless::domain::ChatId;
use fundless::infrastructure::retry::RetryPolicy;
use fundless::testkit::domain::{holdings, index_weights, savings_plan, AUTHORIZED_CHAT};
use fundless::testkit::trading::MockTradingBot;
use fundless::testkit::transport::RecordingTransport;
use rust_decimal_macros::dec;

pub struct TestBot {
    pub router: CommandRouter,
    pub trading: Arc<MockTradingBot>,
    pub transport: Arc<RecordingTransport>,
}

impl TestBot {
    /// Router spending 100 USD per plan, retrying five times 4 s apart.
    pub fn new() -> Self {
        Self::with_retry(RetryPolicy::new(5, Duration::from_secs(4)))
    }

    pub fn with_retry(retry: RetryPolicy) -> Self {
        let trading = Arc::new(MockTradingBot::new(holdings(), index_weights()));
        let transport = Arc::new(RecordingTransport::new());
        let router = CommandRouter::new(
            AUTHORIZED_CHAT,
            trading.clone(),
            transport.clone(),
            savings_plan(dec!(100)),
            retry,
        );
        Self {
            router,
            trading,
            transport,
        }
    }

    /// Send `text` from the authorized chat.
    pub async fn say(&self, text: &str) {
        self.say_from(AUTHORIZED_CHAT, text).await;
    }

    pub async fn say_from(&self, chat: ChatId, text: &str) {
        self.router
            .dispatch(&ChatMessage::new(chat, text))
            .await
            .expect("dispatch");
    }

    /// Reply texts sent since the last call.
    pub fn take_texts(&self) -> Vec<String> {
        let texts = self.transport.texts();
        self.transport.clear();
        texts
    }
}
