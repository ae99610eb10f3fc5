//! Savings-plan conversation engine.
//!
//! Owns the per-chat [`ConversationState`] and performs the side effects the
//! state machine asks for. Events of one chat are handled one at a time by
//! the dispatcher, so each entry has a single writer.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::{info, warn};

use crate::domain::{
    ChatId, ConversationAction, ConversationInput, ConversationState, IndexWeights,
    PendingOrderPlan, AFFIRMATIVE_REPLY, NEGATIVE_REPLY,
};
use crate::infrastructure::config::savings_plan::SavingsPlanConfig;
use crate::infrastructure::retry::RetryPolicy;
use crate::port::{Reply, TradingBot, TradingError};

use super::format::{group_thousands, order_report_replies, plan_error_replies, plan_table};

#[derive(Debug, Default)]
struct Conversation {
    state: ConversationState,
    plan: Option<PendingOrderPlan>,
}

/// Drives the multi-turn savings-plan confirmation flow.
pub struct SavingsPlanConversation {
    trading: Arc<dyn TradingBot>,
    settings: SavingsPlanConfig,
    retry: RetryPolicy,
    conversations: DashMap<ChatId, Conversation>,
}

impl SavingsPlanConversation {
    #[must_use]
    pub fn new(trading: Arc<dyn TradingBot>, settings: SavingsPlanConfig, retry: RetryPolicy) -> Self {
        Self {
            trading,
            settings,
            retry,
            conversations: DashMap::new(),
        }
    }

    /// Current state for `chat`; chats never seen are idle.
    #[must_use]
    pub fn state(&self, chat: ChatId) -> ConversationState {
        self.conversations
            .get(&chat)
            .map_or(ConversationState::Idle, |c| c.state)
    }

    /// Plan awaiting confirmation in `chat`, if any.
    #[must_use]
    pub fn pending_plan(&self, chat: ChatId) -> Option<PendingOrderPlan> {
        self.conversations.get(&chat).and_then(|c| c.plan.clone())
    }

    /// Feed one input into the conversation and return the replies to send.
    pub async fn handle(&self, chat: ChatId, input: ConversationInput) -> Vec<Reply> {
        let (next, action) = self.state(chat).apply(input);

        match action {
            ConversationAction::PresentPlan => self.present_plan(chat).await,
            ConversationAction::SubmitOrder => {
                let plan = self.finish(chat);
                self.submit_order(plan).await
            }
            ConversationAction::AcknowledgeRejection => {
                self.finish(chat);
                vec![Reply::text("Hmmm.. okay.. I will ask you another time").remove_keyboard()]
            }
            ConversationAction::Reprompt => vec![
                Reply::text("Sorry, I didn't understand that."),
                Reply::text("Would you like to proceed or cancel?")
                    .with_options([AFFIRMATIVE_REPLY, "/cancel"]),
            ],
            ConversationAction::AcknowledgeCancel => {
                self.finish(chat);
                info!(chat_id = chat.get(), "User canceled the conversation");
                vec![Reply::text("Bye! I hope we can talk again some day.").remove_keyboard()]
            }
            ConversationAction::Reset => {
                self.finish(chat);
                Vec::new()
            }
            ConversationAction::Pass => {
                debug_assert_eq!(next, ConversationState::Idle);
                Vec::new()
            }
        }
    }

    /// Return `chat` to idle and hand back the discarded plan.
    fn finish(&self, chat: ChatId) -> Option<PendingOrderPlan> {
        self.conversations
            .remove(&chat)
            .and_then(|(_, conversation)| conversation.plan)
    }

    async fn fetch_weights(&self) -> Result<IndexWeights, TradingError> {
        self.retry
            .run("fetch_index_weights", || self.trading.fetch_index_weights())
            .await
    }

    async fn present_plan(&self, chat: ChatId) -> Vec<Reply> {
        let mut replies = vec![Reply::text("Alright! I am computing the optimal buy order...")];

        let weights = match self.fetch_weights().await {
            Ok(weights) => weights,
            Err(e) => {
                warn!(chat_id = chat.get(), error = %e, "Could not compute savings plan");
                self.finish(chat);
                replies.extend(plan_error_replies(&e));
                return replies;
            }
        };

        let plan = PendingOrderPlan::compute(
            weights,
            self.settings.cost,
            self.settings.base_symbol.to_uppercase(),
        );

        replies.push(Reply::monospace(plan_table(&plan)));
        replies.push(Reply::text(format!("You are buying with {}", plan.currency())));
        replies.push(
            Reply::text("Should I proceed?").with_options([AFFIRMATIVE_REPLY, NEGATIVE_REPLY]),
        );

        self.conversations.insert(
            chat,
            Conversation {
                state: ConversationState::Planning,
                plan: Some(plan),
            },
        );

        replies
    }

    async fn submit_order(&self, plan: Option<PendingOrderPlan>) -> Vec<Reply> {
        let mut replies = vec![
            Reply::text(format!(
                "Great! I am buying your crypto on {}",
                self.settings.exchange
            ))
            .remove_keyboard(),
            Reply::text(format!(
                "Your order volume is {} $ ...",
                group_thousands(self.settings.cost, 0)
            )),
        ];

        let weights = match plan {
            Some(plan) => plan.weights().clone(),
            None => match self.fetch_weights().await {
                Ok(weights) => weights,
                Err(e) => {
                    replies.extend(plan_error_replies(&e));
                    return replies;
                }
            },
        };

        // Orders are not idempotent; a failed submission is never retried.
        match self.trading.weighted_buy_order(&weights).await {
            Ok(report) => {
                if report.occurred {
                    warn!(
                        problems = report.symbols.len(),
                        description = %report.description,
                        "Savings plan order had problems"
                    );
                } else {
                    info!("Savings plan order placed");
                }
                replies.extend(order_report_replies(&report));
            }
            Err(e) => {
                warn!(error = %e, "Savings plan order failed");
                replies.extend(plan_error_replies(&e));
            }
        }

        replies
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OrderReport;
    use crate::testkit::domain::{holdings, index_weights, savings_plan, AUTHORIZED_CHAT};
    use crate::testkit::trading::MockTradingBot;
    use rust_decimal_macros::dec;
    use std::time::Duration;

    fn engine(bot: Arc<MockTradingBot>) -> SavingsPlanConversation {
        SavingsPlanConversation::new(
            bot,
            savings_plan(dec!(100)),
            RetryPolicy::new(5, Duration::from_millis(1)),
        )
    }

    fn texts(replies: &[Reply]) -> Vec<&str> {
        replies.iter().map(|r| r.text.as_str()).collect()
    }

    #[tokio::test]
    async fn start_presents_plan_and_waits_for_confirmation() {
        let bot = Arc::new(MockTradingBot::new(holdings(), index_weights()));
        let engine = engine(Arc::clone(&bot));

        let replies = engine.handle(AUTHORIZED_CHAT, ConversationInput::StartPlan).await;

        assert_eq!(engine.state(AUTHORIZED_CHAT), ConversationState::Planning);
        assert!(bot.submitted_orders().is_empty());
        assert!(texts(&replies).contains(&"You are buying with USD"));
        let last = replies.last().unwrap();
        assert_eq!(
            last.keyboard,
            crate::port::Keyboard::Options(vec![
                "Yes, sounds great!".to_string(),
                "Noo!".to_string()
            ])
        );
        assert_eq!(
            engine.pending_plan(AUTHORIZED_CHAT).unwrap().total_cost(),
            dec!(100)
        );
    }

    #[tokio::test]
    async fn confirmation_submits_presented_weights() {
        let bot = Arc::new(MockTradingBot::new(holdings(), index_weights()));
        let engine = engine(Arc::clone(&bot));

        engine.handle(AUTHORIZED_CHAT, ConversationInput::StartPlan).await;
        let replies = engine
            .handle(AUTHORIZED_CHAT, ConversationInput::Confirm)
            .await;

        assert_eq!(engine.state(AUTHORIZED_CHAT), ConversationState::Idle);
        assert_eq!(bot.submitted_orders(), vec![index_weights()]);
        assert!(texts(&replies).contains(&"I did it!"));
        assert!(engine.pending_plan(AUTHORIZED_CHAT).is_none());
    }

    #[tokio::test]
    async fn rejection_submits_nothing() {
        let bot = Arc::new(MockTradingBot::new(holdings(), index_weights()));
        let engine = engine(Arc::clone(&bot));

        engine.handle(AUTHORIZED_CHAT, ConversationInput::StartPlan).await;
        engine.handle(AUTHORIZED_CHAT, ConversationInput::Reject).await;

        assert_eq!(engine.state(AUTHORIZED_CHAT), ConversationState::Idle);
        assert!(bot.submitted_orders().is_empty());
    }

    #[tokio::test]
    async fn weights_failure_resets_to_idle_and_surfaces_message() {
        let bot = Arc::new(MockTradingBot::new(holdings(), index_weights()));
        bot.push_weights(Err(TradingError::Exchange("EGeneral:Invalid arguments".into())));
        let engine = engine(Arc::clone(&bot));

        let replies = engine.handle(AUTHORIZED_CHAT, ConversationInput::StartPlan).await;

        assert_eq!(engine.state(AUTHORIZED_CHAT), ConversationState::Idle);
        assert!(texts(&replies).contains(&"EGeneral:Invalid arguments"));
        assert_eq!(bot.weights_calls(), 1);
    }

    #[tokio::test]
    async fn transient_weights_failure_is_retried() {
        let bot = Arc::new(MockTradingBot::new(holdings(), index_weights()));
        bot.push_weights(Err(TradingError::Network("timeout".into())));
        bot.push_weights(Err(TradingError::Network("timeout".into())));
        let engine = engine(Arc::clone(&bot));

        engine.handle(AUTHORIZED_CHAT, ConversationInput::StartPlan).await;

        assert_eq!(bot.weights_calls(), 3);
        assert_eq!(engine.state(AUTHORIZED_CHAT), ConversationState::Planning);
    }

    #[tokio::test]
    async fn order_failure_is_reported_and_not_retried() {
        let bot = Arc::new(MockTradingBot::new(holdings(), index_weights()));
        bot.set_order_result(Err(TradingError::Network("connection reset".into())));
        let engine = engine(Arc::clone(&bot));

        engine.handle(AUTHORIZED_CHAT, ConversationInput::StartPlan).await;
        let replies = engine
            .handle(AUTHORIZED_CHAT, ConversationInput::Confirm)
            .await;

        assert_eq!(bot.submitted_orders().len(), 1);
        assert_eq!(engine.state(AUTHORIZED_CHAT), ConversationState::Idle);
        assert!(texts(&replies).contains(&"network error: connection reset"));
    }

    #[tokio::test]
    async fn problems_in_report_are_listed() {
        let bot = Arc::new(MockTradingBot::new(holdings(), index_weights()));
        bot.set_order_result(Ok(OrderReport::with_symbol_problems(vec![(
            "BTC".to_string(),
            "insufficient funds".to_string(),
        )])));
        let engine = engine(Arc::clone(&bot));

        engine.handle(AUTHORIZED_CHAT, ConversationInput::StartPlan).await;
        let replies = engine
            .handle(AUTHORIZED_CHAT, ConversationInput::Confirm)
            .await;

        assert!(texts(&replies).contains(&"Problematic coins:\n- BTC: insufficient funds"));
        assert!(!texts(&replies).contains(&"I did it!"));
    }

    #[tokio::test]
    async fn cancel_discards_plan() {
        let bot = Arc::new(MockTradingBot::new(holdings(), index_weights()));
        let engine = engine(Arc::clone(&bot));

        engine.handle(AUTHORIZED_CHAT, ConversationInput::StartPlan).await;
        let replies = engine.handle(AUTHORIZED_CHAT, ConversationInput::Cancel).await;

        assert_eq!(engine.state(AUTHORIZED_CHAT), ConversationState::Idle);
        assert!(engine.pending_plan(AUTHORIZED_CHAT).is_none());
        assert_eq!(replies[0].keyboard, crate::port::Keyboard::Remove);
    }

    #[tokio::test]
    async fn restart_recomputes_plan() {
        let bot = Arc::new(MockTradingBot::new(holdings(), index_weights()));
        let engine = engine(Arc::clone(&bot));

        engine.handle(AUTHORIZED_CHAT, ConversationInput::StartPlan).await;
        engine.handle(AUTHORIZED_CHAT, ConversationInput::StartPlan).await;

        assert_eq!(bot.weights_calls(), 2);
        assert_eq!(engine.state(AUTHORIZED_CHAT), ConversationState::Planning);
    }
}
