//! Inbound message routing.
//!
//! Precedence: exact commands first, then unknown commands, then free text,
//! which goes to the savings-plan conversation while it is planning and to
//! the HODL responder otherwise. Every handler runs behind the
//! [`AuthorizationGuard`]; replies are delivered through the
//! [`RetryPolicy`].

use std::sync::Arc;

use tracing::debug;

use crate::domain::{ChatId, ConversationInput};
use crate::error::HandlerError;
use crate::infrastructure::config::savings_plan::SavingsPlanConfig;
use crate::infrastructure::retry::RetryPolicy;
use crate::port::{ChatTransport, Reply, TradingBot};

use super::auth::AuthorizationGuard;
use super::command::{parse_command, ChatCommand, CommandParseError, COMMAND_KEYBOARD};
use super::conversation::SavingsPlanConversation;
use super::format::{balance_error_replies, holdings_table};

/// A text message received from a chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub chat: ChatId,
    pub text: String,
}

impl ChatMessage {
    pub fn new(chat: ChatId, text: impl Into<String>) -> Self {
        Self {
            chat,
            text: text.into(),
        }
    }
}

/// Handler selected for a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Command(ChatCommand),
    UnknownCommand(String),
    /// Free text consumed by an active conversation.
    ConversationReply,
    /// Free text outside a conversation.
    Hodl,
}

impl Route {
    /// Handler name used in logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Command(command) => command.name(),
            Self::UnknownCommand(_) => "unknown_command",
            Self::ConversationReply => "savings_plan_reply",
            Self::Hodl => "hodl",
        }
    }

    /// Handlers that talk to the exchange show a typing indicator first.
    fn is_slow(&self) -> bool {
        matches!(
            self,
            Self::Command(ChatCommand::Balance | ChatCommand::Index | ChatCommand::SavingsPlan)
                | Self::ConversationReply
        )
    }
}

/// Maps chat messages to handlers and delivers their replies.
pub struct CommandRouter {
    guard: AuthorizationGuard,
    conversation: SavingsPlanConversation,
    trading: Arc<dyn TradingBot>,
    transport: Arc<dyn ChatTransport>,
    retry: RetryPolicy,
    exchange: String,
}

impl CommandRouter {
    #[must_use]
    pub fn new(
        allowed_chat: ChatId,
        trading: Arc<dyn TradingBot>,
        transport: Arc<dyn ChatTransport>,
        settings: SavingsPlanConfig,
        retry: RetryPolicy,
    ) -> Self {
        let exchange = settings.exchange.clone();
        Self {
            guard: AuthorizationGuard::new(allowed_chat),
            conversation: SavingsPlanConversation::new(Arc::clone(&trading), settings, retry),
            trading,
            transport,
            retry,
            exchange,
        }
    }

    #[must_use]
    pub fn conversation(&self) -> &SavingsPlanConversation {
        &self.conversation
    }

    #[must_use]
    pub fn allowed_chat(&self) -> ChatId {
        self.guard.allowed_chat()
    }

    /// Select the handler for `message`.
    #[must_use]
    pub fn route(&self, message: &ChatMessage) -> Route {
        match parse_command(&message.text) {
            Ok(command) => Route::Command(command),
            Err(CommandParseError::UnknownCommand(command)) => Route::UnknownCommand(command),
            Err(CommandParseError::NotACommand) => {
                if self.conversation.state(message.chat).is_planning() {
                    Route::ConversationReply
                } else {
                    Route::Hodl
                }
            }
        }
    }

    /// Handle one inbound message.
    ///
    /// Messages from other chats are dropped silently. Delivery failures are
    /// returned to the caller after they were logged by the guard.
    pub async fn dispatch(&self, message: &ChatMessage) -> Result<(), HandlerError> {
        let route = self.route(message);
        debug!(chat_id = message.chat.get(), route = route.name(), "Routing message");

        self.guard
            .run(message.chat, route.name(), || self.execute(message, route.clone()))
            .await
            .unwrap_or(Ok(()))
    }

    /// Proactively ask the authorized chat whether to run the savings plan.
    pub async fn ask_savings_plan_execution(&self) -> Result<(), HandlerError> {
        let reply = Reply::text("Should I execute your savings plan?")
            .with_options(["/savings_plan", "/cancel"]);
        self.deliver(self.allowed_chat(), &[reply]).await
    }

    async fn execute(&self, message: &ChatMessage, route: Route) -> Result<(), HandlerError> {
        let chat = message.chat;
        if route.is_slow() {
            self.typing(chat).await;
        }

        let replies = match route {
            Route::Command(ChatCommand::Start) => {
                vec![Reply::text("I'm FundLess, please talk to me!")]
            }
            Route::Command(ChatCommand::Balance) => self.balance_replies(false).await,
            Route::Command(ChatCommand::Index) => self.balance_replies(true).await,
            Route::Command(ChatCommand::SavingsPlan) => {
                self.conversation
                    .handle(chat, ConversationInput::StartPlan)
                    .await
            }
            Route::Command(ChatCommand::Cancel) => {
                self.conversation.handle(chat, ConversationInput::Cancel).await
            }
            Route::ConversationReply => {
                self.conversation
                    .handle(chat, ConversationInput::from_reply(&message.text))
                    .await
            }
            Route::UnknownCommand(_) => vec![
                Reply::text("Sorry, I do not know that command."),
                Reply::text("You can use these commands:").with_options(COMMAND_KEYBOARD),
            ],
            Route::Hodl => vec![
                Reply::text("HODL!").remove_keyboard(),
                Reply::text("You can use the following commands:").with_options(COMMAND_KEYBOARD),
            ],
        };

        self.deliver(chat, &replies).await
    }

    async fn balance_replies(&self, index_only: bool) -> Vec<Reply> {
        let (operation, title) = if index_only {
            ("index_balance", "Your current index portfolio:")
        } else {
            ("balance", "--- Your current portfolio: ---")
        };

        let result = self
            .retry
            .run(operation, || {
                if index_only {
                    self.trading.index_balance()
                } else {
                    self.trading.balance()
                }
            })
            .await;

        match result {
            Ok(holdings) => vec![Reply::monospace(holdings_table(title, &holdings))],
            Err(e) => balance_error_replies(&e, &self.exchange),
        }
    }

    async fn typing(&self, chat: ChatId) {
        if let Err(e) = self.transport.typing(chat).await {
            debug!(chat_id = chat.get(), error = %e, "Failed to send typing indicator");
        }
    }

    async fn deliver(&self, chat: ChatId, replies: &[Reply]) -> Result<(), HandlerError> {
        for reply in replies {
            self.retry
                .run("send_message", || self.transport.send(chat, reply))
                .await?;
        }
        Ok(())
    }
}
