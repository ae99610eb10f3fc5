//! Teloxide binding for the chat router.
//!
//! Requires the `telegram` feature to be enabled.

use std::sync::Arc;

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{BotCommand, ChatAction, KeyboardButton, KeyboardMarkup, KeyboardRemove, ParseMode};
use teloxide::utils::markdown;
use teloxide::RequestError;
use tracing::{error, info, warn};

use crate::domain::ChatId as ChatIdentity;
use crate::port::{ChatTransport, Keyboard, Reply, ReplyFormat, TransportError};

use super::command::bot_commands;
use super::router::{ChatMessage, CommandRouter};

/// [`ChatTransport`] backed by the Telegram Bot API.
#[derive(Clone)]
pub struct TelegramTransport {
    bot: Bot,
}

impl TelegramTransport {
    #[must_use]
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

fn map_request_error(err: RequestError) -> TransportError {
    if matches!(
        err,
        RequestError::Network(_) | RequestError::Io(_) | RequestError::RetryAfter(_)
    ) {
        TransportError::Network(err.to_string())
    } else {
        TransportError::Api(err.to_string())
    }
}

fn keyboard(options: &[String]) -> KeyboardMarkup {
    let row: Vec<KeyboardButton> = options.iter().map(KeyboardButton::new).collect();
    KeyboardMarkup::new(vec![row])
        .resize_keyboard()
        .one_time_keyboard()
}

#[async_trait]
impl ChatTransport for TelegramTransport {
    async fn send(&self, chat: ChatIdentity, reply: &Reply) -> Result<(), TransportError> {
        let chat_id = ChatId(chat.get());
        let mut request = match reply.format {
            ReplyFormat::Plain => self.bot.send_message(chat_id, reply.text.clone()),
            ReplyFormat::Monospace => self
                .bot
                .send_message(chat_id, markdown::code_block(&reply.text))
                .parse_mode(ParseMode::MarkdownV2),
        };

        match &reply.keyboard {
            Keyboard::Keep => {}
            Keyboard::Options(options) => request = request.reply_markup(keyboard(options)),
            Keyboard::Remove => request = request.reply_markup(KeyboardRemove::new()),
        }

        request.await.map(|_| ()).map_err(map_request_error)
    }

    async fn typing(&self, chat: ChatIdentity) -> Result<(), TransportError> {
        self.bot
            .send_chat_action(ChatId(chat.get()), ChatAction::Typing)
            .await
            .map(|_| ())
            .map_err(map_request_error)
    }
}

/// Listen for chat messages and dispatch them until the process stops.
///
/// Updates of one chat are processed sequentially by the teloxide
/// dispatcher. Handler failures are logged here and never stop the loop.
pub async fn run_command_listener(bot: Bot, router: Arc<CommandRouter>) {
    // Register commands with Telegram so they appear in the "/" menu
    if let Err(e) = register_bot_commands(&bot).await {
        warn!(error = %e, "Failed to register bot commands with Telegram");
    }

    info!(
        chat_id = router.allowed_chat().get(),
        "Telegram command listener started"
    );

    teloxide::repl(bot, move |msg: Message| {
        let router = Arc::clone(&router);
        async move {
            let Some(text) = msg.text() else {
                return respond(());
            };

            let message = ChatMessage::new(ChatIdentity::new(msg.chat.id.0), text);
            if let Err(e) = router.dispatch(&message).await {
                error!(
                    chat_id = msg.chat.id.0,
                    error = %e,
                    "Unhandled error while processing chat message"
                );
            }

            respond(())
        }
    })
    .await;
}

/// Register bot commands with Telegram for the "/" menu.
async fn register_bot_commands(bot: &Bot) -> Result<(), RequestError> {
    let commands: Vec<BotCommand> = bot_commands()
        .into_iter()
        .map(|(cmd, desc)| BotCommand::new(cmd, desc))
        .collect();

    bot.set_my_commands(commands).await?;
    info!("Registered bot commands with Telegram");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyboard_has_one_row_with_all_options() {
        let markup = keyboard(&["Yes, sounds great!".to_string(), "Noo!".to_string()]);
        assert_eq!(markup.keyboard.len(), 1);
        assert_eq!(markup.keyboard[0].len(), 2);
        assert_eq!(markup.keyboard[0][1].text, "Noo!");
    }

    #[test]
    fn retry_after_is_treated_as_transient() {
        let err = map_request_error(RequestError::RetryAfter(
            teloxide::types::Seconds::from_seconds(3),
        ));
        assert!(err.is_transient());
    }
}
