//! Telegram command handling.
//!
//! Routes chat messages from the single authorized chat to the command
//! handlers and the savings-plan conversation. The transport-independent
//! pieces live here; the teloxide binding is in [`bot`].

mod auth;
mod command;
mod conversation;
mod format;
mod reminder;
mod router;

#[cfg(feature = "telegram")]
pub mod bot;

pub use auth::AuthorizationGuard;
pub use command::{bot_commands, parse_command, ChatCommand, CommandParseError, COMMAND_KEYBOARD};
pub use conversation::SavingsPlanConversation;
pub use format::{group_thousands, order_report_replies};
pub use reminder::spawn_reminder;
pub use router::{ChatMessage, CommandRouter, Route};
