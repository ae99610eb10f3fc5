//! Outbound chat transport port.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::ChatId;

/// Delivery failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Temporary connectivity problem.
    #[error("network error: {0}")]
    Network(String),

    /// The chat API refused the request.
    #[error("chat API error: {0}")]
    Api(String),
}

impl TransportError {
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

/// How the reply text is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReplyFormat {
    #[default]
    Plain,
    /// Fixed-width block, used for tables.
    Monospace,
}

/// Reply keyboard attached to a message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Keyboard {
    /// Leave the client's keyboard untouched.
    #[default]
    Keep,
    /// One-time keyboard with a single row of options.
    Options(Vec<String>),
    /// Remove a previously shown keyboard.
    Remove,
}

/// One outbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub format: ReplyFormat,
    pub keyboard: Keyboard,
}

impl Reply {
    /// Plain text reply.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: ReplyFormat::Plain,
            keyboard: Keyboard::Keep,
        }
    }

    /// Fixed-width reply.
    pub fn monospace(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: ReplyFormat::Monospace,
            keyboard: Keyboard::Keep,
        }
    }

    /// Attach a one-time keyboard with the given options.
    #[must_use]
    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keyboard = Keyboard::Options(options.into_iter().map(Into::into).collect());
        self
    }

    /// Remove any keyboard shown to the user.
    #[must_use]
    pub fn remove_keyboard(mut self) -> Self {
        self.keyboard = Keyboard::Remove;
        self
    }
}

/// Sends replies to a chat.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, chat: ChatId, reply: &Reply) -> Result<(), TransportError>;

    /// Show a "typing" indicator while a slow handler runs.
    async fn typing(&self, chat: ChatId) -> Result<(), TransportError>;
}
