//! Chat transport that records every reply.

use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::ChatId;
use crate::port::{ChatTransport, Reply, TransportError};

/// Records sent replies; queued failures are returned before recording.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<(ChatId, Reply)>>,
    failures: Mutex<VecDeque<TransportError>>,
    typing: Mutex<Vec<ChatId>>,
}

impl RecordingTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next `send` with `error`.
    pub fn fail_next(&self, error: TransportError) {
        self.failures.lock().push_back(error);
    }

    #[must_use]
    pub fn replies(&self) -> Vec<Reply> {
        self.sent.lock().iter().map(|(_, r)| r.clone()).collect()
    }

    /// Reply texts in send order.
    #[must_use]
    pub fn texts(&self) -> Vec<String> {
        self.sent.lock().iter().map(|(_, r)| r.text.clone()).collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sent.lock().is_empty() && self.typing.lock().is_empty()
    }

    #[must_use]
    pub fn typing_count(&self) -> usize {
        self.typing.lock().len()
    }

    pub fn clear(&self) {
        self.sent.lock().clear();
        self.typing.lock().clear();
    }
}

#[async_trait]
impl ChatTransport for RecordingTransport {
    async fn send(&self, chat: ChatId, reply: &Reply) -> Result<(), TransportError> {
        if let Some(error) = self.failures.lock().pop_front() {
            return Err(error);
        }
        self.sent.lock().push((chat, reply.clone()));
        Ok(())
    }

    async fn typing(&self, chat: ChatId) -> Result<(), TransportError> {
        self.typing.lock().push(chat);
        Ok(())
    }
}
