//! Authorization for chat handlers.

use std::fmt::Display;
use std::future::Future;

use tracing::{error, info, warn};

use crate::domain::ChatId;

/// Lets only the configured chat reach a handler.
///
/// Unauthorized events are logged and dropped without a reply. Errors from
/// an authorized handler are logged and handed back to the caller unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthorizationGuard {
    allowed: ChatId,
}

impl AuthorizationGuard {
    #[must_use]
    pub const fn new(allowed: ChatId) -> Self {
        Self { allowed }
    }

    #[must_use]
    pub const fn allowed_chat(&self) -> ChatId {
        self.allowed
    }

    /// Check if a chat is authorized to send commands.
    #[must_use]
    pub fn is_authorized(&self, incoming: ChatId) -> bool {
        if incoming == self.allowed {
            return true;
        }

        warn!(
            chat_id = incoming.get(),
            "Rejected message from unauthorized chat"
        );
        false
    }

    /// Invoke `handler` if `incoming` is the authorized chat.
    ///
    /// Returns `None` without calling `handler` for any other chat.
    pub async fn run<T, E, F, Fut>(
        &self,
        incoming: ChatId,
        name: &str,
        handler: F,
    ) -> Option<Result<T, E>>
    where
        E: Display,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if !self.is_authorized(incoming) {
            return None;
        }

        info!(handler = name, chat_id = incoming.get(), "Executing handler");

        let result = handler().await;
        if let Err(ref e) = result {
            error!(
                handler = name,
                chat_id = incoming.get(),
                error = %e,
                "Handler failed"
            );
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    const ALLOWED: ChatId = ChatId::new(42);

    #[tokio::test]
    async fn authorized_chat_runs_handler() {
        let guard = AuthorizationGuard::new(ALLOWED);

        let result = guard
            .run(ALLOWED, "start", || async { Ok::<_, String>("hello") })
            .await;

        assert_eq!(result, Some(Ok("hello")));
    }

    #[tokio::test]
    async fn unauthorized_chat_never_invokes_handler() {
        let guard = AuthorizationGuard::new(ALLOWED);
        let invoked = AtomicBool::new(false);

        let result = guard
            .run(ChatId::new(7), "balance", || async {
                invoked.store(true, Ordering::SeqCst);
                Ok::<_, String>(())
            })
            .await;

        assert_eq!(result, None);
        assert!(!invoked.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn handler_errors_are_passed_through() {
        let guard = AuthorizationGuard::new(ALLOWED);

        let result = guard
            .run(ALLOWED, "index", || async { Err::<(), _>("boom".to_string()) })
            .await;

        assert_eq!(result, Some(Err("boom".to_string())));
    }

    #[test]
    fn is_authorized_compares_chat_ids() {
        let guard = AuthorizationGuard::new(ALLOWED);
        assert!(guard.is_authorized(ChatId::new(42)));
        assert!(!guard.is_authorized(ChatId::new(-42)));
    }
}
