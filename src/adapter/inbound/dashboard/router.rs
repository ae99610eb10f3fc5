//! Session-aware navigation.

use std::sync::Arc;

use tracing::info;

use crate::domain::navigation::{route, user_status};
use crate::domain::{Route, SessionId, UserStatus};

use super::session::SessionStore;

/// Everything needed to answer one page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub route: Route,
    pub status: UserStatus,
    /// Pending one-shot message for this session.
    pub flash: Option<String>,
}

/// Maps a path and the session's login flag to a view, applying logouts.
#[derive(Clone)]
pub struct SessionRouter {
    sessions: Arc<SessionStore>,
}

impl SessionRouter {
    #[must_use]
    pub fn new(sessions: Arc<SessionStore>) -> Self {
        Self { sessions }
    }

    #[must_use]
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Route `path` for the request's session, if it has one.
    pub fn navigate(&self, session: Option<SessionId>, path: &str) -> Navigation {
        let identity = session.and_then(|id| self.sessions.user(id));
        let route = route(path, identity.is_some());
        let status = user_status(path, identity.as_deref());

        if route.logout {
            if let Some(id) = session {
                self.sessions.logout(id);
            }
            info!(user = identity.as_deref().unwrap_or_default(), "Dashboard logout");
        }

        Navigation {
            route,
            status,
            flash: session.and_then(|id| self.sessions.take_flash(id)),
        }
    }
}
