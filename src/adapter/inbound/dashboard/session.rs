//! Server-side session store with signed cookies.
//!
//! The cookie only carries a session id and its signature; the login flag
//! and the flash message live in the store. A session exists only while
//! there is something to remember: a logged-in user or a pending flash.
//! Anonymous page views never create one. Idle sessions expire after the
//! configured TTL and are swept periodically. The store is in-memory, so
//! all sessions are lost on restart.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use sha2::{Digest, Sha256};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;

use crate::domain::SessionId;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "fundless_session";

/// Idle time after which a session is dropped, unless configured otherwise.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Sessions kept at most, unless configured otherwise.
pub const DEFAULT_SESSION_CAPACITY: usize = 10_000;

/// How often [`spawn_sweeper`] evicts expired sessions.
pub const SWEEP_PERIOD: Duration = Duration::from_secs(60);

/// Per-browser state.
#[derive(Debug, Clone)]
pub struct Session {
    /// Logged-in identity, if any.
    pub user: Option<String>,
    /// One-shot message shown on the next rendered page.
    pub flash: Option<String>,
    last_seen: Instant,
}

impl Session {
    fn new(user: Option<String>, flash: Option<String>) -> Self {
        Self {
            user,
            flash,
            last_seen: Instant::now(),
        }
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.last_seen.elapsed() >= ttl
    }
}

/// Sessions keyed by id, signed with the configured secret.
pub struct SessionStore {
    secret: String,
    ttl: Duration,
    capacity: usize,
    sessions: DashMap<SessionId, Session>,
}

impl SessionStore {
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ttl: DEFAULT_SESSION_TTL,
            capacity: DEFAULT_SESSION_CAPACITY,
            sessions: DashMap::new(),
        }
    }

    /// Set how long a session may stay idle.
    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Limit the number of anonymous sessions kept for flash messages.
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    fn signature(&self, id: SessionId) -> Vec<u8> {
        let mut hasher = Sha256::new();
        hasher.update(self.secret.as_bytes());
        hasher.update(b".");
        hasher.update(id.to_string().as_bytes());
        hasher.finalize().to_vec()
    }

    /// Cookie value for `id`: `<id>.<hex sha256(secret . id)>`.
    #[must_use]
    pub fn sign(&self, id: SessionId) -> String {
        format!("{id}.{}", hex::encode(self.signature(id)))
    }

    /// Check a cookie value and return the session id it carries.
    #[must_use]
    pub fn verify(&self, cookie: &str) -> Option<SessionId> {
        let (raw_id, signature) = cookie.split_once('.')?;
        let id = SessionId::parse(raw_id)?;
        let provided = hex::decode(signature).ok()?;
        constant_time_eq(&self.signature(id), &provided).then_some(id)
    }

    /// Find the live session a cookie points at and mark it as seen.
    ///
    /// Never creates a session.
    pub fn resolve(&self, cookie: Option<&str>) -> Option<SessionId> {
        let id = cookie.and_then(|value| self.verify(value))?;

        if let Some(mut session) = self.sessions.get_mut(&id) {
            if !session.is_expired(self.ttl) {
                session.last_seen = Instant::now();
                return Some(id);
            }
        }

        if self
            .sessions
            .remove_if(&id, |_, session| session.is_expired(self.ttl))
            .is_some()
        {
            debug!(session = %id, "Session expired");
        } else {
            debug!(session = %id, "Signed cookie for unknown session");
        }
        None
    }

    fn start(&self, session: Session) -> SessionId {
        let id = SessionId::generate();
        self.sessions.insert(id, session);
        id
    }

    #[must_use]
    pub fn user(&self, id: SessionId) -> Option<String> {
        self.sessions.get(&id).and_then(|s| s.user.clone())
    }

    #[must_use]
    pub fn is_authenticated(&self, id: SessionId) -> bool {
        self.sessions.get(&id).is_some_and(|s| s.user.is_some())
    }

    /// Authenticate under a new session id and drop the previous session.
    ///
    /// The caller must hand the returned id to the browser.
    pub fn login(&self, previous: Option<SessionId>, user: impl Into<String>) -> SessionId {
        if let Some(previous) = previous {
            self.sessions.remove(&previous);
        }
        self.start(Session::new(Some(user.into()), None))
    }

    /// Forget the session entirely.
    pub fn logout(&self, id: SessionId) {
        self.sessions.remove(&id);
    }

    /// Store a flash message, starting a session if there is none.
    ///
    /// Returns the session holding the message, or `None` when the store is
    /// full of anonymous sessions and the message was dropped.
    pub fn set_flash(&self, id: Option<SessionId>, message: impl Into<String>) -> Option<SessionId> {
        let message = message.into();
        if let Some(id) = id {
            if let Some(mut session) = self.sessions.get_mut(&id) {
                session.flash = Some(message);
                return Some(id);
            }
        }

        if self.sessions.len() >= self.capacity && self.sweep() == 0 {
            debug!(capacity = self.capacity, "Session store full; flash dropped");
            return None;
        }
        Some(self.start(Session::new(None, Some(message))))
    }

    /// Remove and return the pending flash message.
    ///
    /// An anonymous session has nothing left to remember afterwards and is
    /// removed.
    pub fn take_flash(&self, id: SessionId) -> Option<String> {
        let flash = self.sessions.get_mut(&id).and_then(|mut s| s.flash.take());
        self.sessions
            .remove_if(&id, |_, s| s.user.is_none() && s.flash.is_none());
        flash
    }

    /// Drop every session idle for longer than the TTL.
    ///
    /// Returns the number of sessions removed.
    pub fn sweep(&self) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, session| !session.is_expired(self.ttl));
        before.saturating_sub(self.sessions.len())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Periodically evict expired sessions.
pub fn spawn_sweeper(store: Arc<SessionStore>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
        loop {
            ticker.tick().await;
            let evicted = store.sweep();
            if evicted > 0 {
                debug!(evicted, remaining = store.len(), "Swept idle sessions");
            }
        }
    })
}

/// Extract a cookie value from a `Cookie` header.
#[must_use]
pub fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then_some(value)
    })
}
