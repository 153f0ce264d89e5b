//! Server-side sessions keyed by a signed cookie.
//!
//! A session is created the first time a browser reaches a session-aware
//! route. The browser only ever holds the opaque [`SessionId`]; the access
//! token itself stays in the [`SessionStore`].

use std::{collections::HashMap, fmt, future::Future};

use axum_extra::extract::{
    SignedCookieJar,
    cookie::{Cookie, SameSite},
};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use tokio::sync::RwLock;

pub const SESSION_COOKIE_NAME: &str = "relay.sid";

/// Opaque identifier of a browser session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Generates a fresh identifier from 32 random bytes.
    pub fn generate() -> Self {
        let mut bytes = [0u8; 32];
        rand::rng().fill_bytes(&mut bytes);
        Self(URL_SAFE_NO_PAD.encode(bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SessionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Storage for the access token of each session.
///
/// Implementations serialize access per session key. A token is only ever
/// written after a successful code exchange.
pub trait SessionStore: Send + Sync + 'static {
    /// Returns the access token held by the session, if any.
    fn get(&self, id: &SessionId) -> impl Future<Output = Option<String>> + Send;

    /// Stores the access token for the session.
    fn set(&self, id: &SessionId, token: String) -> impl Future<Output = ()> + Send;
}

struct Entry {
    token: String,
    last_seen: DateTime<Utc>,
}

/// In-process session store with idle expiry.
///
/// An entry not read or written for longer than the configured TTL reads as
/// absent. Expired entries are removed when read, on every `set`, and by
/// [`purge_expired`](Self::purge_expired), which the server runs periodically.
/// Nothing survives a process restart.
pub struct MemorySessionStore {
    ttl: Duration,
    entries: RwLock<HashMap<SessionId, Entry>>,
}

impl MemorySessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Number of live sessions currently holding a token.
    pub async fn len(&self) -> usize {
        let now = Utc::now();
        let entries = self.entries.read().await;
        entries
            .values()
            .filter(|entry| !self.is_expired(entry, now))
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Number of entries held in memory, expired ones not yet removed included.
    pub async fn stored_len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Drops every expired entry and returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !self.is_expired(entry, now));
        before - entries.len()
    }

    fn is_expired(&self, entry: &Entry, now: DateTime<Utc>) -> bool {
        now - entry.last_seen > self.ttl
    }
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::new(Duration::minutes(i64::from(
            crate::config::DEFAULT_SESSION_TTL_MINUTES,
        )))
    }
}

impl SessionStore for MemorySessionStore {
    async fn get(&self, id: &SessionId) -> Option<String> {
        let now = Utc::now();
        let mut entries = self.entries.write().await;

        let expired = match entries.get_mut(id) {
            Some(entry) if !self.is_expired(entry, now) => {
                entry.last_seen = now;
                return Some(entry.token.clone());
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            entries.remove(id);
        }
        None
    }

    async fn set(&self, id: &SessionId, token: String) {
        let now = Utc::now();
        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| !self.is_expired(entry, now));
        entries.insert(
            id.clone(),
            Entry {
                token,
                last_seen: now,
            },
        );
    }
}

/// Resolves the session of the current request.
///
/// A missing cookie, or one whose signature does not verify, starts a new
/// session and adds its cookie to the returned jar.
pub fn resolve(jar: SignedCookieJar, secure: bool) -> (SignedCookieJar, SessionId) {
    if let Some(cookie) = jar.get(SESSION_COOKIE_NAME) {
        if !cookie.value().is_empty() {
            let id = SessionId::from(cookie.value());
            return (jar, id);
        }
    }

    let id = SessionId::generate();
    let jar = jar.add(session_cookie(&id, secure));
    (jar, id)
}

/// Builds the session cookie. It carries no `Max-Age`, so it lives for the
/// browser session while the server-side entry follows the store's TTL.
pub fn session_cookie(id: &SessionId, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, id.to_string()))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .build()
}
