//! Session storage.
//!
//! [`SessionStore`] is the seam between the session engine and wherever
//! sessions live. Each stored session sits behind its own async mutex so
//! that turns on one session are serialized without blocking others.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{Mutex, RwLock};

use concierge_core::{Session, SessionId};

/// Shared, individually locked session record.
pub type SessionHandle = Arc<Mutex<Session>>;

/// Keyed collection of sessions.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Create and insert an empty session under a fresh, unique id.
    async fn create(&self) -> SessionHandle;

    /// Look up a session.
    async fn get(&self, id: &SessionId) -> Option<SessionHandle>;

    /// Remove a session. Returns whether it existed.
    async fn remove(&self, id: &SessionId) -> bool;

    /// All sessions in creation order.
    async fn list(&self) -> Vec<SessionHandle>;

    /// Remove every session. Returns how many were removed.
    async fn clear(&self) -> usize;

    /// Number of stored sessions.
    async fn len(&self) -> usize;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

struct StoredSession {
    seq: u64,
    handle: SessionHandle,
}

/// Process-local session store.
///
/// Ids combine the creation time in milliseconds with a per-store sequence
/// number, so they stay unique for the lifetime of the store even when many
/// sessions are created within the same millisecond.
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<SessionId, StoredSession>>,
    next_seq: AtomicU64,
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemorySessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            next_seq: AtomicU64::new(0),
        }
    }

    fn next_id(&self) -> (u64, SessionId) {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        let id = format!("session-{}-{}", Utc::now().timestamp_millis(), seq);
        (seq, SessionId::new(id))
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self) -> SessionHandle {
        let (seq, id) = self.next_id();
        let handle = Arc::new(Mutex::new(Session::new(id.clone())));
        self.sessions.write().await.insert(
            id,
            StoredSession {
                seq,
                handle: Arc::clone(&handle),
            },
        );
        handle
    }

    async fn get(&self, id: &SessionId) -> Option<SessionHandle> {
        self.sessions
            .read()
            .await
            .get(id)
            .map(|s| Arc::clone(&s.handle))
    }

    async fn remove(&self, id: &SessionId) -> bool {
        self.sessions.write().await.remove(id).is_some()
    }

    async fn list(&self) -> Vec<SessionHandle> {
        let sessions = self.sessions.read().await;
        let mut entries: Vec<&StoredSession> = sessions.values().collect();
        entries.sort_by_key(|s| s.seq);
        entries.into_iter().map(|s| Arc::clone(&s.handle)).collect()
    }

    async fn clear(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let removed = sessions.len();
        sessions.clear();
        removed
    }

    async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

// =============================================================================
// Tests
// =============================================================================
