//! Session service: central coordinator wiring store, classifier, and selector.
//!
//! Every inbound message is handled under its session's lock: append the
//! user turn, classify, merge context, select a reply, append the assistant
//! turn. Readers take the same lock, so they only ever see whole pairs.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::Mutex;
use tracing::{debug, info};

use concierge_core::catalog::Catalog;
use concierge_core::{ConciergeConfig, ConciergeReply, Message, Session, SessionId, SessionSummary};

use crate::classifier::MessageClassifier;
use crate::error::ChatError;
use crate::selector::ResponseSelector;
use crate::store::{InMemorySessionStore, SessionStore};

/// Orchestrates the session lifecycle and message handling.
pub struct SessionService {
    store: Arc<dyn SessionStore>,
    classifier: MessageClassifier,
    selector: ResponseSelector,
    rng: Mutex<StdRng>,
}

impl SessionService {
    /// Assemble a service from its parts.
    pub fn new(
        store: Arc<dyn SessionStore>,
        classifier: MessageClassifier,
        selector: ResponseSelector,
        rng: StdRng,
    ) -> Self {
        Self {
            store,
            classifier,
            selector,
            rng: Mutex::new(rng),
        }
    }

    /// Build an in-memory service from configuration.
    ///
    /// Uses `chat.rng_seed` when set, otherwise seeds from the OS.
    pub fn from_config(config: &ConciergeConfig) -> Result<Self, ChatError> {
        let rng = match config.chat.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(&config.catalog, rng)
    }

    /// Build a fully deterministic in-memory service.
    pub fn with_seed(catalog: &Catalog, seed: u64) -> Result<Self, ChatError> {
        Self::with_rng(catalog, StdRng::seed_from_u64(seed))
    }

    fn with_rng(catalog: &Catalog, rng: StdRng) -> Result<Self, ChatError> {
        let classifier = MessageClassifier::from_catalog(catalog)?;
        let selector = ResponseSelector::from_catalog(catalog)?;
        Ok(Self::new(
            Arc::new(InMemorySessionStore::new()),
            classifier,
            selector,
            rng,
        ))
    }

    /// Create a new, empty session.
    pub async fn create_session(&self) -> Session {
        let handle = self.store.create().await;
        let session = handle.lock().await.clone();
        info!(session_id = %session.id, "Session created");
        session
    }

    /// Handle one guest message and return the assistant's reply.
    ///
    /// Fails with [`ChatError::SessionNotFound`] if the session does not
    /// exist. Text is not validated; empty text is answered from the
    /// `general` bucket.
    pub async fn send_message(
        &self,
        session_id: &SessionId,
        text: &str,
    ) -> Result<ConciergeReply, ChatError> {
        let handle = self
            .store
            .get(session_id)
            .await
            .ok_or_else(|| ChatError::SessionNotFound(session_id.clone()))?;

        let mut session = handle.lock().await;
        session.messages.push(Message::user(text));

        let findings = self.classifier.classify(text);
        session.context.merge(&findings);
        let category = session.context.effective_category();

        let reply = {
            let mut rng = self.rng.lock().await;
            self.selector.select(category, &session.context, &mut *rng)
        };

        session
            .messages
            .push(Message::assistant(reply.content.clone(), reply.suggestions.clone()));

        debug!(
            session_id = %session_id,
            category = %category,
            time_preference = ?session.context.time_preference,
            matched = findings.category.is_some(),
            messages = session.messages.len(),
            "Message handled"
        );

        Ok(reply)
    }

    /// Message history for a session, or an empty list if it does not exist.
    pub async fn get_conversation_history(&self, session_id: &SessionId) -> Vec<Message> {
        match self.store.get(session_id).await {
            Some(handle) => handle.lock().await.messages.clone(),
            None => Vec::new(),
        }
    }

    /// Delete a session. Returns whether it existed.
    pub async fn delete_session(&self, session_id: &SessionId) -> bool {
        let removed = self.store.remove(session_id).await;
        if removed {
            info!(session_id = %session_id, "Session deleted");
        }
        removed
    }

    /// Snapshot of a single session.
    pub async fn get_session(&self, session_id: &SessionId) -> Option<Session> {
        let handle = self.store.get(session_id).await?;
        let session = handle.lock().await.clone();
        Some(session)
    }

    /// Summaries of all open sessions in creation order.
    pub async fn list_sessions(&self) -> Vec<SessionSummary> {
        let mut summaries = Vec::new();
        for handle in self.store.list().await {
            summaries.push(handle.lock().await.summary());
        }
        summaries
    }

    /// Number of open sessions.
    pub async fn session_count(&self) -> usize {
        self.store.len().await
    }

    /// Tear down every session.
    pub async fn clear(&self) -> usize {
        let removed = self.store.clear().await;
        info!(removed, "Session store cleared");
        removed
    }
}

// =============================================================================
// Tests
// =============================================================================
