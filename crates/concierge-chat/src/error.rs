//! Error types for the session engine.

use concierge_core::error::ConciergeError;
use concierge_core::SessionId;

/// Errors from the session engine.
///
/// Classification and reply selection have total fallbacks, so the only
/// runtime failure is a missing session. `Catalog` is raised while building
/// the engine from configuration.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("session not found: {0}")]
    SessionNotFound(SessionId),
    #[error("catalog error: {0}")]
    Catalog(String),
}

impl From<ConciergeError> for ChatError {
    fn from(err: ConciergeError) -> Self {
        match err {
            ConciergeError::Catalog(msg) => ChatError::Catalog(msg),
            other => ChatError::Catalog(other.to_string()),
        }
    }
}
