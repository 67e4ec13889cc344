//! Application state shared across all route handlers.

use std::sync::Arc;
use std::time::Instant;

use concierge_chat::{ChatError, SessionService};
use concierge_core::ConciergeConfig;

/// Shared application state.
///
/// All fields use `Arc` for cheap cloning across handler tasks. The
/// session service does its own locking.
#[derive(Clone)]
pub struct AppState {
    /// Effective configuration, read-only after startup.
    pub config: Arc<ConciergeConfig>,
    /// Session engine.
    pub service: Arc<SessionService>,
    /// Server start time for uptime calculation.
    pub start_time: Instant,
}

impl AppState {
    /// Create state around an existing service.
    pub fn new(config: ConciergeConfig, service: SessionService) -> Self {
        Self {
            config: Arc::new(config),
            service: Arc::new(service),
            start_time: Instant::now(),
        }
    }

    /// Build the session service from configuration and wrap it.
    pub fn from_config(config: ConciergeConfig) -> Result<Self, ChatError> {
        let service = SessionService::from_config(&config)?;
        Ok(Self::new(config, service))
    }
}
