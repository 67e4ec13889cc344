//! Conversational session engine for the hotel concierge.
//!
//! Classifies guest messages by keyword and time pattern, selects canned
//! replies with follow-up suggestions, and keeps per-session history and
//! accumulated context.

pub mod classifier;
pub mod error;
pub mod selector;
pub mod service;
pub mod store;

pub use classifier::MessageClassifier;
pub use error::ChatError;
pub use selector::ResponseSelector;
pub use service::SessionService;
pub use store::{InMemorySessionStore, SessionHandle, SessionStore};
