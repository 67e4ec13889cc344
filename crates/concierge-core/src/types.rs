use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ConciergeError;

// =============================================================================
// Enums
// =============================================================================

/// Coarse intent bucket a guest message is classified into.
///
/// The variant order is the canonical declaration order used by the default
/// catalog; classification itself follows the catalog's keyword table order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Dining,
    Local,
    Spa,
    Transportation,
    RoomService,
    Events,
    /// Fallback bucket for anything that matched no keyword.
    General,
}

impl Category {
    /// All categories in declaration order.
    pub const ALL: [Category; 7] = [
        Category::Dining,
        Category::Local,
        Category::Spa,
        Category::Transportation,
        Category::RoomService,
        Category::Events,
        Category::General,
    ];

    /// Wire name of the category (matches the serde representation).
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Dining => "dining",
            Category::Local => "local",
            Category::Spa => "spa",
            Category::Transportation => "transportation",
            Category::RoomService => "room_service",
            Category::Events => "events",
            Category::General => "general",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ConciergeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ConciergeError::Catalog(format!("unknown category '{}'", s)))
    }
}

/// Temporal hint extracted from a guest message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimePreference {
    /// "tonight", "this evening".
    Tonight,
    Tomorrow,
    /// "weekend", "saturday", "sunday".
    Weekend,
    /// An explicit clock time such as "7pm" or "8:30 am".
    SpecificTime,
}

impl TimePreference {
    pub const ALL: [TimePreference; 4] = [
        TimePreference::Tonight,
        TimePreference::Tomorrow,
        TimePreference::Weekend,
        TimePreference::SpecificTime,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimePreference::Tonight => "tonight",
            TimePreference::Tomorrow => "tomorrow",
            TimePreference::Weekend => "weekend",
            TimePreference::SpecificTime => "specific_time",
        }
    }
}

impl fmt::Display for TimePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimePreference {
    type Err = ConciergeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimePreference::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ConciergeError::Catalog(format!("unknown time preference '{}'", s)))
    }
}

/// Author of a message in a session transcript.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

// =============================================================================
// Session data
// =============================================================================

/// Opaque session identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for SessionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A single committed turn in a session transcript.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    /// Follow-up prompts offered with an assistant reply. Always `None` for
    /// user messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
}

impl Message {
    /// Build a user turn stamped with the current time.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: Role::User,
            content: content.into(),
            timestamp: Utc::now(),
            suggestions: None,
        }
    }

    /// Build an assistant turn stamped with the current time.
    pub fn assistant(content: impl Into<String>, suggestions: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: Role::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
            suggestions: Some(suggestions),
        }
    }
}

/// Findings of a single classification pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub category: Option<Category>,
    pub time_preference: Option<TimePreference>,
}

/// Accumulated classification findings for a session.
///
/// Keys are merged last-write-wins; a key that a later classification leaves
/// unset keeps its previous value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_preference: Option<TimePreference>,
}

impl SessionContext {
    /// Merge a classification into this context.
    pub fn merge(&mut self, findings: &Classification) {
        if let Some(category) = findings.category {
            self.category = Some(category);
        }
        if let Some(time) = findings.time_preference {
            self.time_preference = Some(time);
        }
    }

    /// Category used to select a reply.
    pub fn effective_category(&self) -> Category {
        self.category.unwrap_or(Category::General)
    }

    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.time_preference.is_none()
    }
}

/// One guest conversation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub created_at: DateTime<Utc>,
    pub messages: Vec<Message>,
    pub context: SessionContext,
}

impl Session {
    /// Create an empty session with the given identifier.
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            created_at: Utc::now(),
            messages: Vec::new(),
            context: SessionContext::default(),
        }
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            id: self.id.clone(),
            created_at: self.created_at,
            message_count: self.messages.len(),
            context: self.context,
        }
    }
}

/// Lightweight listing entry for a session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: SessionId,
    pub created_at: DateTime<Utc>,
    pub message_count: usize,
    pub context: SessionContext,
}

/// Reply returned to the caller of `send_message`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConciergeReply {
    pub content: String,
    pub suggestions: Vec<String>,
    pub category: Category,
    /// Advisory score in `[0.85, 1.0)`; never used for branching.
    pub confidence: f64,
}

// =============================================================================
// Tests
// =============================================================================
