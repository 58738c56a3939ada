//! Conversation turn types.

use serde::{Deserialize, Serialize};

/// Who authored a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    /// The person using the assistant.
    User,
    /// The assistant.
    Bot,
}

/// A single message within a session.
///
/// Turns are immutable once created; the transcript only ever appends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// Unique turn identifier (UUID format)
    pub id: String,
    /// Who authored the turn
    pub role: TurnRole,
    /// The message text
    pub text: String,
    /// Timestamp when the turn was created (ISO 8601 format)
    pub timestamp: String,
    /// Option tokens presented alongside a bot turn, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presented_options: Option<Vec<String>>,
}

impl ConversationTurn {
    /// Creates a user turn stamped with the current time.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role: TurnRole::User,
            text: text.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            presented_options: None,
        }
    }

    /// Creates a bot turn stamped with the current time.
    pub fn bot(text: impl Into<String>, presented_options: Option<Vec<String>>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role: TurnRole::Bot,
            text: text.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            presented_options,
        }
    }
}
