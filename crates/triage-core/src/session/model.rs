//! Session domain model.

use serde::{Deserialize, Serialize};

use super::turn::ConversationTurn;

/// Maximum number of characters of the first user message kept as the
/// session title before truncation.
pub const TITLE_MAX_CHARS: usize = 40;

/// A persisted, ordered conversation belonging to one owner.
///
/// This is the "pure" domain model that business logic operates on,
/// independent of any specific storage format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Unique session identifier (UUID format)
    pub id: String,
    /// Identifier of the owning user
    pub owner_id: String,
    /// Human-readable session title, derived from the first user message
    pub title: String,
    /// Timestamp when the session was created (ISO 8601 format)
    pub created_at: String,
    /// Timestamp when the session was last updated (ISO 8601 format)
    pub updated_at: String,
    /// Ordered conversation transcript
    #[serde(default)]
    pub turns: Vec<ConversationTurn>,
}

impl Session {
    /// Creates a new empty session with a derived title.
    pub fn new(owner_id: impl Into<String>, first_user_text: &str) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            owner_id: owner_id.into(),
            title: derive_title(first_user_text),
            created_at: now.clone(),
            updated_at: now,
            turns: Vec::new(),
        }
    }
}

/// Derives a session title from the first user message.
///
/// The text is truncated to [`TITLE_MAX_CHARS`] characters with an
/// ellipsis marker. Derivation happens exactly once; the title never
/// changes afterwards.
pub fn derive_title(first_user_text: &str) -> String {
    let trimmed = first_user_text.trim();
    if trimmed.is_empty() {
        return "New conversation".to_string();
    }
    let mut chars = trimmed.chars();
    let head: String = chars.by_ref().take(TITLE_MAX_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}…")
    } else {
        head
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_title_kept_verbatim() {
        assert_eq!(derive_title("I have a headache"), "I have a headache");
    }

    #[test]
    fn test_long_title_truncated_with_ellipsis() {
        let text = "a".repeat(100);
        let title = derive_title(&text);
        assert_eq!(title.chars().count(), TITLE_MAX_CHARS + 1);
        assert!(title.ends_with('…'));
    }

    #[test]
    fn test_empty_text_gets_placeholder_title() {
        assert_eq!(derive_title("   "), "New conversation");
    }

    #[test]
    fn test_new_session_has_unique_id_and_no_turns() {
        let a = Session::new("owner-1", "hello");
        let b = Session::new("owner-1", "hello");
        assert_ne!(a.id, b.id);
        assert!(a.turns.is_empty());
        assert_eq!(a.title, "hello");
    }
}
