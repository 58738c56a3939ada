//! Storage DTOs for sessions.
//!
//! The DTO layer isolates the on-disk schema from the domain model so
//! the storage format can evolve without touching the engine. Fields
//! added later must carry serde defaults; `version` identifies the
//! schema a file was written with.

use serde::{Deserialize, Serialize};
use triage_core::error::TriageError;
use triage_core::session::{ConversationTurn, Session, TurnRole};
use triage_core::Result;

/// Current on-disk schema version.
pub const SCHEMA_VERSION: u32 = 1;

fn default_version() -> u32 {
    SCHEMA_VERSION
}

/// On-disk representation of a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionDoc {
    #[serde(default = "default_version")]
    pub version: u32,
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub turns: Vec<TurnDoc>,
}

/// On-disk representation of a single turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnDoc {
    pub id: String,
    pub role: String,
    pub text: String,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presented_options: Option<Vec<String>>,
}

impl SessionDoc {
    /// Maps a domain session onto the storage schema.
    pub fn from_domain(session: &Session) -> Self {
        Self {
            version: SCHEMA_VERSION,
            id: session.id.clone(),
            owner_id: session.owner_id.clone(),
            title: session.title.clone(),
            created_at: session.created_at.clone(),
            updated_at: session.updated_at.clone(),
            turns: session.turns.iter().map(TurnDoc::from_domain).collect(),
        }
    }

    /// Maps the storage schema back onto the domain model.
    pub fn into_domain(self) -> Result<Session> {
        let turns = self
            .turns
            .into_iter()
            .map(TurnDoc::into_domain)
            .collect::<Result<Vec<_>>>()?;
        Ok(Session {
            id: self.id,
            owner_id: self.owner_id,
            title: self.title,
            created_at: self.created_at,
            updated_at: self.updated_at,
            turns,
        })
    }
}

impl TurnDoc {
    fn from_domain(turn: &ConversationTurn) -> Self {
        Self {
            id: turn.id.clone(),
            role: match turn.role {
                TurnRole::User => "user".to_string(),
                TurnRole::Bot => "bot".to_string(),
            },
            text: turn.text.clone(),
            timestamp: turn.timestamp.clone(),
            presented_options: turn.presented_options.clone(),
        }
    }

    fn into_domain(self) -> Result<ConversationTurn> {
        let role = match self.role.as_str() {
            "user" => TurnRole::User,
            "bot" => TurnRole::Bot,
            other => {
                return Err(TriageError::Serialization {
                    format: "TOML".to_string(),
                    message: format!("unknown turn role '{other}'"),
                })
            }
        };
        Ok(ConversationTurn {
            id: self.id,
            role,
            text: self.text,
            timestamp: self.timestamp,
            presented_options: self.presented_options,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_session() -> Session {
        let mut session = Session::new("owner-1", "I feel dizzy");
        session.turns.push(ConversationTurn::user("I feel dizzy"));
        session
            .turns
            .push(ConversationTurn::bot("How severe is it?", Some(vec!["back".to_string()])));
        session
    }

    #[test]
    fn test_domain_round_trip_is_lossless() {
        let session = sample_session();
        let doc = SessionDoc::from_domain(&session);
        let restored = doc.into_domain().unwrap();
        assert_eq!(restored, session);
    }

    #[test]
    fn test_unknown_role_is_a_serialization_error() {
        let doc = TurnDoc {
            id: "t-1".to_string(),
            role: "moderator".to_string(),
            text: "hi".to_string(),
            timestamp: "2024-01-01T00:00:00Z".to_string(),
            presented_options: None,
        };
        assert!(doc.into_domain().is_err());
    }

    #[test]
    fn test_version_defaults_when_missing() {
        let toml_text = r#"
            id = "s-1"
            owner_id = "owner-1"
            title = "hello"
            created_at = "2024-01-01T00:00:00Z"
            updated_at = "2024-01-01T00:00:00Z"
        "#;
        let doc: SessionDoc = toml::from_str(toml_text).unwrap();
        assert_eq!(doc.version, SCHEMA_VERSION);
        assert!(doc.turns.is_empty());
    }
}
