//! Fallback generation contract.
//!
//! The core defines the backend trait; the interaction crate provides
//! the remote-service implementation. Callers are expected to bound the
//! call with a timeout and degrade to a fixed reply on failure.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::session::{ConversationTurn, TurnRole};

/// One entry of the role/text history sent to the generation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnMessage {
    /// `user` or `model`, as the wire protocol expects
    pub role: MessageRole,
    /// The message text
    pub text: String,
}

/// Roles understood by the generation service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Model,
}

impl TurnMessage {
    /// Maps a transcript turn onto a wire message.
    pub fn from_turn(turn: &ConversationTurn) -> Self {
        Self {
            role: match turn.role {
                TurnRole::User => MessageRole::User,
                TurnRole::Bot => MessageRole::Model,
            },
            text: turn.text.clone(),
        }
    }
}

/// An open-ended text-generation backend.
///
/// Invoked only when the emergency scanner found no hit and the state
/// machine classified the input as free text.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Generates a reply for `text` given the ordered turn history.
    async fn generate(&self, history: &[TurnMessage], text: &str) -> Result<String>;
}
