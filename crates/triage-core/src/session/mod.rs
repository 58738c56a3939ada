//! Session domain module.
//!
//! # Module Structure
//!
//! - `model`: Core session domain model (`Session`, title derivation)
//! - `turn`: Conversation turn types (`TurnRole`, `ConversationTurn`)
//! - `user_input`: User input types (`UserInput`)
//! - `repository`: Repository trait for session persistence

mod model;
mod repository;
mod turn;
mod user_input;

pub use model::{derive_title, Session, TITLE_MAX_CHARS};
pub use repository::SessionRepository;
pub use turn::{ConversationTurn, TurnRole};
pub use user_input::UserInput;
