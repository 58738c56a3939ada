//! Domain layer of the conversational triage engine.
//!
//! Contains the immutable symptom catalog, the option-token vocabulary,
//! the dialogue state machine, the emergency scanner, the response
//! composer, the session/turn models, and the contracts (traits) that
//! the infrastructure and interaction crates implement.

pub mod error;
pub mod generation;
pub mod knowledge;
pub mod navigation;
pub mod session;
pub mod triage;

// Re-export common error type
pub use error::{Result, TriageError};
