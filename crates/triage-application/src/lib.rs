//! Application layer for the triage assistant.
//!
//! Coordinates the domain and outer layers: the per-session
//! [`TriageEngine`] turn pipeline, the append-only [`TurnLog`], and the
//! [`SessionService`] over stored sessions.

pub mod engine;
pub mod session_service;
pub mod turn_log;

pub use engine::{EngineReply, TriageEngine, DEFAULT_GENERATION_TIMEOUT, FALLBACK_APOLOGY};
pub use session_service::SessionService;
pub use turn_log::TurnLog;
