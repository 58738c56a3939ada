//! Triage dialogue domain module.
//!
//! # Module Structure
//!
//! - `token`: closed option-token vocabulary and parsing
//! - `context`: transient dialogue state (`DialogueContext`)
//! - `machine`: token-driven state machine (`apply`)
//! - `composer`: deterministic guidance renderer (`compose`)
//! - `emergency`: free-text emergency keyword scanner (`scan`)

mod composer;
mod context;
mod emergency;
mod machine;
mod token;

pub use composer::{compose, emergency_options, routine_options, Composition};
pub use context::{DialogueContext, DialogueState};
pub use emergency::{scan, EmergencyHit};
pub use machine::{apply, greeting, main_menu_options, StepOutcome, StepResult};
pub use token::{
    Token, TOKEN_BACK, TOKEN_CALL_911, TOKEN_DESCRIBE_SYMPTOMS, TOKEN_FIND_CLINIC,
    TOKEN_FIND_HOSPITAL, TOKEN_MONITOR_SYMPTOMS, TOKEN_NOT_SURE, TOKEN_SCHEDULE_APPOINTMENT,
};
