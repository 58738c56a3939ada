//! Option-token vocabulary.
//!
//! Every selectable option the UI can present is one of a closed set of
//! tokens. Anything that does not parse as a token is free text and is
//! handled by the emergency scanner and the fallback generation path.

use crate::knowledge::{Catalog, Severity};

/// Token for returning to the main menu.
pub const TOKEN_BACK: &str = "back";
/// Standalone action tokens with fixed informational replies.
pub const TOKEN_NOT_SURE: &str = "not-sure";
pub const TOKEN_DESCRIBE_SYMPTOMS: &str = "describe-symptoms";
pub const TOKEN_SCHEDULE_APPOINTMENT: &str = "schedule-appointment";
pub const TOKEN_MONITOR_SYMPTOMS: &str = "monitor-symptoms";
/// Navigation tokens, forwarded to the navigation bridge.
pub const TOKEN_CALL_911: &str = "call-911";
pub const TOKEN_FIND_HOSPITAL: &str = "find-hospital";
pub const TOKEN_FIND_CLINIC: &str = "find-clinic";

/// A recognized user selection.
///
/// The variants form the complete inbound token vocabulary; dispatch
/// over them replaces scattered string comparison at call sites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Return to the main menu, valid in every state.
    Back,
    /// A category id from the catalog.
    Category(String),
    /// A symptom id from the catalog.
    Symptom(String),
    /// A severity selection (`level1`/`level2`/`level3`).
    Level(Severity),
    /// "I'm not sure" helper.
    NotSure,
    /// Prompt to describe symptoms in free text.
    DescribeSymptoms,
    /// Appointment scheduling hint.
    ScheduleAppointment,
    /// Symptom monitoring hint.
    MonitorSymptoms,
    /// Escalation: emergency call screen.
    Call911,
    /// Escalation: hospital locator screen.
    FindHospital,
    /// Escalation: clinic/contacts screen.
    FindClinic,
}

impl Token {
    /// Parses raw input into a token, or `None` for free text.
    ///
    /// Matching is exact (on the trimmed input) against the token
    /// vocabulary, in the fixed precedence order: `back`, category id,
    /// symptom id, level token, standalone action. Category and symptom
    /// ids are resolved against the catalog so an unknown id falls
    /// through to free text instead of producing a dead token.
    pub fn parse(input: &str, catalog: &Catalog) -> Option<Token> {
        let trimmed = input.trim();

        if trimmed == TOKEN_BACK {
            return Some(Token::Back);
        }
        if catalog.category(trimmed).is_some() {
            return Some(Token::Category(trimmed.to_string()));
        }
        if catalog.symptom(trimmed).is_some() {
            return Some(Token::Symptom(trimmed.to_string()));
        }
        if let Some(severity) = Severity::from_token(trimmed) {
            return Some(Token::Level(severity));
        }

        match trimmed {
            TOKEN_NOT_SURE => Some(Token::NotSure),
            TOKEN_DESCRIBE_SYMPTOMS => Some(Token::DescribeSymptoms),
            TOKEN_SCHEDULE_APPOINTMENT => Some(Token::ScheduleAppointment),
            TOKEN_MONITOR_SYMPTOMS => Some(Token::MonitorSymptoms),
            TOKEN_CALL_911 => Some(Token::Call911),
            TOKEN_FIND_HOSPITAL => Some(Token::FindHospital),
            TOKEN_FIND_CLINIC => Some(Token::FindClinic),
            _ => None,
        }
    }
}
