//! Emergency keyword scanner.
//!
//! Scans raw free text for urgent-condition keywords. The scan runs
//! before any other interpretation of an input and before fallback
//! generation, so a single input can never produce both an emergency
//! reply and a generated one.

use once_cell::sync::Lazy;

use super::composer::emergency_options;

/// Fixed vocabulary of urgent-condition keywords and escalation words.
/// Matching is case-insensitive substring containment.
static EMERGENCY_KEYWORDS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "emergency",
        "911",
        "can't breathe",
        "cannot breathe",
        "not breathing",
        "chest pain",
        "heart attack",
        "stroke",
        "unconscious",
        "passed out",
        "severe bleeding",
        "bleeding",
        "choking",
        "seizure",
        "overdose",
        "poison",
        "suicide",
    ]
});

/// A detected urgent condition in free text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmergencyHit {
    /// The vocabulary entry that matched.
    pub keyword: &'static str,
}

impl EmergencyHit {
    /// The bot reply for a free-text emergency hit.
    ///
    /// The wording is fixed; the option set is exactly the composer's
    /// level-3 escalation set so both entry points share one path.
    pub fn response_text(&self) -> String {
        concat!(
            "This sounds like it could be an emergency.\n",
            "If you or someone near you is in immediate danger, call 911 now.\n",
            "I can also help you find the nearest hospital."
        )
        .to_string()
    }

    /// Option tokens presented with the emergency reply.
    pub fn options(&self) -> Vec<String> {
        emergency_options()
    }
}

/// Scans free text for emergency keywords.
///
/// Stateless and infallible: no match is `None`, never an error. The
/// caller must not mutate dialogue state on a hit, so the user can
/// resume a pending selection afterwards.
pub fn scan(text: &str) -> Option<EmergencyHit> {
    let haystack = text.to_lowercase();
    EMERGENCY_KEYWORDS
        .iter()
        .find(|keyword| haystack.contains(*keyword))
        .map(|keyword| EmergencyHit { keyword })
}
