//! Deterministic response composer.
//!
//! Renders a symptom + severity pair into structured guidance text and
//! the follow-up option set. This is the only place a severity level is
//! translated into which escalation affordances the user sees next.

use crate::knowledge::{Severity, Symptom};

use super::token::{
    TOKEN_BACK, TOKEN_CALL_911, TOKEN_FIND_CLINIC, TOKEN_FIND_HOSPITAL, TOKEN_MONITOR_SYMPTOMS,
    TOKEN_SCHEDULE_APPOINTMENT,
};

/// Static closing block appended to every composition.
const RESOURCE_FOOTER: &str = "\
24/7 health hotline: 1-800-555-0199
Emergency rooms are open around the clock; urgent care hours vary by location.";

/// A composed triage result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composition {
    /// Structured guidance text, ready to render verbatim.
    pub text: String,
    /// Follow-up option tokens for this result.
    pub options: Vec<String>,
}

/// The escalation option set shown for level-3 results and free-text
/// emergency hits. Both paths must present the identical set.
pub fn emergency_options() -> Vec<String> {
    vec![
        TOKEN_CALL_911.to_string(),
        TOKEN_FIND_HOSPITAL.to_string(),
        TOKEN_BACK.to_string(),
    ]
}

/// The option set shown for level-1 and level-2 results.
pub fn routine_options() -> Vec<String> {
    vec![
        TOKEN_MONITOR_SYMPTOMS.to_string(),
        TOKEN_SCHEDULE_APPOINTMENT.to_string(),
        TOKEN_FIND_CLINIC.to_string(),
        TOKEN_BACK.to_string(),
    ]
}

/// Composes the guidance text for a symptom at the chosen severity.
///
/// Structure is fixed:
/// 1. Header with symptom name and one severity mark per level
/// 2. Descriptor bullets for the chosen level
/// 3. "Recommended actions" bullets, always present
/// 4. `EMERGENCY ACTIONS` bullets at level 3, otherwise
///    "When to seek help" bullets
/// 5. Static resource footer
pub fn compose(symptom: &Symptom, severity: Severity) -> Composition {
    let mut text = String::new();

    text.push_str(&format!(
        "{} — severity {}\n\n",
        symptom.name,
        severity.marks()
    ));

    for descriptor in symptom.descriptors(severity) {
        text.push_str(&format!("• {}\n", descriptor));
    }

    text.push_str("\nRecommended actions:\n");
    for step in symptom.next_steps {
        text.push_str(&format!("• {}\n", step));
    }

    if severity.is_emergency() {
        text.push_str("\nEMERGENCY ACTIONS:\n");
        for action in symptom.emergency_actions {
            text.push_str(&format!("• {}\n", action));
        }
    } else {
        text.push_str("\nWhen to seek help:\n");
        for hint in symptom.when_to_seek_help {
            text.push_str(&format!("• {}\n", hint));
        }
    }

    text.push('\n');
    text.push_str(RESOURCE_FOOTER);

    let options = if severity.is_emergency() {
        emergency_options()
    } else {
        routine_options()
    };

    Composition { text, options }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::catalog;

    #[test]
    fn test_emergency_section_iff_level_three() {
        for symptom in catalog().symptoms() {
            for sev in Severity::ALL {
                let composed = compose(symptom, sev);
                let has_emergency = composed.text.contains("EMERGENCY ACTIONS");
                let has_seek_help = composed.text.contains("When to seek help");
                if sev == Severity::Three {
                    assert!(has_emergency, "level 3 missing emergency block: {}", symptom.id);
                    assert!(!has_seek_help);
                } else {
                    assert!(has_seek_help, "level {:?} missing seek-help block: {}", sev, symptom.id);
                    assert!(!has_emergency);
                }
            }
        }
    }

    #[test]
    fn test_recommended_actions_always_present() {
        for symptom in catalog().symptoms() {
            for sev in Severity::ALL {
                let composed = compose(symptom, sev);
                assert!(composed.text.contains("Recommended actions:"));
                assert!(composed.text.contains(RESOURCE_FOOTER));
            }
        }
    }

    #[test]
    fn test_option_sets_by_level() {
        let fever = catalog().symptom("fever").unwrap();
        assert_eq!(
            compose(fever, Severity::Three).options,
            vec!["call-911", "find-hospital", "back"]
        );
        assert_eq!(
            compose(fever, Severity::One).options,
            vec![
                "monitor-symptoms",
                "schedule-appointment",
                "find-clinic",
                "back"
            ]
        );
    }

    #[test]
    fn test_header_contains_name_and_marks() {
        let headache = catalog().symptom("headache").unwrap();
        let composed = compose(headache, Severity::Two);
        assert!(composed.text.starts_with("Headache — severity !!"));
    }
}
