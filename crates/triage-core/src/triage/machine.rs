//! Token-driven dialogue state machine.
//!
//! `apply` interprets a recognized token against the current dialogue
//! context and produces the next context, the bot reply, and the option
//! tokens to present. Tokens that are not applicable to the current
//! state are reported as [`StepResult::NotApplicable`] so the caller
//! can hand the raw input to the free-text path; the dialogue never
//! surfaces an error for an out-of-context selection.

use crate::knowledge::{Catalog, Severity};
use crate::navigation::NavigationIntent;

use super::composer;
use super::context::{DialogueContext, DialogueState};
use super::token::{
    Token, TOKEN_BACK, TOKEN_DESCRIBE_SYMPTOMS, TOKEN_NOT_SURE,
};

/// One interpreted dialogue step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    /// Context after the step.
    pub context: DialogueContext,
    /// Bot reply text.
    pub text: String,
    /// Option tokens to present with the reply.
    pub options: Vec<String>,
    /// Navigation intent, if the token requests a screen change.
    pub navigation: Option<NavigationIntent>,
}

/// Result of attempting to interpret a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepResult {
    /// The token was valid for the current state.
    Handled(StepOutcome),
    /// The token is inert in the current state; treat the raw input as
    /// free text instead of dropping it.
    NotApplicable,
}

/// The option tokens shown at the main menu: every category plus the
/// free-text prompt.
pub fn main_menu_options(catalog: &Catalog) -> Vec<String> {
    let mut options: Vec<String> = catalog
        .categories()
        .iter()
        .map(|c| c.id.to_string())
        .collect();
    options.push(TOKEN_DESCRIBE_SYMPTOMS.to_string());
    options
}

/// The greeting shown when a conversation starts.
pub fn greeting(catalog: &Catalog) -> StepOutcome {
    StepOutcome {
        context: DialogueContext::new(),
        text: "Hi, I'm your health assistant. Pick a topic below, or describe \
               how you're feeling in your own words."
            .to_string(),
        options: main_menu_options(catalog),
        navigation: None,
    }
}

/// Applies a token to the current context.
pub fn apply(context: &DialogueContext, token: &Token, catalog: &Catalog) -> StepResult {
    match token {
        Token::Back => StepResult::Handled(back_to_main_menu(catalog)),
        Token::Category(id) => apply_category(context, id, catalog),
        Token::Symptom(id) => apply_symptom(context, id, catalog),
        Token::Level(severity) => apply_level(context, *severity, catalog),
        Token::NotSure => StepResult::Handled(fixed_message(
            context,
            "That's okay. Describe what you're feeling in your own words and \
             I'll do my best to point you in the right direction.",
            vec![TOKEN_DESCRIBE_SYMPTOMS.to_string(), TOKEN_BACK.to_string()],
        )),
        Token::DescribeSymptoms => StepResult::Handled(fixed_message(
            context,
            "Go ahead and describe your symptoms in your own words.",
            vec![TOKEN_BACK.to_string()],
        )),
        Token::ScheduleAppointment => StepResult::Handled(fixed_message(
            context,
            "To schedule an appointment, contact your primary care provider or \
             use your clinic's booking line. Bring a note of when your symptoms \
             started and how they have changed.",
            vec![TOKEN_BACK.to_string()],
        )),
        Token::MonitorSymptoms => StepResult::Handled(fixed_message(
            context,
            "Keep a simple log: when symptoms occur, how long they last, and \
             anything that makes them better or worse. Check back if anything \
             gets worse.",
            vec![TOKEN_BACK.to_string()],
        )),
        Token::Call911 => StepResult::Handled(navigate(
            context,
            NavigationIntent::Emergency,
            "Taking you to the emergency call screen.",
        )),
        Token::FindHospital => StepResult::Handled(navigate(
            context,
            NavigationIntent::Hospitals,
            "Opening the hospital locator.",
        )),
        Token::FindClinic => StepResult::Handled(navigate(
            context,
            NavigationIntent::Contacts,
            "Opening your care contacts.",
        )),
    }
}

fn back_to_main_menu(catalog: &Catalog) -> StepOutcome {
    StepOutcome {
        context: DialogueContext::new(),
        text: "Okay, back to the main menu. What would you like to look at?".to_string(),
        options: main_menu_options(catalog),
        navigation: None,
    }
}

fn apply_category(context: &DialogueContext, id: &str, catalog: &Catalog) -> StepResult {
    if context.state != DialogueState::MainMenu {
        return StepResult::NotApplicable;
    }
    let Some(category) = catalog.category(id) else {
        return StepResult::NotApplicable;
    };

    let next = DialogueContext {
        state: DialogueState::CategoryOpen,
        pending_category_id: Some(category.id.to_string()),
        pending_symptom_id: context.pending_symptom_id.clone(),
    };

    if category.id == "symptoms" {
        let mut options: Vec<String> = catalog
            .symptoms()
            .iter()
            .map(|s| s.id.to_string())
            .collect();
        options.push(TOKEN_BACK.to_string());
        StepResult::Handled(StepOutcome {
            context: next,
            text: "Which symptom is bothering you the most?".to_string(),
            options,
            navigation: None,
        })
    } else {
        StepResult::Handled(StepOutcome {
            context: next,
            text: format!(
                "{}: {}. Tell me more about what you're looking for, or go back.",
                category.display_name, category.description
            ),
            options: vec![TOKEN_BACK.to_string()],
            navigation: None,
        })
    }
}

fn apply_symptom(context: &DialogueContext, id: &str, catalog: &Catalog) -> StepResult {
    if !matches!(
        context.state,
        DialogueState::MainMenu | DialogueState::CategoryOpen
    ) {
        return StepResult::NotApplicable;
    }
    let Some(symptom) = catalog.symptom(id) else {
        return StepResult::NotApplicable;
    };

    let mut options: Vec<String> = Severity::ALL.iter().map(|s| s.token().to_string()).collect();
    options.push(TOKEN_NOT_SURE.to_string());
    options.push(TOKEN_BACK.to_string());

    StepResult::Handled(StepOutcome {
        context: DialogueContext {
            state: DialogueState::SymptomPending,
            pending_category_id: context.pending_category_id.clone(),
            pending_symptom_id: Some(symptom.id.to_string()),
        },
        text: format!(
            "How severe is your {}? Pick the level that fits best.",
            symptom.name.to_lowercase()
        ),
        options,
        navigation: None,
    })
}

fn apply_level(context: &DialogueContext, severity: Severity, catalog: &Catalog) -> StepResult {
    // A level token means nothing without a pending symptom; the raw
    // input goes down the free-text path instead of being dropped.
    let Some(symptom_id) = context.pending_symptom_id.as_deref() else {
        return StepResult::NotApplicable;
    };
    let Some(symptom) = catalog.symptom(symptom_id) else {
        return StepResult::NotApplicable;
    };

    let composed = composer::compose(symptom, severity);
    StepResult::Handled(StepOutcome {
        context: DialogueContext {
            state: DialogueState::ResultShown,
            pending_category_id: context.pending_category_id.clone(),
            pending_symptom_id: context.pending_symptom_id.clone(),
        },
        text: composed.text,
        options: composed.options,
        navigation: None,
    })
}

/// A fixed informational reply that leaves the context untouched.
fn fixed_message(context: &DialogueContext, text: &str, options: Vec<String>) -> StepOutcome {
    StepOutcome {
        context: context.clone(),
        text: text.to_string(),
        options,
        navigation: None,
    }
}

fn navigate(context: &DialogueContext, intent: NavigationIntent, text: &str) -> StepOutcome {
    StepOutcome {
        context: context.clone(),
        text: text.to_string(),
        options: vec![TOKEN_BACK.to_string()],
        navigation: Some(intent),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::catalog;

    fn handled(result: StepResult) -> StepOutcome {
        match result {
            StepResult::Handled(outcome) => outcome,
            StepResult::NotApplicable => panic!("expected a handled step"),
        }
    }

    #[test]
    fn test_back_returns_to_main_menu_from_every_state() {
        for state in [
            DialogueState::MainMenu,
            DialogueState::CategoryOpen,
            DialogueState::SymptomPending,
            DialogueState::ResultShown,
        ] {
            let ctx = DialogueContext {
                state,
                pending_category_id: Some("symptoms".to_string()),
                pending_symptom_id: Some("fever".to_string()),
            };
            let outcome = handled(apply(&ctx, &Token::Back, catalog()));
            assert_eq!(outcome.context.state, DialogueState::MainMenu);
            assert!(outcome.context.pending_symptom_id.is_none());
            for category in catalog().categories() {
                assert!(outcome.options.contains(&category.id.to_string()));
            }
        }
    }

    #[test]
    fn test_symptoms_category_lists_all_symptoms() {
        let ctx = DialogueContext::new();
        let outcome = handled(apply(
            &ctx,
            &Token::Category("symptoms".to_string()),
            catalog(),
        ));
        assert_eq!(outcome.context.state, DialogueState::CategoryOpen);
        for symptom in catalog().symptoms() {
            assert!(outcome.options.contains(&symptom.id.to_string()));
        }
        assert_eq!(outcome.options.last().map(String::as_str), Some("back"));
    }

    #[test]
    fn test_other_category_generic_prompt() {
        let ctx = DialogueContext::new();
        let outcome = handled(apply(
            &ctx,
            &Token::Category("wellness".to_string()),
            catalog(),
        ));
        assert_eq!(outcome.options, vec!["back"]);
    }

    #[test]
    fn test_symptom_selection_asks_for_severity() {
        let ctx = DialogueContext::new();
        let outcome = handled(apply(&ctx, &Token::Symptom("fever".to_string()), catalog()));
        assert_eq!(outcome.context.state, DialogueState::SymptomPending);
        assert_eq!(
            outcome.context.pending_symptom_id.as_deref(),
            Some("fever")
        );
        assert_eq!(
            outcome.options,
            vec!["level1", "level2", "level3", "not-sure", "back"]
        );
    }

    #[test]
    fn test_level_without_pending_symptom_is_inert() {
        let ctx = DialogueContext::new();
        assert_eq!(
            apply(&ctx, &Token::Level(Severity::Two), catalog()),
            StepResult::NotApplicable
        );
    }

    #[test]
    fn test_level_three_composes_emergency_result() {
        let ctx = DialogueContext {
            state: DialogueState::SymptomPending,
            pending_category_id: Some("symptoms".to_string()),
            pending_symptom_id: Some("fever".to_string()),
        };
        let outcome = handled(apply(&ctx, &Token::Level(Severity::Three), catalog()));
        assert_eq!(outcome.context.state, DialogueState::ResultShown);
        assert!(outcome.text.contains("EMERGENCY ACTIONS"));
        assert_eq!(outcome.options, vec!["call-911", "find-hospital", "back"]);
    }

    #[test]
    fn test_standalone_action_keeps_pending_symptom() {
        let ctx = DialogueContext {
            state: DialogueState::SymptomPending,
            pending_category_id: None,
            pending_symptom_id: Some("cough".to_string()),
        };
        let outcome = handled(apply(&ctx, &Token::NotSure, catalog()));
        assert_eq!(
            outcome.context.pending_symptom_id.as_deref(),
            Some("cough")
        );
        assert_eq!(outcome.context.state, DialogueState::SymptomPending);
    }

    #[test]
    fn test_navigation_tokens_emit_intents() {
        let ctx = DialogueContext::new();
        let outcome = handled(apply(&ctx, &Token::Call911, catalog()));
        assert_eq!(outcome.navigation, Some(NavigationIntent::Emergency));

        let outcome = handled(apply(&ctx, &Token::FindHospital, catalog()));
        assert_eq!(outcome.navigation, Some(NavigationIntent::Hospitals));

        let outcome = handled(apply(&ctx, &Token::FindClinic, catalog()));
        assert_eq!(outcome.navigation, Some(NavigationIntent::Contacts));
    }

    #[test]
    fn test_category_outside_main_menu_is_inert() {
        let ctx = DialogueContext {
            state: DialogueState::SymptomPending,
            pending_category_id: None,
            pending_symptom_id: Some("fever".to_string()),
        };
        assert_eq!(
            apply(&ctx, &Token::Category("symptoms".to_string()), catalog()),
            StepResult::NotApplicable
        );
    }

    #[test]
    fn test_result_shown_is_not_terminal() {
        let ctx = DialogueContext {
            state: DialogueState::ResultShown,
            pending_category_id: None,
            pending_symptom_id: Some("fever".to_string()),
        };
        // Another level token re-composes against the pending symptom
        let outcome = handled(apply(&ctx, &Token::Level(Severity::One), catalog()));
        assert!(outcome.text.contains("When to seek help"));
    }
}
