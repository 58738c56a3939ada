//! Transient dialogue state.

/// Where the guided dialogue currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogueState {
    /// Initial state; category menu is showing.
    #[default]
    MainMenu,
    /// A category was chosen.
    CategoryOpen,
    /// A symptom was chosen, awaiting a severity selection.
    SymptomPending,
    /// A severity was chosen and guidance was rendered. Not terminal.
    ResultShown,
}

/// Per-session dialogue context. Transient, never persisted.
///
/// Exactly one context is live per active session. An emergency
/// short-circuit must not touch it: whatever symptom was pending stays
/// pending so the user can resume where they left off.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DialogueContext {
    pub state: DialogueState,
    pub pending_category_id: Option<String>,
    pub pending_symptom_id: Option<String>,
}

impl DialogueContext {
    /// A fresh context at the main menu.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns to the main menu, clearing any pending selection.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_context_is_main_menu() {
        let ctx = DialogueContext::new();
        assert_eq!(ctx.state, DialogueState::MainMenu);
        assert!(ctx.pending_symptom_id.is_none());
    }

    #[test]
    fn test_reset_clears_pending_selection() {
        let mut ctx = DialogueContext {
            state: DialogueState::SymptomPending,
            pending_category_id: Some("symptoms".to_string()),
            pending_symptom_id: Some("fever".to_string()),
        };
        ctx.reset();
        assert_eq!(ctx, DialogueContext::new());
    }
}
