//! User input types for session interaction.

/// Represents one user input to the engine within a session.
///
/// The two variants mirror the two inbound channels: a typed free-text
/// message, and a discrete option-token selection (a tapped button).
/// A selection that turns out not to be a valid token for the current
/// state is reclassified as free text rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserInput {
    /// A free-text message typed by the user.
    Text(String),
    /// A discrete option-token selection.
    Selection(String),
}

impl UserInput {
    /// The raw text of the input, whichever channel it came in on.
    pub fn raw(&self) -> &str {
        match self {
            UserInput::Text(text) | UserInput::Selection(text) => text,
        }
    }
}
