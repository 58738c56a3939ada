//! Knowledge base domain models.
//!
//! The catalog entities are static content: they are loaded once at
//! startup and never mutated. Medical wording lives in the data, not in
//! the code that renders it.

use serde::{Deserialize, Serialize};

/// A top-level category the user can pick from the main menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    /// Stable identifier used as an option token (e.g. "symptoms")
    pub id: &'static str,
    /// Human-readable name shown in menus
    pub display_name: &'static str,
    /// Short description of what the category covers
    pub description: &'static str,
}

/// One of the three fixed severity tiers of a symptom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    One,
    Two,
    Three,
}

impl Severity {
    /// All severities, mildest first.
    pub const ALL: [Severity; 3] = [Severity::One, Severity::Two, Severity::Three];

    /// The option-token spelling (`level1`, `level2`, `level3`).
    pub fn token(&self) -> &'static str {
        match self {
            Severity::One => "level1",
            Severity::Two => "level2",
            Severity::Three => "level3",
        }
    }

    /// Parses a level token. Returns `None` for anything else.
    pub fn from_token(token: &str) -> Option<Severity> {
        match token {
            "level1" => Some(Severity::One),
            "level2" => Some(Severity::Two),
            "level3" => Some(Severity::Three),
            _ => None,
        }
    }

    /// Severity indicator marks for the composed header, one per tier.
    pub fn marks(&self) -> &'static str {
        match self {
            Severity::One => "!",
            Severity::Two => "!!",
            Severity::Three => "!!!",
        }
    }

    /// Zero-based index into a symptom's level descriptor array.
    pub fn index(&self) -> usize {
        match self {
            Severity::One => 0,
            Severity::Two => 1,
            Severity::Three => 2,
        }
    }

    /// Whether this severity triggers the emergency branch.
    ///
    /// Only level 3 does, by invariant; levels 1 and 2 never escalate.
    pub fn is_emergency(&self) -> bool {
        matches!(self, Severity::Three)
    }
}

/// A symptom entry with guidance for each of its three severity tiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Symptom {
    /// Stable identifier used as an option token (e.g. "fever")
    pub id: &'static str,
    /// Human-readable name shown in menus and result headers
    pub name: &'static str,
    /// Short description of the symptom
    pub description: &'static str,
    /// Descriptor bullet lists, indexed by `Severity::index()`.
    /// Invariant: exactly three entries, one per severity tier.
    pub levels: [&'static [&'static str]; 3],
    /// Shown only in a level-3 composition
    pub emergency_actions: &'static [&'static str],
    /// Recommended actions, shown for every level
    pub next_steps: &'static [&'static str],
    /// Shown for level 1 and 2 compositions
    pub when_to_seek_help: &'static [&'static str],
}

impl Symptom {
    /// Descriptor bullets for the given severity tier.
    pub fn descriptors(&self, severity: Severity) -> &'static [&'static str] {
        self.levels[severity.index()]
    }
}
