//! Navigation intents emitted to the shell.
//!
//! The engine never performs navigation itself; it emits an intent and
//! the navigation bridge (the UI shell) decides how to act on it.

use serde::{Deserialize, Serialize};

/// A screen-change request emitted by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "navigate", rename_all = "lowercase")]
pub enum NavigationIntent {
    /// Emergency call screen (`call-911`).
    Emergency,
    /// Hospital locator screen (`find-hospital`).
    Hospitals,
    /// Care contacts / clinic list screen (`find-clinic`).
    Contacts,
}

/// Receiver for navigation intents.
pub trait NavigationBridge: Send + Sync {
    /// Called when the engine emits a navigation intent.
    fn navigate(&self, intent: NavigationIntent);
}

/// Bridge that ignores navigation, for tests and headless use.
#[derive(Debug, Default)]
pub struct NoopNavigationBridge;

impl NavigationBridge for NoopNavigationBridge {
    fn navigate(&self, _intent: NavigationIntent) {}
}
