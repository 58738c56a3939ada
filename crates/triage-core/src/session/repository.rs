//! Session repository trait.
//!
//! Defines the interface for session persistence operations.

use async_trait::async_trait;

use crate::error::Result;

use super::model::Session;

/// An abstract repository for managing session persistence.
///
/// This trait decouples the engine from the specific storage mechanism
/// (directory of files, database, remote API). The in-memory transcript
/// remains the source of truth for the currently open session; the
/// repository only has to be eventually consistent with it.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Finds a session by its ID.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Session))`: Session found
    /// - `Ok(None)`: Session not found
    /// - `Err(_)`: Error occurred during retrieval
    async fn find_by_id(&self, session_id: &str) -> Result<Option<Session>>;

    /// Saves a session (full snapshot, create or replace).
    async fn save(&self, session: &Session) -> Result<()>;

    /// Deletes a session from storage.
    async fn delete(&self, session_id: &str) -> Result<()>;

    /// Lists sessions belonging to one owner, most recently updated
    /// first.
    async fn list_for_owner(&self, owner_id: &str) -> Result<Vec<Session>>;

    /// Lists all stored sessions, most recently updated first.
    async fn list_all(&self) -> Result<Vec<Session>>;
}
