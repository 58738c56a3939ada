//! Session management service.
//!
//! Listing, reopening, and deleting stored sessions. The engine owns
//! the live conversation; this service only touches the repository.

use std::sync::Arc;

use triage_core::error::TriageError;
use triage_core::generation::GenerationBackend;
use triage_core::navigation::NavigationBridge;
use triage_core::session::{Session, SessionRepository};
use triage_core::Result;

use crate::engine::TriageEngine;

/// Application service over stored sessions.
pub struct SessionService {
    repository: Arc<dyn SessionRepository>,
}

impl SessionService {
    /// Creates a new service over the given repository.
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    /// Lists an owner's sessions, most recently updated first.
    pub async fn list_sessions(&self, owner_id: &str) -> Result<Vec<Session>> {
        self.repository.list_for_owner(owner_id).await
    }

    /// Loads a stored session.
    pub async fn load_session(&self, session_id: &str) -> Result<Option<Session>> {
        self.repository.find_by_id(session_id).await
    }

    /// Deletes a stored session.
    pub async fn delete_session(&self, session_id: &str) -> Result<()> {
        self.repository.delete(session_id).await
    }

    /// Reopens a stored session as a live engine.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the session does not exist.
    pub async fn open_engine(
        &self,
        session_id: &str,
        backend: Arc<dyn GenerationBackend>,
        bridge: Arc<dyn NavigationBridge>,
    ) -> Result<TriageEngine> {
        let session = self
            .repository
            .find_by_id(session_id)
            .await?
            .ok_or_else(|| TriageError::not_found("Session", session_id))?;
        Ok(TriageEngine::from_session(
            session,
            self.repository.clone(),
            backend,
            bridge,
        ))
    }
}
