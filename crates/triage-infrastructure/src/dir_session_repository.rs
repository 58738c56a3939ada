//! Directory-backed SessionRepository implementation.
//!
//! Stores one TOML file per session:
//!
//! ```text
//! base_dir/
//! └── sessions/
//!     ├── <session-id-1>.toml
//!     └── <session-id-2>.toml
//! ```
//!
//! All I/O is async via `tokio::fs`. A missing file maps to `Ok(None)`,
//! and a single unreadable file is skipped (with a warning) when
//! listing, so one corrupt session cannot take down the history view.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use triage_core::error::TriageError;
use triage_core::session::{Session, SessionRepository};
use triage_core::Result;

use crate::dto::session::SessionDoc;

/// Directory-of-TOML-files session repository.
pub struct DirSessionRepository {
    sessions_dir: PathBuf,
}

impl DirSessionRepository {
    /// Creates a repository at the default location
    /// (`~/.config/triage-assistant`).
    pub async fn default_location() -> Result<Self> {
        let base_dir = dirs::config_dir()
            .ok_or_else(|| TriageError::config("Could not determine config directory"))?
            .join("triage-assistant");
        Self::new(base_dir).await
    }

    /// Creates a repository under `base_dir`, creating the directory
    /// structure if needed.
    pub async fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let sessions_dir = base_dir.as_ref().join("sessions");
        fs::create_dir_all(&sessions_dir).await?;
        Ok(Self { sessions_dir })
    }

    /// Returns the directory session files are stored in.
    pub fn sessions_dir(&self) -> &Path {
        &self.sessions_dir
    }

    fn session_path(&self, session_id: &str) -> PathBuf {
        self.sessions_dir.join(format!("{session_id}.toml"))
    }

    async fn load_doc(&self, path: &Path) -> Result<Option<SessionDoc>> {
        let content = match fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let doc: SessionDoc = toml::from_str(&content)?;
        Ok(Some(doc))
    }

    async fn load_all(&self) -> Result<Vec<Session>> {
        let mut sessions = Vec::new();
        let mut entries = fs::read_dir(&self.sessions_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("toml") {
                continue;
            }
            match self.load_doc(&path).await.and_then(|doc| {
                doc.map(SessionDoc::into_domain)
                    .transpose()
            }) {
                Ok(Some(session)) => sessions.push(session),
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!("Skipping unreadable session file {:?}: {}", path, e);
                }
            }
        }

        // Most recently updated first
        sessions.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(sessions)
    }
}

#[async_trait]
impl SessionRepository for DirSessionRepository {
    async fn find_by_id(&self, session_id: &str) -> Result<Option<Session>> {
        let path = self.session_path(session_id);
        match self.load_doc(&path).await? {
            Some(doc) => Ok(Some(doc.into_domain()?)),
            None => Ok(None),
        }
    }

    async fn save(&self, session: &Session) -> Result<()> {
        let doc = SessionDoc::from_domain(session);
        let content = toml::to_string_pretty(&doc)?;
        fs::write(self.session_path(&session.id), content).await?;
        Ok(())
    }

    async fn delete(&self, session_id: &str) -> Result<()> {
        match fs::remove_file(self.session_path(session_id)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn list_for_owner(&self, owner_id: &str) -> Result<Vec<Session>> {
        let mut sessions = self.load_all().await?;
        sessions.retain(|s| s.owner_id == owner_id);
        Ok(sessions)
    }

    async fn list_all(&self) -> Result<Vec<Session>> {
        self.load_all().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use triage_core::session::{ConversationTurn, TurnRole};

    fn create_test_session(id: &str, owner: &str, updated_at: &str) -> Session {
        Session {
            id: id.to_string(),
            owner_id: owner.to_string(),
            title: format!("Test session {id}"),
            created_at: "2024-01-01T00:00:00Z".to_string(),
            updated_at: updated_at.to_string(),
            turns: vec![
                ConversationTurn {
                    id: format!("{id}-turn-1"),
                    role: TurnRole::User,
                    text: "I have a fever".to_string(),
                    timestamp: "2024-01-01T00:00:00Z".to_string(),
                    presented_options: None,
                },
                ConversationTurn {
                    id: format!("{id}-turn-2"),
                    role: TurnRole::Bot,
                    text: "How severe is it?".to_string(),
                    timestamp: "2024-01-01T00:00:01Z".to_string(),
                    presented_options: Some(vec!["level1".to_string(), "back".to_string()]),
                },
            ],
        }
    }

    #[tokio::test]
    async fn test_save_and_find_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let repository = DirSessionRepository::new(temp_dir.path()).await.unwrap();

        let session = create_test_session("s-1", "owner-1", "2024-01-02T00:00:00Z");
        repository.save(&session).await.unwrap();

        let loaded = repository.find_by_id("s-1").await.unwrap().unwrap();
        assert_eq!(loaded, session);
    }

    #[tokio::test]
    async fn test_find_nonexistent_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let repository = DirSessionRepository::new(temp_dir.path()).await.unwrap();

        assert!(repository.find_by_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_sorted_most_recent_first() {
        let temp_dir = TempDir::new().unwrap();
        let repository = DirSessionRepository::new(temp_dir.path()).await.unwrap();

        repository
            .save(&create_test_session("old", "owner-1", "2024-01-01T00:00:00Z"))
            .await
            .unwrap();
        repository
            .save(&create_test_session("new", "owner-1", "2024-03-01T00:00:00Z"))
            .await
            .unwrap();
        repository
            .save(&create_test_session("mid", "owner-1", "2024-02-01T00:00:00Z"))
            .await
            .unwrap();

        let sessions = repository.list_all().await.unwrap();
        let ids: Vec<_> = sessions.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "mid", "old"]);
    }

    #[tokio::test]
    async fn test_list_for_owner_filters() {
        let temp_dir = TempDir::new().unwrap();
        let repository = DirSessionRepository::new(temp_dir.path()).await.unwrap();

        repository
            .save(&create_test_session("a", "owner-1", "2024-01-01T00:00:00Z"))
            .await
            .unwrap();
        repository
            .save(&create_test_session("b", "owner-2", "2024-01-01T00:00:00Z"))
            .await
            .unwrap();

        let sessions = repository.list_for_owner("owner-1").await.unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].id, "a");
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let repository = DirSessionRepository::new(temp_dir.path()).await.unwrap();

        let session = create_test_session("gone", "owner-1", "2024-01-01T00:00:00Z");
        repository.save(&session).await.unwrap();

        repository.delete("gone").await.unwrap();
        assert!(repository.find_by_id("gone").await.unwrap().is_none());

        // Deleting again is not an error
        repository.delete("gone").await.unwrap();
    }

    #[tokio::test]
    async fn test_corrupt_file_skipped_on_list() {
        let temp_dir = TempDir::new().unwrap();
        let repository = DirSessionRepository::new(temp_dir.path()).await.unwrap();

        repository
            .save(&create_test_session("ok", "owner-1", "2024-01-01T00:00:00Z"))
            .await
            .unwrap();
        tokio::fs::write(repository.sessions_dir().join("bad.toml"), "not valid [toml")
            .await
            .unwrap();

        let sessions = repository.list_all().await.unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].id, "ok");
    }
}
