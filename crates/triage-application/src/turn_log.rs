//! Append-only session turn log.
//!
//! Owns the in-memory transcript of the open session, which is the
//! source of truth; the repository is kept eventually consistent with
//! it. A persistence failure never removes a turn that was already
//! rendered to the user: it is logged and the conversation continues.

use std::sync::Arc;

use triage_core::session::{
    derive_title, ConversationTurn, Session, SessionRepository,
};

/// Session-scoped, append-only record of the conversation.
pub struct TurnLog {
    owner_id: String,
    repository: Arc<dyn SessionRepository>,
    session: Option<Session>,
    title_derived: bool,
}

impl TurnLog {
    /// Creates an empty log with no session yet.
    ///
    /// The session is created lazily by [`TurnLog::ensure_session`];
    /// merely opening the menu never persists anything.
    pub fn new(owner_id: impl Into<String>, repository: Arc<dyn SessionRepository>) -> Self {
        Self {
            owner_id: owner_id.into(),
            repository,
            session: None,
            title_derived: false,
        }
    }

    /// Reopens an existing session's transcript.
    pub fn from_session(session: Session, repository: Arc<dyn SessionRepository>) -> Self {
        Self {
            owner_id: session.owner_id.clone(),
            repository,
            title_derived: true,
            session: Some(session),
        }
    }

    /// Creates the backing session if it does not exist yet.
    ///
    /// Idempotent: subsequent calls return the same session id. The
    /// title is derived once, from the first free-text user input; a
    /// session opened by token selections keeps a placeholder title.
    pub fn ensure_session(&mut self, text: &str, is_free_text: bool) -> &str {
        if self.session.is_none() {
            let seed = if is_free_text { text } else { "" };
            self.session = Some(Session::new(self.owner_id.clone(), seed));
            self.title_derived = is_free_text;
        } else if !self.title_derived && is_free_text {
            if let Some(session) = self.session.as_mut() {
                session.title = derive_title(text);
            }
            self.title_derived = true;
        }
        self.session
            .as_ref()
            .map(|s| s.id.as_str())
            .unwrap_or_default()
    }

    /// Appends a user turn and persists the session.
    pub async fn append_user(&mut self, text: &str) {
        self.append(ConversationTurn::user(text)).await;
    }

    /// Appends a bot turn with its presented options and persists the
    /// session.
    pub async fn append_bot(&mut self, text: &str, options: Vec<String>) {
        let presented = if options.is_empty() {
            None
        } else {
            Some(options)
        };
        self.append(ConversationTurn::bot(text, presented)).await;
    }

    async fn append(&mut self, turn: ConversationTurn) {
        let Some(session) = self.session.as_mut() else {
            // ensure_session was not called; nothing to record against.
            tracing::warn!("turn dropped: no session established");
            return;
        };

        session.turns.push(turn);
        session.updated_at = chrono::Utc::now().to_rfc3339();

        // The in-memory transcript stays intact even if the write fails.
        if let Err(e) = self.repository.save(session).await {
            tracing::warn!(
                session_id = %session.id,
                "failed to persist turn, continuing: {}",
                e
            );
        }
    }

    /// Ordered snapshot of the transcript.
    pub fn turns(&self) -> &[ConversationTurn] {
        self.session.as_ref().map(|s| s.turns.as_slice()).unwrap_or(&[])
    }

    /// The backing session id, if one has been created.
    pub fn session_id(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.id.as_str())
    }

    /// The session title, if a session exists.
    pub fn title(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.title.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use triage_core::error::TriageError;
    use triage_core::session::TurnRole;
    use triage_core::Result;

    struct MockSessionRepository {
        sessions: Mutex<HashMap<String, Session>>,
        fail_saves: bool,
        save_count: Mutex<usize>,
    }

    impl MockSessionRepository {
        fn new() -> Self {
            Self {
                sessions: Mutex::new(HashMap::new()),
                fail_saves: false,
                save_count: Mutex::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                fail_saves: true,
                ..Self::new()
            }
        }
    }

    #[async_trait]
    impl SessionRepository for MockSessionRepository {
        async fn find_by_id(&self, session_id: &str) -> Result<Option<Session>> {
            Ok(self.sessions.lock().unwrap().get(session_id).cloned())
        }

        async fn save(&self, session: &Session) -> Result<()> {
            *self.save_count.lock().unwrap() += 1;
            if self.fail_saves {
                return Err(TriageError::data_access("disk full"));
            }
            self.sessions
                .lock()
                .unwrap()
                .insert(session.id.clone(), session.clone());
            Ok(())
        }

        async fn delete(&self, session_id: &str) -> Result<()> {
            self.sessions.lock().unwrap().remove(session_id);
            Ok(())
        }

        async fn list_for_owner(&self, owner_id: &str) -> Result<Vec<Session>> {
            Ok(self
                .sessions
                .lock()
                .unwrap()
                .values()
                .filter(|s| s.owner_id == owner_id)
                .cloned()
                .collect())
        }

        async fn list_all(&self) -> Result<Vec<Session>> {
            Ok(self.sessions.lock().unwrap().values().cloned().collect())
        }
    }

    #[tokio::test]
    async fn test_lazy_session_creation_is_idempotent() {
        let repo = Arc::new(MockSessionRepository::new());
        let mut log = TurnLog::new("owner-1", repo.clone());
        assert!(log.session_id().is_none());

        let id1 = log.ensure_session("I feel sick", true).to_string();
        let id2 = log.ensure_session("second message", true).to_string();
        assert_eq!(id1, id2);
        assert_eq!(log.title(), Some("I feel sick"));
    }

    #[tokio::test]
    async fn test_title_derived_from_first_free_text_only() {
        let repo = Arc::new(MockSessionRepository::new());
        let mut log = TurnLog::new("owner-1", repo.clone());

        // Token selection opens the session with a placeholder title
        log.ensure_session("symptoms", false);
        assert_eq!(log.title(), Some("New conversation"));

        // First free text sets the title, once
        log.ensure_session("my stomach hurts a lot", true);
        assert_eq!(log.title(), Some("my stomach hurts a lot"));

        log.ensure_session("and now something else", true);
        assert_eq!(log.title(), Some("my stomach hurts a lot"));
    }

    #[tokio::test]
    async fn test_append_order_and_persistence() {
        let repo = Arc::new(MockSessionRepository::new());
        let mut log = TurnLog::new("owner-1", repo.clone());

        log.ensure_session("hello", true);
        log.append_user("hello").await;
        log.append_bot("hi there", vec!["back".to_string()]).await;

        assert_eq!(log.turns().len(), 2);
        assert_eq!(log.turns()[0].role, TurnRole::User);
        assert_eq!(log.turns()[1].role, TurnRole::Bot);

        // Persisted turns equal the in-memory transcript, field for field
        let persisted = repo
            .find_by_id(log.session_id().unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(persisted.turns, log.turns());
    }

    #[tokio::test]
    async fn test_persistence_failure_keeps_transcript() {
        let repo = Arc::new(MockSessionRepository::failing());
        let mut log = TurnLog::new("owner-1", repo.clone());

        log.ensure_session("hello", true);
        log.append_user("hello").await;
        log.append_bot("hi there", vec![]).await;

        // Both turns survive in memory despite every save failing
        assert_eq!(log.turns().len(), 2);
        assert_eq!(*repo.save_count.lock().unwrap(), 2);
    }
}
