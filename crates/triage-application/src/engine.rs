//! Per-session triage engine.
//!
//! Runs the canonical turn pipeline: emergency scan, then token
//! interpretation, then fallback generation, with the user turn and the
//! bot turn appended in order before the call returns. The whole
//! pipeline executes under one async mutex, so at most one input is in
//! flight per session and a second send queues behind the first instead
//! of interleaving turns.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use triage_core::error::TriageError;
use triage_core::generation::{GenerationBackend, TurnMessage};
use triage_core::knowledge::{catalog, Catalog};
use triage_core::navigation::{NavigationBridge, NavigationIntent};
use triage_core::session::{ConversationTurn, Session, SessionRepository, UserInput};
use triage_core::triage::{
    self, DialogueContext, DialogueState, EmergencyHit, StepOutcome, StepResult, Token, TOKEN_BACK,
};

use crate::turn_log::TurnLog;

/// Fixed reply substituted when the generation call fails or times out.
pub const FALLBACK_APOLOGY: &str =
    "Sorry, I'm having trouble answering right now. Please try again in a moment.";

/// Default bound on the remote generation call.
pub const DEFAULT_GENERATION_TIMEOUT: Duration = Duration::from_secs(15);

/// One completed exchange, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineReply {
    /// Bot reply text.
    pub text: String,
    /// Option tokens presented with the reply.
    pub options: Vec<String>,
    /// Navigation intent emitted during this exchange, if any.
    pub navigation: Option<NavigationIntent>,
}

struct EngineState {
    context: DialogueContext,
    log: TurnLog,
}

/// The conversational triage engine for a single session.
///
/// Owns the session's `DialogueContext` and transcript exclusively;
/// sessions are independent, so no cross-session locking exists.
pub struct TriageEngine {
    catalog: &'static Catalog,
    backend: Arc<dyn GenerationBackend>,
    bridge: Arc<dyn NavigationBridge>,
    generation_timeout: Duration,
    /// Bumped by `detach`; a pipeline resuming from the remote call
    /// under a stale epoch discards its reply.
    epoch: AtomicU64,
    state: Mutex<EngineState>,
}

impl TriageEngine {
    /// Creates an engine for a fresh conversation.
    ///
    /// No session is persisted until the first user input arrives.
    pub fn new(
        owner_id: impl Into<String>,
        repository: Arc<dyn SessionRepository>,
        backend: Arc<dyn GenerationBackend>,
        bridge: Arc<dyn NavigationBridge>,
    ) -> Self {
        Self {
            catalog: catalog(),
            backend,
            bridge,
            generation_timeout: DEFAULT_GENERATION_TIMEOUT,
            epoch: AtomicU64::new(0),
            state: Mutex::new(EngineState {
                context: DialogueContext::new(),
                log: TurnLog::new(owner_id, repository),
            }),
        }
    }

    /// Creates an engine over an existing session's transcript.
    pub fn from_session(
        session: Session,
        repository: Arc<dyn SessionRepository>,
        backend: Arc<dyn GenerationBackend>,
        bridge: Arc<dyn NavigationBridge>,
    ) -> Self {
        Self {
            catalog: catalog(),
            backend,
            bridge,
            generation_timeout: DEFAULT_GENERATION_TIMEOUT,
            epoch: AtomicU64::new(0),
            state: Mutex::new(EngineState {
                context: DialogueContext::new(),
                log: TurnLog::from_session(session, repository),
            }),
        }
    }

    /// Overrides the generation time bound.
    pub fn with_generation_timeout(mut self, timeout: Duration) -> Self {
        self.generation_timeout = timeout;
        self
    }

    /// The opening greeting and main menu.
    ///
    /// Pure menu navigation: nothing is persisted.
    pub fn greet(&self) -> EngineReply {
        let outcome = triage::greeting(self.catalog);
        EngineReply {
            text: outcome.text,
            options: outcome.options,
            navigation: None,
        }
    }

    /// Marks this engine as abandoned (the user switched sessions).
    ///
    /// An in-flight generation call completes, but its reply is
    /// discarded instead of being appended to the transcript.
    pub fn detach(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
    }

    /// Processes one user input through the turn pipeline.
    ///
    /// Returns `None` only when the engine was detached while the
    /// remote generation call was in flight; the user's turn is still
    /// recorded, the stale bot reply is not.
    pub async fn handle_input(&self, input: UserInput) -> Option<EngineReply> {
        let mut state = self.state.lock().await;
        let epoch = self.epoch.load(Ordering::SeqCst);

        let raw = input.raw().trim().to_string();
        let is_free_text = matches!(input, UserInput::Text(_));

        let resolution = self.resolve(&state.context, &input, &raw);

        state.log.ensure_session(&raw, is_free_text);

        match resolution {
            Resolution::Emergency(hit) => {
                tracing::debug!(keyword = hit.keyword, "emergency keyword hit");
                let text = hit.response_text();
                let options = hit.options();
                state.log.append_user(&raw).await;
                state.log.append_bot(&text, options.clone()).await;
                // Context deliberately untouched: a pending symptom
                // survives the emergency interruption.
                Some(EngineReply {
                    text,
                    options,
                    navigation: None,
                })
            }
            Resolution::Step(outcome) => {
                let StepOutcome {
                    context,
                    text,
                    options,
                    navigation,
                } = outcome;
                state.context = context;
                state.log.append_user(&raw).await;
                state.log.append_bot(&text, options.clone()).await;
                if let Some(intent) = navigation {
                    self.bridge.navigate(intent);
                }
                Some(EngineReply {
                    text,
                    options,
                    navigation,
                })
            }
            Resolution::Fallback => {
                let history: Vec<TurnMessage> =
                    state.log.turns().iter().map(TurnMessage::from_turn).collect();
                state.log.append_user(&raw).await;

                let text = match self.generate_bounded(&history, &raw).await {
                    Ok(reply) => reply,
                    Err(e) => {
                        tracing::warn!("fallback generation failed: {}", e);
                        FALLBACK_APOLOGY.to_string()
                    }
                };

                if self.epoch.load(Ordering::SeqCst) != epoch {
                    tracing::debug!("discarding reply for detached session");
                    return None;
                }

                let options = vec![TOKEN_BACK.to_string()];
                state.log.append_bot(&text, options.clone()).await;
                Some(EngineReply {
                    text,
                    options,
                    navigation: None,
                })
            }
        }
    }

    /// Classifies an input per the fixed precedence.
    ///
    /// Typed text is scanned for emergencies before anything else; a
    /// selection is interpreted as a token first and only reaches the
    /// scanner once reclassified as free text. Either way the scan runs
    /// before fallback generation, so one input can never produce both
    /// an emergency reply and a generated one.
    fn resolve(&self, context: &DialogueContext, input: &UserInput, raw: &str) -> Resolution {
        match input {
            UserInput::Text(_) => {
                if let Some(hit) = triage::scan(raw) {
                    return Resolution::Emergency(hit);
                }
                match Token::parse(raw, self.catalog) {
                    Some(token) => self.try_apply(context, &token),
                    None => Resolution::Fallback,
                }
            }
            UserInput::Selection(_) => match Token::parse(raw, self.catalog) {
                Some(token) => match self.try_apply(context, &token) {
                    Resolution::Fallback => self.scan_then_fallback(raw),
                    handled => handled,
                },
                None => self.scan_then_fallback(raw),
            },
        }
    }

    fn try_apply(&self, context: &DialogueContext, token: &Token) -> Resolution {
        match triage::apply(context, token, self.catalog) {
            StepResult::Handled(outcome) => Resolution::Step(outcome),
            StepResult::NotApplicable => Resolution::Fallback,
        }
    }

    fn scan_then_fallback(&self, raw: &str) -> Resolution {
        match triage::scan(raw) {
            Some(hit) => Resolution::Emergency(hit),
            None => Resolution::Fallback,
        }
    }

    async fn generate_bounded(
        &self,
        history: &[TurnMessage],
        text: &str,
    ) -> triage_core::Result<String> {
        match tokio::time::timeout(self.generation_timeout, self.backend.generate(history, text))
            .await
        {
            Ok(result) => result,
            Err(_) => Err(TriageError::GenerationTimeout {
                seconds: self.generation_timeout.as_secs(),
            }),
        }
    }

    /// Ordered snapshot of the transcript.
    pub async fn transcript(&self) -> Vec<ConversationTurn> {
        self.state.lock().await.log.turns().to_vec()
    }

    /// The backing session id, if one has been created yet.
    pub async fn session_id(&self) -> Option<String> {
        self.state
            .lock()
            .await
            .log
            .session_id()
            .map(str::to_string)
    }

    /// The current dialogue state, for rendering hints.
    pub async fn dialogue_state(&self) -> DialogueState {
        self.state.lock().await.context.state
    }
}

enum Resolution {
    Emergency(EmergencyHit),
    Step(StepOutcome),
    Fallback,
}
