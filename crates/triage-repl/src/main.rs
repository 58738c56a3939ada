use std::borrow::Cow::{self, Borrowed, Owned};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::Editor;
use rustyline::{Context, Helper};

use triage_application::{SessionService, TriageEngine};
use triage_core::generation::{GenerationBackend, TurnMessage};
use triage_core::knowledge::catalog;
use triage_core::navigation::{NavigationBridge, NavigationIntent};
use triage_core::session::{SessionRepository, TurnRole, UserInput};
use triage_core::triage::{
    TOKEN_BACK, TOKEN_CALL_911, TOKEN_DESCRIBE_SYMPTOMS, TOKEN_FIND_CLINIC, TOKEN_FIND_HOSPITAL,
    TOKEN_MONITOR_SYMPTOMS, TOKEN_NOT_SURE, TOKEN_SCHEDULE_APPOINTMENT,
};
use triage_core::TriageError;
use triage_infrastructure::DirSessionRepository;
use triage_interaction::RemoteGenerationClient;

/// Simulated typing pause before a bot reply is shown. Visual only:
/// turns are already persisted by the time this runs.
const TYPING_DELAY: Duration = Duration::from_millis(400);

const SLASH_COMMANDS: &[&str] = &["/sessions", "/open", "/new", "/delete", "/quit"];

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        let mut commands: Vec<String> = SLASH_COMMANDS.iter().map(|c| c.to_string()).collect();
        // The whole option-token vocabulary is completable
        commands.extend(catalog().categories().iter().map(|c| c.id.to_string()));
        commands.extend(catalog().symptoms().iter().map(|s| s.id.to_string()));
        commands.extend(
            [
                "level1",
                "level2",
                "level3",
                TOKEN_BACK,
                TOKEN_NOT_SURE,
                TOKEN_DESCRIBE_SYMPTOMS,
                TOKEN_SCHEDULE_APPOINTMENT,
                TOKEN_MONITOR_SYMPTOMS,
                TOKEN_CALL_911,
                TOKEN_FIND_HOSPITAL,
                TOKEN_FIND_CLINIC,
            ]
            .iter()
            .map(|t| t.to_string()),
        );
        Self { commands }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        let candidates: Vec<Pair> = self
            .commands
            .iter()
            .filter(|cmd| !line.is_empty() && cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: cmd.clone(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        if line.is_empty() || line.contains(' ') {
            return None;
        }
        self.commands
            .iter()
            .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
            .map(|cmd| cmd[line.len()..].to_string())
    }
}

impl Validator for CliHelper {}

/// Prints navigation intents instead of switching screens.
struct PrintNavigationBridge;

impl NavigationBridge for PrintNavigationBridge {
    fn navigate(&self, intent: NavigationIntent) {
        let screen = match intent {
            NavigationIntent::Emergency => "emergency call screen",
            NavigationIntent::Hospitals => "hospital locator",
            NavigationIntent::Contacts => "care contacts",
        };
        println!("{}", format!("[navigate -> {screen}]").bright_magenta());
    }
}

/// Backend used when no generation credentials are configured; the
/// engine degrades every fallback turn to its apology reply.
struct OfflineBackend;

#[async_trait::async_trait]
impl GenerationBackend for OfflineBackend {
    async fn generate(&self, _history: &[TurnMessage], _text: &str) -> triage_core::Result<String> {
        Err(TriageError::generation("no generation backend configured"))
    }
}

/// Shared wiring handed to the command handler.
struct ReplState {
    owner_id: String,
    repository: Arc<dyn SessionRepository>,
    backend: Arc<dyn GenerationBackend>,
    bridge: Arc<dyn NavigationBridge>,
    service: SessionService,
}

fn make_backend() -> Arc<dyn GenerationBackend> {
    match RemoteGenerationClient::try_from_env() {
        Ok(client) => Arc::new(client),
        Err(e) => {
            eprintln!(
                "{}",
                format!("Generation service unavailable ({e}); continuing offline.").bright_black()
            );
            Arc::new(OfflineBackend)
        }
    }
}

fn print_reply(text: &str, options: &[String]) {
    for line in text.lines() {
        println!("{}", line.bright_blue());
    }
    if !options.is_empty() {
        println!("{}", format!("options: {}", options.join(" | ")).bright_black());
    }
    println!();
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let owner_id = std::env::var("USER").unwrap_or_else(|_| "local-user".to_string());
    let repository: Arc<dyn SessionRepository> =
        Arc::new(DirSessionRepository::default_location().await?);
    let state = ReplState {
        owner_id: owner_id.clone(),
        repository: repository.clone(),
        backend: make_backend(),
        bridge: Arc::new(PrintNavigationBridge),
        service: SessionService::new(repository),
    };

    let mut engine = Arc::new(TriageEngine::new(
        owner_id,
        state.repository.clone(),
        state.backend.clone(),
        state.bridge.clone(),
    ));

    let helper = CliHelper::new();
    let mut rl = Editor::new()?;
    rl.set_helper(Some(helper));

    println!("{}", "=== Triage Assistant ===".bright_magenta().bold());
    println!(
        "{}",
        "Tap an option token or describe how you feel. '/sessions' lists past \
         conversations, '/quit' exits."
            .bright_black()
    );
    println!();

    let greeting = engine.greet();
    print_reply(&greeting.text, &greeting.options);

    loop {
        let readline = rl.readline(">> ");
        match readline {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);

                if trimmed == "/quit" || trimmed == "quit" || trimmed == "exit" {
                    println!("{}", "Take care!".bright_green());
                    break;
                }

                if let Some(rest) = trimmed.strip_prefix('/') {
                    handle_command(rest, &state, &mut engine).await;
                    continue;
                }

                println!("{}", format!("> {trimmed}").green());

                // Token spellings never contain spaces; anything else is
                // typed free text.
                let input = if trimmed.contains(' ') {
                    UserInput::Text(trimmed.to_string())
                } else {
                    UserInput::Selection(trimmed.to_string())
                };

                match engine.handle_input(input).await {
                    Some(reply) => {
                        tokio::time::sleep(TYPING_DELAY).await;
                        print_reply(&reply.text, &reply.options);
                    }
                    None => {
                        // Session was switched away while the reply was
                        // in flight; nothing to show.
                    }
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted)
            | Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "Take care!".bright_green());
                break;
            }
            Err(e) => {
                eprintln!("{}", format!("Input error: {e}").red());
                break;
            }
        }
    }

    Ok(())
}

async fn handle_command(command: &str, state: &ReplState, engine: &mut Arc<TriageEngine>) {
    let mut parts = command.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("sessions"), _) => match state.service.list_sessions(&state.owner_id).await {
            Ok(sessions) if sessions.is_empty() => {
                println!("{}", "No saved conversations yet.".bright_black());
            }
            Ok(sessions) => {
                for session in sessions {
                    println!(
                        "{}  {}  {}",
                        session.id.bright_cyan(),
                        session.updated_at.bright_black(),
                        session.title
                    );
                }
            }
            Err(e) => eprintln!("{}", format!("Failed to list sessions: {e}").red()),
        },
        (Some("open"), Some(session_id)) => {
            match state
                .service
                .open_engine(session_id, state.backend.clone(), state.bridge.clone())
                .await
            {
                Ok(reopened) => {
                    engine.detach();
                    *engine = Arc::new(reopened);
                    println!("{}", format!("Reopened session {session_id}.").bright_green());
                    for turn in engine.transcript().await {
                        match turn.role {
                            TurnRole::User => println!("{}", format!("> {}", turn.text).green()),
                            TurnRole::Bot => {
                                for line in turn.text.lines() {
                                    println!("{}", line.bright_blue());
                                }
                            }
                        }
                    }
                    println!();
                }
                Err(e) => eprintln!("{}", format!("Failed to open session: {e}").red()),
            }
        }
        (Some("new"), _) => {
            engine.detach();
            *engine = Arc::new(TriageEngine::new(
                state.owner_id.clone(),
                state.repository.clone(),
                state.backend.clone(),
                state.bridge.clone(),
            ));
            let greeting = engine.greet();
            print_reply(&greeting.text, &greeting.options);
        }
        (Some("delete"), Some(session_id)) => match state.service.delete_session(session_id).await {
            Ok(()) => println!("{}", format!("Deleted session {session_id}.").bright_green()),
            Err(e) => eprintln!("{}", format!("Failed to delete session: {e}").red()),
        },
        _ => {
            println!(
                "{}",
                "Commands: /sessions, /open <id>, /new, /delete <id>, /quit".bright_black()
            );
        }
    }
}
