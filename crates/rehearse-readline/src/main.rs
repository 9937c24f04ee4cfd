mod helper;
mod logging;
mod setup_flow;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;

use helper::{RESTART_COMMAND, ReplHelper, TRANSCRIPT_COMMAND};
use rehearse_application::InterviewService;
use rehearse_core::RehearseError;
use rehearse_core::config::{AppConfig, SessionStoreKind};
use rehearse_core::prompt::TERMINATION_PHRASE;
use rehearse_core::secret::SecretService;
use rehearse_core::session::{InterviewState, SessionRepository, Speaker, Turn};
use rehearse_core::setup::{DomainCatalog, SetupDraft};
use rehearse_infrastructure::{
    ConfigService, InMemorySessionRepository, RehearsePaths, SecretServiceImpl, TomlSessionRepository,
};
use rehearse_interaction::{GeminiClient, InterviewReply};

type ReplEditor = Editor<ReplHelper, DefaultHistory>;

#[derive(Parser)]
#[command(name = "rehearse")]
#[command(about = "Rehearse - practice job interviews with an AI interviewer", long_about = None)]
struct Cli {
    /// Session identity; reuse it with the file store to resume an interview
    #[arg(long)]
    session: Option<String>,

    /// Session store (memory or file), overriding config.toml
    #[arg(long)]
    store: Option<SessionStoreKind>,

    /// Gemini model name, overriding config.toml
    #[arg(long)]
    model: Option<String>,

    /// Directory holding config.toml, secret.json, sessions/ and logs/
    #[arg(long)]
    base_dir: Option<PathBuf>,
}

/// What the chat loop should do after a line was handled.
enum Flow {
    Continue,
    Quit,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let paths = RehearsePaths::new(cli.base_dir.as_deref());
    let _log_guard = logging::init(&paths)?;

    let mut config = ConfigService::new(&paths)?.load()?;
    if let Some(store) = cli.store {
        config.session_store = store;
    }
    if let Some(model) = cli.model {
        config.model = model;
    }

    let api_key = match SecretServiceImpl::new(&paths)?.gemini_api_key().await {
        Ok(key) => key,
        Err(err) => {
            eprintln!("{}", err.to_string().red());
            return Err(err.into());
        }
    };
    let model = GeminiClient::from_config(api_key, &config)?;
    let service = InterviewService::new(Arc::new(model), session_repository(&config, &paths)?);

    let session_id = cli.session.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    tracing::info!(session_id = %session_id, model = %config.model, store = %config.session_store, "REPL started");

    let mut rl: ReplEditor = Editor::new()?;
    rl.set_helper(Some(ReplHelper::new()));

    println!("{}", "=== Rehearse: AI Mock Interview ===".bright_magenta().bold());
    println!(
        "{}",
        format!(
            "Type '{TERMINATION_PHRASE}' for feedback, '{TRANSCRIPT_COMMAND}' to review, \
             '{RESTART_COMMAND}' to start over, or 'quit' to exit."
        )
        .bright_black()
    );
    println!();

    match service.state(&session_id).await? {
        InterviewState::Active => {
            println!("{}", "Resuming your interview.".bright_green());
            if let Some(last) = service.transcript(&session_id).await?.last() {
                print_turn(last);
            }
        }
        InterviewState::Ended => {
            println!(
                "{}",
                format!("This interview has ended. Type '{RESTART_COMMAND}' to begin a new one.").yellow()
            );
        }
        InterviewState::Setup => {
            if let Flow::Quit = begin_interview(&mut rl, &service, &session_id).await {
                return Ok(());
            }
        }
    }

    loop {
        let line = match rl.readline("You> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {err:?}").red());
                break;
            }
        };

        let trimmed = line.trim();
        if !trimmed.is_empty() {
            let _ = rl.add_history_entry(trimmed);
        }

        let flow = match trimmed {
            _ if setup_flow::is_quit_command(trimmed) => Flow::Quit,
            TRANSCRIPT_COMMAND => {
                show_transcript(&service, &session_id).await;
                Flow::Continue
            }
            RESTART_COMMAND => match service.reset(&session_id).await {
                Ok(()) => begin_interview(&mut rl, &service, &session_id).await,
                Err(err) => {
                    report_error(&err);
                    Flow::Continue
                }
            },
            _ => {
                match service.send(&session_id, trimmed).await {
                    Ok(reply) => print_reply(&reply),
                    Err(err) => report_error(&err),
                }
                Flow::Continue
            }
        };

        if let Flow::Quit = flow {
            println!("{}", "Goodbye!".bright_green());
            break;
        }
    }

    Ok(())
}

fn session_repository(config: &AppConfig, paths: &RehearsePaths) -> Result<Arc<dyn SessionRepository>> {
    Ok(match config.session_store {
        SessionStoreKind::Memory => match config.session_ttl_secs {
            Some(secs) => Arc::new(InMemorySessionRepository::with_ttl(Duration::from_secs(secs))),
            None => Arc::new(InMemorySessionRepository::new()),
        },
        SessionStoreKind::File => Arc::new(TomlSessionRepository::from_paths(paths)?),
    })
}

/// Collects setup answers and starts the interview. Retries after failures.
async fn begin_interview(rl: &mut ReplEditor, service: &InterviewService, session_id: &str) -> Flow {
    loop {
        let Some(draft) = collect_setup(rl) else {
            return Flow::Quit;
        };

        println!("{}", "Preparing your interviewer...".bright_black());
        match service.start(session_id, draft).await {
            Ok(opening) => {
                print_turn(&opening);
                return Flow::Continue;
            }
            Err(err) => {
                report_error(&err);
                println!("{}", "Let's try the setup again.".yellow());
            }
        }
    }
}

/// Reads one answer; `None` when the user quits or closes input.
fn ask(rl: &mut ReplEditor, prompt: &str) -> Option<String> {
    loop {
        match rl.readline(prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if setup_flow::is_quit_command(trimmed) {
                    return None;
                }
                return Some(trimmed.to_string());
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(_) => return None,
        }
    }
}

/// Walks the three setup steps: domain, role and level, interview type.
fn collect_setup(rl: &mut ReplEditor) -> Option<SetupDraft> {
    let catalog = DomainCatalog::new();
    let mut draft = SetupDraft::new();

    println!("{}", "Step 1: choose a domain".bright_magenta());
    for (i, domain) in catalog.domains().iter().enumerate() {
        println!("  {}. {}", i + 1, domain.name);
    }
    let domain = loop {
        match setup_flow::parse_domain_choice(&catalog, &ask(rl, "Domain> ")?) {
            Some(domain) => break domain,
            None => println!("{}", "Please pick a number from the list.".yellow()),
        }
    };
    draft = draft.with_domain(domain.name);

    println!("{}", "Step 2: role and level".bright_magenta());
    for (i, role) in domain.roles.iter().enumerate() {
        println!("  {}. {}", i + 1, role);
    }
    println!("{}", "  (or type any other role)".bright_black());
    let role = loop {
        match setup_flow::parse_role_choice(domain.roles, &ask(rl, "Role> ")?) {
            Some(role) => break role,
            None => println!("{}", "Please enter a role.".yellow()),
        }
    };
    let level = loop {
        let level = ask(rl, "Level (e.g. Junior, Mid, Senior)> ")?;
        if !level.is_empty() {
            break level;
        }
        println!("{}", "Please enter a level.".yellow());
    };
    draft = draft.with_role_and_level(role, level);

    println!("{}", "Step 3: interview type".bright_magenta());
    for (i, interview_type) in setup_flow::interview_type_menu().iter().enumerate() {
        println!("  {}. {}", i + 1, interview_type);
    }
    let interview_type = loop {
        match setup_flow::parse_interview_type_choice(&ask(rl, "Type> ")?) {
            Some(interview_type) => break interview_type,
            None => println!("{}", "Please pick a number from the list.".yellow()),
        }
    };

    Some(draft.with_interview_type(interview_type))
}

async fn show_transcript(service: &InterviewService, session_id: &str) {
    match service.transcript(session_id).await {
        Ok(turns) => {
            println!("{}", "--- Transcript ---".bright_magenta());
            for turn in &turns {
                print_turn(turn);
            }
            println!("{}", "------------------".bright_magenta());
        }
        Err(err) => report_error(&err),
    }
}

fn print_reply(reply: &InterviewReply) {
    if reply.is_final {
        println!();
        println!("{}", "=== Interview Feedback ===".bright_yellow().bold());
        for line in reply.response_text.lines() {
            println!("{}", line.bright_yellow());
        }
        println!();
        println!(
            "{}",
            format!("Type '{RESTART_COMMAND}' for a new interview or 'quit' to exit.").bright_black()
        );
    } else {
        print_interviewer(&reply.response_text);
    }
}

fn print_turn(turn: &Turn) {
    match turn.speaker {
        Speaker::Interviewer => print_interviewer(&turn.text),
        Speaker::Candidate => println!("{}", format!("You: {}", turn.text).green()),
        Speaker::System => {
            for line in turn.text.lines() {
                println!("{}", line.bright_yellow());
            }
        }
    }
}

fn print_interviewer(text: &str) {
    println!("{}", "[Interviewer]".bright_magenta());
    for line in text.lines() {
        println!("{}", line.bright_blue());
    }
    println!();
}

fn report_error(err: &RehearseError) {
    tracing::warn!(error = %err, "Request failed");
    let message = match err {
        RehearseError::SessionInactive => format!(
            "The interview has ended. Type '{RESTART_COMMAND}' to begin a new one or 'quit' to exit."
        )
        .yellow(),
        RehearseError::Validation(message) => message.yellow(),
        RehearseError::SetupIncomplete { .. } => {
            format!("No interview in progress. Type '{RESTART_COMMAND}' to set one up.").yellow()
        }
        RehearseError::ModelUnavailable {
            retry_after_secs: Some(secs),
            ..
        } => format!("The interviewer is unavailable. Please try again in {secs} seconds.").red(),
        RehearseError::ModelUnavailable { retryable: true, .. } => {
            "The interviewer is unavailable right now. Please send your answer again.".red()
        }
        other => format!("Error: {other}").red(),
    };
    println!("{message}");
}
