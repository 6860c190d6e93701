//! Draftflow CLI - terminal chat surface for the drafting assistant.
//!
//! Loads configuration (a missing API key halts startup), builds the
//! Gemini adapter, and runs a read-eval loop feeding user lines to the
//! step controller. The presentation layer is a pass-through: it renders
//! assistant messages and forwards input, with no decision logic.

use std::io::{BufRead, Write};
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use draftflow::adapters::{GeminiConfig, GeminiGenerator};
use draftflow::application::{ControllerAction, StepController};
use draftflow::config::AppConfig;
use draftflow::domain::session::Session;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "failed to load configuration");
            std::process::exit(1);
        }
    };
    if let Err(err) = config.validate() {
        tracing::error!(error = %err, "invalid configuration");
        std::process::exit(1);
    }

    let api_key = config.ai.gemini_api_key.clone().unwrap_or_default();
    let gemini_config = GeminiConfig::new(api_key)
        .with_model(&config.ai.model)
        .with_base_url(&config.ai.base_url)
        .with_timeout(config.ai.timeout());
    let controller = StepController::new(Arc::new(GeminiGenerator::new(gemini_config)));

    let mut session = Session::new();
    tracing::info!(session_id = %session.id(), "session started");

    // Opening question.
    step(&controller, &mut session, "").await;

    let stdin = std::io::stdin();
    loop {
        print!("> ");
        let _ = std::io::stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let line = line.trim();

        match line {
            "/quit" | "/exit" => break,
            "/transcript" => {
                for entry in session.transcript().entries() {
                    println!("[{}] {}", entry.speaker().label(), entry.text());
                }
                continue;
            }
            _ => {}
        }

        if let Some(fresh) = step(&controller, &mut session, line).await {
            session = fresh;
            step(&controller, &mut session, "").await;
        }
    }
}

/// Runs one interaction and renders its messages. Returns a fresh session
/// when the user asked to restart.
async fn step(controller: &StepController, session: &mut Session, input: &str) -> Option<Session> {
    match controller.advance(session, input).await {
        Ok(ControllerAction::Respond { messages })
        | Ok(ControllerAction::Completed { messages, .. }) => {
            for message in messages {
                println!("{}\n", message);
            }
            None
        }
        Ok(ControllerAction::Restarted) => {
            println!("새 대화를 시작합니다.\n");
            Some(Session::new())
        }
        Err(err) => {
            tracing::error!(error = %err, "controller invariant violated");
            None
        }
    }
}
