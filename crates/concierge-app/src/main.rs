//! Concierge application binary - composition root.
//!
//! 1. Parse CLI arguments
//! 2. Load configuration from TOML and apply CLI/env overrides
//! 3. Initialize tracing
//! 4. Build the session service
//! 5. Serve the HTTP API, run a terminal chat, or print the config

mod cli;

use std::io::Write;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use concierge_api::state::AppState;
use concierge_chat::SessionService;
use concierge_core::{ConciergeConfig, ConciergeReply, Role};

use cli::{ChatInput, CliArgs, Command};

/// Install the global subscriber. `RUST_LOG` wins over the resolved level.
fn init_tracing(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .init();
}

/// Merge CLI and env overrides into the loaded configuration.
fn apply_overrides(config: &mut ConciergeConfig, args: &CliArgs) {
    config.server.port = args.resolve_port(config.server.port);
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }
    if let Some(seed) = args.seed {
        config.chat.rng_seed = Some(seed);
    }
    config.general.log_level = args.resolve_log_level(&config.general.log_level);
}

fn print_reply(reply: &ConciergeReply) {
    println!("concierge> {}", reply.content);
    println!(
        "           [{} | confidence {:.2}]",
        reply.category, reply.confidence
    );
    for (i, suggestion) in reply.suggestions.iter().enumerate() {
        println!("           {}. {}", i + 1, suggestion);
    }
}

/// Interactive chat against an in-process service.
///
/// `/history` prints the transcript, `/quit` or EOF exits.
async fn run_chat(service: SessionService) -> Result<(), Box<dyn std::error::Error>> {
    let session = service.create_session().await;
    println!("Welcome! Ask me about dining, spa, transport, events and more.");
    println!("Type /history to see the conversation, /quit to leave.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("you> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };
        match ChatInput::parse(&line) {
            ChatInput::Empty => continue,
            ChatInput::Quit => break,
            ChatInput::History => {
                for message in service.get_conversation_history(&session.id).await {
                    let who = match message.role {
                        Role::User => "you",
                        Role::Assistant => "concierge",
                    };
                    println!(
                        "  [{}] {}: {}",
                        message.timestamp.format("%H:%M:%S"),
                        who,
                        message.content
                    );
                }
            }
            ChatInput::Message(text) => {
                let reply = service.send_message(&session.id, text).await?;
                print_reply(&reply);
            }
        }
    }

    service.delete_session(&session.id).await;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config. Read before tracing so the file can set the log level; a load
    // failure is reported once the subscriber is up.
    let config_file = args.resolve_config_path();
    let loaded = ConciergeConfig::load_if_exists(&config_file);
    let mut config = match loaded {
        Ok(Some(ref c)) => c.clone(),
        _ => ConciergeConfig::default(),
    };
    apply_overrides(&mut config, &args);

    // Tracing.
    init_tracing(&config.general.log_level);

    match loaded {
        Ok(Some(_)) => tracing::info!(path = %config_file.display(), "Configuration loaded"),
        Ok(None) => tracing::info!(path = %config_file.display(), "No config file, using defaults"),
        Err(e) => tracing::warn!(
            path = %config_file.display(),
            error = %e,
            "Failed to load config, using defaults"
        ),
    }

    match args.command() {
        Command::Config => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
        Command::Chat => {
            let service = SessionService::from_config(&config)?;
            run_chat(service).await
        }
        Command::Serve => {
            tracing::info!("Starting concierge v{}", env!("CARGO_PKG_VERSION"));
            let state = AppState::from_config(config)?;
            if let Err(e) = concierge_api::start_server(state).await {
                tracing::error!(error = %e, "API server stopped");
                tracing::error!("Try: CONCIERGE_PORT=<port> concierge serve");
                return Err(e.into());
            }
            Ok(())
        }
    }
}
