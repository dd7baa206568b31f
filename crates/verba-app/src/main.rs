use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use verba_types::{AppEvent, Engine, Language};

mod commands;
mod controller;
mod events;
mod io;
mod profile;
mod state;
mod ui;


use self::controller::AppController;
use self::events::session_command::{clipboard_input, read_clipboard};
use self::state::AppState;

/// Translate text, images and PDFs through a remote translation API
#[derive(Parser)]
#[command(name = "verba", version, about)]
struct Cli {
    /// JSON config file (default: ./config.json when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Translate text, a file or the clipboard
    Translate {
        /// Text to translate; words are joined with spaces
        text: Vec<String>,

        /// Extract text from an image (png, jpg, jpeg) or PDF first
        #[arg(long, conflicts_with = "clipboard")]
        file: Option<PathBuf>,

        /// Translate the clipboard contents
        #[arg(long)]
        clipboard: bool,

        #[arg(long)]
        from: Option<Language>,

        #[arg(long)]
        to: Option<Language>,

        #[arg(long)]
        engine: Option<Engine>,

        /// Copy the result to the clipboard
        #[arg(long)]
        copy: bool,
    },
    /// Print the text extracted from an image or PDF
    Extract {
        path: PathBuf,

        /// Language of the text, used to pick the OCR model
        #[arg(long)]
        from: Option<Language>,
    },
    /// Synonyms and antonyms for a word
    Thesaurus {
        word: String,

        #[arg(long, default_value = "english")]
        language: Language,
    },
    /// Line-oriented session (default)
    Interactive,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = dotenvy::dotenv() {
        // A missing .env is the common case
        if !e.not_found() {
            eprintln!("Failed to load .env: {e}");
        }
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = profile::load_config(cli.config.as_deref())?;
    let mut state = AppState::new(config)?;

    match cli.command.unwrap_or(Command::Interactive) {
        Command::Translate {
            text,
            file,
            clipboard,
            from,
            to,
            engine,
            copy,
        } => {
            if let Some(from) = from {
                state.source = from;
            }
            if let Some(to) = to {
                state.target = to;
            }
            if let Some(engine) = engine {
                state.engine = engine;
            }

            let input = if let Some(path) = file {
                match state.extract(path).await {
                    Ok(text) => text,
                    Err(e) => {
                        println!("{}", e.user_message());
                        return Ok(());
                    }
                }
            } else if clipboard {
                match clipboard_input(read_clipboard().await) {
                    Ok(text) => text,
                    Err(message) => {
                        println!("{message}");
                        return Ok(());
                    }
                }
            } else {
                text.join(" ")
            };

            match state.translate(&input).await {
                Some(result) => {
                    println!("{result}");
                    if copy && let Err(e) = verba_io::copy_text(&result) {
                        tracing::warn!("Clipboard write failed: {e:#}");
                        eprintln!("Clipboard error: {e}");
                    }
                }
                None => eprintln!("Nothing to translate"),
            }
        }
        Command::Extract { path, from } => {
            if let Some(from) = from {
                state.source = from;
            }
            match state.extract(path).await {
                Ok(text) => println!("{text}"),
                Err(e) => println!("{}", e.user_message()),
            }
        }
        Command::Thesaurus { word, language } => {
            println!("{}", state.session.lookup_thesaurus(&word, language));
        }
        Command::Interactive => run_interactive(state).await?,
    }

    Ok(())
}

async fn run_interactive(state: AppState) -> Result<()> {
    let controller = AppController::new();
    let mut tasks = controller.spawn_tasks(state);

    let show_prompt = atty::is(atty::Stream::Stdin);
    if show_prompt {
        controller
            .input_sender()
            .send(AppEvent::ShowMessage(
                "Verba interactive mode. Type :help for commands.".to_string(),
            ))
            .await?;
    }
    controller.spawn_stdin(show_prompt);

    while let Some(result) = tasks.join_next().await {
        match result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                tracing::error!("Task failed: {e:#}");
                controller.shutdown();
            }
            Err(e) => {
                tracing::error!("Task panicked: {e}");
                controller.shutdown();
            }
        }
    }

    Ok(())
}
