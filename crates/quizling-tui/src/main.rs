//! Quizling terminal entry point.
//!
//! # Usage
//!
//! ```bash
//! # Generated content (needs QUIZLING_API_KEY or GEMINI_API_KEY)
//! quizling --log-file quizling.log
//!
//! # Built-in puzzles only
//! quizling --offline --max-level 2
//! ```

use std::{fs::File, sync::Mutex};

use clap::Parser;
use quizling_content::{RemoteConfig, SystemEnv, select_provider};
use quizling_core::GameConfig;
use quizling_tui::{Runtime, Session, TerminalDriver};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Quizling terminal quiz game
#[derive(Parser, Debug)]
#[command(name = "quizling")]
#[command(about = "Arithmetic and vocabulary puzzles for young learners")]
#[command(version)]
struct Args {
    /// Number of levels in a game
    #[arg(long, default_value_t = GameConfig::default().max_level)]
    max_level: u32,

    /// Correct answers needed to finish a level
    #[arg(long, default_value_t = GameConfig::default().questions_to_level_up)]
    quota: u32,

    /// Never contact the content service; use built-in puzzles
    #[arg(long)]
    offline: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Write logs to this file. Without it nothing is logged, since the
    /// terminal belongs to the game.
    #[arg(long)]
    log_file: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
        let file = File::create(path)?;
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(filter)
            .init();
    }

    tracing::info!("Quizling starting");

    let config =
        GameConfig::default().with_max_level(args.max_level).with_questions_to_level_up(args.quota);
    let session = Session::new(config)?;

    let env = SystemEnv::new()?;
    let remote = if args.offline { None } else { RemoteConfig::from_env() };
    let provider = select_provider(remote, env.clone());

    let driver = TerminalDriver::new()?;
    let session = Runtime::new(driver, session, provider, env).run().await?;

    tracing::info!(score = session.score(), level = session.level(), "Quizling finished");

    Ok(())
}
