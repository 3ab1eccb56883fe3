//! Terminal front end for the vocabulary drill engine.

pub mod commands;
pub mod config;
pub mod db;

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vocab_core::{PracticeMode, QuestionSetBuilder};

use crate::config::Config;
use crate::db::SqliteRepository;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Section database (defaults to $VOCAB_DB_PATH, then the local data dir)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List sections
    Sections,
    /// Import sections from an exported JSON file
    Import { file: PathBuf },
    /// Export every section to a JSON file
    Export { file: PathBuf },
    /// Delete a section by list position or ID
    Delete { section: String },
    /// Move a section to another list position
    Move { from: usize, to: usize },
    /// Practise a section: flashcard, quiz, response or test
    Practice { section: String, mode: PracticeMode },
}

pub fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = Config::resolve(args.db.clone());

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.log_filter))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    ensure_parent_dir(&config.db_path)?;

    tracing::debug!(path = %config.db_path.display(), "opening section database");
    let repo = SqliteRepository::open(&config.db_path)
        .with_context(|| format!("failed to open {}", config.db_path.display()))?;

    let mut out = io::stdout().lock();

    match args.command {
        Commands::Sections => commands::list_sections(&repo, &mut out)?,
        Commands::Import { file } => {
            commands::import_library(&repo, &file, &mut out)?;
        }
        Commands::Export { file } => {
            commands::export_library(&repo, &file, &mut out)?;
        }
        Commands::Delete { section } => commands::delete_section(&repo, &section, &mut out)?,
        Commands::Move { from, to } => commands::move_section(&repo, from, to, &mut out)?,
        Commands::Practice { section, mode } => {
            let section = commands::resolve_section(&repo, &section)?;
            let mut builder = QuestionSetBuilder::default();
            let mut input = io::stdin().lock();
            commands::practice(&section, mode, &mut builder, &mut input, &mut out)?;
        }
    }

    Ok(())
}

/// Create the directory that will hold `path`.
fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    Ok(())
}
