#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

mod command;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use command::{
    BuildInput, BuildStrategy, CommandStrategy, InitStrategy, Selection, SyncStrategy,
    VersionStrategy,
};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "hanzi")]
#[command(about = "Chinese vocabulary study-card builder", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build cards for the most frequent words or one HSK level
    Build {
        /// Number of words to take from the frequency index
        #[arg(short = 'n', long, conflicts_with = "level")]
        top: Option<usize>,

        /// Frequency rank to start from
        #[arg(long, default_value_t = 0, requires = "top")]
        from: usize,

        /// HSK level to build (file stem of the level list)
        #[arg(short = 'l', long)]
        level: Option<String>,

        /// Write the built cards as JSON
        #[arg(long)]
        json: Option<PathBuf>,

        /// Fetch text-to-speech audio for every card
        #[arg(long)]
        audio: bool,

        /// Add the cards to Anki through AnkiConnect
        #[arg(long)]
        export: bool,

        /// Worker threads (0 = one per core, 1 = sequential)
        #[arg(short = 'w', long)]
        workers: Option<usize>,
    },
    /// List the card ids of the configured deck
    Sync,
    /// Initialize configuration
    Init,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            top,
            from,
            level,
            json,
            audio,
            export,
            workers,
        } => {
            let selection = match (top, level) {
                (Some(top), _) => Selection::Frequency { from, top },
                (None, Some(level)) => Selection::Level(level),
                (None, None) => anyhow::bail!("Pass --top N or --level L"),
            };
            BuildStrategy
                .execute(BuildInput {
                    selection,
                    json,
                    audio,
                    export,
                    workers,
                })
                .await?;
        }
        Commands::Sync => SyncStrategy.execute(()).await?,
        Commands::Init => InitStrategy.execute(()).await?,
        Commands::Version => VersionStrategy.execute(()).await?,
    }

    Ok(())
}
