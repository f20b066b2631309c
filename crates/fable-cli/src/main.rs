//! CLI frontend for the Fable interactive fiction engine.

mod commands;
mod store;
mod story_file;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "fable",
    about = "Fable: play text adventures written as JSON story files",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a story interactively
    Play {
        /// Story file (.json)
        story: PathBuf,

        /// RNG seed for reproducible dice
        #[arg(short, long)]
        seed: Option<u64>,

        /// Save file used by /save, /load and autosave
        #[arg(long, default_value = "fable-save.json")]
        save: PathBuf,

        /// Do not save automatically while playing
        #[arg(long)]
        no_autosave: bool,
    },

    /// Validate a story file and its cross references
    Check {
        /// Story file (.json)
        story: PathBuf,
    },

    /// Print the transcript of a saved game
    Replay {
        /// Save file written by `fable play`
        save: PathBuf,
    },
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            story,
            seed,
            save,
            no_autosave,
        } => commands::play::run(&story, seed, &save, !no_autosave),
        Commands::Check { story } => commands::check::run(&story),
        Commands::Replay { save } => commands::replay::run(&save),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
