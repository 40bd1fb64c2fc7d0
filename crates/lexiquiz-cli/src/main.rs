//! lexiquiz CLI, a terminal front end for the quiz engine.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "lexiquiz", version, about = "Bilingual vocabulary flash-card quiz")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a quiz session in the terminal
    Play {
        /// Path to the word list (.csv)
        #[arg(long)]
        words: Option<PathBuf>,

        /// Words per session
        #[arg(long)]
        count: Option<usize>,

        /// Direction: source-to-target (s2t) or target-to-source (t2s)
        #[arg(long)]
        direction: Option<String>,

        /// RNG seed for a reproducible session
        #[arg(long)]
        seed: Option<u64>,

        /// Skip the pause after each answer
        #[arg(long)]
        no_delay: bool,

        /// Output directory for saved reports
        #[arg(long, default_value = "./lexiquiz-results")]
        output: PathBuf,

        /// Output format: text, json, html, all
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Check a word list for problems
    Validate {
        /// Path to the word list (.csv)
        #[arg(long)]
        words: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and a sample word list
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("lexiquiz=info,lexiquiz_core=error")
            }),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            words,
            count,
            direction,
            seed,
            no_delay,
            output,
            format,
            config,
        } => commands::play::execute(commands::play::PlayArgs {
            words,
            count,
            direction,
            seed,
            no_delay,
            output,
            format,
            config,
        }),
        Commands::Validate { words, config } => commands::validate::execute(words, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
