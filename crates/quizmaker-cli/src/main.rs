//! quizmaker CLI, the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod terminal;

#[derive(Parser)]
#[command(name = "quizmaker", version, about = "Picture quiz runner and content checker")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a quiz in the terminal
    Play {
        /// Path to a quiz .json file
        #[arg(long)]
        quiz: PathBuf,

        /// RNG seed for a reproducible question order
        #[arg(long)]
        seed: Option<u64>,

        /// Feedback delay in milliseconds (overrides config)
        #[arg(long)]
        delay_ms: Option<u64>,

        /// Write the last finished attempt as JSON
        #[arg(long)]
        report: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate quiz .json files
    Validate {
        /// Path to a quiz file or directory
        #[arg(long)]
        quiz: PathBuf,
    },

    /// List the quizzes in a content directory
    List {
        /// Content directory
        #[arg(long, default_value = "content")]
        content: PathBuf,
    },

    /// Show a saved attempt report
    Review {
        /// Report written by `play --report`
        #[arg(long)]
        report: PathBuf,
    },

    /// Print the offline cache plan
    Offline {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Cache names currently present, to check for stale ones
        #[arg(long = "existing")]
        existing: Vec<String>,
    },

    /// Create a starter config and example quiz
    Init,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizmaker=info".parse().expect("static directive")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            quiz,
            seed,
            delay_ms,
            report,
            config,
        } => commands::play::execute(quiz, seed, delay_ms, report, config).await,
        Commands::Validate { quiz } => commands::validate::execute(quiz),
        Commands::List { content } => commands::list::execute(content),
        Commands::Review { report } => commands::review::execute(report),
        Commands::Offline { config, existing } => commands::offline::execute(config, existing),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
