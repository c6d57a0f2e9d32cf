//! EasyBoard CLI - work with universe files from the terminal
//!
//! Generates the sample universe, inspects and searches archives, moves
//! characters and converts between the archive and single-file JSON formats.

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "easyboard")]
#[command(author = "EasyBoard Contributors")]
#[command(version)]
#[command(about = "Character relationship boards, from the command line", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the sample universe archive
    Generate {
        /// Output archive
        #[arg(short, long, default_value = "universe_test_v2.zip")]
        output: PathBuf,
    },

    /// Show the characters and relations of a universe
    Inspect {
        /// Universe archive (.zip) or JSON universe (.json)
        file: PathBuf,

        /// Output statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Search characters by name
    Search {
        /// Universe archive (.zip) or JSON universe (.json)
        file: PathBuf,

        /// Part of the character name, case-insensitive
        query: String,

        /// Maximum results to return
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Move a character to a new position
    Move {
        /// Universe archive (.zip) or JSON universe (.json)
        file: PathBuf,

        /// Character id
        id: String,

        #[arg(allow_hyphen_values = true)]
        x: f64,

        #[arg(allow_hyphen_values = true)]
        y: f64,

        /// Where to write the result (defaults to the input file)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Convert between archive and JSON universes, by file extension
    Convert {
        /// Input universe
        input: PathBuf,

        /// Output universe (defaults to univers.json or universe.zip,
        /// whichever is the other format)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();

    let result = match cli.command {
        Commands::Generate { output } => commands::generate(&output),
        Commands::Inspect { file, json } => commands::inspect(&file, json),
        Commands::Search { file, query, limit } => commands::search(&file, &query, limit),
        Commands::Move {
            file,
            id,
            x,
            y,
            output,
        } => commands::move_character(&file, &id, x, y, output.as_deref()),
        Commands::Convert { input, output } => commands::convert(&input, output.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}
