//! Kosa CLI
//!
//! Command-line export of the restricted-corpus Pāli dictionary ebook.
//!
//! # Commands
//!
//! - `export` - Render the ebook units into an output directory
//! - `inspect` - Display selection and partition statistics
//! - `verify` - Report every data integrity problem in the input rows

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Restricted-corpus Pāli dictionary export tools.
#[derive(Parser)]
#[command(name = "kosa")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding headwords.json, sandhi.json and inflections.json
    #[arg(global = true, short, long)]
    input: Option<PathBuf>,

    /// JSON configuration file
    #[arg(global = true, short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the ebook units into an output directory
    Export {
        /// Output directory
        #[arg(short, long)]
        out: PathBuf,

        /// Corpus identifiers to restrict to (repeatable, replaces the configured list)
        #[arg(long = "corpus")]
        corpus: Vec<String>,

        /// Export only headwords attested in the corpus
        #[arg(long)]
        attested_only: bool,

        /// Directory of <name>.hbs template overrides
        #[arg(long)]
        templates: Option<PathBuf>,

        /// Tab-separated abbreviations file
        #[arg(long)]
        abbreviations: Option<PathBuf>,

        /// Stop if the corpus allow-list matches no rows
        #[arg(long)]
        fail_on_empty: bool,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Display selection and partition statistics
    Inspect {
        /// Show per-letter entry counts
        #[arg(short, long)]
        letters: bool,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Report every data integrity problem in the input rows
    Verify,

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Export {
            out,
            corpus,
            attested_only,
            templates,
            abbreviations,
            fail_on_empty,
            format,
        } => {
            let input = cli.input.ok_or("Input directory required for export")?;
            let overrides = commands::export::Overrides {
                corpus,
                attested_only,
                templates,
                abbreviations,
                fail_on_empty,
            };
            commands::export::run(&input, cli.config.as_deref(), &out, overrides, &format)?;
        }
        Commands::Inspect { letters, format } => {
            let input = cli.input.ok_or("Input directory required for inspect")?;
            commands::inspect::run(&input, cli.config.as_deref(), letters, &format)?;
        }
        Commands::Verify => {
            let input = cli.input.ok_or("Input directory required for verify")?;
            commands::verify::run(&input, cli.config.as_deref())?;
        }
        Commands::Version => {
            println!("Kosa CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("Kosa Core v{}", kosa_core::VERSION);
        }
    }

    Ok(())
}
