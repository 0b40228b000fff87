//! longline CLI tool.
//!
//! Usage:
//! ```bash
//! longline check [OPTIONS] [PATH]
//! longline list-classifiers
//! longline init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Explains why Python lines are too long and how to shorten them
#[derive(Parser)]
#[command(name = "longline")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "LONGLINE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan files and report feedback for long lines
    Check {
        /// File or directory to analyze (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Only run specific classifiers (comma-separated names or codes)
        #[arg(long)]
        classifiers: Option<String>,

        /// Exclude patterns (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,

        /// Lines longer than this many characters get feedback
        #[arg(long)]
        max_line_length: Option<usize>,
    },

    /// List available classifiers
    ListClassifiers,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for feedback.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text grouped by file.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-feedback compact format.
    Compact,
    /// Annotated source snippets.
    Pretty,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check {
            path,
            format,
            classifiers,
            exclude,
            max_line_length,
        } => {
            let project_dir = if path.is_file() {
                path.parent().map(PathBuf::from).unwrap_or_default()
            } else {
                path.clone()
            };
            let source = config_resolver::resolve(&project_dir, cli.config.as_deref());
            commands::check::run(
                &path,
                &commands::check::CheckOptions {
                    format,
                    classifiers,
                    exclude,
                    max_line_length,
                },
                &source,
            )
        }
        Commands::ListClassifiers => {
            commands::list_classifiers::run();
            Ok(())
        }
        Commands::Init { force } => commands::init::run(force),
    }
}
