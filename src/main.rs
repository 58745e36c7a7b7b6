use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use method_lineage::config::Config;
use method_lineage::extractor::MethodExtractor;
use method_lineage::files::discover_source_files;
use method_lineage::git::GitRepository;
use method_lineage::history::{compute_method_histories, HistoryOptions};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "method-lineage", version, about = "Per-method change history mining")]
struct Cli {
    /// Optional TOML config with similarity thresholds
    #[arg(long, env = "METHOD_LINEAGE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the per-method change timeline of a file as JSON
    History {
        /// Path to the local git repository
        repo: PathBuf,
        /// Tracked file, relative to the repository root
        file: String,
    },
    /// List Java source files under a repository root
    Files {
        /// Path to the local git repository
        repo: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::new()?,
    };

    match cli.command {
        Command::History { repo, file } => {
            let repo = GitRepository::open(&repo)?;
            let extractor = MethodExtractor::new();
            let options = HistoryOptions {
                config,
                cancel: None,
            };
            let histories = compute_method_histories(&repo, &extractor, &file, &options)?;
            let json = serde_json::to_string_pretty(&histories)
                .context("Failed to serialize histories")?;
            println!("{}", json);
        }
        Command::Files { repo } => {
            for path in discover_source_files(&repo, &config.source_extension) {
                println!("{}", path.display());
            }
        }
    }

    Ok(())
}
