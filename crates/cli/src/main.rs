//! Sprout CLI - sprout command

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cmd;
mod util;

/// Sprout - content-addressable snapshots for your files
#[derive(Parser)]
#[command(name = "sprout")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a sprout repository in the current directory
    Init,
    /// Stage one or more files for the next commit
    Add {
        /// Files to stage
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Record the staged files as a new commit
    Commit {
        /// Commit message
        #[arg(short, long)]
        message: String,
    },
    /// Show commit history, newest first
    Log {
        /// Number of commits to show
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show the per-file changes introduced by a commit
    Show {
        /// Commit id (40-char hex) or HEAD
        commit: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => cmd::init::run().await,
        Commands::Add { paths } => cmd::add::run(&paths).await,
        Commands::Commit { message } => cmd::commit::run(&message).await,
        Commands::Log { limit } => cmd::log::run(limit).await,
        Commands::Show { commit } => cmd::show::run(&commit).await,
    }
}
