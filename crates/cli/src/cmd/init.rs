//! Initialize a sprout repository

use anyhow::Result;
use owo_colors::OwoColorize;
use sprout_core::{InitOutcome, Repository, SPROUT_DIR};

pub async fn run() -> Result<()> {
    let current_dir = std::env::current_dir()?;

    match Repository::init(&current_dir)? {
        InitOutcome::Created => {
            println!(
                "{} Initialized empty sprout repository in {}",
                "✓".green(),
                current_dir.join(SPROUT_DIR).display()
            );
        }
        InitOutcome::AlreadyInitialized => {
            // Informational, not an error
            println!(
                "{} Repository already initialized at {}",
                "→".yellow(),
                current_dir.join(SPROUT_DIR).display()
            );
        }
    }

    Ok(())
}
