//! Record the staged files as a new commit

use crate::util;
use anyhow::{Context, Result};
use owo_colors::OwoColorize;

pub async fn run(message: &str) -> Result<()> {
    let repo = util::open_repo()?;

    let staged = repo.staged_entries()?;
    if staged.is_empty() {
        // Legal, but worth telling the user about
        println!("{}", "Nothing staged; creating an empty commit".dimmed());
    }

    let id = repo.commit(message).context("Failed to create commit")?;

    println!(
        "{} Created commit {} ({} files)",
        "✓".green(),
        util::short_id(&id).yellow(),
        staged.len()
    );

    Ok(())
}
