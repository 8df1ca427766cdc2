//! Stage files for the next commit

use crate::util;
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::path::PathBuf;

pub async fn run(paths: &[PathBuf]) -> Result<()> {
    let repo = util::open_repo()?;

    for path in paths {
        let entry = repo
            .stage(path)
            .with_context(|| format!("Failed to stage {}", path.display()))?;

        println!(
            "{} Added {} {}",
            "✓".green(),
            entry.path,
            util::short_id(&entry.hash).dimmed()
        );
    }

    Ok(())
}
