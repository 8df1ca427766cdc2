//! Show the per-file changes introduced by a commit

use crate::util;
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use sprout_core::FileStatus;
use sprout_diff::SegmentKind;

pub async fn run(reference: &str) -> Result<()> {
    let repo = util::open_repo()?;

    let id = util::resolve_commit_ref(&repo, reference)?;
    let changes = repo
        .commit_changes(id)
        .with_context(|| format!("Failed to load changes for commit {}", reference))?;

    println!(
        "{} {}",
        "Commit".bold(),
        util::short_id(&changes.id).yellow()
    );
    println!(
        "{} {}",
        "Date:".bold(),
        util::format_timestamp(&changes.commit.timestamp)
    );
    println!("{}", changes.commit.message);
    println!();

    if changes.files.is_empty() {
        println!("{}", "No files in this commit".dimmed());
        return Ok(());
    }

    let is_root = changes.commit.parent.is_none();

    for file in &changes.files {
        println!("{} {}", "file:".bold(), file.path);

        match &file.status {
            FileStatus::Introduced { content } => {
                if is_root {
                    println!("{}", "First commit".dimmed());
                } else {
                    println!("{}", "New file in this commit".green());
                }
                print!("{}", content.green());
                if !content.ends_with('\n') {
                    println!();
                }
            }
            FileStatus::Modified { segments } => {
                for segment in segments {
                    match segment.kind {
                        SegmentKind::Added => print!("{}", segment.text.green()),
                        SegmentKind::Removed => print!("{}", segment.text.red()),
                        SegmentKind::Unchanged => print!("{}", segment.text.dimmed()),
                    }
                }
                let ends_clean = segments
                    .last()
                    .map(|s| s.text.ends_with('\n'))
                    .unwrap_or(true);
                if !ends_clean {
                    println!();
                }
            }
            FileStatus::Unreadable { reason } => {
                println!("{} {}", "!".red(), reason.red());
            }
        }

        println!();
    }

    Ok(())
}
