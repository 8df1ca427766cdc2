//! Display commit history

use crate::util;
use anyhow::Result;
use owo_colors::OwoColorize;

pub async fn run(limit: Option<usize>) -> Result<()> {
    let repo = util::open_repo()?;

    let limit_val = limit.unwrap_or(20);

    println!("{}", "Commit History".bold());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!();

    let mut shown = 0usize;
    let mut truncated = false;
    let mut broken = false;
    for item in repo.history()? {
        let (id, commit) = match item {
            Ok(pair) => pair,
            Err(err) => {
                // Report the broken link instead of crashing; the
                // walk cannot continue past it
                println!("{} {}", "!".red(), err.to_string().red());
                broken = true;
                break;
            }
        };

        if shown >= limit_val {
            truncated = true;
            break;
        }

        print!("{} ", util::short_id(&id).yellow());
        print!("{} ", util::format_timestamp(&commit.timestamp).dimmed());
        println!("{}", commit.message);

        if !commit.files.is_empty() {
            println!("  {}", format!("{} files", commit.files.len()).dimmed());
        }
        println!();

        shown += 1;
    }

    if broken {
        // no footer after a broken walk
    } else if shown == 0 {
        println!("{}", "No commits yet".dimmed());
    } else if truncated {
        println!(
            "{}",
            format!("Showing first {} commits (use --limit to see more)", limit_val).dimmed()
        );
    } else {
        println!("{}", format!("Total: {} commits", shown).dimmed());
    }

    Ok(())
}
