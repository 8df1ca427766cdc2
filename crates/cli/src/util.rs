//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use sprout_core::{Repository, Sha1Hash, SPROUT_DIR};
use std::path::PathBuf;

/// Find repository root by walking up from cwd to find .sprout/
pub fn find_repo_root() -> Result<PathBuf> {
    let mut current = std::env::current_dir().context("Failed to get current directory")?;

    loop {
        let sprout_dir = current.join(SPROUT_DIR);
        if sprout_dir.is_dir() {
            tracing::debug!(root = %current.display(), "found repository root");
            return Ok(current);
        }

        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => anyhow::bail!("Not a sprout repository (no .sprout directory found)"),
        }
    }
}

/// Open the repository enclosing the current directory
pub fn open_repo() -> Result<Repository> {
    let root = find_repo_root()?;
    Repository::open(&root).context("Failed to open repository")
}

/// Resolve a commit reference to an id
///
/// Supports:
/// - Full hex id: "f572d396..."
/// - "HEAD" for the most recent commit
pub fn resolve_commit_ref(repo: &Repository, reference: &str) -> Result<Sha1Hash> {
    if reference.eq_ignore_ascii_case("HEAD") {
        return repo
            .head()?
            .ok_or_else(|| anyhow::anyhow!("No commits yet"));
    }

    Sha1Hash::from_hex(reference)
        .with_context(|| format!("Invalid commit reference: '{}'", reference))
}

/// Shortened id for display
pub fn short_id(id: &Sha1Hash) -> String {
    id.to_hex()[..8].to_string()
}

/// Format a stored RFC 3339 timestamp for display
pub fn format_timestamp(timestamp: &str) -> String {
    match chrono::DateTime::parse_from_rfc3339(timestamp) {
        Ok(dt) => dt
            .with_timezone(&chrono::Utc)
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string(),
        // Display the raw value rather than hiding the record
        Err(_) => timestamp.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprout_core::hash_bytes;

    #[test]
    fn test_short_id() {
        let id = hash_bytes(b"hello\n");
        assert_eq!(short_id(&id), "f572d396");
    }

    #[test]
    fn test_format_timestamp_rfc3339() {
        let formatted = format_timestamp("2026-08-29T10:17:00.000Z");
        assert_eq!(formatted, "2026-08-29 10:17:00 UTC");
    }

    #[test]
    fn test_format_timestamp_passthrough_on_garbage() {
        assert_eq!(format_timestamp("not a time"), "not a time");
    }

    #[test]
    fn test_resolve_commit_ref_hex() {
        let temp = tempfile::tempdir().unwrap();
        Repository::init(temp.path()).unwrap();
        let repo = Repository::open(temp.path()).unwrap();

        let id = repo.commit("only").unwrap();
        let resolved = resolve_commit_ref(&repo, &id.to_hex()).unwrap();
        assert_eq!(resolved, id);
    }

    #[test]
    fn test_resolve_commit_ref_head() {
        let temp = tempfile::tempdir().unwrap();
        Repository::init(temp.path()).unwrap();
        let repo = Repository::open(temp.path()).unwrap();

        assert!(resolve_commit_ref(&repo, "HEAD").is_err());

        let id = repo.commit("only").unwrap();
        assert_eq!(resolve_commit_ref(&repo, "HEAD").unwrap(), id);
    }

    #[test]
    fn test_resolve_commit_ref_invalid() {
        let temp = tempfile::tempdir().unwrap();
        Repository::init(temp.path()).unwrap();
        let repo = Repository::open(temp.path()).unwrap();

        assert!(resolve_commit_ref(&repo, "zzz").is_err());
    }
}
