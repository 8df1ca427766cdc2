//! Persisted staging index
//!
//! An ordered list of (path, hash) pairs queued for the next commit.
//! Staging the same path twice keeps both entries; the commit's file
//! list preserves staging order, duplicates included.

use crate::error::Result;
use crate::hash::Sha1Hash;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// A file queued for the next commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageEntry {
    /// Path as given to the stage operation
    pub path: String,
    /// Content id of the staged bytes
    pub hash: Sha1Hash,
}

/// Handle over the persisted index file
///
/// The index is the only mutable, resettable top-level state; it is
/// rewritten atomically so a racing reader sees the old or the new
/// list, never a partial one.
#[derive(Debug)]
pub struct Index {
    /// Path to the index file
    path: PathBuf,
    /// Scratch directory for atomic rewrites
    tmp_dir: PathBuf,
}

impl Index {
    /// Create an index handle under the given .sprout directory
    pub fn new(sprout_dir: &Path) -> Self {
        Self {
            path: sprout_dir.join("index"),
            tmp_dir: sprout_dir.join("tmp"),
        }
    }

    /// Load the current entries; a missing file reads as empty
    pub fn load(&self) -> Result<Vec<StageEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let bytes = fs::read(&self.path)?;
        let entries = serde_json::from_slice(&bytes)?;
        Ok(entries)
    }

    /// Replace the persisted list with the given entries
    pub fn save(&self, entries: &[StageEntry]) -> Result<()> {
        let bytes = serde_json::to_vec(entries)?;

        fs::create_dir_all(&self.tmp_dir)?;
        let temp_path = self.tmp_dir.join(format!("index-{}", uuid::Uuid::new_v4()));

        let mut temp_file = fs::File::create(&temp_path)?;
        temp_file.write_all(&bytes)?;
        temp_file.sync_all()?;
        drop(temp_file);

        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }

    /// Append an entry, keeping any existing entry for the same path
    pub fn append(&self, entry: StageEntry) -> Result<()> {
        let mut entries = self.load()?;
        entries.push(entry);
        self.save(&entries)
    }

    /// Reset the index to empty
    pub fn clear(&self) -> Result<()> {
        self.save(&[])
    }
}
