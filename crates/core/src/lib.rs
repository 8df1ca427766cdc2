//! Sprout core - content-addressed version-control primitives
//!
//! This crate provides the storage and history layer:
//! - SHA-1 hashing for content addressing
//! - Append-only object store (file blobs and commit records)
//! - Persisted staging index
//! - Commit chain with head tracking and history walking
//! - Per-commit change reports built on the line diff

pub mod commit;
pub mod error;
pub mod hash;
pub mod history;
pub mod index;
pub mod object;
pub mod repo;

// Re-export main types for convenience
pub use commit::Commit;
pub use error::{Error, Result};
pub use hash::{hash_bytes, Sha1Hash};
pub use history::History;
pub use index::StageEntry;
pub use object::ObjectStore;
pub use repo::{CommitDiff, FileDiff, FileStatus, InitOutcome, Repository, SPROUT_DIR};
