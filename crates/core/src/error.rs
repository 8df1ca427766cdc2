//! Error types for sprout core operations

use std::path::PathBuf;
use thiserror::Error;

/// Common result type used throughout sprout-core
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by repository operations
///
/// Failures are local to the operation that triggered them: no
/// partial commit is ever persisted, and the staging index is only
/// mutated by a fully successful stage or commit.
#[derive(Debug, Error)]
pub enum Error {
    /// A source file could not be read during staging
    #[error("failed to read {}: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No object with the requested content id exists
    #[error("object not found: {id}")]
    ObjectNotFound { id: String },

    /// Stored object bytes no longer match their content id
    #[error("object corrupted: {id}")]
    CorruptObject { id: String },

    /// The requested commit id is absent or not a well-formed commit record
    #[error("commit not found: {id}")]
    CommitNotFound { id: String },

    /// The given path does not contain a sprout repository
    #[error("not a sprout repository: {}", .path.display())]
    NotARepository { path: PathBuf },

    /// A string could not be parsed as an object id
    #[error("invalid object id: {value}")]
    InvalidId { value: String },

    /// Underlying filesystem failure
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Persisted state could not be encoded or decoded
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
