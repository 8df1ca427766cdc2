//! Commit records and their canonical serialized form

use crate::error::Result;
use crate::hash::Sha1Hash;
use crate::index::StageEntry;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// An immutable snapshot of the staging index at commit time
///
/// A commit is addressed by the SHA-1 of its serialized form and
/// links to its parent by id, forming a singly-linked chain that ends
/// at the root commit (`parent: None`). Field order is fixed, so the
/// serialized form is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Creation time, ISO-8601 UTC
    pub timestamp: String,
    /// Commit message
    pub message: String,
    /// Snapshot of the staging index, in staging order
    pub files: Vec<StageEntry>,
    /// Id of the previous head, None for the root commit
    pub parent: Option<Sha1Hash>,
}

impl Commit {
    /// Create a new commit stamped with the current time
    pub fn new(message: String, files: Vec<StageEntry>, parent: Option<Sha1Hash>) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            message,
            files,
            parent,
        }
    }

    /// Serialize to the canonical JSON form the commit id is hashed from
    pub fn serialize(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Deserialize a commit record from stored bytes
    pub fn deserialize(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::hash_bytes;

    fn create_test_commit() -> Commit {
        Commit::new(
            "first".to_string(),
            vec![StageEntry {
                path: "sample.txt".to_string(),
                hash: hash_bytes(b"hello\n"),
            }],
            None,
        )
    }

    #[test]
    fn test_serialization_roundtrip() {
        let commit = create_test_commit();

        let bytes = commit.serialize().unwrap();
        let deserialized = Commit::deserialize(&bytes).unwrap();

        assert_eq!(commit, deserialized);
    }

    #[test]
    fn test_serialization_deterministic() {
        let commit = create_test_commit();

        let bytes1 = commit.serialize().unwrap();
        let bytes2 = commit.serialize().unwrap();
        assert_eq!(bytes1, bytes2);
    }

    #[test]
    fn test_roundtrip_preserves_serialized_form() {
        // The stored bytes are the identity; a decode/re-encode cycle
        // must reproduce them exactly
        let commit = create_test_commit();
        let bytes = commit.serialize().unwrap();

        let reparsed = Commit::deserialize(&bytes).unwrap();
        assert_eq!(reparsed.serialize().unwrap(), bytes);
    }

    #[test]
    fn test_commit_with_parent() {
        let parent_id = hash_bytes(b"some parent record");
        let commit = Commit::new("second".to_string(), vec![], Some(parent_id));

        let bytes = commit.serialize().unwrap();
        let deserialized = Commit::deserialize(&bytes).unwrap();
        assert_eq!(deserialized.parent, Some(parent_id));
    }

    #[test]
    fn test_empty_file_list_is_valid() {
        let commit = Commit::new("empty".to_string(), vec![], None);

        let bytes = commit.serialize().unwrap();
        let deserialized = Commit::deserialize(&bytes).unwrap();
        assert!(deserialized.files.is_empty());
        assert_eq!(deserialized.parent, None);
    }

    #[test]
    fn test_timestamp_is_rfc3339_utc() {
        let commit = create_test_commit();
        let parsed = chrono::DateTime::parse_from_rfc3339(&commit.timestamp);
        assert!(parsed.is_ok(), "bad timestamp: {}", commit.timestamp);
        assert!(commit.timestamp.ends_with('Z'));
    }

    #[test]
    fn test_malformed_bytes_rejected() {
        assert!(Commit::deserialize(b"not json").is_err());
        assert!(Commit::deserialize(b"{\"message\":\"only\"}").is_err());
        // A file blob is not a commit record
        assert!(Commit::deserialize(b"hello\nworld\n").is_err());
    }

    #[test]
    fn test_duplicate_file_entries_survive() {
        let e1 = StageEntry {
            path: "dup.txt".to_string(),
            hash: hash_bytes(b"one"),
        };
        let e2 = StageEntry {
            path: "dup.txt".to_string(),
            hash: hash_bytes(b"two"),
        };
        let commit = Commit::new("dup".to_string(), vec![e1.clone(), e2.clone()], None);

        let roundtripped = Commit::deserialize(&commit.serialize().unwrap()).unwrap();
        assert_eq!(roundtripped.files, vec![e1, e2]);
    }
}
