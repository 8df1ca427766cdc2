//! Append-only content-addressed object storage
//!
//! One namespace holds both file blobs and serialized commit records;
//! they cannot collide since they hash different byte sequences.

use crate::error::{Error, Result};
use crate::hash::{hash_bytes, Sha1Hash};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// On-disk object store rooted at the repository's `.sprout` directory
///
/// Objects live under `objects/<first 2 hex chars>/<rest>`. Writes are
/// write-once: an existing object is never overwritten.
#[derive(Debug)]
pub struct ObjectStore {
    /// Path to the .sprout directory
    root: PathBuf,
}

impl ObjectStore {
    /// Create a store handle over an existing .sprout directory
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Store bytes under their content hash, returning the hash
    ///
    /// Idempotent: writing the same bytes twice is a no-op on the
    /// second write and returns the same id.
    pub fn put(&self, data: &[u8]) -> Result<Sha1Hash> {
        let hash = hash_bytes(data);

        let object_path = self.object_path(hash);
        if object_path.exists() {
            return Ok(hash); // Already stored, idempotent
        }

        if let Some(parent) = object_path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Atomic write pattern: write to temp, fsync, rename
        let tmp_dir = self.root.join("tmp");
        fs::create_dir_all(&tmp_dir)?;

        let temp_path = tmp_dir.join(format!("{}-{}", uuid::Uuid::new_v4(), hash.to_hex()));

        let mut temp_file = fs::File::create(&temp_path)?;
        temp_file.write_all(data)?;
        temp_file.sync_all()?;
        drop(temp_file);

        fs::rename(&temp_path, &object_path)?;

        // Fsync parent directory for durability
        if let Some(parent) = object_path.parent() {
            if let Ok(dir) = fs::File::open(parent) {
                let _ = dir.sync_all(); // Best effort, may fail on some filesystems
            }
        }

        tracing::debug!(id = %hash, size = data.len(), "stored object");

        Ok(hash)
    }

    /// Read the bytes stored under a content hash
    pub fn get(&self, hash: Sha1Hash) -> Result<Vec<u8>> {
        let object_path = self.object_path(hash);
        if !object_path.exists() {
            return Err(Error::ObjectNotFound { id: hash.to_hex() });
        }

        let data = fs::read(&object_path)?;

        // Verify hash matches
        let actual_hash = hash_bytes(&data);
        if actual_hash != hash {
            return Err(Error::CorruptObject { id: hash.to_hex() });
        }

        Ok(data)
    }

    /// Check if an object exists
    pub fn contains(&self, hash: Sha1Hash) -> bool {
        self.object_path(hash).exists()
    }

    /// Get the filesystem path for an object
    fn object_path(&self, hash: Sha1Hash) -> PathBuf {
        let hex = hash.to_hex();
        // Split: first 2 chars as prefix directory, rest as filename
        let prefix = &hex[0..2];
        let rest = &hex[2..];
        self.root.join("objects").join(prefix).join(rest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store() -> (tempfile::TempDir, ObjectStore) {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = ObjectStore::new(temp_dir.path().to_path_buf());
        (temp_dir, store)
    }

    #[test]
    fn test_put_get_roundtrip() -> Result<()> {
        let (_temp, store) = test_store();

        let data = b"test data for object store";
        let hash = store.put(data)?;

        let read_data = store.get(hash)?;
        assert_eq!(data, &read_data[..]);

        Ok(())
    }

    #[test]
    fn test_put_idempotent() -> Result<()> {
        let (_temp, store) = test_store();

        let data = b"same bytes";
        let hash1 = store.put(data)?;
        let hash2 = store.put(data)?;
        let hash3 = store.put(data)?;

        assert_eq!(hash1, hash2);
        assert_eq!(hash2, hash3);
        assert_eq!(data, &store.get(hash1)?[..]);

        Ok(())
    }

    #[test]
    fn test_put_returns_content_hash() -> Result<()> {
        let (_temp, store) = test_store();

        let data = b"content addressing";
        let hash = store.put(data)?;
        assert_eq!(hash, hash_bytes(data));

        Ok(())
    }

    #[test]
    fn test_distinct_content_distinct_ids() -> Result<()> {
        let (_temp, store) = test_store();

        let hash1 = store.put(b"first object")?;
        let hash2 = store.put(b"second object")?;
        assert_ne!(hash1, hash2);

        assert_eq!(b"first object", &store.get(hash1)?[..]);
        assert_eq!(b"second object", &store.get(hash2)?[..]);

        Ok(())
    }

    #[test]
    fn test_get_nonexistent() {
        let (_temp, store) = test_store();

        let fake_hash = Sha1Hash::from_bytes([0xFF; 20]);
        let err = store.get(fake_hash).unwrap_err();
        assert!(matches!(err, Error::ObjectNotFound { .. }));
    }

    #[test]
    fn test_contains() -> Result<()> {
        let (_temp, store) = test_store();

        let data = b"present";
        let hash = hash_bytes(data);

        assert!(!store.contains(hash));
        store.put(data)?;
        assert!(store.contains(hash));

        Ok(())
    }

    #[test]
    fn test_fanout_file_structure() -> Result<()> {
        let (temp, store) = test_store();

        let data = b"layout check";
        let hash = store.put(data)?;
        let hex = hash.to_hex();

        // objects/<first2chars>/<rest>
        let expected_path = temp
            .path()
            .join("objects")
            .join(&hex[0..2])
            .join(&hex[2..]);
        assert!(expected_path.exists());

        Ok(())
    }

    #[test]
    fn test_corrupt_object_detected() -> Result<()> {
        let (temp, store) = test_store();

        let data = b"soon to be corrupted";
        let hash = store.put(data)?;

        let hex = hash.to_hex();
        let object_path = temp
            .path()
            .join("objects")
            .join(&hex[0..2])
            .join(&hex[2..]);
        fs::write(&object_path, b"tampered")?;

        let err = store.get(hash).unwrap_err();
        assert!(matches!(err, Error::CorruptObject { .. }));

        Ok(())
    }

    #[test]
    fn test_empty_object() -> Result<()> {
        let (_temp, store) = test_store();

        let hash = store.put(b"")?;
        assert_eq!(store.get(hash)?, Vec::<u8>::new());

        Ok(())
    }
}
