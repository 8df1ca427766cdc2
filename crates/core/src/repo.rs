//! Repository handle tying the store, index, and commit chain together
//!
//! A `Repository` is bound to an explicit storage root so multiple
//! repositories can coexist in one process; nothing here touches
//! process-global state.
//!
//! Manages the `.sprout/` directory:
//! ```text
//! .sprout/
//!   HEAD          # hex id of the latest commit, empty before the first
//!   index         # staged entries, JSON list
//!   objects/      # content-addressed blobs and commit records
//!   tmp/          # scratch space for atomic writes
//! ```

use crate::commit::Commit;
use crate::error::{Error, Result};
use crate::hash::Sha1Hash;
use crate::history::History;
use crate::index::{Index, StageEntry};
use crate::object::ObjectStore;
use sprout_diff::{diff_lines, Segment};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Name of the repository metadata directory
pub const SPROUT_DIR: &str = ".sprout";

/// Result of an init call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// A fresh layout was created
    Created,
    /// The layout already existed and was left untouched
    AlreadyInitialized,
}

/// Handle over one repository
#[derive(Debug)]
pub struct Repository {
    /// Root of the repository (parent of .sprout)
    root: PathBuf,
    /// Path to the .sprout directory
    sprout_dir: PathBuf,
    /// Content-addressed object storage
    objects: ObjectStore,
    /// Persisted staging index
    index: Index,
}

impl Repository {
    /// Initialize the persisted layout at the given root
    ///
    /// Idempotent: an existing repository is left untouched and
    /// reported as `AlreadyInitialized` rather than failing.
    pub fn init(root: &Path) -> Result<InitOutcome> {
        let sprout_dir = root.join(SPROUT_DIR);

        if sprout_dir.exists() {
            return Ok(InitOutcome::AlreadyInitialized);
        }

        fs::create_dir_all(sprout_dir.join("objects"))?;
        fs::create_dir_all(sprout_dir.join("tmp"))?;
        fs::write(sprout_dir.join("HEAD"), b"")?;
        fs::write(sprout_dir.join("index"), b"[]")?;

        tracing::info!(root = %root.display(), "initialized repository");

        Ok(InitOutcome::Created)
    }

    /// Open an existing repository rooted at the given path
    pub fn open(root: &Path) -> Result<Self> {
        let sprout_dir = root.join(SPROUT_DIR);
        if !sprout_dir.is_dir() {
            return Err(Error::NotARepository {
                path: root.to_path_buf(),
            });
        }

        Ok(Self {
            root: root.to_path_buf(),
            objects: ObjectStore::new(sprout_dir.clone()),
            index: Index::new(&sprout_dir),
            sprout_dir,
        })
    }

    /// Root of the repository
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The underlying object store
    pub fn objects(&self) -> &ObjectStore {
        &self.objects
    }

    /// Stage a file for the next commit
    ///
    /// Reads the file, writes its bytes into the object store, and
    /// appends a (path, id) entry to the index. Staging the same path
    /// twice keeps both entries.
    pub fn stage(&self, path: &Path) -> Result<StageEntry> {
        let data = fs::read(path).map_err(|source| Error::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

        let hash = self.objects.put(&data)?;
        let entry = StageEntry {
            path: path.to_string_lossy().into_owned(),
            hash,
        };
        self.index.append(entry.clone())?;

        tracing::debug!(path = %entry.path, id = %hash, "staged file");

        Ok(entry)
    }

    /// Entries currently staged, in staging order
    pub fn staged_entries(&self) -> Result<Vec<StageEntry>> {
        self.index.load()
    }

    /// Id of the most recent commit, None before the first commit
    pub fn head(&self) -> Result<Option<Sha1Hash>> {
        let contents = fs::read_to_string(self.sprout_dir.join("HEAD"))?;
        let trimmed = contents.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        Ok(Some(Sha1Hash::from_hex(trimmed)?))
    }

    /// Overwrite the head pointer, atomically
    fn set_head(&self, id: Sha1Hash) -> Result<()> {
        let tmp_dir = self.sprout_dir.join("tmp");
        fs::create_dir_all(&tmp_dir)?;
        let temp_path = tmp_dir.join(format!("HEAD-{}", uuid::Uuid::new_v4()));

        let mut temp_file = fs::File::create(&temp_path)?;
        temp_file.write_all(id.to_hex().as_bytes())?;
        temp_file.sync_all()?;
        drop(temp_file);

        fs::rename(&temp_path, self.sprout_dir.join("HEAD"))?;
        Ok(())
    }

    /// Snapshot the staging index into a new commit
    ///
    /// An empty index is legal and produces a commit with an empty
    /// file list. Head and index are only mutated after the record is
    /// durably stored, so a failed commit leaves both untouched.
    pub fn commit(&self, message: &str) -> Result<Sha1Hash> {
        let files = self.index.load()?;
        let parent = self.head()?;

        // The chain never links to a record the store does not hold
        if let Some(parent_id) = parent {
            if !self.objects.contains(parent_id) {
                return Err(Error::CommitNotFound {
                    id: parent_id.to_hex(),
                });
            }
        }

        let commit = Commit::new(message.to_string(), files, parent);
        let bytes = commit.serialize()?;
        let id = self.objects.put(&bytes)?;

        self.set_head(id)?;
        self.index.clear()?;

        tracing::info!(id = %id, files = commit.files.len(), "created commit");

        Ok(id)
    }

    /// Load the commit record stored under the given id
    ///
    /// Fails with `CommitNotFound` when the id is absent from the
    /// store or the stored bytes are not a well-formed commit.
    pub fn commit_record(&self, id: Sha1Hash) -> Result<Commit> {
        let bytes = match self.objects.get(id) {
            Ok(bytes) => bytes,
            Err(Error::ObjectNotFound { .. }) => {
                return Err(Error::CommitNotFound { id: id.to_hex() })
            }
            Err(other) => return Err(other),
        };

        Commit::deserialize(&bytes).map_err(|err| {
            tracing::debug!(id = %id, error = %err, "object is not a commit record");
            Error::CommitNotFound { id: id.to_hex() }
        })
    }

    /// Walk the commit chain from head backwards, newest first
    ///
    /// Each call starts fresh from the current head; an empty head
    /// yields an empty walk.
    pub fn history(&self) -> Result<History<'_>> {
        Ok(History::new(self, self.head()?))
    }

    /// Build the per-file change report for one commit
    ///
    /// Files whose path exists in the parent commit are diffed against
    /// the parent version; files without a parent counterpart (and
    /// every file of the root commit) are reported as introduced. A
    /// file whose content cannot be loaded is reported unreadable and
    /// the remaining files are still processed.
    pub fn commit_changes(&self, id: Sha1Hash) -> Result<CommitDiff> {
        let commit = self.commit_record(id)?;
        let parent_commit = match commit.parent {
            Some(parent_id) => Some(self.commit_record(parent_id)?),
            None => None,
        };

        let mut files = Vec::with_capacity(commit.files.len());
        for entry in &commit.files {
            let status = self.file_status(entry, parent_commit.as_ref());
            files.push(FileDiff {
                path: entry.path.clone(),
                status,
            });
        }

        Ok(CommitDiff { id, commit, files })
    }

    fn file_status(&self, entry: &StageEntry, parent: Option<&Commit>) -> FileStatus {
        let content = match self.objects.get(entry.hash) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(err) => {
                return FileStatus::Unreadable {
                    reason: err.to_string(),
                }
            }
        };

        let parent_entry =
            parent.and_then(|commit| commit.files.iter().find(|f| f.path == entry.path));

        match parent_entry {
            Some(parent_entry) => {
                let parent_content = match self.objects.get(parent_entry.hash) {
                    Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
                    Err(err) => {
                        return FileStatus::Unreadable {
                            reason: err.to_string(),
                        }
                    }
                };
                FileStatus::Modified {
                    segments: diff_lines(&parent_content, &content),
                }
            }
            // No parent version exists: a new file, not a diff
            // against empty text
            None => FileStatus::Introduced { content },
        }
    }
}

/// Change report for a single commit
#[derive(Debug)]
pub struct CommitDiff {
    /// The commit's id
    pub id: Sha1Hash,
    /// The commit record itself
    pub commit: Commit,
    /// Per-file classification, in file-list order
    pub files: Vec<FileDiff>,
}

/// Classification of one file within a commit
#[derive(Debug)]
pub struct FileDiff {
    /// Path as recorded in the commit's file list
    pub path: String,
    /// What happened to the file
    pub status: FileStatus,
}

/// How a file changed relative to the parent commit
#[derive(Debug)]
pub enum FileStatus {
    /// The path has no counterpart in the parent commit
    Introduced { content: String },
    /// Line diff against the parent version
    Modified { segments: Vec<Segment> },
    /// The file's content could not be loaded from the store
    Unreadable { reason: String },
}
