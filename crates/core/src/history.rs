//! Lazy walk over the commit chain

use crate::commit::Commit;
use crate::error::Result;
use crate::hash::Sha1Hash;
use crate::repo::Repository;

/// Iterator over commits, newest first
///
/// Starts at the head captured when the walk was created and follows
/// parent pointers until the root. The chain is finite by
/// construction: a commit's parent must already exist in the store
/// when the commit is created. A link that fails to load yields one
/// `Err` and ends the walk.
pub struct History<'a> {
    repo: &'a Repository,
    next: Option<Sha1Hash>,
}

impl<'a> History<'a> {
    pub(crate) fn new(repo: &'a Repository, head: Option<Sha1Hash>) -> Self {
        Self { repo, next: head }
    }
}

impl Iterator for History<'_> {
    type Item = Result<(Sha1Hash, Commit)>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next.take()?;
        match self.repo.commit_record(id) {
            Ok(commit) => {
                self.next = commit.parent;
                Some(Ok((id, commit)))
            }
            // next is already None, so the walk stops after this
            Err(err) => Some(Err(err)),
        }
    }
}
