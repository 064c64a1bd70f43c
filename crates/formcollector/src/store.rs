//! Submission store.
//!
//! Submissions live for the lifetime of the process. The store is append-only:
//! ids are assigned sequentially from 1 and records are never updated or
//! removed.

use chrono::Utc;
use parking_lot::RwLock;
use tracing::debug;

use crate::submission::{NewSubmission, Submission};

/// Storage for submissions.
///
/// Handlers only see this trait, so tests can swap in their own store.
pub trait SubmissionStore: Send + Sync + std::fmt::Debug {
    /// Store a submission, assigning the next id and the current time.
    fn append(&self, submission: NewSubmission) -> Submission;

    /// Look up a submission by id.
    fn find_by_id(&self, id: u64) -> Option<Submission>;

    /// All submissions in insertion order.
    fn list_all(&self) -> Vec<Submission>;

    /// Number of stored submissions.
    fn count(&self) -> usize;
}

#[derive(Debug)]
struct Inner {
    next_id: u64,
    records: Vec<Submission>,
}

/// In-memory submission store.
///
/// Id assignment and append happen under one write lock, so concurrent
/// submissions always get distinct, strictly increasing ids.
#[derive(Debug)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Create an empty store. The first submission gets id 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                next_id: 1,
                records: Vec::new(),
            }),
        }
    }
}

impl SubmissionStore for MemoryStore {
    fn append(&self, submission: NewSubmission) -> Submission {
        let mut inner = self.inner.write();
        let id = inner.next_id;
        inner.next_id += 1;

        let record = Submission::new(id, submission, Utc::now());
        inner.records.push(record.clone());

        debug!(
            submission_id = id,
            preference = %record.preference,
            "Stored submission"
        );
        record
    }

    fn find_by_id(&self, id: u64) -> Option<Submission> {
        let inner = self.inner.read();
        // Records are appended in id order
        inner
            .records
            .binary_search_by_key(&id, |record| record.id)
            .ok()
            .map(|index| inner.records[index].clone())
    }

    fn list_all(&self) -> Vec<Submission> {
        self.inner.read().records.clone()
    }

    fn count(&self) -> usize {
        self.inner.read().records.len()
    }
}
