//! Pending-edit queue.
//!
//! Carries "which book is being edited" from the edit-select request to the
//! following edit-commit request. Process-wide and unscoped: two users editing
//! at once share the same queue. Edit forms also submit the book id, which
//! lets a commit bypass the queue entirely.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use crate::telemetry::metrics;

/// FIFO of titles awaiting a rating update. No dedup, no bound.
#[derive(Debug, Default)]
pub struct PendingEdits {
    titles: Mutex<VecDeque<String>>,
}

impl PendingEdits {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a title to the back of the queue.
    pub fn enqueue(&self, title: impl Into<String>) {
        self.lock().push_back(title.into());
        metrics::pending_edits_depth().add(1, &[]);
    }

    /// Remove and return the earliest-enqueued title, or `None` if empty.
    pub fn dequeue_front(&self) -> Option<String> {
        let title = self.lock().pop_front();
        if title.is_some() {
            metrics::pending_edits_depth().add(-1, &[]);
        }
        title
    }

    /// The earliest-enqueued title, left in place.
    pub fn front(&self) -> Option<String> {
        self.lock().front().cloned()
    }

    /// Remove the earliest occurrence of `title`. Returns whether one was found.
    pub fn remove(&self, title: &str) -> bool {
        let mut titles = self.lock();
        match titles.iter().position(|t| t == title) {
            Some(pos) => {
                titles.remove(pos);
                metrics::pending_edits_depth().add(-1, &[]);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copy of the queue contents, front first.
    pub fn snapshot(&self) -> Vec<String> {
        self.lock().iter().cloned().collect()
    }

    // A panic while holding the lock cannot leave the deque half-updated,
    // so a poisoned lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, VecDeque<String>> {
        self.titles.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
