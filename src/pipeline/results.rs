use std::sync::{Mutex, PoisonError};

use crate::Match;

/// Shared, append-only collection of matches. The lock is held for one append at a time only.
///
/// Order across files is whatever order workers happened to append in; matches of one file
/// keep their line order because a single worker scans a file start to finish.
#[derive(Debug, Default)]
pub struct ResultSet {
    inner: Mutex<Vec<Match>>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, m: Match) {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(m);
    }

    /// Take the collected matches, leaving the set empty. Call after every worker has joined.
    pub fn take(&self) -> Vec<Match> {
        std::mem::take(&mut *self.inner.lock().unwrap_or_else(PoisonError::into_inner))
    }
}
