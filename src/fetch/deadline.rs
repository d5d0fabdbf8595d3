//! Per-strategy time budget.

use super::{Fetch, FetchError};
use std::{
    sync::atomic::{AtomicBool, Ordering},
    time::{Duration, Instant},
};

/// Wraps a fetcher and refuses new requests once the budget is spent.
///
/// Requests already in flight are bounded by the fetcher's own timeout;
/// an answer that arrives after the budget is discarded.
pub struct Deadline<'a> {
    inner: &'a dyn Fetch,
    until: Instant,
    tripped: AtomicBool,
}

impl<'a> Deadline<'a> {
    pub fn new(inner: &'a dyn Fetch, budget: Duration) -> Self {
        Self {
            inner,
            until: Instant::now() + budget,
            tripped: AtomicBool::new(false),
        }
    }

    pub fn expired(&self) -> bool {
        Instant::now() >= self.until
    }

    /// Whether any request was refused or discarded for lack of time.
    pub fn tripped(&self) -> bool {
        self.tripped.load(Ordering::Relaxed)
    }

    fn timeout(&self, url: &str) -> FetchError {
        self.tripped.store(true, Ordering::Relaxed);
        FetchError::Timeout {
            url: url.to_owned(),
        }
    }
}

impl Fetch for Deadline<'_> {
    fn get(&self, url: &str) -> Result<String, FetchError> {
        if self.expired() {
            return Err(self.timeout(url));
        }
        let result = self.inner.get(url);
        if self.expired() {
            return Err(self.timeout(url));
        }
        result
    }
}
