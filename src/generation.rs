//! Latest-request-wins bookkeeping for callers that allow overlapping analyses.
//!
//! [`crate::StockAnalyst`] does not cancel or coalesce anything. A caller that lets a user
//! fire several lookups in a row takes a ticket per lookup and only applies the result
//! whose ticket is still current, so a slow stale answer cannot overwrite a newer one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct RequestTracker {
    latest: Arc<AtomicU64>,
}

#[derive(Debug, Clone)]
pub struct RequestTicket {
    generation: u64,
    latest: Arc<AtomicU64>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, superseding every ticket issued before it.
    pub fn begin(&self) -> RequestTicket {
        let generation = self.latest.fetch_add(1, Ordering::AcqRel) + 1;
        RequestTicket {
            generation,
            latest: Arc::clone(&self.latest),
        }
    }

    pub fn current_generation(&self) -> u64 {
        self.latest.load(Ordering::Acquire)
    }

    /// Hand back `result` only if `ticket` belongs to the most recent request.
    pub fn resolve<T>(&self, ticket: &RequestTicket, result: T) -> Option<T> {
        ticket.is_current().then_some(result)
    }
}

impl RequestTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_current(&self) -> bool {
        self.latest.load(Ordering::Acquire) == self.generation
    }
}
