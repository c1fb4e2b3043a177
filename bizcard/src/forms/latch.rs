//! In-flight submission latch
//!
//! Pages hold one latch per form. The UI keeps a clone to disable the submit
//! button while a request is outstanding.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared "a submission is in flight" flag
#[derive(Debug, Clone, Default)]
pub struct SubmitLatch {
    in_flight: Arc<AtomicBool>,
}

impl SubmitLatch {
    /// Create an idle latch
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the latch, or `None` if a submission is already running
    #[must_use]
    pub fn try_begin(&self) -> Option<SubmitGuard> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SubmitGuard {
                in_flight: Arc::clone(&self.in_flight),
            })
    }

    /// Whether a submission is running
    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

/// Releases the latch when dropped
#[derive(Debug)]
pub struct SubmitGuard {
    in_flight: Arc<AtomicBool>,
}

impl Drop for SubmitGuard {
    fn drop(&mut self) {
        self.in_flight.store(false, Ordering::Release);
    }
}
