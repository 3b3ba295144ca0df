//! Cooperative cancellation between ticks.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared stop flag.  Clones observe the same flag.
///
/// The run loop checks it before starting each tick; a cancelled run still
/// flushes buffered readings before returning.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Clear the flag so the orchestrator can run again.
    pub fn reset(&self) {
        self.0.store(false, Ordering::Relaxed);
    }
}
