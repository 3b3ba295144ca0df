//! The outbound seam to the ingestion side.

use log::debug;

use fleet_core::{AnomalyEvent, TelemetryReading};

use crate::StreamError;

/// What a sink did with one accepted batch.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchReceipt {
    /// Readings stored.
    pub processed: usize,
    /// Readings dropped as already seen.
    pub duplicates: usize,
}

/// Destination for telemetry batches and anomaly events.
///
/// De-duplication and retry policy belong to the implementor.  The
/// orchestrator only keeps a rejected batch buffered and offers it again at
/// the next flush.
pub trait Streamer {
    /// Queried once before a run starts; `false` aborts the run.
    fn health_check(&mut self) -> bool;

    fn send_batch(&mut self, readings: &[TelemetryReading]) -> Result<BatchReceipt, StreamError>;

    /// Fire-and-forget from the caller's side: a failure is logged, never
    /// retried.
    fn send_anomaly(&mut self, event: &AnomalyEvent) -> Result<(), StreamError>;
}

// ── MemoryStreamer ────────────────────────────────────────────────────────────

/// A [`Streamer`] that keeps everything in memory.
///
/// Used for dry runs and tests.  Health and failures can be scripted.
#[derive(Debug)]
pub struct MemoryStreamer {
    pub healthy:   bool,
    pub readings:  Vec<TelemetryReading>,
    pub anomalies: Vec<AnomalyEvent>,
    /// Size of every accepted batch, in arrival order.
    pub batch_sizes: Vec<usize>,
    failing_batches:   usize,
    failing_anomalies: usize,
}

impl Default for MemoryStreamer {
    fn default() -> Self {
        Self {
            healthy:           true,
            readings:          Vec::new(),
            anomalies:         Vec::new(),
            batch_sizes:       Vec::new(),
            failing_batches:   0,
            failing_anomalies: 0,
        }
    }
}

impl MemoryStreamer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A streamer whose health check fails.
    pub fn unhealthy() -> Self {
        Self { healthy: false, ..Self::default() }
    }

    /// Reject the next `n` batches.
    pub fn fail_next_batches(&mut self, n: usize) {
        self.failing_batches = n;
    }

    /// Reject the next `n` anomaly events.
    pub fn fail_next_anomalies(&mut self, n: usize) {
        self.failing_anomalies = n;
    }
}

impl Streamer for MemoryStreamer {
    fn health_check(&mut self) -> bool {
        self.healthy
    }

    fn send_batch(&mut self, readings: &[TelemetryReading]) -> Result<BatchReceipt, StreamError> {
        if self.failing_batches > 0 {
            self.failing_batches -= 1;
            return Err(StreamError::Rejected("injected batch failure".into()));
        }
        self.readings.extend_from_slice(readings);
        self.batch_sizes.push(readings.len());
        debug!("memory streamer accepted {} readings", readings.len());
        Ok(BatchReceipt { processed: readings.len(), duplicates: 0 })
    }

    fn send_anomaly(&mut self, event: &AnomalyEvent) -> Result<(), StreamError> {
        if self.failing_anomalies > 0 {
            self.failing_anomalies -= 1;
            return Err(StreamError::Unavailable("injected anomaly failure".into()));
        }
        self.anomalies.push(event.clone());
        Ok(())
    }
}
