//! Run observer trait for progress reporting and data collection.

use chrono::{DateTime, Utc};
use log::info;

use fleet_core::Tick;

use crate::{RunReport, StreamStats};

/// What happened during one tick.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TickSummary {
    pub tick:        Tick,
    pub total_ticks: u64,
    /// Simulated time the tick's readings are stamped with.
    pub timestamp:   DateTime<Utc>,
    /// Trips assigned by life-cycle management this tick.
    pub trips_assigned:   usize,
    pub readings:         usize,
    pub anomalies:        usize,
    pub vehicle_failures: usize,
    /// Readings waiting for the next flush after this tick.
    pub buffered:         usize,
    /// Cumulative for the run so far.
    pub stream:           StreamStats,
}

impl TickSummary {
    /// Share of the run completed once this tick ends, in percent.
    pub fn progress_pct(&self) -> f64 {
        (self.tick.0 + 1) as f64 / self.total_ticks as f64 * 100.0
    }

    pub fn is_last(&self) -> bool {
        self.tick.0 + 1 >= self.total_ticks
    }
}

/// Callbacks invoked by [`FleetOrchestrator::run`][crate::FleetOrchestrator::run]
/// at tick boundaries.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
pub trait FleetObserver {
    /// Called at the start of each tick, before life-cycle management.
    fn on_tick_start(&mut self, _tick: Tick, _timestamp: DateTime<Utc>) {}

    /// Called after the tick's readings are buffered and any flush is done.
    fn on_tick_end(&mut self, _summary: &TickSummary) {}

    /// Called once after the final flush.
    fn on_run_end(&mut self, _report: &RunReport) {}
}

/// A [`FleetObserver`] that does nothing.
pub struct NoopObserver;

impl FleetObserver for NoopObserver {}

/// Logs progress every `interval` ticks and on the last tick.
pub struct ProgressLogger {
    pub interval: u64,
}

impl ProgressLogger {
    pub fn new(interval: u64) -> Self {
        Self { interval: interval.max(1) }
    }
}

impl FleetObserver for ProgressLogger {
    fn on_tick_end(&mut self, s: &TickSummary) {
        if s.tick.0.is_multiple_of(self.interval) || s.is_last() {
            info!(
                "progress {:.1}% (tick {}/{}): {} readings sent, batch success {:.1}%, {} buffered",
                s.progress_pct(),
                s.tick.0 + 1,
                s.total_ticks,
                s.stream.readings_sent,
                s.stream.batch_success_pct(),
                s.buffered,
            );
        }
    }

    fn on_run_end(&mut self, r: &RunReport) {
        info!(
            "run finished after {}/{} ticks{}: {} readings, {} anomalies, {} vehicle failures, {:?}",
            r.ticks_completed,
            r.total_ticks,
            if r.cancelled { " (cancelled)" } else { "" },
            r.readings,
            r.anomalies,
            r.vehicle_failures,
            r.stream,
        );
    }
}

/// Forward every callback to both observers.
impl<A: FleetObserver, B: FleetObserver> FleetObserver for (A, B) {
    fn on_tick_start(&mut self, tick: Tick, timestamp: DateTime<Utc>) {
        self.0.on_tick_start(tick, timestamp);
        self.1.on_tick_start(tick, timestamp);
    }

    fn on_tick_end(&mut self, summary: &TickSummary) {
        self.0.on_tick_end(summary);
        self.1.on_tick_end(summary);
    }

    fn on_run_end(&mut self, report: &RunReport) {
        self.0.on_run_end(report);
        self.1.on_run_end(report);
    }
}
