//! The `TableWriter` trait implemented by all backend writers.

use fleet_core::{AnomalyRow, TelemetryRow};

use crate::OutputResult;

/// A sink for the two output tables.
pub trait TableWriter {
    /// Append telemetry rows.
    fn write_telemetry(&mut self, rows: &[TelemetryRow]) -> OutputResult<()>;

    /// Append anomaly rows.
    fn write_anomalies(&mut self, rows: &[AnomalyRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
