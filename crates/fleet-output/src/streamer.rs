//! `WriterStreamer<W>`: a [`Streamer`] that appends to a [`TableWriter`].

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use log::debug;

use fleet_core::{AnomalyEvent, AnomalyRow, TelemetryReading, TelemetryRow};
use fleet_sim::{BatchReceipt, StreamError, Streamer};

use crate::writer::TableWriter;
use crate::OutputResult;

/// Streams a run straight into tables.
///
/// Readings are de-duplicated on `(vehicle_id, timestamp)` and written one
/// row at a time, so a batch re-sent after a failure part way through never
/// lands twice.
///
/// Only keys at or after the oldest timestamp of the incoming batch are
/// kept: a re-sent batch always starts with the oldest unacknowledged
/// reading, so older keys can no longer repeat.
pub struct WriterStreamer<W: TableWriter> {
    writer:   W,
    seen:     HashSet<(String, DateTime<Utc>)>,
    written:  usize,
    finished: bool,
}

impl<W: TableWriter> WriterStreamer<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, seen: HashSet::new(), written: 0, finished: false }
    }

    /// Distinct readings written so far.
    pub fn readings_written(&self) -> usize {
        self.written
    }

    /// Finish the writer and hand it back.
    pub fn finish(mut self) -> OutputResult<W> {
        self.finished = true;
        self.writer.finish()?;
        Ok(self.writer)
    }
}

impl<W: TableWriter> Streamer for WriterStreamer<W> {
    fn health_check(&mut self) -> bool {
        !self.finished
    }

    fn send_batch(&mut self, readings: &[TelemetryReading]) -> Result<BatchReceipt, StreamError> {
        let Some(oldest) = readings.iter().map(|r| r.timestamp).min() else {
            return Ok(BatchReceipt { processed: 0, duplicates: 0 });
        };
        self.seen.retain(|(_, ts)| *ts >= oldest);

        let mut processed = 0;
        for r in readings {
            let key = (r.vehicle_id.clone(), r.timestamp);
            if self.seen.contains(&key) {
                continue;
            }
            self.writer.write_telemetry(std::slice::from_ref(&TelemetryRow::from(r)))?;
            self.seen.insert(key);
            self.written += 1;
            processed += 1;
        }

        let receipt = BatchReceipt {
            processed,
            duplicates: readings.len() - processed,
        };
        if receipt.duplicates > 0 {
            debug!("dropped {} duplicate readings", receipt.duplicates);
        }
        Ok(receipt)
    }

    fn send_anomaly(&mut self, event: &AnomalyEvent) -> Result<(), StreamError> {
        self.writer.write_anomalies(&[AnomalyRow::from(event)])?;
        Ok(())
    }
}
