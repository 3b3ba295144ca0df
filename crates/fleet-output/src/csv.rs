//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `telemetry.csv`
//! - `anomalies.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use fleet_core::{AnomalyRow, TelemetryRow};

use crate::writer::TableWriter;
use crate::{OutputError, OutputResult};

pub const TELEMETRY_FILE: &str = "telemetry.csv";
pub const ANOMALY_FILE:   &str = "anomalies.csv";

/// Writes the telemetry and anomaly tables to two CSV files.
pub struct CsvWriter {
    telemetry: Writer<File>,
    anomalies: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open (or truncate) both files, and write the
    /// header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut telemetry = Writer::from_path(dir.join(TELEMETRY_FILE))?;
        telemetry.write_record(TelemetryRow::HEADER)?;

        let mut anomalies = Writer::from_path(dir.join(ANOMALY_FILE))?;
        anomalies.write_record(AnomalyRow::HEADER)?;

        Ok(Self { telemetry, anomalies, finished: false })
    }
}

/// Empty cell for detail columns that do not apply.
fn opt(v: Option<f64>) -> String {
    v.map(|x| x.to_string()).unwrap_or_default()
}

impl TableWriter for CsvWriter {
    fn write_telemetry(&mut self, rows: &[TelemetryRow]) -> OutputResult<()> {
        if self.finished {
            return Err(OutputError::Finished);
        }
        for row in rows {
            self.telemetry.write_record(&[
                row.vehicle_id.clone(),
                row.timestamp.clone(),
                row.latitude.to_string(),
                row.longitude.to_string(),
                row.speed_kph.to_string(),
                row.fuel_percentage.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_anomalies(&mut self, rows: &[AnomalyRow]) -> OutputResult<()> {
        if self.finished {
            return Err(OutputError::Finished);
        }
        for row in rows {
            self.anomalies.write_record(&[
                row.vehicle_id.clone(),
                row.timestamp.clone(),
                row.event_type.clone(),
                opt(row.liters_stolen),
                opt(row.fuel_pct_before),
                opt(row.fuel_pct_after),
                opt(row.theft_percentage),
            ])?;
        }
        // Flushed per call so events are visible while a run is live.
        self.anomalies.flush()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.telemetry.flush()?;
        self.anomalies.flush()?;
        Ok(())
    }
}
