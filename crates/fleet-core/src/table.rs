//! Flat row types for tabular export of the telemetry and anomaly logs.
//!
//! Rows hold plain strings and numbers so any writer (CSV, database, data
//! frame) can consume them without knowing about the nested record types.

use crate::time::iso8601;
use crate::{Anomaly, AnomalyEvent, TelemetryReading};

/// One telemetry reading as a table row.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryRow {
    pub vehicle_id:      String,
    pub timestamp:       String,
    pub latitude:        f64,
    pub longitude:       f64,
    pub speed_kph:       f64,
    pub fuel_percentage: f64,
}

impl TelemetryRow {
    pub const HEADER: [&'static str; 6] = [
        "vehicle_id", "timestamp", "latitude", "longitude", "speed_kph", "fuel_percentage",
    ];
}

impl From<&TelemetryReading> for TelemetryRow {
    fn from(r: &TelemetryReading) -> Self {
        Self {
            vehicle_id:      r.vehicle_id.clone(),
            timestamp:       iso8601(r.timestamp),
            latitude:        r.latitude,
            longitude:       r.longitude,
            speed_kph:       r.speed_kph,
            fuel_percentage: r.fuel_percentage,
        }
    }
}

/// One anomaly event with its details expanded into columns.
///
/// Detail columns that do not apply to an event type are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct AnomalyRow {
    pub vehicle_id:       String,
    pub timestamp:        String,
    pub event_type:       String,
    pub liters_stolen:    Option<f64>,
    pub fuel_pct_before:  Option<f64>,
    pub fuel_pct_after:   Option<f64>,
    pub theft_percentage: Option<f64>,
}

impl AnomalyRow {
    pub const HEADER: [&'static str; 7] = [
        "vehicle_id", "timestamp", "event_type",
        "liters_stolen", "fuel_pct_before", "fuel_pct_after", "theft_percentage",
    ];
}

impl From<&AnomalyEvent> for AnomalyRow {
    fn from(e: &AnomalyEvent) -> Self {
        let mut row = Self {
            vehicle_id:       e.vehicle_id.clone(),
            timestamp:        iso8601(e.timestamp),
            event_type:       e.event_type().to_owned(),
            liters_stolen:    None,
            fuel_pct_before:  None,
            fuel_pct_after:   None,
            theft_percentage: None,
        };
        match &e.anomaly {
            Anomaly::FuelTheft(t) => {
                row.liters_stolen    = Some(t.liters_stolen);
                row.fuel_pct_before  = Some(t.fuel_pct_before);
                row.fuel_pct_after   = Some(t.fuel_pct_after);
                row.theft_percentage = Some(t.theft_percentage);
            }
        }
        row
    }
}
