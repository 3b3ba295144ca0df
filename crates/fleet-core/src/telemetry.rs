//! Records emitted by vehicles each tick.
//!
//! Both record types are immutable snapshots: vehicles build them from their
//! post-update state and hand them to the orchestrator, which logs and
//! streams them without modification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One vehicle's position, speed, and fuel level at one tick.
///
/// Coordinates carry six decimals, speed and fuel two.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryReading {
    pub vehicle_id: String,
    pub timestamp: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    pub speed_kph: f64,
    pub fuel_percentage: f64,
}

/// Payload of a fuel-theft anomaly.  All values are rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuelTheft {
    pub liters_stolen: f64,
    pub fuel_pct_before: f64,
    pub fuel_pct_after: f64,
    pub theft_percentage: f64,
}

/// The kinds of anomaly a vehicle can raise, each with its structured
/// details.
///
/// Serialized adjacently tagged: `{"event_type": "FUEL_THEFT", "details": {..}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event_type", content = "details", rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum Anomaly {
    FuelTheft(FuelTheft),
}

impl Anomaly {
    /// Wire name of the event type.
    pub fn event_type(&self) -> &'static str {
        match self {
            Anomaly::FuelTheft(_) => "FUEL_THEFT",
        }
    }
}

/// An anomaly raised by one vehicle during one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyEvent {
    pub vehicle_id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub anomaly: Anomaly,
}

impl AnomalyEvent {
    #[inline]
    pub fn event_type(&self) -> &'static str {
        self.anomaly.event_type()
    }
}
