//! `fleet-core`: foundational types for the fleet telemetry simulator.
//!
//! This crate is a dependency of every other `fleet-*` crate.  It has no
//! `fleet-*` dependencies of its own.
//!
//! # What lives here
//!
//! | Module          | Contents                                               |
//! |-----------------|--------------------------------------------------------|
//! | [`ids`]         | `VehicleIdx`, `NodeId`, `EdgeId`                       |
//! | [`geo`]         | `GeoPoint`, `GridNode`, interpolation, rounding        |
//! | [`time`]        | `Tick`, `SimClock`                                     |
//! | [`rng`]         | `AgentRng` (per-vehicle), `SimRng` (fleet-level)       |
//! | [`telemetry`]   | `TelemetryReading`, `AnomalyEvent`, `Anomaly`          |
//! | [`table`]       | `TelemetryRow`, `AnomalyRow`: flat tabular records     |

pub mod geo;
pub mod ids;
pub mod rng;
pub mod table;
pub mod telemetry;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use geo::{GeoPoint, GridNode, round_to};
pub use ids::{EdgeId, NodeId, VehicleIdx};
pub use rng::{AgentRng, SimRng};
pub use table::{AnomalyRow, TelemetryRow};
pub use telemetry::{Anomaly, AnomalyEvent, FuelTheft, TelemetryReading};
pub use time::{SimClock, Tick};
