//! Per-vehicle configuration and physics constants.

use crate::{VehicleError, VehicleResult};

/// Progress on an edge at or above which the vehicle counts as having
/// reached the next node.  Absorbs floating-point accumulation when several
/// fractional steps should sum to exactly one edge.
pub const DEFAULT_ARRIVAL_TOLERANCE: f64 = 0.99999;

/// Configuration fixed for a vehicle's lifetime.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VehicleParams {
    pub tank_capacity_liters: f64,
    /// Kilometres per litre while driving.
    pub mileage_kmpl: f64,
    /// Fuel percentage at or below which the vehicle heads for a station.
    pub refuel_threshold_pct: f64,
    /// Litres per hour burned while idling.
    pub idle_consumption_lph: f64,
    /// Speed after an idle stop ends.
    pub cruise_speed_kph: f64,
    /// Length of one road edge.
    pub edge_length_km: f64,
    /// See [`DEFAULT_ARRIVAL_TOLERANCE`].
    pub arrival_tolerance: f64,
    /// Idle stop duration bounds, inclusive, in simulated seconds.
    pub idle_secs_min: u32,
    pub idle_secs_max: u32,
}

impl Default for VehicleParams {
    fn default() -> Self {
        Self {
            tank_capacity_liters: 500.0,
            mileage_kmpl:         4.0,
            refuel_threshold_pct: 20.0,
            idle_consumption_lph: 0.8,
            cruise_speed_kph:     60.0,
            edge_length_km:       1.0,
            arrival_tolerance:    DEFAULT_ARRIVAL_TOLERANCE,
            idle_secs_min:        120,
            idle_secs_max:        600,
        }
    }
}

impl VehicleParams {
    pub fn validate(&self) -> VehicleResult<()> {
        let positive = [
            ("tank_capacity_liters", self.tank_capacity_liters),
            ("mileage_kmpl", self.mileage_kmpl),
            ("edge_length_km", self.edge_length_km),
        ];
        for (name, v) in positive {
            if !(v > 0.0) {
                return Err(VehicleError::InvalidConfiguration(format!(
                    "{name} must be positive, got {v}"
                )));
            }
        }
        if !(0.0..=100.0).contains(&self.refuel_threshold_pct) {
            return Err(VehicleError::InvalidConfiguration(format!(
                "refuel_threshold_pct must be within [0, 100], got {}",
                self.refuel_threshold_pct
            )));
        }
        if self.idle_consumption_lph < 0.0 || self.cruise_speed_kph < 0.0 {
            return Err(VehicleError::InvalidConfiguration(
                "idle consumption and cruise speed must not be negative".into(),
            ));
        }
        if !(self.arrival_tolerance > 0.0 && self.arrival_tolerance <= 1.0) {
            return Err(VehicleError::InvalidConfiguration(format!(
                "arrival_tolerance must be within (0, 1], got {}",
                self.arrival_tolerance
            )));
        }
        if self.idle_secs_min == 0 || self.idle_secs_min > self.idle_secs_max {
            return Err(VehicleError::InvalidConfiguration(format!(
                "idle duration range [{}, {}] is invalid",
                self.idle_secs_min, self.idle_secs_max
            )));
        }
        Ok(())
    }
}
