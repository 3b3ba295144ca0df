//! Fuel theft: the one anomaly the simulator injects.
//!
//! A theft draws a percentage uniformly from the profile's range, converts
//! it to litres against the tank capacity, and removes that much fuel
//! (never below empty).  The resulting [`AnomalyEvent`] is the ground truth
//! that downstream detectors are scored against.

use chrono::{DateTime, Utc};

use fleet_core::{AgentRng, Anomaly, AnomalyEvent, FuelTheft, round_to};

use crate::BehavioralProfile;

/// The raw numbers of one theft, before rounding for the event payload.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TheftOutcome {
    /// Drawn share of the tank, in percent.
    pub theft_pct: f64,
    /// Litres actually removed.  Less than the drawn amount only when the
    /// tank held less than that.
    pub liters_stolen: f64,
    pub fuel_before_liters: f64,
    pub fuel_after_liters: f64,
}

impl TheftOutcome {
    /// Build the anomaly event, with fuel levels expressed as percentages of
    /// `tank_capacity_liters`.
    pub fn into_event(
        self,
        vehicle_id: &str,
        timestamp: DateTime<Utc>,
        tank_capacity_liters: f64,
    ) -> AnomalyEvent {
        let pct = |liters: f64| liters / tank_capacity_liters * 100.0;
        AnomalyEvent {
            vehicle_id: vehicle_id.to_owned(),
            timestamp,
            anomaly: Anomaly::FuelTheft(FuelTheft {
                liters_stolen:    round_to(self.liters_stolen, 2),
                fuel_pct_before:  round_to(pct(self.fuel_before_liters), 2),
                fuel_pct_after:   round_to(pct(self.fuel_after_liters), 2),
                theft_percentage: round_to(self.theft_pct, 2),
            }),
        }
    }
}

/// Draw a theft for a tank holding `fuel_liters`.
pub fn draw_theft(
    profile: &BehavioralProfile,
    tank_capacity_liters: f64,
    fuel_liters: f64,
    rng: &mut AgentRng,
) -> TheftOutcome {
    let theft_pct = rng.gen_range(profile.theft_pct_min..=profile.theft_pct_max);
    let drawn = theft_pct / 100.0 * tank_capacity_liters;
    let fuel_after_liters = (fuel_liters - drawn).max(0.0);
    TheftOutcome {
        theft_pct,
        liters_stolen: fuel_liters - fuel_after_liters,
        fuel_before_liters: fuel_liters,
        fuel_after_liters,
    }
}
