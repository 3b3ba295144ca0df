//! Behavioural profile shared by every vehicle of one class.

use crate::{VehicleError, VehicleResult};

/// How a class of vehicle behaves at intermediate intersections.
///
/// Profiles are immutable and shared behind an `Arc` by all vehicles that
/// use them.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BehavioralProfile {
    /// Probability of stopping at each intermediate node.
    pub p_stop_at_node: f64,
    /// Probability of fuel theft given a stop.
    pub p_theft_given_stop: f64,
    /// Smallest share of the tank stolen in one theft, in percent.
    pub theft_pct_min: f64,
    /// Largest share of the tank stolen in one theft, in percent.
    pub theft_pct_max: f64,
}

impl BehavioralProfile {
    pub fn new(p_stop_at_node: f64, p_theft_given_stop: f64) -> Self {
        Self { p_stop_at_node, p_theft_given_stop, ..Self::default() }
    }

    /// Set the stolen-percentage range.
    pub fn with_theft_range(mut self, min_pct: f64, max_pct: f64) -> Self {
        self.theft_pct_min = min_pct;
        self.theft_pct_max = max_pct;
        self
    }

    pub fn validate(&self) -> VehicleResult<()> {
        for (name, p) in [
            ("p_stop_at_node", self.p_stop_at_node),
            ("p_theft_given_stop", self.p_theft_given_stop),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(VehicleError::InvalidConfiguration(format!(
                    "{name} must be within [0, 1], got {p}"
                )));
            }
        }
        if !(0.0 <= self.theft_pct_min
            && self.theft_pct_min <= self.theft_pct_max
            && self.theft_pct_max <= 100.0)
        {
            return Err(VehicleError::InvalidConfiguration(format!(
                "theft range must satisfy 0 <= min <= max <= 100, got [{}, {}]",
                self.theft_pct_min, self.theft_pct_max
            )));
        }
        Ok(())
    }
}

impl Default for BehavioralProfile {
    fn default() -> Self {
        Self {
            p_stop_at_node:     0.10,
            p_theft_given_stop: 0.05,
            theft_pct_min:      1.0,
            theft_pct_max:      15.0,
        }
    }
}
