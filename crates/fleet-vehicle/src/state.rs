//! Operating modes and trip purposes.

use std::fmt;

/// A vehicle's operating mode.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum VehicleState {
    Driving,
    Idling,
    /// Stationary at the end of a route, or never routed.
    #[default]
    Parked,
    /// Reserved.  Refuelling is currently an instantaneous action taken
    /// while parked.
    Refueling,
}

impl VehicleState {
    pub const ALL: [VehicleState; 4] = [
        VehicleState::Driving,
        VehicleState::Idling,
        VehicleState::Parked,
        VehicleState::Refueling,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            VehicleState::Driving   => "DRIVING",
            VehicleState::Idling    => "IDLING",
            VehicleState::Parked    => "PARKED",
            VehicleState::Refueling => "REFUELING",
        }
    }
}

impl fmt::Display for VehicleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why the current (or most recent) trip was assigned.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TripKind {
    /// Random work assignment.
    Work,
    /// Drive to the nearest refueling station.
    Refuel,
}
