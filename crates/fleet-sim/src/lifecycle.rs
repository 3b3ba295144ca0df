//! Trip assignment for parked vehicles.
//!
//! Priority, evaluated once per tick per parked vehicle:
//!
//! 1. Standing on a station after a refuel trip, or needing fuel there:
//!    refuel in place.
//! 2. Needing fuel: route to the nearest reachable station.
//! 3. Otherwise: a random work trip inside the safe fuel range.
//!
//! Every search is bounded.  A vehicle that gets nothing stays parked and
//! is tried again next tick.

use log::debug;

use fleet_core::{GridNode, SimRng};
use fleet_spatial::{RoadNetwork, Router};
use fleet_vehicle::{TripKind, VehicleAgent, VehicleState};

use crate::TripPolicy;

/// What life-cycle management did with one parked vehicle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LifecycleAction {
    /// Vehicle was not parked.
    Skipped,
    RefueledInPlace,
    RefuelTrip,
    WorkTrip,
    /// No trip could be assigned this tick.
    Stranded,
}

impl LifecycleAction {
    pub fn assigned_trip(self) -> bool {
        matches!(self, LifecycleAction::RefuelTrip | LifecycleAction::WorkTrip)
    }
}

/// Read-only context for assigning trips.
pub struct TripPlanner<'a, R: Router> {
    pub network: &'a RoadNetwork,
    pub router:  &'a R,
    pub policy:  &'a TripPolicy,
}

impl<'a, R: Router> TripPlanner<'a, R> {
    pub fn new(network: &'a RoadNetwork, router: &'a R, policy: &'a TripPolicy) -> Self {
        Self { network, router, policy }
    }

    pub fn manage(&self, vehicle: &mut VehicleAgent, rng: &mut SimRng) -> LifecycleAction {
        if vehicle.state() != VehicleState::Parked {
            return LifecycleAction::Skipped;
        }

        if self.at_station(vehicle)
            && (vehicle.needs_refueling() || vehicle.trip_kind() == Some(TripKind::Refuel))
        {
            vehicle.refuel();
            return LifecycleAction::RefueledInPlace;
        }

        if vehicle.needs_refueling() {
            return if self.assign_refuel_trip(vehicle, rng) {
                LifecycleAction::RefuelTrip
            } else {
                LifecycleAction::Stranded
            };
        }

        if self.assign_work_trip(vehicle, rng) {
            LifecycleAction::WorkTrip
        } else {
            LifecycleAction::Stranded
        }
    }

    fn at_station(&self, vehicle: &VehicleAgent) -> bool {
        vehicle
            .last_node()
            .and_then(|n| self.network.node_id(n))
            .is_some_and(|id| self.network.is_station(id))
    }

    /// Where a parked vehicle stands: its snapped position if it has ever
    /// been routed, else a random intersection.
    fn current_node(&self, vehicle: &VehicleAgent, rng: &mut SimRng) -> Option<GridNode> {
        let snapped = vehicle
            .last_node()
            .and_then(|_| self.network.snap_to_node(vehicle.position()));
        match snapped {
            Some(id) => Some(self.network.node(id)),
            None     => self.network.random_node(rng),
        }
    }

    /// Route `vehicle` to the nearest reachable station.
    pub fn assign_refuel_trip(&self, vehicle: &mut VehicleAgent, rng: &mut SimRng) -> bool {
        let Some(from) = self.current_node(vehicle, rng) else {
            debug!("{}: network is empty, cannot look for a station", vehicle.id);
            return false;
        };

        match self.network.nearest_station(self.router, from) {
            Ok((station, route)) => {
                let km = route.len().saturating_sub(1) as f64 * vehicle.params.edge_length_km;
                let assigned = vehicle.assign_trip(route, self.policy.refuel_speed_kph, TripKind::Refuel);
                if assigned {
                    debug!("{}: refuel trip of {km:.0} km to station {station}", vehicle.id);
                }
                assigned
            }
            Err(e) => {
                debug!("{}: no refuel trip from {from}: {e}", vehicle.id);
                false
            }
        }
    }

    /// Give `vehicle` a random trip that fits inside its safe fuel range.
    pub fn assign_work_trip(&self, vehicle: &mut VehicleAgent, rng: &mut SimRng) -> bool {
        let safe_range_km = vehicle.fuel_range_km() * self.policy.safe_range_factor;
        let min_nodes = self.policy.min_route_nodes(safe_range_km);

        for _ in 0..self.policy.max_trip_attempts {
            let Ok(route) = self.network.random_route_with_attempts(
                self.router,
                rng,
                min_nodes,
                self.policy.route_sample_attempts,
            ) else {
                continue;
            };

            let km = (route.len() - 1) as f64 * vehicle.params.edge_length_km;
            if km <= safe_range_km {
                debug!("{}: work trip of {km:.0} km (safe range {safe_range_km:.1} km)", vehicle.id);
                return vehicle.assign_trip(route, self.policy.trip_speed_kph, TripKind::Work);
            }
        }

        debug!(
            "{}: no work trip within {safe_range_km:.1} km after {} attempts",
            vehicle.id, self.policy.max_trip_attempts
        );
        false
    }
}
