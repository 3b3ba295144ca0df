//! The `VehicleAgent`, one simulated vehicle.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{debug, info, warn};

use fleet_core::{AgentRng, AnomalyEvent, GeoPoint, GridNode, TelemetryReading, VehicleIdx, round_to};

use crate::theft::draw_theft;
use crate::{BehavioralProfile, TripKind, VehicleError, VehicleParams, VehicleResult, VehicleState};

/// What one call to [`VehicleAgent::tick`] produced.
#[derive(Debug, Clone, PartialEq)]
pub struct TickOutput {
    pub reading: TelemetryReading,
    pub anomaly: Option<AnomalyEvent>,
}

/// Read-only view of a vehicle's live state, for debugging and status
/// reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleSnapshot {
    pub vehicle_id:         String,
    pub state:              VehicleState,
    pub current_edge_index: usize,
    pub progress_on_edge:   f64,
    pub route_length:       usize,
    pub speed_kph:          f64,
    pub fuel_liters:        f64,
    pub fuel_percentage:    f64,
    pub idle_timer_secs:    f64,
    pub position:           GeoPoint,
}

/// A simulated vehicle: configuration plus mutable live state.
///
/// # Invariants
///
/// - `0 <= fuel_liters <= tank_capacity_liters`
/// - `0 <= progress_on_edge <= 1`
/// - with a route of `N >= 2` nodes, `edge_index <= N - 2`
/// - parked vehicles never burn fuel
/// - an idling vehicle's timer is never negative
pub struct VehicleAgent {
    pub id:      String,
    pub idx:     VehicleIdx,
    pub params:  VehicleParams,
    pub profile: Arc<BehavioralProfile>,

    state:           VehicleState,
    speed_kph:       f64,
    fuel_liters:     f64,
    route:           Vec<GridNode>,
    edge_index:      usize,
    progress:        f64,
    idle_timer_secs: f64,
    trip:            Option<TripKind>,
}

impl VehicleAgent {
    /// A parked vehicle with a full tank and no route.
    pub fn new(
        id:      impl Into<String>,
        idx:     VehicleIdx,
        profile: Arc<BehavioralProfile>,
        params:  VehicleParams,
    ) -> Self {
        let fuel_liters = params.tank_capacity_liters;
        Self {
            id: id.into(),
            idx,
            params,
            profile,
            state: VehicleState::Parked,
            speed_kph: 0.0,
            fuel_liters,
            route: Vec::new(),
            edge_index: 0,
            progress: 0.0,
            idle_timer_secs: 0.0,
            trip: None,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline] pub fn state(&self) -> VehicleState { self.state }
    #[inline] pub fn speed_kph(&self) -> f64 { self.speed_kph }
    #[inline] pub fn fuel_liters(&self) -> f64 { self.fuel_liters }
    #[inline] pub fn route(&self) -> &[GridNode] { &self.route }
    #[inline] pub fn current_edge_index(&self) -> usize { self.edge_index }
    #[inline] pub fn progress_on_edge(&self) -> f64 { self.progress }
    #[inline] pub fn idle_timer_secs(&self) -> f64 { self.idle_timer_secs }
    #[inline] pub fn trip_kind(&self) -> Option<TripKind> { self.trip }

    pub fn fuel_percentage(&self) -> f64 {
        self.fuel_liters / self.params.tank_capacity_liters * 100.0
    }

    pub fn needs_refueling(&self) -> bool {
        self.fuel_percentage() <= self.params.refuel_threshold_pct
    }

    /// Distance the remaining fuel covers, in kilometres.
    pub fn fuel_range_km(&self) -> f64 {
        self.fuel_liters * self.params.mileage_kmpl
    }

    /// Final node of the current or most recent route.
    pub fn last_node(&self) -> Option<GridNode> {
        self.route.last().copied()
    }

    /// Overwrite the fuel level, clamped to the tank.
    pub fn set_fuel_liters(&mut self, liters: f64) {
        self.fuel_liters = liters.clamp(0.0, self.params.tank_capacity_liters);
    }

    fn has_active_route(&self) -> bool {
        self.route.len() >= 2 && self.edge_index < self.route.len() - 1
    }

    // ── Commands ──────────────────────────────────────────────────────────

    /// Start a work trip along `route` at `speed_kph`.
    ///
    /// See [`assign_trip`](Self::assign_trip).
    pub fn assign_new_trip(&mut self, route: Vec<GridNode>, speed_kph: f64) -> bool {
        self.assign_trip(route, speed_kph, TripKind::Work)
    }

    /// Start a trip along `route`.
    ///
    /// A route with fewer than two nodes leaves the vehicle parked with
    /// speed 0 and returns `false`; it is not an error, so callers may
    /// assign speculatively.
    pub fn assign_trip(&mut self, route: Vec<GridNode>, speed_kph: f64, kind: TripKind) -> bool {
        if route.len() < 2 {
            self.state = VehicleState::Parked;
            self.speed_kph = 0.0;
            self.route.clear();
            self.edge_index = 0;
            self.progress = 0.0;
            return false;
        }

        debug!("{} starting {:?} trip of {} edges", self.id, kind, route.len() - 1);
        self.route = route;
        self.edge_index = 0;
        self.progress = 0.0;
        self.speed_kph = speed_kph;
        self.state = VehicleState::Driving;
        self.idle_timer_secs = 0.0;
        self.trip = Some(kind);
        true
    }

    /// Fill the tank.  The vehicle ends parked and stationary, and any
    /// refuel trip counts as finished.
    pub fn refuel(&mut self) {
        info!("{} refueling at {:.2}% fuel", self.id, self.fuel_percentage());
        self.fuel_liters = self.params.tank_capacity_liters;
        self.state = VehicleState::Parked;
        self.speed_kph = 0.0;
        self.trip = None;
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Advance the vehicle by `delta_secs` of simulated time.
    ///
    /// Steps run in a fixed order: idle countdown, movement, fuel burn,
    /// node arrival (stop / theft sampling), position, reading.
    ///
    /// # Errors
    /// - [`VehicleError::InvalidArgument`] if `delta_secs` is not positive.
    /// - [`VehicleError::InvalidState`] if the live state is corrupt; the
    ///   vehicle is left untouched.
    pub fn tick(
        &mut self,
        timestamp:  DateTime<Utc>,
        delta_secs: f64,
        rng:        &mut AgentRng,
    ) -> VehicleResult<TickOutput> {
        if !(delta_secs > 0.0) {
            return Err(VehicleError::InvalidArgument(format!(
                "tick delta must be positive, got {delta_secs}"
            )));
        }
        self.check_state()?;

        // ① Idle countdown.
        if self.state == VehicleState::Idling && self.idle_timer_secs > 0.0 {
            self.idle_timer_secs = (self.idle_timer_secs - delta_secs).max(0.0);
            if self.idle_timer_secs == 0.0 {
                self.resume_driving();
            }
        }

        // ② Movement.
        let distance_km = match self.state {
            VehicleState::Driving => self.advance_on_edge(delta_secs),
            _ => {
                self.speed_kph = 0.0;
                0.0
            }
        };

        // ③ Fuel.
        self.burn_fuel(distance_km, delta_secs);

        // ④ Arrival.
        let anomaly = if self.state == VehicleState::Driving
            && self.progress >= self.params.arrival_tolerance
        {
            self.handle_arrival(timestamp, rng)
        } else {
            None
        };

        // ⑤ + ⑥ Position and reading.
        let reading = self.reading(timestamp);
        Ok(TickOutput { reading, anomaly })
    }

    fn check_state(&self) -> VehicleResult<()> {
        let tank = self.params.tank_capacity_liters;
        let broken = if !(0.0..=tank).contains(&self.fuel_liters) {
            Some(format!("fuel {} L outside [0, {tank}]", self.fuel_liters))
        } else if !(0.0..=1.0).contains(&self.progress) {
            Some(format!("edge progress {} outside [0, 1]", self.progress))
        } else if !(self.speed_kph.is_finite() && self.speed_kph >= 0.0) {
            Some(format!("speed {} kph", self.speed_kph))
        } else if !(self.idle_timer_secs.is_finite() && self.idle_timer_secs >= 0.0) {
            Some(format!("idle timer {} s", self.idle_timer_secs))
        } else {
            None
        };
        match broken {
            Some(what) => Err(VehicleError::InvalidState(what)),
            None       => Ok(()),
        }
    }

    /// Move along the current edge; returns kilometres actually covered.
    fn advance_on_edge(&mut self, delta_secs: f64) -> f64 {
        if !self.has_active_route() {
            self.stop("no active route");
            return 0.0;
        }
        let edge_km = self.params.edge_length_km;
        let step = self.speed_kph * delta_secs / 3_600.0 / edge_km;
        let before = self.progress;
        self.progress = (self.progress + step).min(1.0);
        (self.progress - before) * edge_km
    }

    fn burn_fuel(&mut self, distance_km: f64, delta_secs: f64) {
        let liters = match self.state {
            VehicleState::Driving => distance_km / self.params.mileage_kmpl,
            VehicleState::Idling  => self.params.idle_consumption_lph * delta_secs / 3_600.0,
            VehicleState::Parked | VehicleState::Refueling => 0.0,
        };
        self.fuel_liters = (self.fuel_liters - liters).max(0.0);
    }

    fn handle_arrival(&mut self, timestamp: DateTime<Utc>, rng: &mut AgentRng) -> Option<AnomalyEvent> {
        if self.edge_index + 2 >= self.route.len() {
            self.progress = 1.0;
            self.state = VehicleState::Parked;
            self.speed_kph = 0.0;
            debug!("{} completed trip at {:?}", self.id, self.last_node());
            return None;
        }

        // Pass through the node before deciding to stop there, so the
        // recorded position reflects the node even while idling at it.
        self.edge_index += 1;
        self.progress = 0.0;

        if !rng.gen_bool(self.profile.p_stop_at_node) {
            return None;
        }

        self.state = VehicleState::Idling;
        self.speed_kph = 0.0;
        self.idle_timer_secs =
            rng.gen_range(self.params.idle_secs_min..=self.params.idle_secs_max) as f64;
        debug!(
            "{} stopping for {}s at edge {}",
            self.id, self.idle_timer_secs, self.edge_index
        );

        if !rng.gen_bool(self.profile.p_theft_given_stop) {
            return None;
        }

        let theft = draw_theft(&self.profile, self.params.tank_capacity_liters, self.fuel_liters, rng);
        self.fuel_liters = theft.fuel_after_liters;
        warn!("{} fuel theft of {:.2} L", self.id, theft.liters_stolen);
        Some(theft.into_event(&self.id, timestamp, self.params.tank_capacity_liters))
    }

    fn resume_driving(&mut self) {
        self.state = VehicleState::Driving;
        self.speed_kph = self.params.cruise_speed_kph;
        debug!("{} resuming driving", self.id);
    }

    fn stop(&mut self, reason: &str) {
        self.state = VehicleState::Parked;
        self.speed_kph = 0.0;
        debug!("{} stopped: {reason}", self.id);
    }

    // ── Position & output ─────────────────────────────────────────────────

    /// Current position, interpolated along the active edge.
    ///
    /// At or past the route end this is the final node; with no route at
    /// all it is the origin.
    pub fn position(&self) -> GeoPoint {
        match self.route.len() {
            0 => GeoPoint::default(),
            n if self.edge_index + 1 >= n => self.route[n - 1].point(),
            _ => {
                let from = self.route[self.edge_index].point();
                let to   = self.route[self.edge_index + 1].point();
                from.lerp(to, self.progress)
            }
        }
    }

    fn reading(&self, timestamp: DateTime<Utc>) -> TelemetryReading {
        let pos = self.position();
        TelemetryReading {
            vehicle_id:      self.id.clone(),
            timestamp,
            latitude:        round_to(pos.lat, 6),
            longitude:       round_to(pos.lon, 6),
            speed_kph:       round_to(self.speed_kph, 2),
            fuel_percentage: round_to(self.fuel_percentage(), 2),
        }
    }

    pub fn snapshot(&self) -> VehicleSnapshot {
        VehicleSnapshot {
            vehicle_id:         self.id.clone(),
            state:              self.state,
            current_edge_index: self.edge_index,
            progress_on_edge:   self.progress,
            route_length:       self.route.len(),
            speed_kph:          self.speed_kph,
            fuel_liters:        self.fuel_liters,
            fuel_percentage:    self.fuel_percentage(),
            idle_timer_secs:    self.idle_timer_secs,
            position:           self.position(),
        }
    }
}
