//! The `FleetOrchestrator` and its tick loop.

use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use log::{error, info, warn};

use fleet_core::{
    AgentRng, AnomalyEvent, AnomalyRow, SimClock, SimRng, TelemetryReading, TelemetryRow,
    VehicleIdx,
};
use fleet_spatial::{DijkstraRouter, RoadNetwork, Router};
use fleet_vehicle::{
    BehavioralProfile, TickOutput, VehicleAgent, VehicleError, VehicleParams, VehicleResult,
    VehicleSnapshot, VehicleState,
};

use crate::lifecycle::{LifecycleAction, TripPlanner};
use crate::{
    CancelToken, FleetObserver, FleetStatus, RunConfig, RunReport, SimError, SimResult,
    StreamStats, Streamer, TickSummary, TripPolicy,
};

/// Owns the fleet and drives it over simulated time.
///
/// Each tick of [`run`](Self::run):
///
/// 1. parked vehicles go through life-cycle management (refuel, refuel
///    trip, or work trip), drawing from the fleet-level [`SimRng`];
/// 2. every vehicle ticks with its own [`AgentRng`] (in parallel with the
///    `parallel` feature);
/// 3. results are applied in vehicle order: readings to the log and the
///    buffer, anomalies to the log and straight to the streamer;
/// 4. a full buffer is flushed as one batch, and cleared only if the
///    streamer accepts it.
///
/// Create via [`FleetBuilder`][crate::FleetBuilder].
pub struct FleetOrchestrator<R: Router = DijkstraRouter> {
    pub(crate) network: Arc<RoadNetwork>,
    pub(crate) router:  R,
    pub(crate) policy:  TripPolicy,
    pub(crate) params:  VehicleParams,
    pub(crate) seed:    u64,
    pub(crate) rng:     SimRng,
    pub(crate) cancel:  CancelToken,

    pub(crate) vehicles: Vec<VehicleAgent>,
    /// Parallel to `vehicles`, kept apart for the split borrow in the tick
    /// phase.
    pub(crate) rngs: Vec<AgentRng>,
    /// Parallel to `vehicles`: set while a vehicle is parked with no trip.
    pub(crate) stranded: Vec<bool>,

    pub(crate) telemetry_log: Vec<TelemetryReading>,
    pub(crate) anomaly_log:   Vec<AnomalyEvent>,
}

impl<R: Router> FleetOrchestrator<R> {
    // ── Fleet ─────────────────────────────────────────────────────────────

    /// Replace the fleet with `count` parked, fully fuelled vehicles.
    ///
    /// Vehicle `i` gets the `i mod n`-th profile in name order and the id
    /// `V-{NAME}-{i+1:03}`.
    pub fn create_fleet(
        &mut self,
        count:    usize,
        profiles: &BTreeMap<String, BehavioralProfile>,
    ) -> SimResult<()> {
        if count == 0 {
            return Err(SimError::InvalidArgument("vehicle count must be positive".into()));
        }
        if profiles.is_empty() {
            return Err(SimError::InvalidArgument("at least one behavioral profile is required".into()));
        }
        for (name, profile) in profiles {
            profile
                .validate()
                .map_err(|e| SimError::Config(format!("profile '{name}': {e}")))?;
        }
        if u32::try_from(count).is_err() {
            return Err(SimError::InvalidArgument(format!("fleet of {count} vehicles is too large")));
        }

        let shared: Vec<(String, Arc<BehavioralProfile>)> = profiles
            .iter()
            .map(|(name, p)| (name.to_uppercase(), Arc::new(p.clone())))
            .collect();

        self.vehicles = (0..count)
            .map(|i| {
                let (name, profile) = &shared[i % shared.len()];
                VehicleAgent::new(
                    format!("V-{name}-{:03}", i + 1),
                    VehicleIdx(i as u32),
                    Arc::clone(profile),
                    self.params.clone(),
                )
            })
            .collect();
        self.rngs = (0..count)
            .map(|i| AgentRng::new(self.seed, VehicleIdx(i as u32)))
            .collect();
        self.stranded = vec![false; count];

        info!("created fleet of {count} vehicles across {} profiles", shared.len());
        Ok(())
    }

    /// Run life-cycle management for every parked vehicle.  Returns the
    /// number of trips assigned.
    ///
    /// A vehicle that gets no trip is warned about once, when it becomes
    /// stranded, and retried quietly every tick after that.
    pub fn manage_lifecycle(&mut self) -> usize {
        let planner = TripPlanner::new(&self.network, &self.router, &self.policy);
        let mut assigned = 0;
        for (vehicle, stranded) in self.vehicles.iter_mut().zip(self.stranded.iter_mut()) {
            if vehicle.state() != VehicleState::Parked {
                continue;
            }
            match planner.manage(vehicle, &mut self.rng) {
                LifecycleAction::Stranded => {
                    if !*stranded {
                        warn!(
                            "{} stranded at {:.1}% fuel: no trip available, retrying each tick",
                            vehicle.id,
                            vehicle.fuel_percentage()
                        );
                        *stranded = true;
                    }
                }
                action => {
                    if std::mem::take(stranded) {
                        info!("{} no longer stranded ({action:?})", vehicle.id);
                    }
                    if action.assigned_trip() {
                        assigned += 1;
                    }
                }
            }
        }
        assigned
    }

    // ── Run ───────────────────────────────────────────────────────────────

    /// Simulate `config.total_ticks()` ticks, streaming into `streamer`.
    ///
    /// Logs from any previous run are cleared first.  Per-vehicle failures
    /// and streaming failures are logged and counted in the report; they do
    /// not stop the run.
    ///
    /// # Errors
    /// - [`SimError::Config`] for an invalid `config` or an empty fleet.
    /// - [`SimError::StreamerUnavailable`] if the health check fails.
    pub fn run<S, O>(
        &mut self,
        config:   &RunConfig,
        streamer: &mut S,
        observer: &mut O,
    ) -> SimResult<RunReport>
    where
        S: Streamer + ?Sized,
        O: FleetObserver + ?Sized,
    {
        config.validate()?;
        if self.vehicles.is_empty() {
            return Err(SimError::Config("no vehicles in fleet; call create_fleet first".into()));
        }
        if !streamer.health_check() {
            return Err(SimError::StreamerUnavailable);
        }

        self.telemetry_log.clear();
        self.anomaly_log.clear();

        let total_ticks = config.total_ticks();
        let mut clock = SimClock::new(config.start_time, config.tick_secs);
        let tick_budget = config
            .wall_secs_per_tick()
            .and_then(|s| Duration::try_from_secs_f64(s).ok());
        let mut buffer: Vec<TelemetryReading> = Vec::with_capacity(config.batch_size);
        let mut stats = StreamStats::default();
        let mut vehicle_failures = 0;
        let mut cancelled = false;

        info!(
            "starting run: {} min, {} ticks of {}s, {} vehicles, pacing {}",
            config.duration_minutes,
            total_ticks,
            config.tick_secs,
            self.vehicles.len(),
            match config.wall_secs_per_tick() {
                Some(s) => format!("{s:.2}s per tick"),
                None    => "off".to_owned(),
            },
        );

        while clock.current_tick.0 < total_ticks {
            if self.cancel.is_cancelled() {
                info!("run cancelled before {}", clock);
                cancelled = true;
                break;
            }
            let started = Instant::now();
            let tick = clock.current_tick;
            let now = clock.now();
            observer.on_tick_start(tick, now);

            let trips_assigned = self.manage_lifecycle();
            let outputs = self.tick_vehicles(now, config.tick_secs as f64);

            let mut summary = TickSummary {
                tick,
                total_ticks,
                timestamp: now,
                trips_assigned,
                readings: 0,
                anomalies: 0,
                vehicle_failures: 0,
                buffered: 0,
                stream: stats,
            };
            for (vehicle, result) in self.vehicles.iter().zip(outputs) {
                match result {
                    Ok(TickOutput { reading, anomaly }) => {
                        self.telemetry_log.push(reading.clone());
                        buffer.push(reading);
                        summary.readings += 1;
                        if let Some(event) = anomaly {
                            send_anomaly(streamer, &event, &mut stats);
                            self.anomaly_log.push(event);
                            summary.anomalies += 1;
                        }
                    }
                    Err(e) => {
                        error!("{} failed at {tick}: {e}", vehicle.id);
                        summary.vehicle_failures += 1;
                    }
                }
            }
            vehicle_failures += summary.vehicle_failures;

            if buffer.len() >= config.batch_size {
                flush(streamer, &mut buffer, &mut stats);
            }

            summary.buffered = buffer.len();
            summary.stream = stats;
            observer.on_tick_end(&summary);

            clock.advance();

            // Pace to wall time; never sleep after the last tick.
            if let Some(budget) = tick_budget.filter(|_| clock.current_tick.0 < total_ticks) {
                let spent = started.elapsed();
                if budget > spent {
                    std::thread::sleep(budget - spent);
                }
            }
        }

        flush(streamer, &mut buffer, &mut stats);
        if !buffer.is_empty() {
            warn!("{} readings left unsent after final flush", buffer.len());
        }

        let report = RunReport {
            ticks_completed: clock.current_tick.0,
            total_ticks,
            readings: self.telemetry_log.len(),
            anomalies: self.anomaly_log.len(),
            vehicle_failures,
            unsent_readings: buffer.len(),
            cancelled,
            stream: stats,
        };
        observer.on_run_end(&report);
        Ok(report)
    }

    /// Tick every vehicle once.  Results are in vehicle order.
    fn tick_vehicles(&mut self, now: DateTime<Utc>, delta_secs: f64) -> Vec<VehicleResult<TickOutput>> {
        #[cfg(not(feature = "parallel"))]
        {
            self.vehicles
                .iter_mut()
                .zip(self.rngs.iter_mut())
                .map(|(v, rng)| tick_isolated(v, now, delta_secs, rng))
                .collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            self.vehicles
                .par_iter_mut()
                .zip(self.rngs.par_iter_mut())
                .map(|(v, rng)| tick_isolated(v, now, delta_secs, rng))
                .collect()
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn fleet_status(&self) -> FleetStatus {
        FleetStatus::collect(
            &self.vehicles,
            &self.stranded,
            self.telemetry_log.len(),
            self.anomaly_log.len(),
        )
    }

    /// The telemetry log as flat rows.
    pub fn telemetry_table(&self) -> Vec<TelemetryRow> {
        self.telemetry_log.iter().map(TelemetryRow::from).collect()
    }

    /// The anomaly log with details expanded to columns.
    pub fn anomaly_table(&self) -> Vec<AnomalyRow> {
        self.anomaly_log.iter().map(AnomalyRow::from).collect()
    }

    #[inline] pub fn telemetry_log(&self) -> &[TelemetryReading] { &self.telemetry_log }
    #[inline] pub fn anomaly_log(&self) -> &[AnomalyEvent] { &self.anomaly_log }
    #[inline] pub fn vehicles(&self) -> &[VehicleAgent] { &self.vehicles }
    #[inline] pub fn network(&self) -> &Arc<RoadNetwork> { &self.network }
    #[inline] pub fn trip_policy(&self) -> &TripPolicy { &self.policy }
    #[inline] pub fn seed(&self) -> u64 { self.seed }

    pub fn vehicle(&self, idx: VehicleIdx) -> Option<&VehicleAgent> {
        self.vehicles.get(idx.index())
    }

    pub fn vehicle_mut(&mut self, idx: VehicleIdx) -> Option<&mut VehicleAgent> {
        self.vehicles.get_mut(idx.index())
    }

    /// Live state of every vehicle, for debugging.
    pub fn vehicle_snapshots(&self) -> Vec<VehicleSnapshot> {
        self.vehicles.iter().map(VehicleAgent::snapshot).collect()
    }

    /// A token that stops [`run`](Self::run) before its next tick.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }
}

/// Tick one vehicle, turning a panic inside it into a per-vehicle error so
/// the rest of the fleet keeps running.
fn tick_isolated(
    vehicle:    &mut VehicleAgent,
    now:        DateTime<Utc>,
    delta_secs: f64,
    rng:        &mut AgentRng,
) -> VehicleResult<TickOutput> {
    panic::catch_unwind(AssertUnwindSafe(|| vehicle.tick(now, delta_secs, rng))).unwrap_or_else(
        |payload| {
            let msg = payload
                .downcast_ref::<&str>()
                .map(|s| (*s).to_owned())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "non-string panic payload".to_owned());
            Err(VehicleError::Panicked(msg))
        },
    )
}

// ── Streaming helpers ─────────────────────────────────────────────────────────

/// Send the buffer as one batch.  The buffer is cleared only on success.
fn flush<S: Streamer + ?Sized>(
    streamer: &mut S,
    buffer:   &mut Vec<TelemetryReading>,
    stats:    &mut StreamStats,
) {
    if buffer.is_empty() {
        return;
    }
    match streamer.send_batch(buffer.as_slice()) {
        Ok(receipt) => {
            stats.batches_sent += 1;
            stats.readings_sent += receipt.processed;
            stats.duplicate_readings += receipt.duplicates;
            buffer.clear();
        }
        Err(e) => {
            stats.failed_batches += 1;
            warn!("batch of {} readings not accepted, keeping it buffered: {e}", buffer.len());
        }
    }
}

fn send_anomaly<S: Streamer + ?Sized>(streamer: &mut S, event: &AnomalyEvent, stats: &mut StreamStats) {
    match streamer.send_anomaly(event) {
        Ok(()) => stats.anomalies_sent += 1,
        Err(e) => {
            stats.failed_anomalies += 1;
            warn!("{} {} event not delivered: {e}", event.vehicle_id, event.event_type());
        }
    }
}
