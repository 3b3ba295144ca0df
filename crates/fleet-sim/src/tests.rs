//! Unit tests for fleet-sim.
//!
//! Fleet tests run on small seeded grids with `MemoryStreamer` as the sink.

#[cfg(test)]
mod helpers {
    use std::collections::BTreeMap;
    use std::sync::Arc;

    use chrono::{DateTime, TimeZone, Utc};
    use fleet_spatial::RoadNetwork;
    use fleet_vehicle::BehavioralProfile;

    use crate::{FleetBuilder, FleetOrchestrator, RunConfig};

    pub fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap()
    }

    pub fn profiles() -> BTreeMap<String, BehavioralProfile> {
        BTreeMap::from([
            ("a".to_owned(), BehavioralProfile::new(0.2, 0.1)),
            ("b".to_owned(), BehavioralProfile::new(0.0, 0.0)),
        ])
    }

    pub fn grid() -> Arc<RoadNetwork> {
        Arc::new(RoadNetwork::grid(5, 5, 1, Some(7)).unwrap())
    }

    pub fn fleet(vehicles: usize, seed: u64) -> FleetOrchestrator {
        let mut f = FleetBuilder::new(grid()).seed(seed).build().unwrap();
        f.create_fleet(vehicles, &profiles()).unwrap();
        f
    }

    /// 10 ticks of 60 s.
    pub fn ten_ticks(batch_size: usize) -> RunConfig {
        RunConfig {
            duration_minutes: 10,
            tick_secs:        60,
            batch_size,
            start_time:       t0(),
            ..RunConfig::default()
        }
    }
}

// ── Configuration ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod config {
    use crate::{RunConfig, SimError, TripPolicy};

    #[test]
    fn total_ticks_truncates() {
        let c = RunConfig { duration_minutes: 60, tick_secs: 60, ..RunConfig::default() };
        assert_eq!(c.total_ticks(), 60);
        let c = RunConfig { duration_minutes: 1, tick_secs: 7, ..RunConfig::default() };
        assert_eq!(c.total_ticks(), 8);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn rejects_bad_run_parameters() {
        let bad = [
            RunConfig { duration_minutes: 0, ..RunConfig::default() },
            RunConfig { tick_secs: 0, ..RunConfig::default() },
            RunConfig { batch_size: 0, ..RunConfig::default() },
            RunConfig { real_time_scale: Some(0.0), ..RunConfig::default() },
            RunConfig { real_time_scale: Some(f64::INFINITY), ..RunConfig::default() },
            // Tick longer than the whole run.
            RunConfig { duration_minutes: 1, tick_secs: 120, ..RunConfig::default() },
        ];
        for c in bad {
            assert!(matches!(c.validate(), Err(SimError::Config(_))), "{c:?}");
        }
    }

    #[test]
    fn pacing_budget() {
        let c = RunConfig { tick_secs: 60, real_time_scale: Some(60.0), ..RunConfig::default() };
        assert_eq!(c.wall_secs_per_tick(), Some(1.0));
        assert_eq!(RunConfig::default().wall_secs_per_tick(), None);
    }

    #[test]
    fn min_route_nodes_scales_with_range() {
        let p = TripPolicy::default();
        assert_eq!(p.min_route_nodes(1_800.0), 5);
        assert_eq!(p.min_route_nodes(39.9), 3);
        assert_eq!(p.min_route_nodes(0.0), 0);
    }

    #[test]
    fn policy_validation() {
        assert!(TripPolicy::default().validate().is_ok());
        assert!(TripPolicy { max_trip_attempts: 0, ..TripPolicy::default() }.validate().is_err());
        assert!(TripPolicy { safe_range_factor: 1.5, ..TripPolicy::default() }.validate().is_err());
        assert!(TripPolicy { trip_speed_kph: 0.0, ..TripPolicy::default() }.validate().is_err());
    }
}

// ── Fleet creation ────────────────────────────────────────────────────────────

#[cfg(test)]
mod creation {
    use std::collections::BTreeMap;
    use std::sync::Arc;

    use fleet_core::VehicleIdx;
    use fleet_vehicle::{BehavioralProfile, VehicleState};

    use super::helpers::*;
    use crate::{FleetBuilder, SimError};

    #[test]
    fn round_robin_across_profiles() {
        let f = fleet(10, 1);
        let vs = f.vehicles();
        assert_eq!(vs.len(), 10);
        assert_eq!(vs[0].id, "V-A-001");
        assert_eq!(vs[1].id, "V-B-002");
        assert_eq!(vs[9].id, "V-B-010");

        let a = vs.iter().filter(|v| v.id.starts_with("V-A-")).count();
        let b = vs.iter().filter(|v| v.id.starts_with("V-B-")).count();
        assert_eq!((a, b), (5, 5));

        for (i, v) in vs.iter().enumerate() {
            assert_eq!(v.idx, VehicleIdx(i as u32));
            assert_eq!(v.state(), VehicleState::Parked);
            assert_eq!(v.fuel_percentage(), 100.0);
            // Same class, same shared profile.
            assert!(Arc::ptr_eq(&v.profile, &vs[i % 2].profile));
        }
        assert_eq!(*vs[0].profile, BehavioralProfile::new(0.2, 0.1));
    }

    #[test]
    fn recreating_replaces_the_fleet() {
        let mut f = fleet(10, 1);
        f.create_fleet(3, &profiles()).unwrap();
        assert_eq!(f.vehicles().len(), 3);
    }

    #[test]
    fn rejects_empty_inputs() {
        let mut f = FleetBuilder::new(grid()).seed(1).build().unwrap();
        assert!(matches!(f.create_fleet(0, &profiles()), Err(SimError::InvalidArgument(_))));
        assert!(matches!(f.create_fleet(5, &BTreeMap::new()), Err(SimError::InvalidArgument(_))));
    }

    #[test]
    fn rejects_invalid_profile() {
        let mut f = FleetBuilder::new(grid()).seed(1).build().unwrap();
        let bad = BTreeMap::from([("x".to_owned(), BehavioralProfile::new(2.0, 0.0))]);
        assert!(matches!(f.create_fleet(5, &bad), Err(SimError::Config(_))));
    }

    #[test]
    fn status_of_fresh_fleet() {
        let f = fleet(4, 1);
        let s = f.fleet_status();
        assert_eq!(s.total_vehicles, 4);
        assert_eq!(s.count(VehicleState::Parked), 4);
        assert_eq!(s.count(VehicleState::Driving), 0);
        assert_eq!(s.by_state.len(), VehicleState::ALL.len());
        assert_eq!(s.average_fuel_pct, 100.0);
        assert_eq!(s.needing_refuel, 0);
        assert_eq!(s.telemetry_records, 0);
    }
}

// ── Life-cycle management ─────────────────────────────────────────────────────

#[cfg(test)]
mod lifecycle {
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};
    use fleet_core::{AgentRng, GridNode, SimRng, VehicleIdx};
    use fleet_spatial::{DijkstraRouter, RoadNetwork, RoadNetworkBuilder};
    use fleet_vehicle::{BehavioralProfile, TripKind, VehicleAgent, VehicleParams, VehicleState};

    use crate::{LifecycleAction, TripPlanner, TripPolicy};

    /// (0,0)──(1,0)──(2,0)──(3,0), station at (3,0).
    fn line(with_station: bool) -> RoadNetwork {
        let mut b = RoadNetworkBuilder::new();
        let ids: Vec<_> = (0..4).map(|x| b.add_node(GridNode::new(x, 0))).collect();
        for w in ids.windows(2) {
            b.add_road(w[0], w[1], 1.0);
        }
        if with_station {
            b.add_station(ids[3]);
        }
        b.build()
    }

    fn vehicle(params: VehicleParams) -> VehicleAgent {
        VehicleAgent::new("V-T-001", VehicleIdx(0), Arc::new(BehavioralProfile::new(0.0, 0.0)), params)
    }

    /// Drive `v` until it parks.
    fn drive_to_end(v: &mut VehicleAgent) {
        let t = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let mut rng = AgentRng::new(0, VehicleIdx(0));
        for _ in 0..50 {
            if v.state() == VehicleState::Parked {
                return;
            }
            v.tick(t, 60.0, &mut rng).unwrap();
        }
    }

    #[test]
    fn low_fuel_goes_to_station_then_refuels() {
        let net = line(true);
        let policy = TripPolicy::default();
        let planner = TripPlanner::new(&net, &DijkstraRouter, &policy);
        let mut rng = SimRng::new(3);

        let mut v = vehicle(VehicleParams::default());
        v.assign_new_trip(vec![GridNode::new(0, 0), GridNode::new(1, 0)], 60.0);
        drive_to_end(&mut v);
        v.set_fuel_liters(50.0);

        assert_eq!(planner.manage(&mut v, &mut rng), LifecycleAction::RefuelTrip);
        assert_eq!(v.trip_kind(), Some(TripKind::Refuel));
        assert_eq!(v.state(), VehicleState::Driving);
        assert_eq!(
            v.route(),
            &[GridNode::new(1, 0), GridNode::new(2, 0), GridNode::new(3, 0)]
        );

        drive_to_end(&mut v);
        assert_eq!(v.last_node(), Some(GridNode::new(3, 0)));
        assert_eq!(planner.manage(&mut v, &mut rng), LifecycleAction::RefueledInPlace);
        assert_eq!(v.fuel_percentage(), 100.0);
        assert_eq!(v.state(), VehicleState::Parked);
        assert_eq!(v.trip_kind(), None);
    }

    #[test]
    fn no_long_enough_route_leaves_vehicle_parked() {
        // Full tank asks for at least 5 nodes; the line has 4.
        let net = line(true);
        let policy = TripPolicy::default();
        let planner = TripPlanner::new(&net, &DijkstraRouter, &policy);
        let mut v = vehicle(VehicleParams::default());
        assert_eq!(planner.manage(&mut v, &mut SimRng::new(1)), LifecycleAction::Stranded);
        assert_eq!(v.state(), VehicleState::Parked);
    }

    #[test]
    fn work_trip_fits_short_range() {
        let net = line(false);
        let policy = TripPolicy::default();
        let planner = TripPlanner::new(&net, &DijkstraRouter, &policy);
        let params = VehicleParams { refuel_threshold_pct: 0.0, ..VehicleParams::default() };
        let mut v = vehicle(params);
        // 0.5 L × 4 km/L × 0.9 = 1.8 km: only single-edge trips fit.
        v.set_fuel_liters(0.5);

        assert_eq!(planner.manage(&mut v, &mut SimRng::new(11)), LifecycleAction::WorkTrip);
        assert_eq!(v.route().len(), 2);
        assert_eq!(v.trip_kind(), Some(TripKind::Work));
        assert_eq!(v.speed_kph(), policy.trip_speed_kph);
    }

    #[test]
    fn no_stations_means_stranded() {
        let net = line(false);
        let policy = TripPolicy::default();
        let planner = TripPlanner::new(&net, &DijkstraRouter, &policy);
        let mut v = vehicle(VehicleParams::default());
        v.set_fuel_liters(10.0);
        assert_eq!(planner.manage(&mut v, &mut SimRng::new(1)), LifecycleAction::Stranded);
        assert_eq!(v.state(), VehicleState::Parked);
    }

    #[test]
    fn moving_vehicles_are_skipped() {
        let net = line(true);
        let policy = TripPolicy::default();
        let planner = TripPlanner::new(&net, &DijkstraRouter, &policy);
        let mut v = vehicle(VehicleParams::default());
        v.assign_new_trip(vec![GridNode::new(0, 0), GridNode::new(1, 0)], 60.0);
        v.set_fuel_liters(1.0);
        assert_eq!(planner.manage(&mut v, &mut SimRng::new(1)), LifecycleAction::Skipped);
        assert_eq!(v.trip_kind(), Some(TripKind::Work));
    }
}

// ── Run loop ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run {
    use std::collections::BTreeMap;
    use std::time::{Duration, Instant};

    use std::sync::Arc;

    use fleet_core::{Tick, VehicleIdx};
    use fleet_vehicle::{BehavioralProfile, VehicleState};

    use super::helpers::*;
    use crate::{
        CancelToken, FleetBuilder, FleetObserver, MemoryStreamer, NoopObserver, RunConfig,
        SimError, TickSummary,
    };

    #[derive(Default)]
    struct Recorder {
        summaries: Vec<TickSummary>,
        ended:     bool,
    }

    impl FleetObserver for Recorder {
        fn on_tick_end(&mut self, summary: &TickSummary) {
            self.summaries.push(*summary);
        }
        fn on_run_end(&mut self, _report: &crate::RunReport) {
            self.ended = true;
        }
    }

    #[test]
    fn one_reading_per_vehicle_per_tick() {
        let mut f = fleet(4, 9);
        let mut sink = MemoryStreamer::new();
        let report = f.run(&ten_ticks(8), &mut sink, &mut NoopObserver).unwrap();

        assert_eq!(report.ticks_completed, 10);
        assert_eq!(report.readings, 40);
        assert_eq!(report.unsent_readings, 0);
        assert!(!report.cancelled);
        assert_eq!(f.telemetry_log().len(), 40);
        assert_eq!(sink.readings.len(), 40);
        assert_eq!(sink.batch_sizes, vec![8; 5]);
        assert_eq!(report.stream.batches_sent, 5);
        assert_eq!(report.stream.readings_sent, 40);

        // Readings are stamped with simulated time, one tick apart.
        assert_eq!(f.telemetry_log()[0].timestamp, t0());
        assert_eq!(f.telemetry_log()[39].timestamp, t0() + chrono::Duration::minutes(9));
        assert_eq!(f.telemetry_table().len(), 40);
        assert_eq!(f.fleet_status().telemetry_records, 40);
    }

    #[test]
    fn trips_are_assigned_on_the_first_tick() {
        let mut f = fleet(4, 9);
        let mut rec = Recorder::default();
        f.run(&ten_ticks(50), &mut MemoryStreamer::new(), &mut rec).unwrap();
        assert_eq!(rec.summaries.len(), 10);
        assert_eq!(rec.summaries[0].trips_assigned, 4);
        assert!(rec.summaries.iter().all(|s| s.readings == 4));
        assert!(rec.summaries[9].is_last());
        assert!(rec.ended);
    }

    #[test]
    fn failed_batch_stays_buffered() {
        let mut f = fleet(4, 9);
        let mut sink = MemoryStreamer::new();
        sink.fail_next_batches(1);
        let report = f.run(&ten_ticks(8), &mut sink, &mut NoopObserver).unwrap();

        // Tick 2's batch is refused and re-sent with tick 3's readings.
        assert_eq!(sink.batch_sizes, vec![12, 8, 8, 8, 4]);
        assert_eq!(sink.readings.len(), 40);
        assert_eq!(report.stream.failed_batches, 1);
        assert_eq!(report.stream.batches_sent, 5);
        assert_eq!(report.unsent_readings, 0);
    }

    #[test]
    fn final_flush_failure_is_reported() {
        let mut f = fleet(2, 9);
        let mut sink = MemoryStreamer::new();
        // Never reaches the batch size, so only the final flush sends.
        sink.fail_next_batches(1);
        let report = f.run(&ten_ticks(1_000), &mut sink, &mut NoopObserver).unwrap();
        assert_eq!(report.unsent_readings, 20);
        assert!(sink.readings.is_empty());
        assert_eq!(report.readings, 20);
    }

    #[test]
    fn anomalies_are_streamed_immediately() {
        let grid = grid();
        let mut f = FleetBuilder::new(grid).seed(5).build().unwrap();
        let always = BTreeMap::from([("x".to_owned(), BehavioralProfile::new(1.0, 1.0))]);
        f.create_fleet(3, &always).unwrap();

        let mut sink = MemoryStreamer::new();
        sink.fail_next_anomalies(1);
        let report = f.run(&ten_ticks(50), &mut sink, &mut NoopObserver).unwrap();

        // Every vehicle starts a trip of at least 5 nodes, reaches its first
        // intermediate node on tick 1, stops, and is robbed.
        assert!(report.anomalies >= 3);
        assert_eq!(f.anomaly_log().len(), report.anomalies);
        assert_eq!(report.stream.failed_anomalies, 1);
        assert_eq!(report.stream.anomalies_sent, report.anomalies - 1);
        assert_eq!(sink.anomalies.len(), report.anomalies - 1);
        assert_eq!(f.anomaly_table().len(), report.anomalies);
        assert!(f.anomaly_log().iter().all(|e| e.event_type() == "FUEL_THEFT"));
    }

    #[test]
    fn corrupt_vehicle_does_not_stop_the_run() {
        let mut f = fleet(4, 9);
        f.vehicle_mut(VehicleIdx(1)).unwrap().set_fuel_liters(f64::NAN);
        let bad_id = f.vehicles()[1].id.clone();

        let mut rec = Recorder::default();
        let mut sink = MemoryStreamer::new();
        let report = f.run(&ten_ticks(50), &mut sink, &mut rec).unwrap();

        assert_eq!(report.ticks_completed, 10);
        assert_eq!(report.vehicle_failures, 10);
        assert_eq!(report.readings, 30);
        assert_eq!(sink.readings.len(), 30);
        assert!(rec.summaries.iter().all(|s| s.vehicle_failures == 1 && s.readings == 3));
        assert!(f.telemetry_log().iter().all(|r| r.vehicle_id != bad_id));
    }

    #[test]
    fn panicking_vehicle_does_not_stop_the_run() {
        let mut f = fleet(4, 9);
        {
            // Stops at its first intermediate node, then draws an idle time
            // from an empty range.
            let v = f.vehicle_mut(VehicleIdx(1)).unwrap();
            v.profile = Arc::new(BehavioralProfile::new(1.0, 0.0));
            v.params.idle_secs_min = 600;
            v.params.idle_secs_max = 120;
        }

        let mut rec = Recorder::default();
        let report = f.run(&ten_ticks(50), &mut MemoryStreamer::new(), &mut rec).unwrap();

        assert_eq!(report.ticks_completed, 10);
        assert_eq!(report.vehicle_failures, 1);
        assert_eq!(rec.summaries[0].vehicle_failures, 1);
        assert_eq!(rec.summaries[0].readings, 3);
        assert_eq!(report.readings, 39);
        assert_eq!(f.vehicles()[1].state(), VehicleState::Idling);
    }

    #[test]
    fn same_seed_same_run() {
        let run = |seed| {
            let mut f = fleet(6, seed);
            f.run(&ten_ticks(7), &mut MemoryStreamer::new(), &mut NoopObserver).unwrap();
            (f.telemetry_log().to_vec(), f.anomaly_log().to_vec())
        };
        assert_eq!(run(21), run(21));
    }

    #[test]
    fn logs_are_cleared_between_runs() {
        let mut f = fleet(2, 9);
        f.run(&ten_ticks(5), &mut MemoryStreamer::new(), &mut NoopObserver).unwrap();
        f.run(&ten_ticks(5), &mut MemoryStreamer::new(), &mut NoopObserver).unwrap();
        assert_eq!(f.telemetry_log().len(), 20);
    }

    #[test]
    fn unhealthy_streamer_aborts() {
        let mut f = fleet(2, 9);
        let err = f.run(&ten_ticks(5), &mut MemoryStreamer::unhealthy(), &mut NoopObserver);
        assert!(matches!(err, Err(SimError::StreamerUnavailable)));
        assert!(f.telemetry_log().is_empty());
    }

    #[test]
    fn empty_fleet_aborts() {
        let mut f = FleetBuilder::new(grid()).seed(1).build().unwrap();
        let err = f.run(&ten_ticks(5), &mut MemoryStreamer::new(), &mut NoopObserver);
        assert!(matches!(err, Err(SimError::Config(_))));
    }

    #[test]
    fn invalid_config_aborts() {
        let mut f = fleet(2, 9);
        let bad = RunConfig { tick_secs: 0, ..ten_ticks(5) };
        assert!(matches!(
            f.run(&bad, &mut MemoryStreamer::new(), &mut NoopObserver),
            Err(SimError::Config(_))
        ));
    }

    struct CancelAfter {
        token: CancelToken,
        tick:  Tick,
    }

    impl FleetObserver for CancelAfter {
        fn on_tick_end(&mut self, summary: &TickSummary) {
            if summary.tick == self.tick {
                self.token.cancel();
            }
        }
    }

    #[test]
    fn cancel_stops_before_next_tick_and_flushes() {
        let mut f = fleet(4, 9);
        let mut obs = CancelAfter { token: f.cancel_token(), tick: Tick(2) };
        let mut sink = MemoryStreamer::new();
        let report = f.run(&ten_ticks(50), &mut sink, &mut obs).unwrap();

        assert!(report.cancelled);
        assert_eq!(report.ticks_completed, 3);
        assert_eq!(report.readings, 12);
        assert_eq!(sink.readings.len(), 12);
    }

    #[test]
    fn cancelled_token_prevents_any_tick() {
        let token = CancelToken::new();
        let mut f = FleetBuilder::new(grid()).seed(3).cancel_token(token.clone()).build().unwrap();
        f.create_fleet(2, &profiles()).unwrap();
        token.cancel();
        let report = f.run(&ten_ticks(5), &mut MemoryStreamer::new(), &mut NoopObserver).unwrap();
        assert_eq!(report.ticks_completed, 0);
        assert!(report.cancelled);

        token.reset();
        let report = f.run(&ten_ticks(5), &mut MemoryStreamer::new(), &mut NoopObserver).unwrap();
        assert_eq!(report.ticks_completed, 10);
    }

    #[test]
    fn real_time_pacing_sleeps_between_ticks() {
        let mut f = fleet(1, 9);
        // Two 30 s ticks at 300× → 0.1 s budget each; no sleep after the last.
        let config = RunConfig {
            duration_minutes: 1,
            tick_secs:        30,
            real_time_scale:  Some(300.0),
            ..ten_ticks(50)
        };
        let started = Instant::now();
        f.run(&config, &mut MemoryStreamer::new(), &mut NoopObserver).unwrap();
        assert!(started.elapsed() >= Duration::from_millis(100));
    }
}

// ── Status & stats ────────────────────────────────────────────────────────────

#[cfg(test)]
mod status {
    use std::sync::Arc;

    use fleet_core::VehicleIdx;
    use fleet_spatial::RoadNetwork;
    use fleet_vehicle::VehicleState;

    use super::helpers::*;
    use crate::{FleetBuilder, MemoryStreamer, NoopObserver, StreamStats};

    #[test]
    fn stranded_vehicles_tracked_until_they_move() {
        let no_stations = Arc::new(RoadNetwork::grid(5, 5, 0, Some(7)).unwrap());
        let mut f = FleetBuilder::new(no_stations).seed(3).build().unwrap();
        f.create_fleet(2, &profiles()).unwrap();
        for i in 0..2 {
            f.vehicle_mut(VehicleIdx(i)).unwrap().set_fuel_liters(10.0);
        }

        assert_eq!(f.manage_lifecycle(), 0);
        assert_eq!(f.manage_lifecycle(), 0);
        assert_eq!(f.fleet_status().stranded_vehicles, 2);

        f.vehicle_mut(VehicleIdx(0)).unwrap().set_fuel_liters(500.0);
        assert_eq!(f.manage_lifecycle(), 1);
        assert_eq!(f.fleet_status().stranded_vehicles, 1);
        assert_eq!(f.vehicles()[0].state(), VehicleState::Driving);
    }

    #[test]
    fn counts_cover_the_fleet() {
        let mut f = fleet(6, 4);
        f.run(&ten_ticks(10), &mut MemoryStreamer::new(), &mut NoopObserver).unwrap();
        let s = f.fleet_status();
        let total: usize = VehicleState::ALL.iter().map(|&st| s.count(st)).sum();
        assert_eq!(total, 6);
        assert_eq!(s.telemetry_records, 60);
        assert!(s.average_fuel_pct > 0.0 && s.average_fuel_pct < 100.0);
    }

    #[test]
    fn snapshots_match_live_vehicles() {
        let mut f = fleet(3, 4);
        f.run(&ten_ticks(5), &mut MemoryStreamer::new(), &mut NoopObserver).unwrap();
        let snaps = f.vehicle_snapshots();
        assert_eq!(snaps.len(), 3);
        for (snap, v) in snaps.iter().zip(f.vehicles()) {
            assert_eq!(snap.vehicle_id, v.id);
            assert_eq!(snap.state, v.state());
            assert_eq!(snap.route_length, v.route().len());
            assert!((0.0..=100.0).contains(&snap.fuel_percentage));
        }
    }

    #[test]
    fn batch_success_rate() {
        assert_eq!(StreamStats::default().batch_success_pct(), 100.0);
        let s = StreamStats { batches_sent: 3, failed_batches: 1, ..StreamStats::default() };
        assert_eq!(s.batch_success_pct(), 75.0);
    }
}
