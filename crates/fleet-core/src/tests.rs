//! Unit tests for fleet-core primitives.

#[cfg(test)]
mod ids {
    use crate::{EdgeId, NodeId, VehicleIdx};

    #[test]
    fn index_roundtrip() {
        let id = VehicleIdx(42);
        assert_eq!(id.index(), 42);
        assert_eq!(VehicleIdx::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(VehicleIdx::INVALID.0, u32::MAX);
        assert_eq!(NodeId::INVALID.0, u32::MAX);
        assert_eq!(EdgeId::default(), EdgeId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(NodeId(7).to_string(), "NodeId(7)");
    }
}

#[cfg(test)]
mod geo {
    use crate::{GeoPoint, GridNode, round_to};

    #[test]
    fn lerp_midpoint_and_clamp() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(2.0, 4.0);
        assert_eq!(a.lerp(b, 0.5), GeoPoint::new(1.0, 2.0));
        assert_eq!(a.lerp(b, 1.7), b);
        assert_eq!(a.lerp(b, -0.3), a);
    }

    #[test]
    fn distance_is_euclidean() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(3.0, 4.0);
        assert!((a.distance(b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn grid_node_maps_y_to_lat() {
        let p = GridNode::new(3, 7).point();
        assert_eq!(p, GeoPoint::new(7.0, 3.0));
    }

    #[test]
    fn rounding() {
        assert_eq!(round_to(1.234_567_89, 6), 1.234_568);
        assert_eq!(round_to(99.995_1, 2), 100.0);
        assert_eq!(round_to(12.344, 2), 12.34);
    }
}

#[cfg(test)]
mod rng {
    use crate::{AgentRng, SimRng, VehicleIdx};

    #[test]
    fn agent_rng_is_deterministic() {
        let mut a = AgentRng::new(7, VehicleIdx(3));
        let mut b = AgentRng::new(7, VehicleIdx(3));
        for _ in 0..16 {
            assert_eq!(a.unit(), b.unit());
        }
    }

    #[test]
    fn agent_rngs_differ_between_vehicles() {
        let mut a = AgentRng::new(7, VehicleIdx(0));
        let mut b = AgentRng::new(7, VehicleIdx(1));
        let xs: Vec<f64> = (0..8).map(|_| a.unit()).collect();
        let ys: Vec<f64> = (0..8).map(|_| b.unit()).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn gen_bool_extremes() {
        let mut r = AgentRng::new(1, VehicleIdx(0));
        assert!((0..100).all(|_| !r.gen_bool(0.0)));
        assert!((0..100).all(|_| r.gen_bool(1.0)));
        // Out-of-range probabilities are clamped rather than panicking.
        assert!(r.gen_bool(3.0));
    }

    #[test]
    fn sample_indices_are_distinct() {
        let mut r = SimRng::new(99);
        let mut picked = r.sample_indices(50, 50);
        picked.sort_unstable();
        assert_eq!(picked, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn choose_empty_is_none() {
        let mut r = SimRng::new(1);
        let empty: [u8; 0] = [];
        assert!(r.choose(&empty).is_none());
    }
}

#[cfg(test)]
mod time {
    use chrono::{TimeZone, Utc};

    use crate::time::iso8601;
    use crate::{SimClock, Tick};

    #[test]
    fn clock_maps_ticks_to_utc() {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        let mut clock = SimClock::new(start, 60);
        assert_eq!(clock.now(), start);
        clock.advance();
        clock.advance();
        assert_eq!(clock.current_tick, Tick(2));
        assert_eq!(iso8601(clock.now()), "2024-05-01T08:02:00Z");
    }

    #[test]
    fn elapsed_dhm() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut clock = SimClock::new(start, 3_600);
        for _ in 0..26 {
            clock.advance();
        }
        assert_eq!(clock.elapsed_dhm(), (1, 2, 0));
        assert_eq!(clock.to_string(), "T26 (day 1 02:00)");
    }
}

#[cfg(test)]
mod records {
    use chrono::{TimeZone, Utc};

    use crate::{Anomaly, AnomalyEvent, AnomalyRow, FuelTheft, TelemetryReading, TelemetryRow};

    fn theft_event() -> AnomalyEvent {
        AnomalyEvent {
            vehicle_id: "V-A-001".into(),
            timestamp:  Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap(),
            anomaly:    Anomaly::FuelTheft(FuelTheft {
                liters_stolen:    25.0,
                fuel_pct_before:  80.0,
                fuel_pct_after:   75.0,
                theft_percentage: 5.0,
            }),
        }
    }

    #[test]
    fn anomaly_serializes_with_event_type_and_details() {
        let v = serde_json::to_value(theft_event()).unwrap();
        assert_eq!(v["event_type"], "FUEL_THEFT");
        assert_eq!(v["details"]["liters_stolen"], 25.0);
        assert_eq!(v["timestamp"], "2024-05-01T08:00:00Z");
    }

    #[test]
    fn anomaly_row_flattens_details() {
        let row = AnomalyRow::from(&theft_event());
        assert_eq!(row.event_type, "FUEL_THEFT");
        assert_eq!(row.fuel_pct_after, Some(75.0));
        assert_eq!(row.theft_percentage, Some(5.0));
    }

    #[test]
    fn telemetry_row_formats_timestamp() {
        let r = TelemetryReading {
            vehicle_id:      "V-A-001".into(),
            timestamp:       Utc.with_ymd_and_hms(2024, 5, 1, 8, 1, 0).unwrap(),
            latitude:        3.5,
            longitude:       0.0,
            speed_kph:       60.0,
            fuel_percentage: 99.95,
        };
        let row = TelemetryRow::from(&r);
        assert_eq!(row.timestamp, "2024-05-01T08:01:00Z");
        assert_eq!(row.latitude, 3.5);
    }
}
