//! Fleet and run summaries.

use std::collections::BTreeMap;

use fleet_vehicle::{VehicleAgent, VehicleState};

/// Point-in-time aggregate over the fleet.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FleetStatus {
    pub total_vehicles: usize,
    /// Every state is present, zero counts included.
    pub by_state: BTreeMap<VehicleState, usize>,
    pub average_fuel_pct: f64,
    pub needing_refuel: usize,
    /// Parked vehicles for which no trip could be assigned.
    pub stranded_vehicles: usize,
    pub telemetry_records: usize,
    pub anomaly_records: usize,
}

impl FleetStatus {
    pub(crate) fn collect(
        vehicles:          &[VehicleAgent],
        stranded:          &[bool],
        telemetry_records: usize,
        anomaly_records:   usize,
    ) -> Self {
        let mut by_state: BTreeMap<VehicleState, usize> =
            VehicleState::ALL.iter().map(|&s| (s, 0)).collect();
        let mut fuel_sum = 0.0;
        let mut needing_refuel = 0;
        for v in vehicles {
            *by_state.entry(v.state()).or_default() += 1;
            fuel_sum += v.fuel_percentage();
            if v.needs_refueling() {
                needing_refuel += 1;
            }
        }
        let average_fuel_pct = if vehicles.is_empty() {
            0.0
        } else {
            fuel_sum / vehicles.len() as f64
        };
        Self {
            total_vehicles: vehicles.len(),
            by_state,
            average_fuel_pct,
            needing_refuel,
            stranded_vehicles: stranded.iter().filter(|&&s| s).count(),
            telemetry_records,
            anomaly_records,
        }
    }

    pub fn count(&self, state: VehicleState) -> usize {
        self.by_state.get(&state).copied().unwrap_or(0)
    }
}

/// Streaming outcomes accumulated over one run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StreamStats {
    pub batches_sent:       usize,
    pub readings_sent:      usize,
    pub duplicate_readings: usize,
    pub failed_batches:     usize,
    pub anomalies_sent:     usize,
    pub failed_anomalies:   usize,
}

impl StreamStats {
    /// Share of batch attempts that succeeded, in percent.  100 when none
    /// were attempted.
    pub fn batch_success_pct(&self) -> f64 {
        let attempts = self.batches_sent + self.failed_batches;
        if attempts == 0 {
            100.0
        } else {
            self.batches_sent as f64 / attempts as f64 * 100.0
        }
    }
}

/// Returned by [`FleetOrchestrator::run`][crate::FleetOrchestrator::run].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunReport {
    pub ticks_completed:  u64,
    pub total_ticks:      u64,
    pub readings:         usize,
    pub anomalies:        usize,
    /// Vehicle ticks that failed and produced no reading.
    pub vehicle_failures: usize,
    /// Readings still buffered because the final flush failed.
    pub unsent_readings:  usize,
    pub cancelled:        bool,
    pub stream:           StreamStats,
}
