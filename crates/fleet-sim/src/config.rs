//! Run-time and trip-assignment configuration.

use chrono::{DateTime, Utc};

use crate::{SimError, SimResult};

/// Parameters of one [`FleetOrchestrator::run`][crate::FleetOrchestrator::run].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RunConfig {
    /// Simulated duration of the run.
    pub duration_minutes: u64,
    /// Simulated seconds per tick.
    pub tick_secs: u32,
    /// Simulated seconds per wall-clock second.  `None` runs flat out.
    pub real_time_scale: Option<f64>,
    /// Buffered readings that trigger a batch flush.
    pub batch_size: usize,
    /// UTC instant of tick 0.  Defaults to the moment the config is made.
    pub start_time: DateTime<Utc>,
    /// Ticks between progress log lines.
    pub progress_interval_ticks: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            duration_minutes:        60,
            tick_secs:               60,
            real_time_scale:         None,
            batch_size:              50,
            start_time:              Utc::now(),
            progress_interval_ticks: 50,
        }
    }
}

impl RunConfig {
    /// An unpaced run starting now.
    pub fn new(duration_minutes: u64, tick_secs: u32, batch_size: usize) -> Self {
        Self { duration_minutes, tick_secs, batch_size, ..Self::default() }
    }

    /// Whole ticks that fit in the duration.  A trailing partial tick is
    /// not simulated.
    pub fn total_ticks(&self) -> u64 {
        if self.tick_secs == 0 {
            return 0;
        }
        self.duration_minutes * 60 / self.tick_secs as u64
    }

    /// Wall-clock budget of one tick under real-time pacing.
    pub fn wall_secs_per_tick(&self) -> Option<f64> {
        self.real_time_scale.map(|scale| self.tick_secs as f64 / scale)
    }

    pub fn validate(&self) -> SimResult<()> {
        if self.duration_minutes == 0 {
            return Err(SimError::Config("duration_minutes must be positive".into()));
        }
        if self.tick_secs == 0 {
            return Err(SimError::Config("tick_secs must be positive".into()));
        }
        if self.batch_size == 0 {
            return Err(SimError::Config("batch_size must be positive".into()));
        }
        if let Some(scale) = self.real_time_scale.filter(|s| !(s.is_finite() && *s > 0.0)) {
            return Err(SimError::Config(format!(
                "real_time_scale must be positive and finite, got {scale}"
            )));
        }
        if self.total_ticks() == 0 {
            return Err(SimError::Config(format!(
                "tick of {}s is longer than the {}-minute duration",
                self.tick_secs, self.duration_minutes
            )));
        }
        Ok(())
    }
}

/// How parked vehicles are given new trips.
///
/// Every search is bounded: a vehicle that gets no trip stays parked and is
/// retried on the next tick.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TripPolicy {
    /// Speed assigned to random work trips.
    pub trip_speed_kph: f64,
    /// Speed assigned to trips to a refueling station.
    pub refuel_speed_kph: f64,
    /// Candidate routes drawn per vehicle per tick.
    pub max_trip_attempts: usize,
    /// Share of the fuel range a work trip may use.
    pub safe_range_factor: f64,
    /// Upper bound on the minimum work-trip length, in nodes.
    pub min_route_nodes_cap: usize,
    /// Minimum work-trip length as a share of the safe range.
    pub min_route_range_fraction: f64,
    /// Endpoint pairs sampled per candidate route.
    pub route_sample_attempts: usize,
}

impl Default for TripPolicy {
    fn default() -> Self {
        Self {
            trip_speed_kph:           60.0,
            refuel_speed_kph:         60.0,
            max_trip_attempts:        20,
            safe_range_factor:        0.9,
            min_route_nodes_cap:      5,
            min_route_range_fraction: 0.1,
            route_sample_attempts:    fleet_spatial::ROUTE_SAMPLE_ATTEMPTS,
        }
    }
}

impl TripPolicy {
    /// Minimum node count requested for a work trip with `safe_range_km`.
    pub fn min_route_nodes(&self, safe_range_km: f64) -> usize {
        let scaled = (safe_range_km * self.min_route_range_fraction).floor().max(0.0) as usize;
        scaled.min(self.min_route_nodes_cap)
    }

    pub fn validate(&self) -> SimResult<()> {
        if !(self.trip_speed_kph > 0.0 && self.refuel_speed_kph > 0.0) {
            return Err(SimError::Config("trip speeds must be positive".into()));
        }
        if self.max_trip_attempts == 0 || self.route_sample_attempts == 0 {
            return Err(SimError::Config("attempt caps must be at least 1".into()));
        }
        if !(self.safe_range_factor > 0.0 && self.safe_range_factor <= 1.0) {
            return Err(SimError::Config(format!(
                "safe_range_factor must be within (0, 1], got {}",
                self.safe_range_factor
            )));
        }
        if self.min_route_range_fraction < 0.0 {
            return Err(SimError::Config("min_route_range_fraction must not be negative".into()));
        }
        Ok(())
    }
}
