//! Simulation time model.
//!
//! Time is a monotonically increasing `Tick` counter.  The mapping to UTC is
//! held in `SimClock`:
//!
//!   timestamp = start + tick * tick_duration_secs
//!
//! Keeping the tick integral means elapsed simulated time never drifts, no
//! matter how many ticks a run lasts.

use std::fmt;

use chrono::{DateTime, Duration, SecondsFormat, Utc};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Converts tick counts to UTC timestamps.
#[derive(Clone, Debug)]
pub struct SimClock {
    /// UTC instant of tick 0.
    pub start: DateTime<Utc>,
    /// Simulated seconds per tick.
    pub tick_duration_secs: u32,
    /// The current tick, advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(start: DateTime<Utc>, tick_duration_secs: u32) -> Self {
        Self {
            start,
            tick_duration_secs,
            current_tick: Tick::ZERO,
        }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Elapsed simulated seconds since tick 0.
    #[inline]
    pub fn elapsed_secs(&self) -> i64 {
        self.current_tick.0 as i64 * self.tick_duration_secs as i64
    }

    /// UTC timestamp corresponding to `current_tick`.
    #[inline]
    pub fn now(&self) -> DateTime<Utc> {
        self.start + Duration::seconds(self.elapsed_secs())
    }

    /// Break elapsed time into (day, hour, minute) components from sim start.
    pub fn elapsed_dhm(&self) -> (u64, u32, u32) {
        let total_secs = self.elapsed_secs().max(0) as u64;
        let days = total_secs / 86_400;
        let hours = ((total_secs % 86_400) / 3_600) as u32;
        let minutes = ((total_secs % 3_600) / 60) as u32;
        (days, hours, minutes)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (d, h, m) = self.elapsed_dhm();
        write!(f, "{} (day {} {:02}:{:02})", self.current_tick, d, h, m)
    }
}

/// ISO-8601 UTC rendering with a trailing `Z`, e.g. `2024-05-01T08:00:00Z`.
pub fn iso8601(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}
