//! Deterministic per-vehicle and fleet-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Each vehicle gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (vehicle_idx * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive indices uniformly across the seed space.
//!
//! - Vehicles never share RNG state, so the per-vehicle tick phase has no
//!   ordering dependency and may run in parallel.
//! - Growing the fleet does not disturb the seeds of existing vehicles.
//!
//! Fleet-wide decisions (route sampling, station placement) draw from a
//! single `SimRng` owned by the orchestrator and used only on one thread.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::VehicleIdx;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── AgentRng ──────────────────────────────────────────────────────────────────

/// Per-vehicle deterministic RNG.
///
/// Stored in a `Vec<AgentRng>` parallel to the fleet's vehicles so the tick
/// phase can borrow a vehicle and its RNG mutably at the same time.
#[derive(Debug, Clone)]
pub struct AgentRng(SmallRng);

impl AgentRng {
    /// Seed deterministically from the run's global seed and a vehicle index.
    pub fn new(global_seed: u64, vehicle: VehicleIdx) -> Self {
        let seed = global_seed ^ (vehicle.0 as u64).wrapping_mul(MIXING_CONSTANT);
        AgentRng(SmallRng::seed_from_u64(seed))
    }

    /// Uniform `f64` in `[0, 1)`.
    #[inline]
    pub fn unit(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Fleet-level RNG for global operations: station placement, random route
/// endpoints, fallback start positions.
#[derive(Debug, Clone)]
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Seed from OS entropy.  Runs built this way are not reproducible.
    pub fn from_entropy() -> Self {
        SimRng(SmallRng::from_entropy())
    }

    /// Derive a child `SimRng` with a different seed offset.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// `amount` distinct indices drawn uniformly from `0..length`, in draw
    /// order.
    ///
    /// # Panics
    /// Panics if `amount > length`.
    pub fn sample_indices(&mut self, length: usize, amount: usize) -> Vec<usize> {
        rand::seq::index::sample(&mut self.0, length, amount).into_vec()
    }

    /// Choose a random element from a slice.  `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}
