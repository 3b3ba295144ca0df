//! `fleet-sim`: fleet orchestration for the fleet simulator.
//!
//! # Tick loop
//!
//! ```text
//! health check → clear logs
//! for tick in 0..config.total_ticks():
//!   ⓪ Cancel:    stop here if the CancelToken is set.
//!   ① Lifecycle: each Parked vehicle: refuel in place, route to the
//!                nearest station, or take a random work trip.
//!   ② Tick:      VehicleAgent::tick for every vehicle
//!                (parallel with the `parallel` feature).
//!   ③ Apply:     in vehicle order: readings → log + buffer,
//!                anomalies → log + Streamer::send_anomaly.
//!   ④ Flush:     buffer ≥ batch_size → Streamer::send_batch;
//!                cleared only on success.
//!   ⑤ Pace:      optional sleep to real_time_scale.
//! final flush → RunReport
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | Runs the per-vehicle tick phase on Rayon's thread pool.   |
//! | `serde`    | Derives `Serialize`/`Deserialize` on config and reports.  |

pub mod builder;
pub mod cancel;
pub mod config;
pub mod error;
pub mod fleet;
pub mod lifecycle;
pub mod observer;
pub mod status;
pub mod stream;

#[cfg(test)]
mod tests;

pub use builder::FleetBuilder;
pub use cancel::CancelToken;
pub use config::{RunConfig, TripPolicy};
pub use error::{SimError, SimResult, StreamError};
pub use fleet::FleetOrchestrator;
pub use lifecycle::{LifecycleAction, TripPlanner};
pub use observer::{FleetObserver, NoopObserver, ProgressLogger, TickSummary};
pub use status::{FleetStatus, RunReport, StreamStats};
pub use stream::{BatchReceipt, MemoryStreamer, Streamer};
