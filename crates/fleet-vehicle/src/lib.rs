//! `fleet-vehicle`: per-vehicle physics, state machine, and fuel anomalies.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                      |
//! |-------------|---------------------------------------------------------------|
//! | [`profile`] | `BehavioralProfile`: stop / theft probabilities per class    |
//! | [`params`]  | `VehicleParams`: tank, mileage, thresholds, physics knobs     |
//! | [`state`]   | `VehicleState`, `TripKind`                                    |
//! | [`agent`]   | `VehicleAgent`, `TickOutput`, `VehicleSnapshot`               |
//! | [`theft`]   | fuel-theft draw and `AnomalyEvent` construction               |
//! | [`error`]   | `VehicleError`, `VehicleResult<T>`                            |
//!
//! # State machine
//!
//! ```text
//!            assign_trip (≥ 2 nodes)
//!   Parked ───────────────────────────▶ Driving
//!     ▲  ▲                               │  ▲
//!     │  └────── final node reached ─────┘  │ idle timer expires
//!     │                                     │
//!     │                 stop sampled at     │
//!     │                 intermediate node   │
//!     │                    Driving ───────▶ Idling
//!     │
//!     └── refuel(): fuel reset to full, stays Parked
//! ```
//!
//! Every tick runs the same fixed sequence (timer → movement → fuel →
//! arrival → position → reading) so physics and state never disagree.
//! All randomness comes from the vehicle's own [`AgentRng`][fleet_core::AgentRng].

pub mod agent;
pub mod error;
pub mod params;
pub mod profile;
pub mod state;
pub mod theft;


pub use agent::{TickOutput, VehicleAgent, VehicleSnapshot};
pub use error::{VehicleError, VehicleResult};
pub use params::VehicleParams;
pub use profile::BehavioralProfile;
pub use state::{TripKind, VehicleState};
