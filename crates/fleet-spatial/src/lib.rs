//! `fleet-spatial`: road network, spatial indexing, and routing.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`network`] | `RoadNetwork` (CSR + R-tree + stations), `RoadNetworkBuilder` |
//! | [`grid`]    | `GridConfig`, rectangular grid construction                 |
//! | [`router`]  | `Router` trait, `Route`, `DijkstraRouter`                   |
//! | [`planner`] | random routes, nearest station, point-to-point paths        |
//! | [`error`]   | `SpatialError`, `SpatialResult<T>`                          |
//!
//! The network is immutable once built.  Share it behind an `Arc` and query
//! it from any number of threads.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `GridConfig`.           |

pub mod error;
pub mod grid;
pub mod network;
pub mod planner;
pub mod router;


pub use error::{SpatialError, SpatialResult};
pub use grid::GridConfig;
pub use network::{RoadNetwork, RoadNetworkBuilder};
pub use planner::ROUTE_SAMPLE_ATTEMPTS;
pub use router::{DijkstraRouter, Route, Router, UNREACHABLE};
