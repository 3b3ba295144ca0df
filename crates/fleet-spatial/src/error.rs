//! Spatial-subsystem error type.

use thiserror::Error;

use fleet_core::{GridNode, NodeId};

/// Errors produced by `fleet-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("invalid network configuration: {0}")]
    InvalidConfiguration(String),

    #[error("no route from {from} to {to}")]
    NoRoute { from: NodeId, to: NodeId },

    #[error("no route with at least {min_nodes} nodes found after {attempts} attempts")]
    RouteNotFound { min_nodes: usize, attempts: usize },

    #[error("no refueling stations configured")]
    NoStationsConfigured,

    #[error("node {0} not found in network")]
    NodeNotFound(NodeId),

    #[error("no intersection at {0}")]
    UnknownCoordinate(GridNode),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
