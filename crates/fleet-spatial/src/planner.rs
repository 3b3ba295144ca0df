//! Trip-level route queries: random trips, nearest refueling station, and
//! explicit point-to-point paths.
//!
//! All queries are read-only over the network.  Randomness comes from the
//! caller's [`SimRng`] so runs stay reproducible.

use log::debug;

use fleet_core::{GridNode, NodeId, SimRng};

use crate::router::{Router, UNREACHABLE};
use crate::{RoadNetwork, SpatialError, SpatialResult};

/// Endpoint pairs sampled by [`RoadNetwork::random_route`] before giving up.
pub const ROUTE_SAMPLE_ATTEMPTS: usize = 10;

impl RoadNetwork {
    /// Coordinates of every node on a routed path.
    pub fn path_nodes(&self, ids: &[NodeId]) -> Vec<GridNode> {
        ids.iter().map(|&id| self.node(id)).collect()
    }

    /// Shortest path between two intersections, as coordinates.
    pub fn shortest_path<R: Router>(
        &self,
        router: &R,
        a: GridNode,
        b: GridNode,
    ) -> SpatialResult<Vec<GridNode>> {
        let from = self.require_node(a)?;
        let to   = self.require_node(b)?;
        let route = router.route(self, from, to)?;
        Ok(self.path_nodes(&route.nodes))
    }

    /// A uniformly chosen intersection, or `None` for an empty network.
    pub fn random_node(&self, rng: &mut SimRng) -> Option<GridNode> {
        rng.choose(&self.node_pos).copied()
    }

    /// Shortest path between two distinct, uniformly sampled intersections
    /// with at least `min_nodes` nodes.
    ///
    /// Samples up to [`ROUTE_SAMPLE_ATTEMPTS`] endpoint pairs.
    pub fn random_route<R: Router>(
        &self,
        router: &R,
        rng: &mut SimRng,
        min_nodes: usize,
    ) -> SpatialResult<Vec<GridNode>> {
        self.random_route_with_attempts(router, rng, min_nodes, ROUTE_SAMPLE_ATTEMPTS)
    }

    /// [`random_route`](Self::random_route) with an explicit attempt cap.
    pub fn random_route_with_attempts<R: Router>(
        &self,
        router: &R,
        rng: &mut SimRng,
        min_nodes: usize,
        attempts: usize,
    ) -> SpatialResult<Vec<GridNode>> {
        let not_found = SpatialError::RouteNotFound { min_nodes, attempts };
        if self.node_count() < 2 {
            return Err(not_found);
        }

        for _ in 0..attempts {
            let pair = rng.sample_indices(self.node_count(), 2);
            let (from, to) = (NodeId(pair[0] as u32), NodeId(pair[1] as u32));

            // Disconnected endpoints count as a spent attempt.
            let Ok(route) = router.route(self, from, to) else {
                continue;
            };
            if route.nodes.len() >= min_nodes {
                return Ok(self.path_nodes(&route.nodes));
            }
        }

        debug!("no random route with at least {min_nodes} nodes after {attempts} attempts");
        Err(not_found)
    }

    /// The closest reachable refueling station to `from` and the path to it.
    ///
    /// Equal distances resolve to the station placed first.
    pub fn nearest_station<R: Router>(
        &self,
        router: &R,
        from: GridNode,
    ) -> SpatialResult<(GridNode, Vec<GridNode>)> {
        if self.stations().is_empty() {
            return Err(SpatialError::NoStationsConfigured);
        }
        let start = self.require_node(from)?;
        let dist = router.distances(self, start);

        let mut best: Option<(NodeId, u32)> = None;
        for &station in self.stations() {
            let d = dist[station.index()];
            if d == UNREACHABLE {
                continue;
            }
            if best.is_none_or(|(_, bd)| d < bd) {
                best = Some((station, d));
            }
        }

        let Some((station, d)) = best else {
            return Err(SpatialError::NoRoute { from: start, to: self.stations()[0] });
        };
        let route = router.route(self, start, station)?;
        debug!("nearest station to {from} is {} at {d} m", self.node(station));
        Ok((self.node(station), self.path_nodes(&route.nodes)))
    }
}
