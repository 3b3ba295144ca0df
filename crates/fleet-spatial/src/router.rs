//! Routing trait and default Dijkstra implementation.
//!
//! # Pluggability
//!
//! `fleet-sim` calls routing through the [`Router`] trait, so a different
//! search (A*, congestion-aware costs) can be swapped in without touching
//! the orchestrator.
//!
//! # Cost units
//!
//! Costs are integer **metres** internally so heap ordering is exact and
//! tie-breaking is deterministic.  On the unit-weight grid Dijkstra visits
//! nodes in the same order as breadth-first search.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use fleet_core::{EdgeId, NodeId};

use crate::network::RoadNetwork;
use crate::{SpatialError, SpatialResult};

/// Distance value for nodes that cannot be reached.
pub const UNREACHABLE: u32 = u32::MAX;

// ── Route ─────────────────────────────────────────────────────────────────────

/// The result of a routing query.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Nodes visited in order, source first, destination last.
    pub nodes: Vec<NodeId>,
    /// Edges traversed in order.  `edges.len() == nodes.len() - 1`.
    pub edges: Vec<EdgeId>,
    /// Total length in kilometres.
    pub total_length_km: f64,
}

impl Route {
    /// `true` if the source and destination are the same node.
    pub fn is_trivial(&self) -> bool {
        self.edges.is_empty()
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable routing engine.
///
/// Implementations must be `Send + Sync` so a single router can be shared
/// with the network across worker threads.
pub trait Router: Send + Sync {
    /// Shortest route from `from` to `to`.  `from == to` yields a trivial
    /// one-node route.
    fn route(&self, network: &RoadNetwork, from: NodeId, to: NodeId) -> SpatialResult<Route>;

    /// Shortest distance in metres from `from` to every node, indexed by
    /// `NodeId`.  Unreachable nodes hold [`UNREACHABLE`].
    fn distances(&self, network: &RoadNetwork, from: NodeId) -> Vec<u32>;
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Standard Dijkstra's algorithm over the CSR road graph.
#[derive(Debug, Clone, Copy, Default)]
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn route(&self, network: &RoadNetwork, from: NodeId, to: NodeId) -> SpatialResult<Route> {
        check_node(network, from)?;
        check_node(network, to)?;
        if from == to {
            return Ok(Route { nodes: vec![from], edges: vec![], total_length_km: 0.0 });
        }
        let search = dijkstra(network, from, Some(to));
        if search.dist[to.index()] == UNREACHABLE {
            return Err(SpatialError::NoRoute { from, to });
        }
        Ok(reconstruct(network, &search.prev_edge, from, to))
    }

    fn distances(&self, network: &RoadNetwork, from: NodeId) -> Vec<u32> {
        if from.index() >= network.node_count() {
            return vec![UNREACHABLE; network.node_count()];
        }
        dijkstra(network, from, None).dist
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

#[inline]
fn edge_cost_m(network: &RoadNetwork, edge: EdgeId) -> u32 {
    (network.edge_length_km[edge.index()] * 1000.0).round() as u32
}

fn check_node(network: &RoadNetwork, node: NodeId) -> SpatialResult<()> {
    if node.index() < network.node_count() {
        Ok(())
    } else {
        Err(SpatialError::NodeNotFound(node))
    }
}

struct Search {
    dist:      Vec<u32>,
    prev_edge: Vec<EdgeId>,
}

/// Single-source search.  Stops early once `target` is settled.
fn dijkstra(network: &RoadNetwork, from: NodeId, target: Option<NodeId>) -> Search {
    let n = network.node_count();
    let mut dist      = vec![UNREACHABLE; n];
    let mut prev_edge = vec![EdgeId::INVALID; n];
    dist[from.index()] = 0;

    // Secondary key NodeId ensures deterministic tie-breaking.
    let mut heap: BinaryHeap<Reverse<(u32, NodeId)>> = BinaryHeap::new();
    heap.push(Reverse((0, from)));

    while let Some(Reverse((cost, node))) = heap.pop() {
        if Some(node) == target {
            break;
        }
        // Skip stale heap entries.
        if cost > dist[node.index()] {
            continue;
        }
        for edge in network.out_edges(node) {
            let neighbor = network.edge_to[edge.index()];
            let new_cost = cost.saturating_add(edge_cost_m(network, edge));
            if new_cost < dist[neighbor.index()] {
                dist[neighbor.index()] = new_cost;
                prev_edge[neighbor.index()] = edge;
                heap.push(Reverse((new_cost, neighbor)));
            }
        }
    }

    Search { dist, prev_edge }
}

fn reconstruct(network: &RoadNetwork, prev_edge: &[EdgeId], from: NodeId, to: NodeId) -> Route {
    let mut edges = Vec::new();
    let mut nodes = vec![to];
    let mut cur = to;
    while cur != from {
        let e = prev_edge[cur.index()];
        edges.push(e);
        cur = network.edge_from[e.index()];
        nodes.push(cur);
    }
    edges.reverse();
    nodes.reverse();
    let total_length_km = edges.iter().map(|e| network.edge_length_km[e.index()]).sum();
    Route { nodes, edges, total_length_km }
}
