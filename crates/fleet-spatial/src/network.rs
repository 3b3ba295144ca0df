//! Road network representation and builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing edges.
//! Given a `NodeId n`, its outgoing edges occupy the slice:
//!
//! ```text
//! edge_from[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! Edge arrays are sorted by source node and indexed by `EdgeId`, so a
//! node's neighbours are one contiguous scan.  An undirected road is stored
//! as two directed edges.
//!
//! # Lookups
//!
//! - `GridNode → NodeId` through a hash index (exact coordinates).
//! - `GeoPoint → NodeId` through an R-tree (`rstar`) for snapping an
//!   arbitrary telemetry position to the closest intersection.

use std::collections::HashMap;

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use fleet_core::{EdgeId, GeoPoint, GridNode, NodeId};

use crate::{SpatialError, SpatialResult};

// ── R-tree node entry ─────────────────────────────────────────────────────────

#[derive(Clone)]
struct NodeEntry {
    point: [f64; 2], // [lat, lon]
    id: NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dlat = self.point[0] - point[0];
        let dlon = self.point[1] - point[1];
        dlat * dlat + dlon * dlon
    }
}

// ── RoadNetwork ───────────────────────────────────────────────────────────────

/// Road graph in CSR format plus coordinate and spatial indexes and the set
/// of refueling stations.
///
/// Do not construct directly; use [`RoadNetworkBuilder`] or
/// [`RoadNetwork::grid`].
pub struct RoadNetwork {
    /// Grid coordinates of each node.  Indexed by `NodeId`.
    pub node_pos: Vec<GridNode>,

    /// CSR row pointer.  Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    /// Source node of each edge.
    pub edge_from: Vec<NodeId>,

    /// Destination node of each edge.
    pub edge_to: Vec<NodeId>,

    /// Length of each edge in kilometres.
    pub edge_length_km: Vec<f64>,

    /// Refueling stations in placement order.  No duplicates.
    stations: Vec<NodeId>,

    node_index: HashMap<GridNode, NodeId>,
    spatial_idx: RTree<NodeEntry>,
}

impl RoadNetwork {
    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_pos.is_empty()
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over the `EdgeId`s of all outgoing edges from `node`.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(|i| EdgeId(i as u32))
    }

    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        end - start
    }

    // ── Coordinates ───────────────────────────────────────────────────────

    #[inline]
    pub fn node(&self, id: NodeId) -> GridNode {
        self.node_pos[id.index()]
    }

    /// The `NodeId` at exact grid coordinates, if any.
    #[inline]
    pub fn node_id(&self, at: GridNode) -> Option<NodeId> {
        self.node_index.get(&at).copied()
    }

    /// Like [`node_id`](Self::node_id) but reports a missing node as an error.
    pub fn require_node(&self, at: GridNode) -> SpatialResult<NodeId> {
        self.node_id(at).ok_or(SpatialError::UnknownCoordinate(at))
    }

    /// Nearest intersection to an arbitrary position.
    ///
    /// Returns `None` only if the network has no nodes.
    pub fn snap_to_node(&self, pos: GeoPoint) -> Option<NodeId> {
        self.spatial_idx
            .nearest_neighbor(&[pos.lat, pos.lon])
            .map(|e| e.id)
    }

    // ── Stations ──────────────────────────────────────────────────────────

    /// Refueling station nodes in placement order.
    pub fn stations(&self) -> &[NodeId] {
        &self.stations
    }

    pub fn station_nodes(&self) -> Vec<GridNode> {
        self.stations.iter().map(|&s| self.node(s)).collect()
    }

    pub fn is_station(&self, node: NodeId) -> bool {
        self.stations.contains(&node)
    }
}

// ── RoadNetworkBuilder ────────────────────────────────────────────────────────

/// Construct a [`RoadNetwork`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use fleet_core::GridNode;
/// use fleet_spatial::RoadNetworkBuilder;
///
/// let mut b = RoadNetworkBuilder::new();
/// let a = b.add_node(GridNode::new(0, 0));
/// let c = b.add_node(GridNode::new(1, 0));
/// b.add_road(a, c, 1.0);
/// b.add_station(c);
/// let net = b.build();
/// assert_eq!(net.node_count(), 2);
/// assert_eq!(net.edge_count(), 2); // bidirectional
/// assert!(net.is_station(c));
/// ```
pub struct RoadNetworkBuilder {
    nodes:      Vec<GridNode>,
    node_index: HashMap<GridNode, NodeId>,
    raw_edges:  Vec<RawEdge>,
    stations:   Vec<NodeId>,
}

struct RawEdge {
    from:      NodeId,
    to:        NodeId,
    length_km: f64,
}

impl RoadNetworkBuilder {
    pub fn new() -> Self {
        Self::with_capacity(0, 0)
    }

    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            nodes:      Vec::with_capacity(nodes),
            node_index: HashMap::with_capacity(nodes),
            raw_edges:  Vec::with_capacity(edges),
            stations:   Vec::new(),
        }
    }

    /// Add an intersection and return its `NodeId` (sequential from 0).
    ///
    /// Adding the same coordinates twice returns the existing id.
    pub fn add_node(&mut self, at: GridNode) -> NodeId {
        if let Some(&id) = self.node_index.get(&at) {
            return id;
        }
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(at);
        self.node_index.insert(at, id);
        id
    }

    /// Add a **directed** edge from `from` to `to`.
    pub fn add_directed_edge(&mut self, from: NodeId, to: NodeId, length_km: f64) {
        self.raw_edges.push(RawEdge { from, to, length_km });
    }

    /// Add edges in both directions for an undirected road segment.
    pub fn add_road(&mut self, a: NodeId, b: NodeId, length_km: f64) {
        self.add_directed_edge(a, b, length_km);
        self.add_directed_edge(b, a, length_km);
    }

    /// Mark `node` as a refueling station.  Repeated marks are ignored.
    pub fn add_station(&mut self, node: NodeId) {
        if !self.stations.contains(&node) {
            self.stations.push(node);
        }
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    /// Consume the builder and produce a [`RoadNetwork`].
    pub fn build(self) -> RoadNetwork {
        let node_count = self.nodes.len();
        let edge_count = self.raw_edges.len();

        // Stable sort keeps insertion order among a node's edges, which
        // fixes neighbour iteration order and therefore route tie-breaking.
        let mut raw = self.raw_edges;
        raw.sort_by_key(|e| e.from.0);

        let edge_from:      Vec<NodeId> = raw.iter().map(|e| e.from).collect();
        let edge_to:        Vec<NodeId> = raw.iter().map(|e| e.to).collect();
        let edge_length_km: Vec<f64>    = raw.iter().map(|e| e.length_km).collect();

        let mut node_out_start = vec![0u32; node_count + 1];
        for e in &raw {
            node_out_start[e.from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, edge_count);

        let entries: Vec<NodeEntry> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, &at)| {
                let p = at.point();
                NodeEntry { point: [p.lat, p.lon], id: NodeId(i as u32) }
            })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        RoadNetwork {
            node_pos: self.nodes,
            node_out_start,
            edge_from,
            edge_to,
            edge_length_km,
            stations: self.stations,
            node_index: self.node_index,
            spatial_idx,
        }
    }
}

impl Default for RoadNetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
