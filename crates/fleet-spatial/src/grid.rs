//! Rectangular grid construction.
//!
//! A `width × height` grid has one node per integer coordinate in
//! `0..width × 0..height`, with a 1 km road between every pair of
//! 4-neighbours.  Refueling stations are a uniform sample of nodes drawn
//! without replacement.

use log::info;

use fleet_core::{GridNode, SimRng};

use crate::{RoadNetwork, RoadNetworkBuilder, SpatialError, SpatialResult};

/// Length of every grid road.
pub const GRID_EDGE_KM: f64 = 1.0;

/// Dimensions and station count of a grid world.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridConfig {
    pub width:    u32,
    pub height:   u32,
    pub stations: usize,
}

impl GridConfig {
    pub fn new(width: u32, height: u32, stations: usize) -> Self {
        Self { width, height, stations }
    }

    pub fn node_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Check dimensions and station count without building anything.
    pub fn validate(&self) -> SpatialResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SpatialError::InvalidConfiguration(format!(
                "grid dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.stations > self.node_count() {
            return Err(SpatialError::InvalidConfiguration(format!(
                "{} refueling stations requested but the grid has only {} nodes",
                self.stations,
                self.node_count()
            )));
        }
        Ok(())
    }

    /// Build the grid, drawing station placement from `rng`.
    pub fn build(&self, rng: &mut SimRng) -> SpatialResult<RoadNetwork> {
        self.validate()?;

        let (w, h) = (self.width as i32, self.height as i32);
        let edges = 2 * (2 * self.node_count() - self.width as usize - self.height as usize);
        let mut b = RoadNetworkBuilder::with_capacity(self.node_count(), edges);

        for x in 0..w {
            for y in 0..h {
                b.add_node(GridNode::new(x, y));
            }
        }
        for x in 0..w {
            for y in 0..h {
                let here = b.add_node(GridNode::new(x, y));
                if x + 1 < w {
                    let east = b.add_node(GridNode::new(x + 1, y));
                    b.add_road(here, east, GRID_EDGE_KM);
                }
                if y + 1 < h {
                    let north = b.add_node(GridNode::new(x, y + 1));
                    b.add_road(here, north, GRID_EDGE_KM);
                }
            }
        }

        for i in rng.sample_indices(self.node_count(), self.stations) {
            b.add_station(fleet_core::NodeId(i as u32));
        }

        let net = b.build();
        info!(
            "grid world built: {}x{} with {} nodes, {} refueling stations",
            self.width,
            self.height,
            net.node_count(),
            net.stations().len()
        );
        Ok(net)
    }
}

impl RoadNetwork {
    /// Build a `width × height` grid with `stations` refueling stations.
    ///
    /// With `seed = Some(s)` station placement is reproducible; with `None`
    /// it is drawn from OS entropy.
    pub fn grid(width: u32, height: u32, stations: usize, seed: Option<u64>) -> SpatialResult<Self> {
        let mut rng = match seed {
            Some(s) => SimRng::new(s),
            None    => SimRng::from_entropy(),
        };
        GridConfig::new(width, height, stations).build(&mut rng)
    }
}
