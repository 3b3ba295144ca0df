//! File configuration for a fleet run.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use fleet_sim::{RunConfig, TripPolicy};
use fleet_spatial::GridConfig;
use fleet_vehicle::{BehavioralProfile, VehicleParams};

/// Everything a run needs.  Every field has a default, so a config file
/// only lists what it changes.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FleetConfig {
    pub grid:       GridConfig,
    /// Omit for a fresh seed each run.
    pub seed:       Option<u64>,
    pub vehicles:   usize,
    pub profiles:   BTreeMap<String, BehavioralProfile>,
    pub vehicle:    VehicleParams,
    pub trips:      TripPolicy,
    pub run:        RunConfig,
    pub output_dir: PathBuf,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            grid:       GridConfig::new(101, 101, 50),
            seed:       None,
            vehicles:   10,
            profiles:   default_profiles(),
            vehicle:    VehicleParams::default(),
            trips:      TripPolicy::default(),
            run:        RunConfig::default(),
            output_dir: PathBuf::from("fleet_output"),
        }
    }
}

fn default_profiles() -> BTreeMap<String, BehavioralProfile> {
    BTreeMap::from([
        ("conservative".to_owned(), BehavioralProfile::new(0.05, 0.10)),
        ("moderate".to_owned(),     BehavioralProfile::new(0.15, 0.30)),
        ("high_risk".to_owned(),    BehavioralProfile::new(0.25, 0.50)),
    ])
}

impl FleetConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file '{}'", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("parsing config file '{}'", path.display()))
    }
}
