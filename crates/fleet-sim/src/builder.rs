//! Fluent builder for constructing a [`FleetOrchestrator`].

use std::sync::Arc;

use log::debug;

use fleet_core::SimRng;
use fleet_spatial::{DijkstraRouter, RoadNetwork, Router};
use fleet_vehicle::VehicleParams;

use crate::{CancelToken, FleetOrchestrator, SimError, SimResult, TripPolicy};

/// Fluent builder for [`FleetOrchestrator<R>`].
///
/// # Optional inputs (have defaults)
///
/// | Method               | Default                         |
/// |----------------------|---------------------------------|
/// | `.router(r)`         | [`DijkstraRouter`]              |
/// | `.seed(s)`           | drawn from OS entropy           |
/// | `.trip_policy(p)`    | `TripPolicy::default()`         |
/// | `.vehicle_params(p)` | `VehicleParams::default()`      |
/// | `.cancel_token(t)`   | a fresh, uncancelled token      |
///
/// # Example
///
/// ```rust,ignore
/// let network = Arc::new(RoadNetwork::grid(10, 10, 3, Some(42))?);
/// let mut fleet = FleetBuilder::new(network).seed(42).build()?;
/// fleet.create_fleet(10, &profiles)?;
/// let report = fleet.run(&RunConfig::new(60, 60, 50), &mut streamer, &mut NoopObserver)?;
/// ```
pub struct FleetBuilder<R: Router = DijkstraRouter> {
    network: Arc<RoadNetwork>,
    router:  R,
    seed:    Option<u64>,
    policy:  TripPolicy,
    params:  VehicleParams,
    cancel:  CancelToken,
}

impl FleetBuilder<DijkstraRouter> {
    pub fn new(network: Arc<RoadNetwork>) -> Self {
        Self {
            network,
            router: DijkstraRouter,
            seed:   None,
            policy: TripPolicy::default(),
            params: VehicleParams::default(),
            cancel: CancelToken::new(),
        }
    }
}

impl<R: Router> FleetBuilder<R> {
    /// Swap the routing algorithm.
    pub fn router<R2: Router>(self, router: R2) -> FleetBuilder<R2> {
        FleetBuilder {
            network: self.network,
            router,
            seed:    self.seed,
            policy:  self.policy,
            params:  self.params,
            cancel:  self.cancel,
        }
    }

    /// Fix the seed.  Same seed, same network, same config: same run.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn trip_policy(mut self, policy: TripPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Parameters given to every vehicle created by
    /// [`create_fleet`](FleetOrchestrator::create_fleet).
    pub fn vehicle_params(mut self, params: VehicleParams) -> Self {
        self.params = params;
        self
    }

    pub fn cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// Validate the configuration and return an orchestrator with an empty
    /// fleet.
    pub fn build(self) -> SimResult<FleetOrchestrator<R>> {
        self.policy.validate()?;
        self.params
            .validate()
            .map_err(|e| SimError::Config(e.to_string()))?;
        if self.network.is_empty() {
            return Err(SimError::Config("road network has no intersections".into()));
        }

        let seed = self
            .seed
            .unwrap_or_else(|| SimRng::from_entropy().gen_range(0..=u64::MAX));
        debug!("fleet seed {seed}");

        Ok(FleetOrchestrator {
            network:       self.network,
            router:        self.router,
            policy:        self.policy,
            params:        self.params,
            seed,
            // Offset so the fleet stream never mirrors vehicle 0's stream.
            rng:           SimRng::new(seed).child(u64::MAX),
            cancel:        self.cancel,
            vehicles:      Vec::new(),
            rngs:          Vec::new(),
            stranded:      Vec::new(),
            telemetry_log: Vec::new(),
            anomaly_log:   Vec::new(),
        })
    }
}
