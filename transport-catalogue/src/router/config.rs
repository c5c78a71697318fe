//! Routing configuration.

use serde::{Deserialize, Serialize};

use super::RouterError;

/// Which shortest-path engine the router builds.
///
/// Both strategies return identical routes; they only trade build time and
/// memory against query time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathStrategy {
    /// Search on every query.
    #[default]
    OnDemand,
    /// Precompute shortest-path trees from every vertex at build time.
    Precomputed,
}

/// Configuration parameters for building the route graph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoutingSettings {
    /// Minutes spent waiting at a stop before boarding any bus.
    pub bus_wait_time: u32,

    /// Bus speed in km/h.
    pub bus_velocity: f64,

    /// Shortest-path engine to build.
    #[serde(default)]
    pub strategy: PathStrategy,
}

impl RoutingSettings {
    /// Create settings with the default (on-demand) engine.
    pub fn new(bus_wait_time: u32, bus_velocity: f64) -> Self {
        Self {
            bus_wait_time,
            bus_velocity,
            strategy: PathStrategy::default(),
        }
    }

    /// Use a specific shortest-path engine.
    pub fn with_strategy(mut self, strategy: PathStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Returns the bus speed in metres per minute.
    pub fn velocity_meters_per_minute(&self) -> f64 {
        self.bus_velocity * 1000.0 / 60.0
    }

    /// Returns the wait time as a graph weight.
    pub fn wait_minutes(&self) -> f64 {
        f64::from(self.bus_wait_time)
    }

    /// Check that the settings can produce a valid graph.
    pub fn validate(&self) -> Result<(), RouterError> {
        if !self.bus_velocity.is_finite() || self.bus_velocity <= 0.0 {
            return Err(RouterError::InvalidSettings(format!(
                "bus velocity must be positive, got {}",
                self.bus_velocity
            )));
        }
        Ok(())
    }
}

impl Default for RoutingSettings {
    fn default() -> Self {
        Self {
            bus_wait_time: 6,
            bus_velocity: 40.0,
            strategy: PathStrategy::OnDemand,
        }
    }
}
