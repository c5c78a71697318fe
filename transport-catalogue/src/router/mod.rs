//! Minimum-time routing between stops.
//!
//! The catalogue is compiled once into a graph of wait and ride edges
//! ([`RouteGraphBuilder`]); queries then run a shortest-path search over it
//! and translate the edges back into rider-facing [`Item`]s.

mod builder;
mod config;
mod item;
mod transport_router;

pub use builder::{RouteGraph, RouteGraphBuilder, StopVertices};
pub use config::{PathStrategy, RoutingSettings};
pub use item::{Item, RouteResult};
pub use transport_router::TransportRouter;

use crate::domain::CatalogueError;
use crate::graph::GraphError;

/// Errors from building or querying routes.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RouterError {
    /// Build requested before any settings were provided
    #[error("routing settings must be set before building routes")]
    SettingsNotSet,

    /// Settings cannot produce a valid graph
    #[error("invalid routing settings: {0}")]
    InvalidSettings(String),

    /// Route queried before the graph was built
    #[error("route graph has not been built")]
    NotBuilt,

    /// Catalogue data is inconsistent
    #[error("catalogue error: {0}")]
    Catalogue(#[from] CatalogueError),

    /// Graph construction or query failed
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),
}
