//! Generic weighted digraph and shortest-path engines.
//!
//! Nothing here knows about stops or buses; the router module compiles the
//! catalogue into a [`DirectedWeightedGraph`] and queries it through a
//! [`ShortestPaths`] engine.

mod digraph;
mod shortest_path;

pub use digraph::{DirectedWeightedGraph, Edge, EdgeId, VertexId};
pub use shortest_path::{AllPairs, Dijkstra, Path, ShortestPaths};

/// Errors from graph construction and queries.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    /// Vertex id is outside the graph
    #[error("vertex {0} is not in the graph")]
    UnknownVertex(VertexId),

    /// Edge weight is negative, infinite or NaN
    #[error("invalid edge weight {0}")]
    InvalidWeight(f64),
}
