//! Directed graph with non-negative real edge weights.

use super::GraphError;

/// Index of a vertex. Vertices are `0..vertex_count`.
pub type VertexId = usize;

/// Index of an edge, assigned in insertion order.
pub type EdgeId = usize;

/// A directed, weighted edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub from: VertexId,
    pub to: VertexId,
    pub weight: f64,
}

/// Adjacency-list graph with a fixed vertex count.
#[derive(Debug, Clone, Default)]
pub struct DirectedWeightedGraph {
    edges: Vec<Edge>,
    /// Outgoing edge ids per vertex.
    incidence: Vec<Vec<EdgeId>>,
}

impl DirectedWeightedGraph {
    /// Create a graph with `vertex_count` vertices and no edges.
    pub fn new(vertex_count: usize) -> Self {
        Self {
            edges: Vec::new(),
            incidence: vec![Vec::new(); vertex_count],
        }
    }

    /// Add an edge and return its id.
    ///
    /// Both endpoints must exist and the weight must be finite and
    /// non-negative.
    pub fn add_edge(&mut self, edge: Edge) -> Result<EdgeId, GraphError> {
        self.check_vertex(edge.from)?;
        self.check_vertex(edge.to)?;
        if !edge.weight.is_finite() || edge.weight < 0.0 {
            return Err(GraphError::InvalidWeight(edge.weight));
        }

        let id = self.edges.len();
        self.edges.push(edge);
        self.incidence[edge.from].push(id);
        Ok(id)
    }

    pub fn vertex_count(&self) -> usize {
        self.incidence.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Look up an edge by id.
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id)
    }

    /// Ids of the edges leaving `vertex`, in insertion order.
    ///
    /// Unknown vertices have no outgoing edges.
    pub fn outgoing(&self, vertex: VertexId) -> &[EdgeId] {
        self.incidence.get(vertex).map(Vec::as_slice).unwrap_or(&[])
    }

    pub(crate) fn check_vertex(&self, vertex: VertexId) -> Result<(), GraphError> {
        if vertex < self.incidence.len() {
            Ok(())
        } else {
            Err(GraphError::UnknownVertex(vertex))
        }
    }
}
