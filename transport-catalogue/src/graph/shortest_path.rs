//! Shortest-path engines.
//!
//! Both engines run the same Dijkstra search with deterministic tie-breaking
//! (lower cost first, then lower vertex id), so for any pair of vertices
//! they return identical paths. [`Dijkstra`] searches per query and stops
//! as soon as the target is settled; [`AllPairs`] runs the search from
//! every vertex up front and answers queries by walking stored
//! predecessor edges.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::{DirectedWeightedGraph, EdgeId, GraphError, VertexId};

/// A minimum-weight path.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    /// Sum of edge weights along the path.
    pub weight: f64,
    /// Edges from source to target, in travel order.
    pub edges: Vec<EdgeId>,
}

/// Answers repeated source → target minimum-weight queries over one graph.
pub trait ShortestPaths: Send + Sync {
    /// The graph this engine was built over.
    fn graph(&self) -> &DirectedWeightedGraph;

    /// Find a minimum-weight path from `from` to `to`.
    ///
    /// Returns `Ok(None)` if `to` is unreachable. A vertex's path to itself
    /// is empty with weight zero.
    fn query(&self, from: VertexId, to: VertexId) -> Result<Option<Path>, GraphError>;
}

/// Best known way to reach a vertex.
#[derive(Debug, Clone, Copy)]
struct Reached {
    weight: f64,
    /// Last edge on the path; `None` for the source itself.
    prev_edge: Option<EdgeId>,
}

/// Heap entry. Ordered so that `BinaryHeap` (a max-heap) pops the lowest
/// cost first, breaking ties by lower vertex id.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    cost: f64,
    vertex: VertexId,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

/// Single-source Dijkstra. Stops early once `target` is settled.
fn search(
    graph: &DirectedWeightedGraph,
    source: VertexId,
    target: Option<VertexId>,
) -> Vec<Option<Reached>> {
    let mut reached: Vec<Option<Reached>> = vec![None; graph.vertex_count()];
    reached[source] = Some(Reached {
        weight: 0.0,
        prev_edge: None,
    });

    let mut heap = BinaryHeap::new();
    heap.push(Candidate {
        cost: 0.0,
        vertex: source,
    });

    while let Some(Candidate { cost, vertex }) = heap.pop() {
        if Some(vertex) == target {
            break;
        }

        // Skip stale heap entries
        if reached[vertex].is_some_and(|r| cost > r.weight) {
            continue;
        }

        for &edge_id in graph.outgoing(vertex) {
            let Some(edge) = graph.edge(edge_id) else {
                continue;
            };
            let new_cost = cost + edge.weight;
            let improves = match reached[edge.to] {
                Some(r) => new_cost < r.weight,
                None => true,
            };
            if improves {
                reached[edge.to] = Some(Reached {
                    weight: new_cost,
                    prev_edge: Some(edge_id),
                });
                heap.push(Candidate {
                    cost: new_cost,
                    vertex: edge.to,
                });
            }
        }
    }

    reached
}

/// Walk predecessor edges back from `to`.
fn reconstruct(
    graph: &DirectedWeightedGraph,
    reached: &[Option<Reached>],
    to: VertexId,
) -> Option<Path> {
    let weight = reached[to]?.weight;

    let mut edges = Vec::new();
    let mut current = to;
    while let Some(edge_id) = reached[current].and_then(|r| r.prev_edge) {
        edges.push(edge_id);
        current = graph.edge(edge_id)?.from;
    }
    edges.reverse();

    Some(Path { weight, edges })
}

/// Engine that searches on every query.
#[derive(Debug, Clone)]
pub struct Dijkstra {
    graph: DirectedWeightedGraph,
}

impl Dijkstra {
    pub fn new(graph: DirectedWeightedGraph) -> Self {
        Self { graph }
    }
}

impl ShortestPaths for Dijkstra {
    fn graph(&self) -> &DirectedWeightedGraph {
        &self.graph
    }

    fn query(&self, from: VertexId, to: VertexId) -> Result<Option<Path>, GraphError> {
        self.graph.check_vertex(from)?;
        self.graph.check_vertex(to)?;

        let reached = search(&self.graph, from, Some(to));
        Ok(reconstruct(&self.graph, &reached, to))
    }
}

/// Engine that precomputes a shortest-path tree from every vertex.
///
/// Build cost is one full search per vertex and memory is quadratic in the
/// vertex count; queries only walk the stored tree.
#[derive(Debug, Clone)]
pub struct AllPairs {
    graph: DirectedWeightedGraph,
    /// `trees[source][vertex]`
    trees: Vec<Vec<Option<Reached>>>,
}

impl AllPairs {
    pub fn new(graph: DirectedWeightedGraph) -> Self {
        let trees = (0..graph.vertex_count())
            .map(|source| search(&graph, source, None))
            .collect();
        Self { graph, trees }
    }
}

impl ShortestPaths for AllPairs {
    fn graph(&self) -> &DirectedWeightedGraph {
        &self.graph
    }

    fn query(&self, from: VertexId, to: VertexId) -> Result<Option<Path>, GraphError> {
        self.graph.check_vertex(from)?;
        self.graph.check_vertex(to)?;

        Ok(reconstruct(&self.graph, &self.trees[from], to))
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::graph::Edge;
    use proptest::prelude::*;

    fn graph_strategy() -> impl Strategy<Value = DirectedWeightedGraph> {
        (1usize..8).prop_flat_map(|n| {
            prop::collection::vec((0..n, 0..n, 0u32..20), 0..24).prop_map(move |edges| {
                let mut g = DirectedWeightedGraph::new(n);
                for (from, to, w) in edges {
                    g.add_edge(Edge {
                        from,
                        to,
                        weight: f64::from(w) / 2.0,
                    })
                    .unwrap();
                }
                g
            })
        })
    }

    proptest! {
        #[test]
        fn engines_agree(g in graph_strategy()) {
            let n = g.vertex_count();
            let dijkstra = Dijkstra::new(g.clone());
            let all_pairs = AllPairs::new(g);

            for from in 0..n {
                for to in 0..n {
                    prop_assert_eq!(
                        dijkstra.query(from, to).unwrap(),
                        all_pairs.query(from, to).unwrap()
                    );
                }
            }
        }

        #[test]
        fn path_weight_matches_edges(g in graph_strategy()) {
            let n = g.vertex_count();
            let engine = Dijkstra::new(g);

            for from in 0..n {
                for to in 0..n {
                    if let Some(path) = engine.query(from, to).unwrap() {
                        prop_assert!(path.weight >= 0.0);

                        let mut at = from;
                        let mut sum = 0.0;
                        for &id in &path.edges {
                            let edge = engine.graph().edge(id).unwrap();
                            prop_assert_eq!(edge.from, at);
                            at = edge.to;
                            sum += edge.weight;
                        }
                        prop_assert_eq!(at, to);
                        prop_assert!((sum - path.weight).abs() < 1e-9);
                    }
                }
            }
        }
    }
}
