//! Compiles a catalogue into a wait/ride graph.
//!
//! Every stop gets two vertices: a *waiting* vertex where riders arrive and
//! a *boarding* vertex they reach after waiting for a bus. A wait edge joins
//! the two. Ride edges go from the boarding vertex of one stop to the
//! waiting vertex of any later stop on the same bus, one edge per reachable
//! span, so the search never needs to model staying on a bus.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::catalogue::TransportCatalogue;
use crate::domain::{Bus, StopId};
use crate::graph::{DirectedWeightedGraph, Edge, VertexId};

use super::RouterError;
use super::config::RoutingSettings;
use super::item::Item;

/// The two graph vertices that represent one stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopVertices {
    /// Where riders arrive and start waiting.
    pub wait: VertexId,
    /// Where riders board after waiting.
    pub board: VertexId,
}

impl StopVertices {
    fn of(stop: StopId) -> Self {
        let wait = stop.index() * 2;
        Self {
            wait,
            board: wait + 1,
        }
    }
}

/// A compiled route graph plus the labels needed to read paths back.
#[derive(Debug, Clone)]
pub struct RouteGraph {
    pub(crate) graph: DirectedWeightedGraph,
    /// Rider-facing label of each edge, indexed by edge id.
    pub(crate) items: Vec<Item>,
    pub(crate) stop_vertices: HashMap<String, StopVertices>,
}

impl RouteGraph {
    pub fn graph(&self) -> &DirectedWeightedGraph {
        &self.graph
    }

    /// Label of an edge.
    pub fn item(&self, edge: usize) -> Option<&Item> {
        self.items.get(edge)
    }

    /// Vertices of a stop, by name.
    pub fn stop_vertices(&self, stop_name: &str) -> Option<StopVertices> {
        self.stop_vertices.get(stop_name).copied()
    }
}

/// Builds a [`RouteGraph`] from a fully populated catalogue.
pub struct RouteGraphBuilder<'a> {
    catalogue: &'a TransportCatalogue,
    settings: RoutingSettings,
    graph: DirectedWeightedGraph,
    items: Vec<Item>,
}

impl<'a> RouteGraphBuilder<'a> {
    pub fn new(catalogue: &'a TransportCatalogue, settings: RoutingSettings) -> Self {
        Self {
            catalogue,
            settings,
            graph: DirectedWeightedGraph::new(catalogue.stop_count() * 2),
            items: Vec::new(),
        }
    }

    /// Build the graph.
    ///
    /// Fails if the settings are invalid or a bus crosses a pair of
    /// adjacent stops with no recorded road distance.
    pub fn build(mut self) -> Result<RouteGraph, RouterError> {
        self.settings.validate()?;

        let catalogue = self.catalogue;
        let mut stop_vertices = HashMap::with_capacity(catalogue.stop_count());

        for stop in catalogue.stops_by_id() {
            let vertices = StopVertices::of(stop.id());
            stop_vertices.insert(stop.name().to_string(), vertices);
            self.add_edge(
                vertices.wait,
                vertices.board,
                Item::Wait {
                    stop_name: stop.name().to_string(),
                    time: self.settings.wait_minutes(),
                },
            )?;
        }

        for bus in catalogue.buses() {
            self.add_bus(bus)?;
        }

        info!(
            vertices = self.graph.vertex_count(),
            edges = self.graph.edge_count(),
            "route graph built"
        );

        Ok(RouteGraph {
            graph: self.graph,
            items: self.items,
            stop_vertices,
        })
    }

    /// Add one ride edge per reachable span of `bus`.
    ///
    /// Out-and-back buses also get the mirrored edges, costed with the
    /// reverse-direction distances.
    fn add_bus(&mut self, bus: &Bus) -> Result<(), RouterError> {
        let stops = bus.stops();
        let velocity = self.settings.velocity_meters_per_minute();
        let edges_before = self.graph.edge_count();

        for i in 0..stops.len().saturating_sub(1) {
            let mut forward_distance = 0.0;
            let mut backward_distance = 0.0;

            for j in i..stops.len() - 1 {
                let span_count = j - i + 1;

                forward_distance += f64::from(self.catalogue.get_distance(stops[j], stops[j + 1])?);
                self.add_ride(
                    bus,
                    stops[i],
                    stops[j + 1],
                    forward_distance / velocity,
                    span_count,
                )?;

                if !bus.is_roundtrip() {
                    backward_distance +=
                        f64::from(self.catalogue.get_distance(stops[j + 1], stops[j])?);
                    self.add_ride(
                        bus,
                        stops[j + 1],
                        stops[i],
                        backward_distance / velocity,
                        span_count,
                    )?;
                }
            }
        }

        debug!(
            bus = %bus.name(),
            edges = self.graph.edge_count() - edges_before,
            "added ride edges"
        );
        Ok(())
    }

    fn add_ride(
        &mut self,
        bus: &Bus,
        from: StopId,
        to: StopId,
        time: f64,
        span_count: usize,
    ) -> Result<(), RouterError> {
        self.add_edge(
            StopVertices::of(from).board,
            StopVertices::of(to).wait,
            Item::Ride {
                bus_name: bus.name().to_string(),
                time,
                span_count,
            },
        )
    }

    fn add_edge(&mut self, from: VertexId, to: VertexId, item: Item) -> Result<(), RouterError> {
        let id = self.graph.add_edge(Edge {
            from,
            to,
            weight: item.time(),
        })?;
        debug_assert_eq!(id, self.items.len());
        self.items.push(item);
        Ok(())
    }
}
