//! Router façade: builds the route graph and answers stop-to-stop queries.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, info};

use crate::catalogue::TransportCatalogue;
use crate::graph::{AllPairs, Dijkstra, ShortestPaths};

use super::RouterError;
use super::builder::{RouteGraphBuilder, StopVertices};
use super::config::{PathStrategy, RoutingSettings};
use super::item::{Item, RouteResult};

/// Everything one build produces. Immutable once created.
struct RouteIndex {
    engine: Box<dyn ShortestPaths>,
    items: Vec<Item>,
    stop_vertices: HashMap<String, StopVertices>,
}

/// Answers minimum-time route queries over a catalogue.
///
/// Each [`build_all_routes`](Self::build_all_routes) compiles a complete new
/// graph and engine and swaps it in with one write; queries take a shared
/// handle to the current build and finish against it, so a rebuild never
/// exposes a half-built graph. The router is `Send + Sync` and can be
/// queried from many threads at once.
#[derive(Default)]
pub struct TransportRouter {
    settings: Option<RoutingSettings>,
    index: RwLock<Option<Arc<RouteIndex>>>,
}

impl TransportRouter {
    /// Create a router with no settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a router with the given settings.
    pub fn with_settings(settings: RoutingSettings) -> Self {
        Self {
            settings: Some(settings),
            index: RwLock::new(None),
        }
    }

    /// Set the settings used by the next build.
    ///
    /// The current build, if any, keeps answering queries with the settings
    /// it was built with.
    pub fn set_settings(&mut self, settings: RoutingSettings) {
        self.settings = Some(settings);
    }

    pub fn settings(&self) -> Option<RoutingSettings> {
        self.settings
    }

    /// Returns true once a build has succeeded.
    pub fn is_built(&self) -> bool {
        self.current().is_some()
    }

    /// Compile the catalogue into a route graph and shortest-path engine.
    ///
    /// Must be called again after the catalogue changes. On failure the
    /// previous build, if any, stays in place.
    pub fn build_all_routes(&self, catalogue: &TransportCatalogue) -> Result<(), RouterError> {
        let settings = self.settings.ok_or(RouterError::SettingsNotSet)?;
        let route_graph = RouteGraphBuilder::new(catalogue, settings).build()?;

        let engine: Box<dyn ShortestPaths> = match settings.strategy {
            PathStrategy::OnDemand => Box::new(Dijkstra::new(route_graph.graph)),
            PathStrategy::Precomputed => Box::new(AllPairs::new(route_graph.graph)),
        };

        let index = Arc::new(RouteIndex {
            engine,
            items: route_graph.items,
            stop_vertices: route_graph.stop_vertices,
        });

        *self.index.write().unwrap_or_else(PoisonError::into_inner) = Some(index);

        info!(
            stops = catalogue.stop_count(),
            buses = catalogue.bus_count(),
            strategy = ?settings.strategy,
            "routes built"
        );
        Ok(())
    }

    /// Find the minimum-time itinerary from one stop to another.
    ///
    /// Returns `Ok(None)` if either stop is unknown to the current build or
    /// no route connects them. Fails with [`RouterError::NotBuilt`] if no
    /// build has succeeded yet.
    pub fn get_route_by_stops(
        &self,
        from: &str,
        to: &str,
    ) -> Result<Option<RouteResult>, RouterError> {
        let index = self.current().ok_or(RouterError::NotBuilt)?;

        let (Some(start), Some(finish)) =
            (index.stop_vertices.get(from), index.stop_vertices.get(to))
        else {
            debug!(from, to, "route requested for unknown stop");
            return Ok(None);
        };

        let Some(path) = index.engine.query(start.wait, finish.wait)? else {
            debug!(from, to, "no route between stops");
            return Ok(None);
        };

        let items = path
            .edges
            .iter()
            .map(|&edge| index.items[edge].clone())
            .collect();

        Ok(Some(RouteResult {
            total_time: path.weight,
            items,
        }))
    }

    fn current(&self) -> Option<Arc<RouteIndex>> {
        self.index
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl fmt::Debug for TransportRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportRouter")
            .field("settings", &self.settings)
            .field("built", &self.is_built())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CatalogueError, Coordinates};

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    /// A(55.0,37.0), B(55.1,37.1), C(55.2,37.2) on out-and-back bus "1".
    fn sample() -> TransportCatalogue {
        let mut cat = TransportCatalogue::new();
        let a = cat.add_stop("A", Coordinates::new(55.0, 37.0)).unwrap();
        let b = cat.add_stop("B", Coordinates::new(55.1, 37.1)).unwrap();
        let c = cat.add_stop("C", Coordinates::new(55.2, 37.2)).unwrap();
        cat.set_distance(a, b, 1000).unwrap();
        cat.set_distance(b, c, 1200).unwrap();
        cat.set_distance(b, a, 900).unwrap();
        cat.set_distance(c, b, 1100).unwrap();
        cat.add_bus("1", vec![a, b, c], false).unwrap();
        cat
    }

    fn built(cat: &TransportCatalogue, strategy: PathStrategy) -> TransportRouter {
        let settings = RoutingSettings::new(5, 60.0).with_strategy(strategy);
        let router = TransportRouter::with_settings(settings);
        router.build_all_routes(cat).unwrap();
        router
    }

    #[test]
    fn wait_then_ride_two_spans() {
        let cat = sample();
        for strategy in [PathStrategy::OnDemand, PathStrategy::Precomputed] {
            let router = built(&cat, strategy);
            let route = router.get_route_by_stops("A", "C").unwrap().unwrap();

            assert_close(route.total_time, 7.2);
            assert_eq!(route.items.len(), 2);
            assert_eq!(
                route.items[0],
                Item::Wait {
                    stop_name: "A".into(),
                    time: 5.0
                }
            );
            match &route.items[1] {
                Item::Ride {
                    bus_name,
                    time,
                    span_count,
                } => {
                    assert_eq!(bus_name, "1");
                    assert_close(*time, 2.2);
                    assert_eq!(*span_count, 2);
                }
                other => panic!("expected a ride, got {other:?}"),
            }
        }
    }

    #[test]
    fn backward_direction_uses_reverse_distances() {
        let cat = sample();
        let router = built(&cat, PathStrategy::OnDemand);

        let route = router.get_route_by_stops("C", "A").unwrap().unwrap();
        // 5 min wait + (1100 + 900) m at 1000 m/min
        assert_close(route.total_time, 7.0);
        assert_eq!(route.ride_count(), 1);
    }

    #[test]
    fn same_stop_is_empty_route() {
        let cat = sample();
        let router = built(&cat, PathStrategy::OnDemand);

        let route = router.get_route_by_stops("B", "B").unwrap().unwrap();
        assert_eq!(route.total_time, 0.0);
        assert!(route.items.is_empty());
    }

    #[test]
    fn unknown_stop_is_none() {
        let cat = sample();
        let router = built(&cat, PathStrategy::OnDemand);

        assert_eq!(router.get_route_by_stops("A", "Nowhere").unwrap(), None);
        assert_eq!(router.get_route_by_stops("Nowhere", "A").unwrap(), None);
    }

    #[test]
    fn disconnected_stops_are_unreachable() {
        let mut cat = sample();
        let x = cat.add_stop("X", Coordinates::new(56.0, 38.0)).unwrap();
        let y = cat.add_stop("Y", Coordinates::new(56.1, 38.1)).unwrap();
        cat.set_distance(x, y, 500).unwrap();
        cat.add_bus("island", vec![x, y], false).unwrap();

        for strategy in [PathStrategy::OnDemand, PathStrategy::Precomputed] {
            let router = built(&cat, strategy);
            assert_eq!(router.get_route_by_stops("A", "Y").unwrap(), None);
            assert!(router.get_route_by_stops("X", "Y").unwrap().is_some());
        }
    }

    #[test]
    fn transfer_picks_fastest_combination() {
        // Bus "slow" goes A-B-D the long way; bus "fast" hops B-D directly.
        let mut cat = TransportCatalogue::new();
        let a = cat.add_stop("A", Coordinates::new(0.0, 0.0)).unwrap();
        let b = cat.add_stop("B", Coordinates::new(0.0, 0.1)).unwrap();
        let c = cat.add_stop("C", Coordinates::new(0.0, 0.2)).unwrap();
        let d = cat.add_stop("D", Coordinates::new(0.0, 0.3)).unwrap();
        cat.set_distance(a, b, 1000).unwrap();
        cat.set_distance(b, c, 10_000).unwrap();
        cat.set_distance(c, d, 10_000).unwrap();
        cat.set_distance(b, d, 1000).unwrap();
        cat.add_bus("slow", vec![a, b, c, d], true).unwrap();
        cat.add_bus("fast", vec![b, d], true).unwrap();

        let router = TransportRouter::with_settings(RoutingSettings::new(2, 60.0));
        router.build_all_routes(&cat).unwrap();

        let route = router.get_route_by_stops("A", "D").unwrap().unwrap();
        // wait 2 + ride 1 + wait 2 + ride 1
        assert_close(route.total_time, 6.0);
        assert_eq!(route.ride_count(), 2);
        assert_eq!(
            route.items[2],
            Item::Wait {
                stop_name: "B".into(),
                time: 2.0
            }
        );
    }

    #[test]
    fn query_before_build_is_rejected() {
        let router = TransportRouter::with_settings(RoutingSettings::default());
        assert!(!router.is_built());
        assert_eq!(
            router.get_route_by_stops("A", "B").unwrap_err(),
            RouterError::NotBuilt
        );
    }

    #[test]
    fn build_without_settings_is_rejected() {
        let cat = sample();
        let router = TransportRouter::new();
        assert_eq!(
            router.build_all_routes(&cat).unwrap_err(),
            RouterError::SettingsNotSet
        );
    }

    #[test]
    fn failed_rebuild_keeps_previous_build() {
        let mut cat = sample();
        let router = built(&cat, PathStrategy::OnDemand);

        let a = cat.get_stop_by_name("A").unwrap().id();
        let z = cat.add_stop("Z", Coordinates::new(0.0, 0.0)).unwrap();
        cat.add_bus("broken", vec![a, z], true).unwrap();

        let err = router.build_all_routes(&cat).unwrap_err();
        assert!(matches!(
            err,
            RouterError::Catalogue(CatalogueError::MissingDistance { .. })
        ));
        assert!(router.get_route_by_stops("A", "C").unwrap().is_some());
    }

    #[test]
    fn rebuild_picks_up_catalogue_changes() {
        let mut cat = sample();
        let router = built(&cat, PathStrategy::OnDemand);

        let c = cat.get_stop_by_name("C").unwrap().id();
        let d = cat.add_stop("D", Coordinates::new(55.3, 37.3)).unwrap();
        cat.set_distance(c, d, 3000).unwrap();
        cat.add_bus("2", vec![c, d], true).unwrap();

        // Stale build does not know D
        assert_eq!(router.get_route_by_stops("A", "D").unwrap(), None);

        router.build_all_routes(&cat).unwrap();
        let route = router.get_route_by_stops("A", "D").unwrap().unwrap();
        // 5 + 2.2 + 5 + 3.0
        assert_close(route.total_time, 15.2);
    }

    #[test]
    fn repeated_queries_are_identical() {
        let cat = sample();
        let router = built(&cat, PathStrategy::OnDemand);
        let first = router.get_route_by_stops("A", "C").unwrap();
        for _ in 0..10 {
            assert_eq!(router.get_route_by_stops("A", "C").unwrap(), first);
        }
    }

    #[test]
    fn concurrent_queries_during_rebuild() {
        let cat = sample();
        let router = built(&cat, PathStrategy::OnDemand);
        let expected = router.get_route_by_stops("A", "C").unwrap();

        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    for _ in 0..50 {
                        assert_eq!(router.get_route_by_stops("A", "C").unwrap(), expected);
                    }
                });
            }
            scope.spawn(|| {
                for _ in 0..10 {
                    router.build_all_routes(&cat).unwrap();
                }
            });
        });
    }

    #[test]
    fn router_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TransportRouter>();
    }

    #[test]
    fn unused_stop_still_routable_to_itself() {
        let mut cat = sample();
        cat.add_stop("Lonely", Coordinates::new(1.0, 1.0)).unwrap();
        let router = built(&cat, PathStrategy::Precomputed);

        let route = router.get_route_by_stops("Lonely", "Lonely").unwrap();
        assert!(route.is_some());
        assert_eq!(router.get_route_by_stops("Lonely", "A").unwrap(), None);
    }
}
