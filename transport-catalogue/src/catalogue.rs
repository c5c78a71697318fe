//! The transport catalogue: canonical store of stops, buses and road
//! distances.
//!
//! Records live in append-only vectors and are addressed by their insertion
//! index ([`StopId`] / [`BusId`]). Name indexes are ordered maps, so
//! iteration over stops and buses is always name-ordered.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use tracing::{debug, warn};

use crate::domain::{
    Bus, BusId, BusInfo, CatalogueError, Coordinates, Stop, StopId, compute_distance,
};

/// In-memory store of stops, buses and directed road distances.
#[derive(Debug, Clone, Default)]
pub struct TransportCatalogue {
    stops: Vec<Stop>,
    buses: Vec<Bus>,
    stop_index: BTreeMap<String, StopId>,
    bus_index: BTreeMap<String, BusId>,
    /// Directed road distances in metres, keyed by (from, to).
    distances: HashMap<(StopId, StopId), u32>,
    /// Buses whose declared sequence visits each stop, indexed by stop id.
    buses_at_stop: Vec<BTreeSet<BusId>>,
}

impl TransportCatalogue {
    /// Create an empty catalogue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a stop.
    ///
    /// Names are unique: adding a second stop with an existing name is
    /// rejected and leaves the catalogue unchanged.
    pub fn add_stop(
        &mut self,
        name: impl Into<String>,
        coordinates: Coordinates,
    ) -> Result<StopId, CatalogueError> {
        let name = name.into();
        if self.stop_index.contains_key(&name) {
            warn!(stop = %name, "rejecting duplicate stop");
            return Err(CatalogueError::DuplicateStop(name));
        }

        let id = StopId(self.stops.len());
        self.stop_index.insert(name.clone(), id);
        self.stops.push(Stop {
            id,
            name,
            coordinates,
        });
        self.buses_at_stop.push(BTreeSet::new());

        Ok(id)
    }

    /// Record the road distance from `from` to `to`, in metres.
    ///
    /// Overwrites any earlier entry for the same ordered pair. The reverse
    /// pair is left alone.
    pub fn set_distance(
        &mut self,
        from: StopId,
        to: StopId,
        meters: u32,
    ) -> Result<(), CatalogueError> {
        self.check_stop(from)?;
        self.check_stop(to)?;
        self.distances.insert((from, to), meters);
        Ok(())
    }

    /// Add a bus route over already-added stops.
    ///
    /// The stop sequence must be non-empty and may repeat stops. Bus names
    /// are unique, like stop names.
    pub fn add_bus(
        &mut self,
        name: impl Into<String>,
        stops: Vec<StopId>,
        is_roundtrip: bool,
    ) -> Result<BusId, CatalogueError> {
        let name = name.into();
        if self.bus_index.contains_key(&name) {
            warn!(bus = %name, "rejecting duplicate bus");
            return Err(CatalogueError::DuplicateBus(name));
        }
        if stops.is_empty() {
            return Err(CatalogueError::EmptyRoute(name));
        }
        for &stop in &stops {
            self.check_stop(stop)?;
        }

        let id = BusId(self.buses.len());
        for &stop in &stops {
            self.buses_at_stop[stop.0].insert(id);
        }
        self.bus_index.insert(name.clone(), id);
        self.buses.push(Bus {
            id,
            name,
            stops,
            is_roundtrip,
        });

        Ok(id)
    }

    /// Resolve stop names to ids, failing on the first unknown name.
    pub fn resolve_stops<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<StopId>, CatalogueError> {
        names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                self.stop_index
                    .get(name)
                    .copied()
                    .ok_or_else(|| CatalogueError::UnknownStop(name.to_string()))
            })
            .collect()
    }

    /// Look up a stop by exact name.
    pub fn get_stop_by_name(&self, name: &str) -> Option<&Stop> {
        self.stop_index.get(name).map(|id| &self.stops[id.0])
    }

    /// Look up a bus by exact name.
    pub fn get_bus_by_name(&self, name: &str) -> Option<&Bus> {
        self.bus_index.get(name).map(|id| &self.buses[id.0])
    }

    /// Look up a stop by id.
    pub fn stop(&self, id: StopId) -> Option<&Stop> {
        self.stops.get(id.0)
    }

    /// Look up a bus by id.
    pub fn bus(&self, id: BusId) -> Option<&Bus> {
        self.buses.get(id.0)
    }

    /// Road distance from `from` to `to`, in metres.
    ///
    /// Falls back to the `to → from` entry when the forward one was never
    /// recorded. Fails with [`CatalogueError::MissingDistance`] if neither
    /// exists.
    pub fn get_distance(&self, from: StopId, to: StopId) -> Result<u32, CatalogueError> {
        self.distances
            .get(&(from, to))
            .or_else(|| self.distances.get(&(to, from)))
            .copied()
            .ok_or_else(|| CatalogueError::MissingDistance {
                from: self.stop_name(from),
                to: self.stop_name(to),
            })
    }

    /// Names of the buses that visit a stop, sorted by name.
    ///
    /// Returns `None` if the stop is unknown, and an empty list if the stop
    /// exists but no bus serves it.
    pub fn get_buses_by_stop(&self, name: &str) -> Option<Vec<&str>> {
        let id = self.stop_index.get(name)?;
        let mut names: Vec<&str> = self.buses_at_stop[id.0]
            .iter()
            .map(|bus| self.buses[bus.0].name.as_str())
            .collect();
        names.sort_unstable();
        Some(names)
    }

    /// Compute route statistics for a bus over its full itinerary.
    ///
    /// Fails with [`CatalogueError::UnknownBus`] if `bus` was not added to
    /// this catalogue.
    pub fn get_bus_info(&self, bus: &Bus) -> Result<BusInfo, CatalogueError> {
        if self.buses.get(bus.id.0) != Some(bus) {
            return Err(CatalogueError::UnknownBus(bus.name.clone()));
        }

        let route = bus.full_route();
        let unique: HashSet<StopId> = route.iter().copied().collect();

        let mut route_length = 0.0;
        let mut real_route_length = 0.0;
        for pair in route.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            route_length += compute_distance(self.coordinates(from)?, self.coordinates(to)?);
            real_route_length += f64::from(self.get_distance(from, to)?);
        }

        debug!(bus = %bus.name, stops = route.len(), "computed bus info");

        Ok(BusInfo {
            stops_number: route.len(),
            unique_stop_number: unique.len(),
            route_length,
            real_route_length,
        })
    }

    /// All stops, ordered by name.
    pub fn stops(&self) -> impl Iterator<Item = &Stop> + '_ {
        self.stop_index.values().map(|id| &self.stops[id.0])
    }

    /// All buses, ordered by name.
    pub fn buses(&self) -> impl Iterator<Item = &Bus> + '_ {
        self.bus_index.values().map(|id| &self.buses[id.0])
    }

    /// All stops in insertion order (i.e. by id).
    pub fn stops_by_id(&self) -> &[Stop] {
        &self.stops
    }

    /// All recorded directed distances, ordered by (from, to).
    pub fn distances(&self) -> Vec<(StopId, StopId, u32)> {
        let mut entries: Vec<_> = self
            .distances
            .iter()
            .map(|(&(from, to), &meters)| (from, to, meters))
            .collect();
        entries.sort_unstable_by_key(|&(from, to, _)| (from, to));
        entries
    }

    /// Number of stops.
    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    /// Number of buses.
    pub fn bus_count(&self) -> usize {
        self.buses.len()
    }

    fn check_stop(&self, id: StopId) -> Result<(), CatalogueError> {
        if id.0 < self.stops.len() {
            Ok(())
        } else {
            Err(CatalogueError::UnknownStopId(id))
        }
    }

    fn coordinates(&self, id: StopId) -> Result<Coordinates, CatalogueError> {
        self.stop(id)
            .map(Stop::coordinates)
            .ok_or(CatalogueError::UnknownStopId(id))
    }

    fn stop_name(&self, id: StopId) -> String {
        self.stops
            .get(id.0)
            .map(|s| s.name.clone())
            .unwrap_or_else(|| format!("#{}", id.0))
    }
}
