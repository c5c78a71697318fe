//! Request handling: fills the catalogue from base requests and answers
//! stat requests against the catalogue and router.

use tracing::{debug, warn};

use crate::catalogue::TransportCatalogue;
use crate::domain::{BusInfo, CatalogueError, Coordinates, Stop, StopId};
use crate::router::{RouteResult, TransportRouter};

use super::RequestError;
use super::dto::{BaseRequest, BusRequest, StatRequest, StatResponse, StopRequest};

/// Add every base request to the catalogue.
///
/// Stops go in first, then the road distances declared on them, then the
/// buses, so a request may refer to stops declared after it.
pub fn populate(
    catalogue: &mut TransportCatalogue,
    requests: &[BaseRequest],
) -> Result<(), RequestError> {
    let mut stops: Vec<&StopRequest> = Vec::new();
    let mut buses: Vec<&BusRequest> = Vec::new();
    for request in requests {
        match request {
            BaseRequest::Stop(stop) => stops.push(stop),
            BaseRequest::Bus(bus) => buses.push(bus),
        }
    }

    for stop in &stops {
        catalogue.add_stop(
            stop.name.clone(),
            Coordinates::new(stop.latitude, stop.longitude),
        )?;
    }

    for stop in &stops {
        let from = stop_id(catalogue, &stop.name)?;
        for (to_name, &meters) in &stop.road_distances {
            let to = stop_id(catalogue, to_name)?;
            catalogue.set_distance(from, to, meters)?;
        }
    }

    for bus in &buses {
        let route = catalogue.resolve_stops(&bus.stops)?;
        catalogue.add_bus(bus.name.clone(), route, bus.is_roundtrip)?;
    }

    debug!(
        stops = stops.len(),
        buses = buses.len(),
        "catalogue populated"
    );
    Ok(())
}

fn stop_id(catalogue: &TransportCatalogue, name: &str) -> Result<StopId, CatalogueError> {
    catalogue
        .get_stop_by_name(name)
        .map(Stop::id)
        .ok_or_else(|| CatalogueError::UnknownStop(name.to_string()))
}

/// Façade over the catalogue and router for answering queries.
#[derive(Debug, Clone, Copy)]
pub struct RequestHandler<'a> {
    catalogue: &'a TransportCatalogue,
    router: &'a TransportRouter,
}

impl<'a> RequestHandler<'a> {
    pub fn new(catalogue: &'a TransportCatalogue, router: &'a TransportRouter) -> Self {
        Self { catalogue, router }
    }

    /// Route statistics for a bus, or `None` if the bus is unknown.
    pub fn bus_info(&self, name: &str) -> Result<Option<BusInfo>, RequestError> {
        match self.catalogue.get_bus_by_name(name) {
            Some(bus) => Ok(Some(self.catalogue.get_bus_info(bus)?)),
            None => Ok(None),
        }
    }

    /// Buses serving a stop, sorted by name; `None` if the stop is unknown.
    pub fn buses_by_stop(&self, name: &str) -> Option<Vec<&'a str>> {
        self.catalogue.get_buses_by_stop(name)
    }

    /// Fastest itinerary between two stops.
    pub fn route(&self, from: &str, to: &str) -> Result<Option<RouteResult>, RequestError> {
        Ok(self.router.get_route_by_stops(from, to)?)
    }

    /// Answer one stat request.
    pub fn answer(&self, request: &StatRequest) -> Result<StatResponse, RequestError> {
        let id = request.id();
        let response = match request {
            StatRequest::Bus { name, .. } => match self.bus_info(name)? {
                Some(info) => StatResponse::Bus {
                    request_id: id,
                    curvature: info.curvature(),
                    route_length: info.real_route_length,
                    stop_count: info.stops_number,
                    unique_stop_count: info.unique_stop_number,
                },
                None => StatResponse::not_found(id),
            },
            StatRequest::Stop { name, .. } => match self.buses_by_stop(name) {
                Some(buses) => StatResponse::Stop {
                    request_id: id,
                    buses: buses.into_iter().map(str::to_string).collect(),
                },
                None => StatResponse::not_found(id),
            },
            StatRequest::Route { from, to, .. } => match self.route(from, to)? {
                Some(route) => StatResponse::route(id, route),
                None => StatResponse::not_found(id),
            },
            StatRequest::Map { .. } => {
                warn!(request_id = id, "map rendering is not supported");
                StatResponse::error(id, "map rendering is not supported")
            }
        };
        Ok(response)
    }

    /// Answer every stat request, in order.
    pub fn answer_all(
        &self,
        requests: &[StatRequest],
    ) -> Result<Vec<StatResponse>, RequestError> {
        requests.iter().map(|request| self.answer(request)).collect()
    }
}
