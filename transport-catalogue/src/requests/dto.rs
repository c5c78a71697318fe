//! Data transfer objects for the JSON request and response documents.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::router::{Item, RouteResult, RoutingSettings};

/// A whole input document.
///
/// Every section is optional; which ones are required depends on the mode.
/// Unknown sections (e.g. `render_settings`) are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct InputDocument {
    /// Where the snapshot lives
    pub serialization_settings: Option<SerializationSettings>,

    /// Wait time and bus speed
    pub routing_settings: Option<RoutingSettings>,

    /// Stops and buses to add
    #[serde(default)]
    pub base_requests: Vec<BaseRequest>,

    /// Queries to answer
    #[serde(default)]
    pub stat_requests: Vec<StatRequest>,
}

/// Snapshot file location.
#[derive(Debug, Clone, Deserialize)]
pub struct SerializationSettings {
    pub file: PathBuf,
}

/// A request to add data to the catalogue.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum BaseRequest {
    Stop(StopRequest),
    Bus(BusRequest),
}

/// Add a stop, plus road distances from it to other stops.
#[derive(Debug, Clone, Deserialize)]
pub struct StopRequest {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Destination stop name → metres
    #[serde(default)]
    pub road_distances: BTreeMap<String, u32>,
}

/// Add a bus.
#[derive(Debug, Clone, Deserialize)]
pub struct BusRequest {
    pub name: String,
    pub stops: Vec<String>,
    pub is_roundtrip: bool,
}

/// A query against the catalogue or router.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum StatRequest {
    /// Route statistics for a bus
    Bus { id: i64, name: String },
    /// Buses serving a stop
    Stop { id: i64, name: String },
    /// Fastest itinerary between two stops
    Route { id: i64, from: String, to: String },
    /// Rendered map (not supported)
    Map { id: i64 },
}

impl StatRequest {
    pub fn id(&self) -> i64 {
        match self {
            StatRequest::Bus { id, .. }
            | StatRequest::Stop { id, .. }
            | StatRequest::Route { id, .. }
            | StatRequest::Map { id } => *id,
        }
    }
}

/// Message used for every not-found answer.
pub const NOT_FOUND: &str = "not found";

/// One answer, in the same position as its request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StatResponse {
    Bus {
        request_id: i64,
        /// Road length over great-circle length; null if the route has no
        /// geometric extent
        curvature: Option<f64>,
        /// Road length in metres
        route_length: f64,
        stop_count: usize,
        unique_stop_count: usize,
    },
    Stop {
        request_id: i64,
        buses: Vec<String>,
    },
    Route {
        request_id: i64,
        total_time: f64,
        items: Vec<ItemDto>,
    },
    Error {
        request_id: i64,
        error_message: String,
    },
}

impl StatResponse {
    pub fn not_found(request_id: i64) -> Self {
        Self::error(request_id, NOT_FOUND)
    }

    pub fn error(request_id: i64, message: impl Into<String>) -> Self {
        StatResponse::Error {
            request_id,
            error_message: message.into(),
        }
    }

    pub fn route(request_id: i64, route: RouteResult) -> Self {
        StatResponse::Route {
            request_id,
            total_time: route.total_time,
            items: route.items.into_iter().map(ItemDto::from).collect(),
        }
    }
}

/// One itinerary leg as rendered in a route answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum ItemDto {
    Wait {
        stop_name: String,
        time: f64,
    },
    Bus {
        bus: String,
        span_count: usize,
        time: f64,
    },
}

impl From<Item> for ItemDto {
    fn from(item: Item) -> Self {
        match item {
            Item::Wait { stop_name, time } => ItemDto::Wait { stop_name, time },
            Item::Ride {
                bus_name,
                time,
                span_count,
            } => ItemDto::Bus {
                bus: bus_name,
                span_count,
                time,
            },
        }
    }
}
