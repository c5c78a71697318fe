//! JSON request/response transcoding.
//!
//! Two entry points mirror the binary's modes: [`make_base`] reads base
//! requests and writes a snapshot; [`process_requests`] restores that
//! snapshot, builds routes and answers stat requests.

mod dto;
mod handler;

use std::io::{Read, Write};

use tracing::info;

pub use dto::{
    BaseRequest, BusRequest, InputDocument, ItemDto, NOT_FOUND, SerializationSettings, StatRequest,
    StatResponse, StopRequest,
};
pub use handler::{RequestHandler, populate};

use crate::catalogue::TransportCatalogue;
use crate::domain::CatalogueError;
use crate::router::{RouterError, TransportRouter};
use crate::snapshot::{Snapshot, SnapshotError, SnapshotStore};

/// Errors from reading requests or producing responses.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// Input or output is not valid JSON for the expected document
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing the response failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A required section is absent from the input document
    #[error("missing {0} section")]
    MissingSection(&'static str),

    /// Catalogue data is inconsistent
    #[error("catalogue error: {0}")]
    Catalogue(#[from] CatalogueError),

    /// Routing failed
    #[error("routing error: {0}")]
    Router(#[from] RouterError),

    /// Snapshot could not be written or read
    #[error("snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),
}

/// Populate a catalogue from `input` and save it, with the routing
/// settings, to the snapshot file named in the document.
pub fn make_base(input: impl Read) -> Result<(), RequestError> {
    let doc: InputDocument = serde_json::from_reader(input)?;
    let serialization = doc
        .serialization_settings
        .ok_or(RequestError::MissingSection("serialization_settings"))?;

    let mut catalogue = TransportCatalogue::new();
    populate(&mut catalogue, &doc.base_requests)?;

    let mut router = TransportRouter::new();
    if let Some(settings) = doc.routing_settings {
        router.set_settings(settings);
    }

    let snapshot = Snapshot::capture(&catalogue, &router);
    SnapshotStore::new(serialization.file).save(&snapshot)?;

    info!(
        stops = catalogue.stop_count(),
        buses = catalogue.bus_count(),
        "base created"
    );
    Ok(())
}

/// Answer the stat requests in `input` against the snapshot named in the
/// document, writing a JSON array of responses to `output`.
pub fn process_requests(input: impl Read, mut output: impl Write) -> Result<(), RequestError> {
    let doc: InputDocument = serde_json::from_reader(input)?;
    let serialization = doc
        .serialization_settings
        .ok_or(RequestError::MissingSection("serialization_settings"))?;

    let snapshot = SnapshotStore::new(serialization.file).load()?;
    let (catalogue, mut router) = snapshot.restore()?;
    if let Some(settings) = doc.routing_settings {
        router.set_settings(settings);
    }

    let needs_routes = doc
        .stat_requests
        .iter()
        .any(|request| matches!(request, StatRequest::Route { .. }));
    if needs_routes {
        router.build_all_routes(&catalogue)?;
    }

    let handler = RequestHandler::new(&catalogue, &router);
    let responses = handler.answer_all(&doc.stat_requests)?;

    serde_json::to_writer_pretty(&mut output, &responses)?;
    writeln!(output)?;
    output.flush()?;

    info!(answered = responses.len(), "requests processed");
    Ok(())
}
