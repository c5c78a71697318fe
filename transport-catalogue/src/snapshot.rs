//! Durable snapshots of a catalogue and its routing settings.
//!
//! Stops are keyed by their insertion index, so buses and distance entries
//! reference stops by a stable integer rather than by anything tied to one
//! process. Restoring replays the records in dependency order: stops, then
//! buses, then distances, then settings.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::catalogue::TransportCatalogue;
use crate::domain::{CatalogueError, Coordinates, StopId};
use crate::router::{RoutingSettings, TransportRouter};

/// Errors from saving, loading or restoring a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// Reading or writing the snapshot file failed
    #[error("snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The snapshot could not be encoded or decoded
    #[error("snapshot encoding error: {0}")]
    Encode(#[from] serde_json::Error),

    /// A bus or distance entry references a stop key that is not present
    #[error("snapshot references unknown stop key {0}")]
    UnknownStopKey(usize),

    /// Two stop records share a key
    #[error("snapshot contains stop key {0} more than once")]
    DuplicateStopKey(usize),

    /// Replaying a record into the catalogue failed
    #[error("catalogue error: {0}")]
    Catalogue(#[from] CatalogueError),
}

/// A stop and its stable key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopRecord {
    pub key: usize,
    pub name: String,
    pub coordinates: Coordinates,
}

/// A bus whose stops are given by key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusRecord {
    pub name: String,
    pub stops: Vec<usize>,
    pub is_roundtrip: bool,
}

/// One directed road distance, endpoints given by key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceRecord {
    pub from: usize,
    pub to: usize,
    pub meters: u32,
}

/// Everything needed to rebuild a catalogue and router.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub stops: Vec<StopRecord>,
    pub buses: Vec<BusRecord>,
    pub distances: Vec<DistanceRecord>,
    pub routing_settings: Option<RoutingSettings>,
}

impl Snapshot {
    /// Record the current state of a catalogue and router.
    pub fn capture(catalogue: &TransportCatalogue, router: &TransportRouter) -> Self {
        let stops = catalogue
            .stops_by_id()
            .iter()
            .map(|stop| StopRecord {
                key: stop.id().index(),
                name: stop.name().to_string(),
                coordinates: stop.coordinates(),
            })
            .collect();

        let buses = catalogue
            .buses()
            .map(|bus| BusRecord {
                name: bus.name().to_string(),
                stops: bus.stops().iter().map(|stop| stop.index()).collect(),
                is_roundtrip: bus.is_roundtrip(),
            })
            .collect();

        let distances = catalogue
            .distances()
            .into_iter()
            .map(|(from, to, meters)| DistanceRecord {
                from: from.index(),
                to: to.index(),
                meters,
            })
            .collect();

        Self {
            stops,
            buses,
            distances,
            routing_settings: router.settings(),
        }
    }

    /// Rebuild a catalogue and an (unbuilt) router from this snapshot.
    pub fn restore(&self) -> Result<(TransportCatalogue, TransportRouter), SnapshotError> {
        let mut catalogue = TransportCatalogue::new();
        let mut keys: HashMap<usize, StopId> = HashMap::with_capacity(self.stops.len());

        for record in &self.stops {
            if keys.contains_key(&record.key) {
                return Err(SnapshotError::DuplicateStopKey(record.key));
            }
            let id = catalogue.add_stop(record.name.clone(), record.coordinates)?;
            keys.insert(record.key, id);
        }

        let resolve = |key: usize| {
            keys.get(&key)
                .copied()
                .ok_or(SnapshotError::UnknownStopKey(key))
        };

        for record in &self.buses {
            let stops = record
                .stops
                .iter()
                .map(|&key| resolve(key))
                .collect::<Result<Vec<_>, _>>()?;
            catalogue.add_bus(record.name.clone(), stops, record.is_roundtrip)?;
        }

        for record in &self.distances {
            catalogue.set_distance(resolve(record.from)?, resolve(record.to)?, record.meters)?;
        }

        let router = match self.routing_settings {
            Some(settings) => TransportRouter::with_settings(settings),
            None => TransportRouter::new(),
        };

        Ok((catalogue, router))
    }
}

/// Reads and writes snapshots at a fixed path.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Write a snapshot, replacing any existing file.
    ///
    /// Creates parent directories if they don't exist.
    pub fn save(&self, snapshot: &Snapshot) -> Result<(), SnapshotError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        let bytes = serde_json::to_vec(snapshot)?;
        std::fs::write(&self.path, &bytes)?;

        info!(
            path = %self.path.display(),
            stops = snapshot.stops.len(),
            buses = snapshot.buses.len(),
            bytes = bytes.len(),
            "snapshot saved"
        );
        Ok(())
    }

    /// Read a snapshot.
    pub fn load(&self) -> Result<Snapshot, SnapshotError> {
        let bytes = std::fs::read(&self.path)?;
        let snapshot: Snapshot = serde_json::from_slice(&bytes)?;

        info!(
            path = %self.path.display(),
            stops = snapshot.stops.len(),
            buses = snapshot.buses.len(),
            "snapshot loaded"
        );
        Ok(snapshot)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
