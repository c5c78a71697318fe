//! Domain types for the transport catalogue.
//!
//! Stops and buses are created by the catalogue and handed out by
//! reference. Cross references between them use stable integer ids, never
//! memory addresses, so the whole model can be persisted and restored.

mod bus;
mod error;
mod geo;
mod stop;

pub use bus::{Bus, BusId, BusInfo};
pub use error::CatalogueError;
pub use geo::{Coordinates, compute_distance};
pub use stop::{Stop, StopId};
