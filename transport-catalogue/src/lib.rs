//! Transit catalogue and router.
//!
//! Stores stops, buses and road distances, answers route statistics and
//! finds the fastest itinerary between two stops, counting both the time
//! spent waiting for a bus and the time spent riding it.

pub mod catalogue;
pub mod domain;
pub mod graph;
pub mod requests;
pub mod router;
pub mod snapshot;
