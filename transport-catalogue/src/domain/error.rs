//! Domain error types.
//!
//! These errors represent rejected input and data inconsistencies in the
//! catalogue. Plain "not found" lookups are not errors; they return `None`.

use super::StopId;

/// Catalogue-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogueError {
    /// A stop with this name was already added
    #[error("stop {0:?} already exists")]
    DuplicateStop(String),

    /// A bus with this name was already added
    #[error("bus {0:?} already exists")]
    DuplicateBus(String),

    /// A name refers to a stop that was never added
    #[error("unknown stop {0:?}")]
    UnknownStop(String),

    /// A bus does not belong to this catalogue
    #[error("unknown bus {0:?}")]
    UnknownBus(String),

    /// An id does not belong to this catalogue
    #[error("unknown stop id {}", .0.index())]
    UnknownStopId(StopId),

    /// A bus was declared without any stops
    #[error("bus {0:?} has no stops")]
    EmptyRoute(String),

    /// Neither direction of a required road distance was recorded
    #[error("no road distance recorded between {from:?} and {to:?} in either direction")]
    MissingDistance { from: String, to: String },
}
