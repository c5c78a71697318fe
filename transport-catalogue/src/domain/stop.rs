//! Stop records and their stable identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Coordinates;

/// Stable identity of a stop inside one catalogue.
///
/// Ids are insertion indices: the first stop added gets `StopId(0)`, and an
/// id never changes or gets reused. This makes them safe to persist.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StopId(pub(crate) usize);

impl StopId {
    /// Returns the underlying insertion index.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Debug for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopId({})", self.0)
    }
}

/// A named stop with a geographic position.
///
/// Stops are created by the catalogue and are immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub(crate) id: StopId,
    pub(crate) name: String,
    pub(crate) coordinates: Coordinates,
}

impl Stop {
    /// Returns the stop's stable id.
    pub fn id(&self) -> StopId {
        self.id
    }

    /// Returns the stop's unique name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the stop's coordinates.
    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }
}

impl fmt::Display for Stop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
