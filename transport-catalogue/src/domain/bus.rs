//! Bus routes and derived route statistics.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::StopId;

/// Stable identity of a bus inside one catalogue (insertion index).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BusId(pub(crate) usize);

impl BusId {
    /// Returns the underlying insertion index.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Debug for BusId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BusId({})", self.0)
    }
}

/// A named bus route.
///
/// For a round-trip bus the stop sequence already closes the loop. For any
/// other bus the sequence is one direction of an out-and-back route.
#[derive(Debug, Clone, PartialEq)]
pub struct Bus {
    pub(crate) id: BusId,
    pub(crate) name: String,
    pub(crate) stops: Vec<StopId>,
    pub(crate) is_roundtrip: bool,
}

impl Bus {
    /// Returns the bus's stable id.
    pub fn id(&self) -> BusId {
        self.id
    }

    /// Returns the bus's unique name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared stop sequence.
    pub fn stops(&self) -> &[StopId] {
        &self.stops
    }

    /// Returns true if the declared sequence is a closed loop.
    pub fn is_roundtrip(&self) -> bool {
        self.is_roundtrip
    }

    /// Returns the full itinerary the bus actually drives.
    ///
    /// Round-trip buses drive the declared sequence. Out-and-back buses
    /// drive it forwards and then backwards, without repeating the far end.
    ///
    /// ```text
    /// [A, B, C] (not round-trip) -> [A, B, C, B, A]
    /// ```
    pub fn full_route(&self) -> Vec<StopId> {
        if self.is_roundtrip {
            return self.stops.clone();
        }

        let mut route = self.stops.clone();
        route.extend(self.stops.iter().rev().skip(1));
        route
    }
}

impl fmt::Display for Bus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Aggregate statistics for one bus, computed over its full itinerary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BusInfo {
    /// Stops visited along the full itinerary, repeats included.
    pub stops_number: usize,
    /// Distinct stops on the route.
    pub unique_stop_number: usize,
    /// Sum of great-circle distances between consecutive stops (metres).
    pub route_length: f64,
    /// Sum of tabulated road distances between consecutive stops (metres).
    pub real_route_length: f64,
}

impl BusInfo {
    /// Ratio of road length to great-circle length.
    ///
    /// Returns `None` when the geometric length is zero (e.g. every stop
    /// shares one position).
    pub fn curvature(&self) -> Option<f64> {
        (self.route_length > 0.0).then(|| self.real_route_length / self.route_length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bus(stops: &[usize], is_roundtrip: bool) -> Bus {
        Bus {
            id: BusId(0),
            name: "14".to_string(),
            stops: stops.iter().copied().map(StopId).collect(),
            is_roundtrip,
        }
    }

    #[test]
    fn full_route_out_and_back() {
        let b = bus(&[0, 1, 2], false);
        assert_eq!(
            b.full_route(),
            vec![StopId(0), StopId(1), StopId(2), StopId(1), StopId(0)]
        );
    }

    #[test]
    fn full_route_roundtrip_is_unchanged() {
        let b = bus(&[0, 1, 2, 0], true);
        assert_eq!(b.full_route(), b.stops().to_vec());
    }

    #[test]
    fn full_route_single_stop() {
        let b = bus(&[3], false);
        assert_eq!(b.full_route(), vec![StopId(3)]);
    }

    #[test]
    fn curvature() {
        let info = BusInfo {
            stops_number: 3,
            unique_stop_number: 2,
            route_length: 1000.0,
            real_route_length: 1500.0,
        };
        assert_eq!(info.curvature(), Some(1.5));

        let flat = BusInfo {
            route_length: 0.0,
            ..info
        };
        assert_eq!(flat.curvature(), None);
    }
}
