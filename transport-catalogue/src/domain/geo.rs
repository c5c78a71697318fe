//! Geographic coordinates and great-circle distance.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in metres.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A point on the Earth's surface, in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lng: f64,
}

impl Coordinates {
    /// Create coordinates from latitude and longitude.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Great-circle ("as the crow flies") distance in metres.
///
/// Only used for reporting route geometry; routing costs come from the
/// tabulated road distances.
///
/// # Examples
///
/// ```
/// use transport_catalogue::domain::{Coordinates, compute_distance};
///
/// let a = Coordinates::new(55.0, 37.0);
/// assert_eq!(compute_distance(a, a), 0.0);
/// ```
pub fn compute_distance(from: Coordinates, to: Coordinates) -> f64 {
    if from == to {
        return 0.0;
    }

    let lat_from = from.lat.to_radians();
    let lat_to = to.lat.to_radians();
    let dlng = (from.lng - to.lng).abs().to_radians();

    // Rounding can push the cosine just outside [-1, 1] for nearby points
    let cos_angle = lat_from.sin() * lat_to.sin() + lat_from.cos() * lat_to.cos() * dlng.cos();
    cos_angle.clamp(-1.0, 1.0).acos() * EARTH_RADIUS_M
}
