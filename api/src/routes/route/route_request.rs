use geo_services::{Coordinate, LatLng};
use serde::Deserialize;

/// Unvalidated endpoints; out-of-range values are reported as invalid
/// route endpoints rather than as a JSON error.
#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    #[serde(default)]
    pub origin: Option<LatLng>,
    #[serde(default)]
    pub destination: Option<LatLng>,
}

impl RouteRequest {
    /// `(origin, destination)`; an invalid coordinate becomes `None`.
    pub fn endpoints(&self) -> (Option<Coordinate>, Option<Coordinate>) {
        let valid = |p: Option<LatLng>| p.and_then(|p| Coordinate::try_from(p).ok());
        (valid(self.origin), valid(self.destination))
    }

    /// An origin that was sent but is not a valid coordinate.
    pub fn has_invalid_origin(&self) -> bool {
        self.origin.is_some_and(|p| Coordinate::try_from(p).is_err())
    }
}
