use geo_services::Coordinate;
use serde::Serialize;

/// Label used when the provider returns no address for a place.
pub const ADDRESS_NOT_AVAILABLE: &str = "Address not available";

/// One place returned by a category browse, normalized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceResult {
    pub name: String,
    pub position: Coordinate,
    pub address: String,
    /// Metres from the search origin, as reported by the provider.
    pub distance: f64,
}

impl PlaceResult {
    /// Identity used for de-duplication across category codes.
    ///
    /// Two results are duplicates iff name and both coordinate components
    /// are exactly equal.
    pub fn dedup_key(&self) -> String {
        format!(
            "{}-{}-{}",
            self.name,
            self.position.lat(),
            self.position.lng()
        )
    }

    pub fn distance_km(&self) -> f64 {
        self.distance / 1000.0
    }
}

/// One autosuggest entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Coordinate>,
}
