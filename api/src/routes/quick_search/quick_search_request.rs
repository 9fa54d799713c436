use geo_services::Coordinate;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct QuickSearchRequest {
    /// Category label from `GET /categories`, matched exactly.
    pub label: String,
    /// Search origin; the device location is used when absent.
    #[serde(default)]
    pub origin: Option<Coordinate>,
}
