//! Routing provider seam and its wire model.
//!
//! The wire types mirror the HERE Routing v8 response; unknown fields are
//! ignored and every annotation field is optional so a partially populated
//! section still deserializes. Offsets and incident indexes are kept signed;
//! range checks happen during projection.

pub mod here;

use futures::future::BoxFuture;
use geo_services::{Coordinate, ProviderError};
use serde::{Deserialize, Deserializer, Serialize};

pub use here::HereRouterClient;

/// Payload sections requested from the router.
pub const RETURN_FIELDS: &str = "polyline,turnByTurnActions,actions,instructions,incidents,travelSummary";

/// Span attributes requested from the router.
pub const SPAN_FIELDS: &str = "incidents";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutingMode {
    Fast,
}

impl RoutingMode {
    pub fn as_str(self) -> &'static str {
        match self {
            RoutingMode::Fast => "fast",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportMode {
    Car,
}

impl TransportMode {
    pub fn as_str(self) -> &'static str {
        match self {
            TransportMode::Car => "car",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteRequest {
    pub origin: Coordinate,
    pub destination: Coordinate,
    pub routing_mode: RoutingMode,
    pub transport_mode: TransportMode,
}

impl RouteRequest {
    /// Fastest car route, the only mode the planner issues.
    pub fn fast_car(origin: Coordinate, destination: Coordinate) -> Self {
        Self {
            origin,
            destination,
            routing_mode: RoutingMode::Fast,
            transport_mode: TransportMode::Car,
        }
    }
}

/// Single-shot route calculation.
pub trait RoutingProvider: Send + Sync {
    /// Candidate routes, best first. An empty list means "no route".
    fn calculate_route<'a>(
        &'a self,
        request: &'a RouteRequest,
    ) -> BoxFuture<'a, Result<Vec<RawRoute>, ProviderError>>;
}

/* --- wire types ------------------------------------------------------------ */

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouterResponse {
    #[serde(default)]
    pub routes: Vec<RawRoute>,
    #[serde(default)]
    pub notices: Vec<RouterNotice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouterNotice {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub code: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRoute {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub sections: Vec<RawSection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSection {
    #[serde(default)]
    pub id: Option<String>,
    pub polyline: String,
    #[serde(default)]
    pub actions: Vec<RawAction>,
    #[serde(default)]
    pub incidents: Vec<Incident>,
    #[serde(default)]
    pub spans: Vec<RawSpan>,
    #[serde(default)]
    pub travel_summary: Option<TravelSummary>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAction {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub instruction: Option<String>,
    #[serde(default)]
    pub offset: Option<i64>,
    /// Seconds.
    #[serde(default)]
    pub duration: Option<u64>,
    /// Metres.
    #[serde(default)]
    pub length: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSpan {
    #[serde(default)]
    pub offset: Option<i64>,
    #[serde(default, alias = "incidentIndexes")]
    pub incidents: Vec<i64>,
}

/// Traffic incident. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "text_or_localized", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criticality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, alias = "validFrom", skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, alias = "validUntil", skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
}

/// Duration (seconds) and length (metres) of a section or a whole route.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TravelSummary {
    #[serde(default)]
    pub duration: u64,
    #[serde(default)]
    pub length: u64,
}

/// Accepts `"text"` or `{ "value": "text", ... }`.
fn text_or_localized<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Text {
        Plain(String),
        Localized { value: String },
    }

    Ok(Option::<Text>::deserialize(de)?.map(|t| match t {
        Text::Plain(s) => s,
        Text::Localized { value } => value,
    }))
}
