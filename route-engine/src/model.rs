//! Resolved route model. Every position is absolute; nothing here refers back
//! to raw offsets, so rendering never needs the encoded geometry.

use geo_services::{BoundingBox, Coordinate};
use serde::Serialize;

use crate::{
    errors::DataIntegrityFault,
    polyline::ThirdDimension,
    provider::{Incident, TravelSummary},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub sections: Vec<RouteSection>,
    /// Sum over sections that reported a summary.
    pub summary: TravelSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<BoundingBox>,
}

impl Route {
    /// Every path point of every section, in order.
    pub fn all_points(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.sections.iter().flat_map(|s| s.path.iter().copied())
    }

    pub fn faults(&self) -> impl Iterator<Item = &DataIntegrityFault> {
        self.sections.iter().flat_map(|s| s.faults.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Encoded geometry as received, for clients that draw it natively.
    pub polyline: String,
    pub path: Vec<Coordinate>,
    /// Third component per point when the geometry carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub third: Option<ThirdComponent>,
    pub maneuvers: Vec<ResolvedManeuver>,
    pub incidents: Vec<ResolvedIncident>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<TravelSummary>,
    /// Annotations that could not be resolved and were skipped.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub faults: Vec<DataIntegrityFault>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThirdComponent {
    pub dimension: ThirdDimension,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedManeuver {
    pub offset: usize,
    pub position: Coordinate,
    pub instruction: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length_meters: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedIncident {
    /// Start of the span the incident was reported on.
    pub anchor: Coordinate,
    pub span_offset: usize,
    /// Index into the section's incident list.
    pub index: usize,
    pub incident: Incident,
}

/// `"{m} minutes {s} seconds."`
pub fn format_duration(secs: u64) -> String {
    format!("{} minutes {} seconds.", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_render_as_minutes_and_seconds() {
        assert_eq!(format_duration(0), "0 minutes 0 seconds.");
        assert_eq!(format_duration(59), "0 minutes 59 seconds.");
        assert_eq!(format_duration(754), "12 minutes 34 seconds.");
        assert_eq!(format_duration(3600), "60 minutes 0 seconds.");
    }
}
