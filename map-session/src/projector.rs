//! Turns search/route results into draw instructions for a rendering surface.
//!
//! The projector is pure: it never talks to a surface itself. Whoever owns the
//! surface applies the returned batch in order.

use std::fmt::Display;

use geo_services::{BoundingBox, Coordinate};
use place_search::PlaceResult;
use route_engine::{ResolvedIncident, Route};
use serde::Serialize;

pub const NO_RESULTS: &str = "No results found";
pub const CURRENT_LOCATION: &str = "Current Location";
/// Zoom applied when centering on the caller's own position.
pub const LOCATION_ZOOM: u8 = 15;

const ROUTE_STROKE: &str = "rgba(0, 128, 255, 0.7)";
const ROUTE_WIDTH: u8 = 4;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    /// Remove every marker and polyline.
    ClearAll,
    ClearPopups,
    AddMarker(Marker),
    AddPolyline(PolylineShape),
    FitBounds(BoundingBox),
    Center {
        position: Coordinate,
        #[serde(skip_serializing_if = "Option::is_none")]
        zoom: Option<u8>,
    },
    /// Informational message, not an error dialog.
    Notice { message: String },
    /// Blocking error dialog.
    Alert { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    Place,
    Address,
    CurrentLocation,
    Maneuver,
    Incident,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub kind: MarkerKind,
    pub position: Coordinate,
    pub title: String,
    /// Popup body lines below the title.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub lines: Vec<String>,
    /// Target for a "Get Directions" action in the popup.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directions_to: Option<Coordinate>,
    /// Popup shown immediately rather than on tap.
    pub popup_open: bool,
}

impl Marker {
    fn new(kind: MarkerKind, position: Coordinate, title: impl Into<String>) -> Self {
        Self {
            kind,
            position,
            title: title.into(),
            lines: Vec::new(),
            directions_to: None,
            popup_open: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolylineShape {
    pub section: usize,
    pub path: Vec<Coordinate>,
    pub stroke: &'static str,
    pub width: u8,
}

/// External rendering surface (map canvas).
pub trait RenderSurface: Send + Sync {
    fn apply(&self, commands: &[DrawCommand]);
}

pub struct ResultProjector;

impl ResultProjector {
    /// Category search results. An empty list only shows a notice and leaves
    /// the map as it is.
    pub fn places(results: &[PlaceResult]) -> Vec<DrawCommand> {
        if results.is_empty() {
            return vec![Self::no_results()];
        }

        let mut out = Vec::with_capacity(results.len() + 3);
        out.push(DrawCommand::ClearAll);
        out.push(DrawCommand::ClearPopups);
        out.extend(results.iter().map(|p| {
            let mut m = Marker::new(MarkerKind::Place, p.position, &p.name);
            m.lines = vec![p.address.clone(), format!("{:.1} km away", p.distance_km())];
            m.directions_to = Some(p.position);
            DrawCommand::AddMarker(m)
        }));
        if let Some(bounds) = BoundingBox::around(results.iter().map(|p| p.position)) {
            out.push(DrawCommand::FitBounds(bounds));
        }
        out
    }

    pub fn no_results() -> DrawCommand {
        DrawCommand::Notice {
            message: NO_RESULTS.to_string(),
        }
    }

    /// A geocoded address: one marker, map centered on it.
    pub fn address(label: &str, position: Coordinate) -> Vec<DrawCommand> {
        let mut m = Marker::new(MarkerKind::Address, position, label);
        m.directions_to = Some(position);
        vec![
            DrawCommand::ClearAll,
            DrawCommand::ClearPopups,
            DrawCommand::AddMarker(m),
            DrawCommand::Center {
                position,
                zoom: None,
            },
        ]
    }

    /// The caller's own position, added on top of whatever is shown.
    pub fn current_location(position: Coordinate) -> Vec<DrawCommand> {
        let mut m = Marker::new(MarkerKind::CurrentLocation, position, CURRENT_LOCATION);
        m.popup_open = true;
        vec![
            DrawCommand::AddMarker(m),
            DrawCommand::Center {
                position,
                zoom: Some(LOCATION_ZOOM),
            },
        ]
    }

    /// Route geometry, one dot per maneuver, one marker per incident.
    pub fn route(route: &Route) -> Vec<DrawCommand> {
        let mut out = vec![DrawCommand::ClearAll, DrawCommand::ClearPopups];

        for (i, section) in route.sections.iter().enumerate() {
            out.push(DrawCommand::AddPolyline(PolylineShape {
                section: i,
                path: section.path.clone(),
                stroke: ROUTE_STROKE,
                width: ROUTE_WIDTH,
            }));
        }
        for section in &route.sections {
            out.extend(section.maneuvers.iter().map(|m| {
                DrawCommand::AddMarker(Marker::new(
                    MarkerKind::Maneuver,
                    m.position,
                    &m.instruction,
                ))
            }));
            out.extend(section.incidents.iter().map(incident_marker));
        }
        if let Some(bounds) = route.bounds {
            out.push(DrawCommand::FitBounds(bounds));
        }
        out
    }

    /// A failed route computation: one alert, nothing else.
    pub fn route_error(err: &dyn Display) -> Vec<DrawCommand> {
        vec![DrawCommand::Alert {
            message: route_alert_message(err),
        }]
    }
}

pub fn route_alert_message(err: &dyn Display) -> String {
    format!("Error calculating route: {err}")
}

fn incident_marker(resolved: &ResolvedIncident) -> DrawCommand {
    let incident = &resolved.incident;
    let title = incident
        .description
        .clone()
        .or_else(|| incident.kind.clone())
        .unwrap_or_else(|| "Traffic incident".to_string());

    let mut m = Marker::new(MarkerKind::Incident, resolved.anchor, title);
    if let Some(kind) = &incident.kind {
        m.lines.push(format!("Type: {kind}"));
    }
    if let Some(c) = &incident.criticality {
        m.lines.push(format!("Criticality: {c}"));
    }
    match (&incident.start_time, &incident.end_time) {
        (Some(from), Some(until)) => m.lines.push(format!("{from} to {until}")),
        (Some(from), None) => m.lines.push(format!("From {from}")),
        (None, Some(until)) => m.lines.push(format!("Until {until}")),
        (None, None) => {}
    }
    DrawCommand::AddMarker(m)
}
