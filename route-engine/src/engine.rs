//! Route planning: one provider call, then geometry decode and annotation
//! projection per section.

use std::sync::Arc;

use geo_services::{BoundingBox, Coordinate};
use tracing::{debug, info, instrument, warn};

use crate::{
    errors::{DataIntegrityFault, PolylineError, RouteError, RouteResult},
    model::{ResolvedIncident, ResolvedManeuver, Route, RouteSection, ThirdComponent},
    polyline::{self, DecodedPath},
    provider::{RawRoute, RawSection, RouteRequest, RoutingProvider, TravelSummary},
};

pub struct RouteEngine {
    provider: Arc<dyn RoutingProvider>,
}

impl RouteEngine {
    pub fn new(provider: Arc<dyn RoutingProvider>) -> Self {
        Self { provider }
    }

    /// Fastest car route between two endpoints; the provider's first
    /// candidate is used. No retry.
    #[instrument(skip(self))]
    pub async fn plan(
        &self,
        origin: Option<Coordinate>,
        destination: Option<Coordinate>,
    ) -> RouteResult<Route> {
        let (Some(origin), Some(destination)) = (origin, destination) else {
            return Err(RouteError::InvalidRouteEndpoints);
        };

        let request = RouteRequest::fast_car(origin, destination);
        let routes = self
            .provider
            .calculate_route(&request)
            .await
            .map_err(|e| {
                warn!(error = %e, "routing request failed");
                RouteError::NoRouteFound(e.to_string())
            })?;

        let candidates = routes.len();
        let raw = routes
            .into_iter()
            .next()
            .ok_or_else(|| RouteError::NoRouteFound("provider returned no routes".into()))?;
        debug!(candidates, "using first route");

        let route = project_route(raw)?;
        info!(
            sections = route.sections.len(),
            duration_secs = route.summary.duration,
            length_m = route.summary.length,
            faults = route.faults().count(),
            "route planned"
        );
        Ok(route)
    }
}

/// Resolves a raw provider route into absolute coordinates.
pub fn project_route(raw: RawRoute) -> RouteResult<Route> {
    if raw.sections.is_empty() {
        return Err(RouteError::NoRouteFound("route has no sections".into()));
    }

    let sections = raw
        .sections
        .into_iter()
        .enumerate()
        .map(|(i, s)| project_section(i, s))
        .collect::<RouteResult<Vec<_>>>()?;

    let summary = sections
        .iter()
        .filter_map(|s| s.summary)
        .fold(TravelSummary::default(), |acc, s| TravelSummary {
            duration: acc.duration + s.duration,
            length: acc.length + s.length,
        });
    let bounds = BoundingBox::around(sections.iter().flat_map(|s| s.path.iter().copied()));

    Ok(Route {
        id: raw.id,
        sections,
        summary,
        bounds,
    })
}

/// Decodes one section and resolves its maneuvers and incidents.
///
/// Geometry errors fail the section; a bad annotation is recorded as a fault
/// and skipped.
pub fn project_section(index: usize, raw: RawSection) -> RouteResult<RouteSection> {
    let malformed = |source| RouteError::MalformedGeometry {
        section: index,
        source,
    };
    let decoded = polyline::decode(&raw.polyline).map_err(malformed)?;
    let path = to_coordinates(&decoded).map_err(malformed)?;
    let third = decoded
        .third_dimension()
        .is_present()
        .then(|| ThirdComponent {
            dimension: decoded.third_dimension(),
            values: decoded.points().iter().filter_map(|p| p.third).collect(),
        });

    let mut faults = Vec::new();

    let mut maneuvers = Vec::with_capacity(raw.actions.len());
    for (i, action) in raw.actions.into_iter().enumerate() {
        let Some(offset) = action.offset else {
            faults.push(DataIntegrityFault::ManeuverWithoutOffset { maneuver: i });
            continue;
        };
        match point_at(&path, offset) {
            Some((offset, position)) => maneuvers.push(ResolvedManeuver {
                offset,
                position,
                instruction: action.instruction.unwrap_or_default(),
                action: action.action,
                duration_secs: action.duration,
                length_meters: action.length,
            }),
            None => faults.push(DataIntegrityFault::ManeuverOffsetOutOfBounds {
                maneuver: i,
                offset,
                path_len: path.len(),
            }),
        }
    }

    let mut incidents = Vec::new();
    for (i, span) in raw.spans.iter().enumerate() {
        if span.incidents.is_empty() {
            continue;
        }
        let Some(offset) = span.offset else {
            faults.push(DataIntegrityFault::SpanWithoutOffset { span: i });
            continue;
        };
        let Some((span_offset, anchor)) = point_at(&path, offset) else {
            faults.push(DataIntegrityFault::SpanOffsetOutOfBounds {
                offset,
                path_len: path.len(),
            });
            continue;
        };
        for &idx in &span.incidents {
            let found = usize::try_from(idx)
                .ok()
                .and_then(|index| raw.incidents.get(index).map(|incident| (index, incident)));
            match found {
                Some((index, incident)) => incidents.push(ResolvedIncident {
                    anchor,
                    span_offset,
                    index,
                    incident: incident.clone(),
                }),
                None => faults.push(DataIntegrityFault::DanglingIncident {
                    span_offset,
                    index: idx,
                    available: raw.incidents.len(),
                }),
            }
        }
    }

    for fault in &faults {
        warn!(section = index, %fault, "skipping route annotation");
    }

    Ok(RouteSection {
        id: raw.id,
        polyline: raw.polyline,
        path,
        third,
        maneuvers,
        incidents,
        summary: raw.travel_summary,
        faults,
    })
}

/// Path point at a provider offset; `None` when negative or past the end.
fn point_at(path: &[Coordinate], offset: i64) -> Option<(usize, Coordinate)> {
    let index = usize::try_from(offset).ok()?;
    path.get(index).map(|&position| (index, position))
}

fn to_coordinates(decoded: &DecodedPath) -> Result<Vec<Coordinate>, PolylineError> {
    decoded
        .points()
        .iter()
        .enumerate()
        .map(|(index, p)| {
            Coordinate::new(p.lat, p.lng)
                .map_err(|_| PolylineError::CoordinateOutOfRange { index })
        })
        .collect()
}
