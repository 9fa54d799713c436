//! Route planning for the wayfinder backend.
//!
//! [`RouteEngine::plan`] asks a [`RoutingProvider`] for a route, decodes each
//! section's flexible polyline ([`polyline`]) and projects the offset-based
//! maneuvers and incident spans onto absolute coordinates ([`model`]).

pub mod engine;
pub mod errors;
pub mod model;
pub mod polyline;
pub mod provider;

pub use engine::RouteEngine;
pub use errors::{DataIntegrityFault, PolylineError, RouteError, RouteResult};
pub use model::{ResolvedIncident, ResolvedManeuver, Route, RouteSection, format_duration};
pub use polyline::{DecodedPath, PathPoint, ThirdDimension};
pub use provider::{HereRouterClient, Incident, RouteRequest, RoutingProvider, TravelSummary};
