use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use map_session::{ResultProjector, SessionError};
use route_engine::{RouteError, format_duration};
use tracing::{debug, info, instrument, warn};

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    error_handler::AppError,
    routes::route::{route_request::RouteRequest, route_response::RouteResponse},
};

/// Fast car route to `destination`, from `origin` or the device location.
#[instrument(name = "route_route", skip(state, headers, body))]
pub async fn route_route(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<RouteRequest>,
) -> Response {
    if let Some(id) = headers.get("X-Request-Id").and_then(|h| h.to_str().ok()) {
        debug!(%id, "request id attached");
    }

    // --- Validate endpoints ------------------------------------------------------
    if body.has_invalid_origin() {
        return AppError::from(SessionError::Route(RouteError::InvalidRouteEndpoints))
            .into_response();
    }
    let (origin, destination) = body.endpoints();

    // --- Plan ----------------------------------------------------------------------
    match state.map.route(origin, destination).await {
        Ok(route) => {
            let faults = route.faults().count();
            if faults > 0 {
                warn!(faults, "route has skipped annotations");
            }
            info!(
                sections = route.sections.len(),
                duration_secs = route.summary.duration,
                length_m = route.summary.length,
                "route planned"
            );
            let commands = ResultProjector::route(&route);
            ApiResponse::ok(RouteResponse {
                summary_text: format_duration(route.summary.duration),
                route,
                commands,
            })
        }
        Err(err) => AppError::from(err).into_response(),
    }
}
