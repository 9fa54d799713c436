use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use map_session::ResultProjector;
use tracing::{debug, instrument};

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    error_handler::AppError,
    routes::direct_search::{
        direct_search_request::DirectSearchRequest, direct_search_response::DirectSearchResponse,
    },
};

/// Geocodes a free-text address and centers the map on it.
#[instrument(name = "direct_search_route", skip(state, headers, body))]
pub async fn direct_search_route(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<DirectSearchRequest>,
) -> Response {
    let request_id = headers
        .get("X-Request-Id")
        .and_then(|h| h.to_str().ok())
        .unwrap_or("-");

    match state.map.direct_search(&body.address).await {
        Ok(position) => {
            debug!(%request_id, %position, "direct_search_route: resolved");
            let commands = ResultProjector::address(&body.address, position);
            ApiResponse::ok(DirectSearchResponse {
                address: body.address,
                position,
                commands,
            })
        }
        Err(err) => {
            debug!(%request_id, error = %err, "direct_search_route: failed");
            AppError::from(err).into_response()
        }
    }
}
