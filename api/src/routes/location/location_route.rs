use std::sync::Arc;

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use map_session::ResultProjector;

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    error_handler::AppError,
    routes::location::location_response::LocationResponse,
};

/// Device location with the pinpoint commands (marker, zoom 15).
pub async fn location_route(State(state): State<Arc<AppState>>) -> Response {
    match state.map.locate().await {
        Ok(position) => ApiResponse::ok(LocationResponse {
            position,
            commands: ResultProjector::current_location(position),
        }),
        Err(err) => AppError::from(err).into_response(),
    }
}
