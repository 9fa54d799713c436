use std::sync::Arc;

use axum::{extract::State, response::Response};

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    routes::health::health_response::HealthResponse,
};

pub async fn health_route(State(state): State<Arc<AppState>>) -> Response {
    let status = if state.map.is_live() {
        "ok"
    } else {
        "shutting_down"
    };
    ApiResponse::ok(HealthResponse { status })
}
