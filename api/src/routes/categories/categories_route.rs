use std::sync::Arc;

use axum::{extract::State, response::{IntoResponse, Response}};
use tracing::debug;

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    error_handler::AppError,
    routes::categories::categories_response::CategoriesResponse,
};

/// Grouped category catalog as shown on the category buttons.
pub async fn categories_route(State(state): State<Arc<AppState>>) -> Response {
    match state.map.categories() {
        Ok(groups) => {
            debug!(groups = groups.len(), "categories_route: served");
            ApiResponse::ok(CategoriesResponse { groups })
        }
        Err(err) => AppError::from(err).into_response(),
    }
}
