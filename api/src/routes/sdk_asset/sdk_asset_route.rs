use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Path, State},
    http::{HeaderValue, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};

use crate::{core::app_state::AppState, error_handler::AppError};

/// Serves a map SDK asset preloaded at startup.
pub async fn sdk_asset_route(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Response {
    let asset = match state.map.asset(&name) {
        Ok(Some(asset)) => asset,
        Ok(None) => return AppError::NotFound(format!("asset {name}")).into_response(),
        Err(err) => return AppError::from(err).into_response(),
    };

    let mut res = Response::new(Body::from(asset.bytes.to_vec()));
    res.headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(asset.content_type));
    res
}
