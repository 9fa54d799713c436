use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use map_session::ResultProjector;
use tracing::{debug, info, instrument};

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    error_handler::AppError,
    routes::quick_search::{
        quick_search_request::QuickSearchRequest, quick_search_response::QuickSearchResponse,
    },
};

/// Category search around `origin` (or the device location).
///
/// Once the label is known and an origin is available this never fails:
/// provider errors yield an empty list plus the "no results" notice.
#[instrument(name = "quick_search_route", skip(state, headers, body), fields(label = %body.label))]
pub async fn quick_search_route(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<QuickSearchRequest>,
) -> Response {
    if let Some(id) = headers.get("X-Request-Id").and_then(|h| h.to_str().ok()) {
        debug!(%id, "request id attached");
    }

    match state.map.quick_search(&body.label, body.origin).await {
        Ok(results) => {
            info!(hits = results.len(), "quick search finished");
            let commands = ResultProjector::places(&results);
            ApiResponse::ok(QuickSearchResponse {
                label: body.label,
                results,
                commands,
            })
        }
        Err(err) => AppError::from(err).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::{body_json, home, state};
    use axum::http::StatusCode;
    use geo_services::Coordinate;

    #[tokio::test]
    async fn returns_results_and_commands() {
        let (state, _) = state(Some(home()));
        let res = quick_search_route(
            State(state),
            HeaderMap::new(),
            Json(QuickSearchRequest {
                label: "Restaurants".into(),
                origin: None,
            }),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let v = body_json(res).await;
        assert_eq!(v["success"], true);
        assert_eq!(v["data"]["results"].as_array().unwrap().len(), 1);
        assert_eq!(v["data"]["commands"][0]["op"], "clear_all");
    }

    #[tokio::test]
    async fn unknown_label_is_404() {
        let (state, fixture) = state(Some(home()));
        let res = quick_search_route(
            State(state),
            HeaderMap::new(),
            Json(QuickSearchRequest {
                label: "restaurants".into(),
                origin: Some(Coordinate::new(1.0, 1.0).unwrap()),
            }),
        )
        .await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(res).await["error"]["code"], "UNKNOWN_CATEGORY");
        assert_eq!(fixture.calls(), 0);
    }

    #[tokio::test]
    async fn missing_location_is_503() {
        let (state, _) = state(None);
        let res = quick_search_route(
            State(state),
            HeaderMap::new(),
            Json(QuickSearchRequest {
                label: "Restaurants".into(),
                origin: None,
            }),
        )
        .await;

        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body_json(res).await["error"]["code"], "LOCATION_UNAVAILABLE");
    }
}
