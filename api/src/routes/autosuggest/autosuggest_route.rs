use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    error_handler::AppError,
    routes::autosuggest::{
        autosuggest_request::AutosuggestQuery, autosuggest_response::AutosuggestResponse,
    },
};

/// Type-ahead suggestions. Debouncing is the caller's job; a failing
/// provider yields an empty list.
pub async fn autosuggest_route(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AutosuggestQuery>,
) -> Response {
    let near = match query.near() {
        Ok(near) => near,
        Err(err) => return err.into_response(),
    };

    match state.map.suggest(&query.q, near).await {
        Ok(suggestions) => ApiResponse::ok(AutosuggestResponse {
            query: query.q,
            suggestions,
        }),
        Err(err) => AppError::from(err).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::{body_json, state};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn lists_suggestions() {
        let (state, _) = state(None);
        let res = autosuggest_route(
            State(state),
            Query(AutosuggestQuery {
                q: "Main".into(),
                lat: None,
                lng: None,
            }),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let v = body_json(res).await;
        assert_eq!(v["data"]["suggestions"][0]["title"], "Main Street");
    }

    #[tokio::test]
    async fn half_a_coordinate_is_rejected() {
        let (state, fixture) = state(None);
        let res = autosuggest_route(
            State(state),
            Query(AutosuggestQuery {
                q: "Main".into(),
                lat: Some(1.0),
                lng: None,
            }),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(res).await["error"]["code"], "BAD_REQUEST");
        assert_eq!(fixture.calls(), 0);
    }
}
