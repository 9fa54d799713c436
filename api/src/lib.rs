//! HTTP surface of the wayfinder backend.
//!
//! [`start`] is the composition root: it builds the [`MapContext`] from the
//! environment, serves the routes below and tears the context down on
//! shutdown.

pub mod core;
pub mod error_handler;
pub mod middleware_layer;
pub mod routes;

use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use map_session::MapContext;
use tokio::signal;
use tracing::{info, warn};

use crate::{
    core::app_state::{AppState, api_address_from_env},
    error_handler::{AppError, AppResult},
    middleware_layer::json_extractor::json_error_mapper,
    routes::{
        autosuggest::autosuggest_route::autosuggest_route,
        categories::categories_route::categories_route,
        direct_search::direct_search_route::direct_search_route, health::health_route::health_route,
        location::location_route::location_route,
        quick_search::quick_search_route::quick_search_route, route::route_route::route_route,
        sdk_asset::sdk_asset_route::sdk_asset_route,
    },
};

/// All routes over `state`.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_route))
        .route("/categories", get(categories_route))
        .route("/quick_search", post(quick_search_route))
        .route("/direct_search", post(direct_search_route))
        .route("/autosuggest", get(autosuggest_route))
        .route("/location", get(location_route))
        .route("/route", post(route_route))
        .route("/sdk/{name}", get(sdk_asset_route))
        .layer(middleware::from_fn(json_error_mapper))
        .with_state(state)
}

pub async fn start() -> AppResult<()> {
    let addr = api_address_from_env()?;
    let state = Arc::new(AppState::from_env().await?);
    let map: Arc<MapContext> = Arc::clone(&state.map);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(AppError::Bind)?;
    info!(%addr, "wayfinder api listening");

    let served = axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server);

    map.teardown();
    served
}

/// Resolves on Ctrl+C.
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
