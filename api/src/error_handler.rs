use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use geo_services::ConfigError;
use map_session::{SessionError, route_alert_message};
use place_search::GeocodeError;
use route_engine::RouteError;
use thiserror::Error;
use tracing::error;

use crate::core::http::response_envelope::{ApiErrorDetail, ApiResponse};

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error(transparent)]
    Config(#[from] ConfigError),

    // --- IO / network / server ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request / routing ---
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("not found: {0}")]
    NotFound(String),

    // --- Domain ---
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Config(_) | AppError::Bind(_) | AppError::Server(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Session(e) => match e {
                SessionError::TornDown => StatusCode::SERVICE_UNAVAILABLE,
                SessionError::UnknownCategory(_) => StatusCode::NOT_FOUND,
                SessionError::Location(_) => StatusCode::SERVICE_UNAVAILABLE,
                SessionError::Geocode(GeocodeError::AddressNotFound(_)) => StatusCode::NOT_FOUND,
                SessionError::Geocode(GeocodeError::GeocodeRequestFailed(_)) => {
                    StatusCode::BAD_GATEWAY
                }
                SessionError::Route(RouteError::InvalidRouteEndpoints) => StatusCode::BAD_REQUEST,
                SessionError::Route(RouteError::NoRouteFound(_)) => StatusCode::NOT_FOUND,
                SessionError::Route(RouteError::MalformedGeometry { .. }) => {
                    StatusCode::BAD_GATEWAY
                }
                SessionError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
                SessionError::Asset { .. } => StatusCode::BAD_GATEWAY,
            },
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Bind(_) => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Session(e) => match e {
                SessionError::TornDown => "SERVICE_UNAVAILABLE",
                SessionError::UnknownCategory(_) => "UNKNOWN_CATEGORY",
                SessionError::Location(_) => "LOCATION_UNAVAILABLE",
                SessionError::Geocode(GeocodeError::AddressNotFound(_)) => "ADDRESS_NOT_FOUND",
                SessionError::Geocode(GeocodeError::GeocodeRequestFailed(_)) => "GEOCODE_FAILED",
                SessionError::Route(RouteError::InvalidRouteEndpoints) => {
                    "INVALID_ROUTE_ENDPOINTS"
                }
                SessionError::Route(RouteError::NoRouteFound(_)) => "NO_ROUTE_FOUND",
                SessionError::Route(RouteError::MalformedGeometry { .. }) => "MALFORMED_ROUTE",
                SessionError::Config(_) => "CONFIG_ERROR",
                SessionError::Asset { .. } => "ASSET_LOAD_FAILED",
            },
        }
    }

    /// Route failures carry the alert the map would show.
    fn details(&self) -> Vec<ApiErrorDetail> {
        match self {
            AppError::Session(SessionError::Route(e)) => vec![ApiErrorDetail {
                path: Some("commands".into()),
                hint: Some(route_alert_message(e)),
            }],
            AppError::Session(SessionError::UnknownCategory(_)) => vec![ApiErrorDetail {
                path: Some("label".into()),
                hint: Some("See GET /categories for the supported labels.".into()),
            }],
            _ => Vec::new(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(code = self.error_code(), error = %self, "request failed");
        }
        ApiResponse::<()>::error(self.error_code(), self.to_string(), self.details())
            .into_response_with_status(status)
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(err: axum::extract::rejection::JsonRejection) -> Self {
        AppError::BadRequest(err.body_text())
    }
}

impl From<axum::extract::rejection::QueryRejection> for AppError {
    fn from(err: axum::extract::rejection::QueryRejection) -> Self {
        AppError::BadRequest(err.body_text())
    }
}
