use geo_services::{ConfigError, LocationError, ProviderError};
use place_search::GeocodeError;
use route_engine::RouteError;
use thiserror::Error;

pub type SessionResult<T> = Result<T, SessionError>;

/// Root error for everything that goes through a [`crate::MapContext`].
#[derive(Debug, Error)]
pub enum SessionError {
    /// The context was torn down; no further operations are accepted.
    #[error("map context has been torn down")]
    TornDown,

    /// Label not present in the category registry. Nothing was queried.
    #[error("unknown category label {0:?}")]
    UnknownCategory(String),

    #[error(transparent)]
    Location(#[from] LocationError),

    #[error(transparent)]
    Geocode(#[from] GeocodeError),

    #[error(transparent)]
    Route(#[from] RouteError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An SDK asset could not be fetched, retries included.
    #[error("failed to load map asset {url}: {source}")]
    Asset {
        url: String,
        #[source]
        source: ProviderError,
    },
}
