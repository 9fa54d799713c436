use std::{net::SocketAddr, sync::Arc};

use geo_services::{ConfigError, config::env_opt_string};
use map_session::{MapConfig, MapContext};

use crate::error_handler::AppResult;

/// Listen address used when `API_ADDRESS` is unset.
pub const DEFAULT_API_ADDRESS: &str = "127.0.0.1:8080";

/// Shared state for all HTTP handlers.
pub struct AppState {
    /// Services and SDK assets; torn down on shutdown.
    pub map: Arc<MapContext>,
}

impl AppState {
    pub fn new(map: Arc<MapContext>) -> Self {
        Self { map }
    }

    /// Builds the map context from environment variables.
    pub async fn from_env() -> AppResult<Self> {
        let cfg = MapConfig::from_env()?;
        let map = MapContext::init(cfg).await?;
        Ok(Self::new(Arc::new(map)))
    }
}

/// Reads `API_ADDRESS`, falling back to [`DEFAULT_API_ADDRESS`].
pub fn api_address_from_env() -> AppResult<SocketAddr> {
    let raw = env_opt_string("API_ADDRESS").unwrap_or_else(|| DEFAULT_API_ADDRESS.to_string());
    let addr = raw.parse().map_err(|e| ConfigError::InvalidFormat {
        var: "API_ADDRESS",
        reason: format!("{raw:?}: {e}"),
    })?;
    Ok(addr)
}
