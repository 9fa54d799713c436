//! Provider configuration loaded from environment variables.
//!
//! # Environment variables
//!
//! - `HERE_API_KEY`          = provider API key (mandatory)
//! - `HERE_BROWSE_URL`       = place browse endpoint
//! - `HERE_GEOCODE_URL`      = geocode endpoint
//! - `HERE_AUTOSUGGEST_URL`  = autosuggest endpoint
//! - `HERE_ROUTER_URL`       = routing endpoint
//! - `HERE_TIMEOUT_SECS`     = per-request timeout (default 15)
//! - `DEVICE_LOCATION`       = optional fixed `lat,lng` used as the platform location
//! - `LOCATION_TIMEOUT_SECS` = location lookup timeout (default 10)
//! - `MAP_SDK_ASSETS`        = comma-separated asset URLs (empty string disables)

use std::time::Duration;

use crate::{coordinate::Coordinate, errors::ConfigError};

pub const DEFAULT_BROWSE_URL: &str = "https://browse.search.hereapi.com/v1/browse";
pub const DEFAULT_GEOCODE_URL: &str = "https://geocode.search.hereapi.com/v1/geocode";
pub const DEFAULT_AUTOSUGGEST_URL: &str = "https://autosuggest.search.hereapi.com/v1/autosuggest";
pub const DEFAULT_ROUTER_URL: &str = "https://router.hereapi.com/v8/routes";

/// Map SDK bundle served to the web front end.
pub const DEFAULT_SDK_ASSETS: &[&str] = &[
    "https://js.api.here.com/v3/3.1/mapsjs-core.js",
    "https://js.api.here.com/v3/3.1/mapsjs-service.js",
    "https://js.api.here.com/v3/3.1/mapsjs-ui.js",
    "https://js.api.here.com/v3/3.1/mapsjs-mapevents.js",
    "https://js.api.here.com/v3/3.1/mapsjs-ui.css",
];

/// Endpoints and credentials for the place/geocode/routing provider.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub api_key: String,
    pub browse_url: String,
    pub geocode_url: String,
    pub autosuggest_url: String,
    pub router_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl ProviderConfig {
    /// Config pointing at the public HERE endpoints.
    pub fn new_default(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            browse_url: DEFAULT_BROWSE_URL.to_string(),
            geocode_url: DEFAULT_GEOCODE_URL.to_string(),
            autosuggest_url: DEFAULT_AUTOSUGGEST_URL.to_string(),
            router_url: DEFAULT_ROUTER_URL.to_string(),
            timeout_secs: 15,
        }
    }

    /// Reads the config from the environment and validates it.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut cfg = Self::new_default(must_env("HERE_API_KEY")?);
        if let Some(v) = env_opt_string("HERE_BROWSE_URL") {
            cfg.browse_url = v;
        }
        if let Some(v) = env_opt_string("HERE_GEOCODE_URL") {
            cfg.geocode_url = v;
        }
        if let Some(v) = env_opt_string("HERE_AUTOSUGGEST_URL") {
            cfg.autosuggest_url = v;
        }
        if let Some(v) = env_opt_string("HERE_ROUTER_URL") {
            cfg.router_url = v;
        }
        if let Some(secs) = env_opt_u64("HERE_TIMEOUT_SECS")? {
            cfg.timeout_secs = secs;
        }
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingVar("HERE_API_KEY"));
        }
        validate_http_endpoint("HERE_BROWSE_URL", &self.browse_url)?;
        validate_http_endpoint("HERE_GEOCODE_URL", &self.geocode_url)?;
        validate_http_endpoint("HERE_AUTOSUGGEST_URL", &self.autosuggest_url)?;
        validate_http_endpoint("HERE_ROUTER_URL", &self.router_url)?;
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidNumber {
                var: "HERE_TIMEOUT_SECS",
                reason: "must be > 0",
            });
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Platform location settings.
#[derive(Debug, Clone)]
pub struct LocationConfig {
    /// Fixed device position; `None` means the platform has no location capability.
    pub device_location: Option<Coordinate>,
    pub timeout_secs: u64,
}

impl LocationConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let device_location = match env_opt_string("DEVICE_LOCATION") {
            Some(raw) => Some(raw.parse::<Coordinate>().map_err(|e| {
                ConfigError::InvalidFormat {
                    var: "DEVICE_LOCATION",
                    reason: e.to_string(),
                }
            })?),
            None => None,
        };
        let timeout_secs = env_opt_u64("LOCATION_TIMEOUT_SECS")?.unwrap_or(10);
        Ok(Self {
            device_location,
            timeout_secs,
        })
    }
}

/// Reads `MAP_SDK_ASSETS`; unset falls back to [`DEFAULT_SDK_ASSETS`], an
/// empty value disables asset loading.
pub fn sdk_assets_from_env() -> Result<Vec<String>, ConfigError> {
    let raw = match std::env::var("MAP_SDK_ASSETS") {
        Ok(v) => v,
        Err(_) => return Ok(DEFAULT_SDK_ASSETS.iter().map(|s| s.to_string()).collect()),
    };
    let urls: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    for url in &urls {
        validate_http_endpoint("MAP_SDK_ASSETS", url)?;
    }
    Ok(urls)
}

/* ------------------------------------------------------------------------- */
/* Env helpers                                                               */
/* ------------------------------------------------------------------------- */

/// Fetches a required, non-empty environment variable.
pub fn must_env(name: &'static str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::MissingVar(name)),
    }
}

/// Optional, non-empty environment variable.
pub fn env_opt_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Parses an optional `u64` from env (`Ok(None)` if unset/empty).
pub fn env_opt_u64(name: &'static str) -> Result<Option<u64>, ConfigError> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => {
            v.trim()
                .parse::<u64>()
                .map(Some)
                .map_err(|_| ConfigError::InvalidNumber {
                    var: name,
                    reason: "expected u64",
                })
        }
        _ => Ok(None),
    }
}

/// Validates that an HTTP endpoint starts with `http://` or `https://`.
pub fn validate_http_endpoint(var: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidFormat {
            var,
            reason: format!("{value:?} must start with http:// or https://"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = ProviderConfig::new_default("key");
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.timeout(), Duration::from_secs(15));
    }

    #[test]
    fn validation_catches_bad_values() {
        let mut cfg = ProviderConfig::new_default("  ");
        assert!(matches!(cfg.validate(), Err(ConfigError::MissingVar(_))));

        cfg.api_key = "key".into();
        cfg.router_url = "router.hereapi.com".into();
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidFormat {
                var: "HERE_ROUTER_URL",
                ..
            })
        ));

        cfg.router_url = DEFAULT_ROUTER_URL.into();
        cfg.timeout_secs = 0;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidNumber { .. })
        ));
    }
}
