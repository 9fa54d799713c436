//! Shared error types for `geo-services`.
//!
//! Provider transport failures are classified once here ([`ProviderError`]) so
//! every HTTP-backed service (browse, geocode, autosuggest, routing, assets)
//! reports them the same way. Location, coordinate and configuration problems
//! have their own small enums.

use std::time::Duration;

use thiserror::Error;

/* ------------------------------------------------------------------------- */
/* Provider (transport / HTTP) errors                                        */
/* ------------------------------------------------------------------------- */

/// Failure of a single request against an external provider.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProviderError {
    /// HTTP 401, usually a bad or missing API key.
    #[error("unauthorized")]
    Unauthorized,

    /// HTTP 403.
    #[error("forbidden")]
    Forbidden,

    /// HTTP 404.
    #[error("not found")]
    NotFound,

    /// HTTP 429.
    #[error("rate limited")]
    RateLimited {
        /// `Retry-After` hint in seconds when the provider sent one.
        retry_after_secs: Option<u64>,
    },

    /// HTTP 5xx.
    #[error("server error: status {0}")]
    Server(u16),

    /// Any other non-2xx status.
    #[error("http status error: status {status}: {snippet}")]
    HttpStatus {
        status: u16,
        /// Short, trimmed snippet of the response body.
        snippet: String,
    },

    /// Transport-level timeout.
    #[error("timeout")]
    Timeout,

    /// DNS/connect/reset failures without an HTTP status.
    #[error("network error: {0}")]
    Network(String),

    /// Payload did not have the expected shape.
    #[error("invalid provider response: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    /// Classifies a non-success status code.
    pub fn from_status(status: u16, retry_after_secs: Option<u64>, snippet: String) -> Self {
        match status {
            401 => ProviderError::Unauthorized,
            403 => ProviderError::Forbidden,
            404 => ProviderError::NotFound,
            429 => ProviderError::RateLimited { retry_after_secs },
            500..=599 => ProviderError::Server(status),
            _ => ProviderError::HttpStatus { status, snippet },
        }
    }

    /// `true` only for rate limiting; the asset retry loop keys off this.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, ProviderError::RateLimited { .. })
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            return ProviderError::Timeout;
        }

        if let Some(status) = e.status() {
            return ProviderError::from_status(status.as_u16(), None, String::new());
        }

        if e.is_decode() {
            return ProviderError::InvalidResponse(e.to_string());
        }

        ProviderError::Network(e.to_string())
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(e: serde_json::Error) -> Self {
        ProviderError::InvalidResponse(e.to_string())
    }
}

/* ------------------------------------------------------------------------- */
/* Coordinate errors                                                         */
/* ------------------------------------------------------------------------- */

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CoordinateError {
    #[error("coordinate components must be finite (lat={lat}, lng={lng})")]
    NotFinite { lat: f64, lng: f64 },

    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),

    #[error("cannot parse coordinate from {0:?}; expected \"lat,lng\"")]
    Unparsable(String),
}

/* ------------------------------------------------------------------------- */
/* Location errors                                                           */
/* ------------------------------------------------------------------------- */

/// Why the current location could not be determined.
///
/// All variants are terminal for the operation that asked for the location.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LocationError {
    /// No location capability, or the platform denied permission.
    #[error("location unavailable: {0}")]
    Unavailable(String),

    /// The platform did not answer in time.
    #[error("location request timed out after {0:?}")]
    Timeout(Duration),

    /// The platform reported some other failure.
    #[error("location provider error: {0}")]
    Provider(String),
}

/* ------------------------------------------------------------------------- */
/* Configuration errors                                                      */
/* ------------------------------------------------------------------------- */

/// Errors raised while loading or validating configuration.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable is missing or empty.
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// A number failed to parse.
    #[error("invalid number in {var}: {reason}")]
    InvalidNumber {
        var: &'static str,
        reason: &'static str,
    },

    /// Value had the wrong format (e.g. an URL without scheme).
    #[error("invalid format in {var}: {reason}")]
    InvalidFormat {
        var: &'static str,
        reason: String,
    },

    /// The shared HTTP client could not be built.
    #[error("failed to build http client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classification() {
        assert_eq!(
            ProviderError::from_status(401, None, String::new()),
            ProviderError::Unauthorized
        );
        assert!(ProviderError::from_status(429, Some(2), String::new()).is_rate_limited());
        assert_eq!(
            ProviderError::from_status(503, None, String::new()),
            ProviderError::Server(503)
        );
        assert!(matches!(
            ProviderError::from_status(418, None, "teapot".into()),
            ProviderError::HttpStatus { status: 418, .. }
        ));
        assert!(!ProviderError::Timeout.is_rate_limited());
    }
}
