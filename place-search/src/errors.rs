use geo_services::ProviderError;
use thiserror::Error;

/// Failures of address resolution.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeocodeError {
    /// Blank input, or the provider returned no usable candidate.
    #[error("address not found: {0:?}")]
    AddressNotFound(String),

    /// Transport failure, non-2xx status or unreadable payload.
    #[error("geocode request failed: {0}")]
    GeocodeRequestFailed(#[source] ProviderError),
}

impl From<ProviderError> for GeocodeError {
    fn from(e: ProviderError) -> Self {
        GeocodeError::GeocodeRequestFailed(e)
    }
}

pub type GeocodeResult<T> = Result<T, GeocodeError>;
