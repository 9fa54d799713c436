//! Free-text address → single coordinate (first-match policy).

use std::sync::Arc;

use geo_services::Coordinate;
use tracing::{debug, instrument, warn};

use crate::{
    errors::{GeocodeError, GeocodeResult},
    providers::GeocodeProvider,
};

pub struct GeocodeResolver {
    provider: Arc<dyn GeocodeProvider>,
}

impl GeocodeResolver {
    pub fn new(provider: Arc<dyn GeocodeProvider>) -> Self {
        Self { provider }
    }

    /// One geocode query; the provider's first candidate wins. No retry.
    ///
    /// Candidates without a valid position never reach this point, so an
    /// invalid top-ranked item yields the next valid one.
    ///
    /// A blank address is rejected as `AddressNotFound` without a request.
    #[instrument(skip(self, address))]
    pub async fn resolve(&self, address: &str) -> GeocodeResult<Coordinate> {
        let address = address.trim();
        if address.is_empty() {
            return Err(GeocodeError::AddressNotFound(String::new()));
        }

        let candidates = self.provider.geocode(address).await.map_err(|e| {
            warn!(error = %e, "geocode request failed");
            GeocodeError::from(e)
        })?;

        match candidates.first() {
            Some(position) => {
                debug!(candidates = candidates.len(), %position, "address resolved");
                Ok(*position)
            }
            None => Err(GeocodeError::AddressNotFound(address.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::future::BoxFuture;
    use geo_services::ProviderError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeGeocode {
        answer: Result<Vec<Coordinate>, ProviderError>,
        calls: AtomicUsize,
    }

    impl FakeGeocode {
        fn new(answer: Result<Vec<Coordinate>, ProviderError>) -> Arc<Self> {
            Arc::new(Self {
                answer,
                calls: AtomicUsize::new(0),
            })
        }
    }

    impl GeocodeProvider for FakeGeocode {
        fn geocode<'a>(
            &'a self,
            _address: &'a str,
        ) -> BoxFuture<'a, Result<Vec<Coordinate>, ProviderError>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let answer = self.answer.clone();
            Box::pin(async move { answer })
        }
    }

    #[tokio::test]
    async fn first_candidate_wins() {
        let first = Coordinate::new(40.7128, -74.006).unwrap();
        let second = Coordinate::new(40.0, -75.0).unwrap();
        let fake = FakeGeocode::new(Ok(vec![first, second]));
        let resolver = GeocodeResolver::new(fake);

        assert_eq!(resolver.resolve("New York").await, Ok(first));
    }

    #[tokio::test]
    async fn zero_items_is_address_not_found() {
        let resolver = GeocodeResolver::new(FakeGeocode::new(Ok(vec![])));
        assert_eq!(
            resolver.resolve("nowhere at all").await,
            Err(GeocodeError::AddressNotFound("nowhere at all".into()))
        );
    }

    #[tokio::test]
    async fn transport_error_is_request_failed() {
        let resolver = GeocodeResolver::new(FakeGeocode::new(Err(ProviderError::Timeout)));
        assert_eq!(
            resolver.resolve("Main St 1").await,
            Err(GeocodeError::GeocodeRequestFailed(ProviderError::Timeout))
        );
    }

    #[tokio::test]
    async fn blank_address_is_not_sent() {
        let fake = FakeGeocode::new(Ok(vec![Coordinate::new(0.0, 0.0).unwrap()]));
        let resolver = GeocodeResolver::new(fake.clone());

        assert!(matches!(
            resolver.resolve("   ").await,
            Err(GeocodeError::AddressNotFound(_))
        ));
        assert_eq!(fake.calls.load(Ordering::SeqCst), 0);
    }
}
