//! Current-location lookup.
//!
//! [`GeoLocator`] wraps a platform [`PositionSource`] with a timeout. It makes
//! exactly one attempt and never substitutes a fallback coordinate.

use std::{sync::Arc, time::Duration};

use futures::future::BoxFuture;
use tracing::{debug, instrument, warn};

use crate::{config::LocationConfig, coordinate::Coordinate, errors::LocationError};

/// Platform location service.
///
/// Implementations report permission/capability problems as
/// [`LocationError::Unavailable`] and anything else as
/// [`LocationError::Provider`].
pub trait PositionSource: Send + Sync {
    fn current_position(&self) -> BoxFuture<'_, Result<Coordinate, LocationError>>;
}

/// Source that always answers with a configured coordinate.
#[derive(Debug, Clone, Copy)]
pub struct FixedPositionSource {
    position: Coordinate,
}

impl FixedPositionSource {
    pub fn new(position: Coordinate) -> Self {
        Self { position }
    }
}

impl PositionSource for FixedPositionSource {
    fn current_position(&self) -> BoxFuture<'_, Result<Coordinate, LocationError>> {
        let position = self.position;
        Box::pin(async move { Ok(position) })
    }
}

/// Single-shot, fail-closed location resolver.
#[derive(Clone)]
pub struct GeoLocator {
    source: Option<Arc<dyn PositionSource>>,
    timeout: Duration,
}

impl GeoLocator {
    pub fn new(source: Option<Arc<dyn PositionSource>>, timeout: Duration) -> Self {
        Self { source, timeout }
    }

    /// Locator backed by `DEVICE_LOCATION`, or one without capability if unset.
    pub fn from_config(cfg: &LocationConfig) -> Self {
        let source = cfg
            .device_location
            .map(|c| Arc::new(FixedPositionSource::new(c)) as Arc<dyn PositionSource>);
        Self::new(source, Duration::from_secs(cfg.timeout_secs.max(1)))
    }

    pub fn is_capable(&self) -> bool {
        self.source.is_some()
    }

    /// Resolves the current coordinate.
    ///
    /// # Errors
    /// - [`LocationError::Unavailable`] when no source is configured or the
    ///   source denies access
    /// - [`LocationError::Timeout`] when the source does not answer in time
    /// - [`LocationError::Provider`] for other reported failures
    #[instrument(skip_all, fields(timeout_ms = self.timeout.as_millis() as u64))]
    pub async fn current_location(&self) -> Result<Coordinate, LocationError> {
        let Some(source) = &self.source else {
            warn!("location requested but no position source is configured");
            return Err(LocationError::Unavailable(
                "location is not supported on this platform".into(),
            ));
        };

        match tokio::time::timeout(self.timeout, source.current_position()).await {
            Ok(Ok(position)) => {
                debug!(%position, "location resolved");
                Ok(position)
            }
            Ok(Err(e)) => {
                warn!(error = %e, "location lookup failed");
                Err(e)
            }
            Err(_) => {
                warn!("location lookup timed out");
                Err(LocationError::Timeout(self.timeout))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NeverAnswers;

    impl PositionSource for NeverAnswers {
        fn current_position(&self) -> BoxFuture<'_, Result<Coordinate, LocationError>> {
            Box::pin(futures::future::pending::<Result<Coordinate, LocationError>>())
        }
    }

    struct Denied;

    impl PositionSource for Denied {
        fn current_position(&self) -> BoxFuture<'_, Result<Coordinate, LocationError>> {
            Box::pin(async {
                Err::<Coordinate, _>(LocationError::Unavailable("permission denied".into()))
            })
        }
    }

    #[tokio::test]
    async fn no_source_is_unavailable() {
        let locator = GeoLocator::new(None, Duration::from_secs(1));
        assert!(!locator.is_capable());
        assert!(matches!(
            locator.current_location().await,
            Err(LocationError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn fixed_source_answers() {
        let here = Coordinate::new(39.6, -76.1).unwrap();
        let locator = GeoLocator::from_config(&LocationConfig {
            device_location: Some(here),
            timeout_secs: 5,
        });
        assert_eq!(locator.current_location().await.unwrap(), here);
    }

    #[tokio::test]
    async fn denied_source_is_surfaced() {
        let locator = GeoLocator::new(Some(Arc::new(Denied)), Duration::from_secs(1));
        assert_eq!(
            locator.current_location().await,
            Err(LocationError::Unavailable("permission denied".into()))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn slow_source_times_out() {
        let locator = GeoLocator::new(Some(Arc::new(NeverAnswers)), Duration::from_secs(3));
        assert_eq!(
            locator.current_location().await,
            Err(LocationError::Timeout(Duration::from_secs(3)))
        );
    }
}
