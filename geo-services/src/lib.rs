//! Shared building blocks for the wayfinder workspace.
//!
//! - [`coordinate`]: validated `Coordinate` value type
//! - [`config`]: provider/location configuration from env
//! - [`http`]: shared reqwest client and JSON GET helper
//! - [`errors`]: transport, location, coordinate and config errors
//! - [`locator`]: single-shot current-location lookup
//! - [`debounce`]: trailing-edge debouncer
//! - [`retry`]: bounded fixed-delay retry (asset loading only)
//! - [`telemetry`]: tracing layer and filters

pub mod config;
pub mod coordinate;
pub mod debounce;
pub mod errors;
pub mod http;
pub mod locator;
pub mod retry;
pub mod telemetry;

pub use coordinate::{BoundingBox, Coordinate, LatLng};
pub use errors::{ConfigError, CoordinateError, LocationError, ProviderError};
