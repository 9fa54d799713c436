//! Provider seams for place data.
//!
//! Three narrow traits, one per remote operation, so the orchestrator and the
//! resolvers can be driven by fakes in tests. [`here::HereSearchClient`]
//! implements all three against the HERE Browse, Geocode and Autosuggest APIs.

pub mod here;

use futures::future::BoxFuture;
use geo_services::{Coordinate, ProviderError};

use crate::{
    categories::CategoryCode,
    model::{PlaceResult, Suggestion},
};

pub use here::HereSearchClient;

/// Category browse around an origin.
pub trait PlaceSearchProvider: Send + Sync {
    /// Up to `limit` places for one category code, normalized.
    ///
    /// Items missing a title, position or distance are dropped by the
    /// implementation; only transport and payload failures surface as errors.
    fn browse<'a>(
        &'a self,
        code: &'a CategoryCode,
        origin: Coordinate,
        limit: usize,
    ) -> BoxFuture<'a, Result<Vec<PlaceResult>, ProviderError>>;
}

/// Free-text address → ranked candidate positions.
pub trait GeocodeProvider: Send + Sync {
    fn geocode<'a>(&'a self, address: &'a str)
    -> BoxFuture<'a, Result<Vec<Coordinate>, ProviderError>>;
}

/// Partial query → suggestions.
pub trait SuggestProvider: Send + Sync {
    fn suggest<'a>(
        &'a self,
        query: &'a str,
        near: Option<Coordinate>,
        limit: usize,
    ) -> BoxFuture<'a, Result<Vec<Suggestion>, ProviderError>>;
}
