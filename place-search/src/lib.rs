//! Place search for the wayfinder backend.
//!
//! - [`categories`]: label → category code(s) registry
//! - [`orchestrator`]: concurrent multi-code browse, merged and ranked
//! - [`geocode`]: address → coordinate
//! - [`autosuggest`]: type-ahead suggestions
//! - [`providers`]: provider traits and the HERE implementation

pub mod autosuggest;
pub mod categories;
pub mod errors;
pub mod geocode;
pub mod model;
pub mod orchestrator;
pub mod providers;

pub use autosuggest::AutosuggestService;
pub use categories::{CategoryCode, CategoryCodes, CategoryRegistry};
pub use errors::{GeocodeError, GeocodeResult};
pub use geocode::GeocodeResolver;
pub use model::{PlaceResult, Suggestion};
pub use orchestrator::SearchOrchestrator;
pub use providers::{GeocodeProvider, HereSearchClient, PlaceSearchProvider, SuggestProvider};
