pub mod autosuggest_request;
pub mod autosuggest_response;
pub mod autosuggest_route;
