pub mod direct_search_request;
pub mod direct_search_response;
pub mod direct_search_route;
