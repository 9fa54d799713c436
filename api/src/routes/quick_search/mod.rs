pub mod quick_search_request;
pub mod quick_search_response;
pub mod quick_search_route;
