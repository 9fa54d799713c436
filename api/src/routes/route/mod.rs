pub mod route_request;
pub mod route_response;
pub mod route_route;
