pub mod location_response;
pub mod location_route;
