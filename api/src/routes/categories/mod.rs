pub mod categories_response;
pub mod categories_route;
