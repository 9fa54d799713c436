use geo_services::Coordinate;
use map_session::DrawCommand;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct DirectSearchResponse {
    pub address: String,
    pub position: Coordinate,
    pub commands: Vec<DrawCommand>,
}
