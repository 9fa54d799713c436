use map_session::DrawCommand;
use route_engine::Route;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub route: Route,
    /// e.g. `"25 minutes 8 seconds."`
    pub summary_text: String,
    pub commands: Vec<DrawCommand>,
}
