use map_session::DrawCommand;
use place_search::PlaceResult;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct QuickSearchResponse {
    pub label: String,
    /// Distance-ascending, at most 20.
    pub results: Vec<PlaceResult>,
    pub commands: Vec<DrawCommand>,
}
