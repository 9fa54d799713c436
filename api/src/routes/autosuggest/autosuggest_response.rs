use place_search::Suggestion;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct AutosuggestResponse {
    pub query: String,
    pub suggestions: Vec<Suggestion>,
}
