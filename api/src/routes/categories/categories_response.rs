use place_search::categories::CategoryGroup;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub groups: &'static [CategoryGroup],
}
