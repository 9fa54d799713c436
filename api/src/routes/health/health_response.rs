use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok` while the map context is live, `shutting_down` after teardown.
    pub status: &'static str,
}
