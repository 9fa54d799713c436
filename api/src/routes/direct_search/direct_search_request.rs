use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct DirectSearchRequest {
    pub address: String,
}
