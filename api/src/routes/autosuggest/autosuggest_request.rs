use geo_services::Coordinate;
use serde::Deserialize;

use crate::error_handler::{AppError, AppResult};

/// `?q=<text>&lat=<f64>&lng=<f64>`; `lat`/`lng` bias the results and must come together.
#[derive(Debug, Deserialize)]
pub struct AutosuggestQuery {
    #[serde(default)]
    pub q: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl AutosuggestQuery {
    pub fn near(&self) -> AppResult<Option<Coordinate>> {
        match (self.lat, self.lng) {
            (None, None) => Ok(None),
            (Some(lat), Some(lng)) => Coordinate::new(lat, lng)
                .map(Some)
                .map_err(|e| AppError::BadRequest(e.to_string())),
            _ => Err(AppError::BadRequest(
                "lat and lng must be given together".into(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(lat: Option<f64>, lng: Option<f64>) -> AutosuggestQuery {
        AutosuggestQuery {
            q: "Main".into(),
            lat,
            lng,
        }
    }

    #[test]
    fn bias_needs_both_components() {
        assert_eq!(query(None, None).near().unwrap(), None);
        assert!(query(Some(52.5), Some(13.4)).near().unwrap().is_some());
        assert!(matches!(query(Some(52.5), None).near(), Err(AppError::BadRequest(_))));
        assert!(matches!(query(Some(95.0), Some(0.0)).near(), Err(AppError::BadRequest(_))));
    }
}
