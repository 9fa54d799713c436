//! HERE Search v1 client (browse, geocode, autosuggest).
//!
//! Endpoints used:
//!   * GET {browse_url}?at=lat,lng&categories=code&limit=n&apiKey=...
//!   * GET {geocode_url}?q=address&apiKey=...
//!   * GET {autosuggest_url}?q=query&limit=n[&at=lat,lng]&apiKey=...

use futures::future::BoxFuture;
use geo_services::{Coordinate, LatLng, ProviderError, config::ProviderConfig, http::get_json};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::{
    categories::CategoryCode,
    model::{ADDRESS_NOT_AVAILABLE, PlaceResult, Suggestion},
    providers::{GeocodeProvider, PlaceSearchProvider, SuggestProvider},
};

/// HERE search HTTP client. Cheap to clone.
#[derive(Debug, Clone)]
pub struct HereSearchClient {
    http: Client,
    api_key: String,
    browse_url: String,
    geocode_url: String,
    autosuggest_url: String,
}

impl HereSearchClient {
    pub fn new(http: Client, cfg: &ProviderConfig) -> Self {
        debug!(
            "Creating HereSearchClient browse={} geocode={} autosuggest={}",
            cfg.browse_url, cfg.geocode_url, cfg.autosuggest_url
        );
        Self {
            http,
            api_key: cfg.api_key.clone(),
            browse_url: cfg.browse_url.clone(),
            geocode_url: cfg.geocode_url.clone(),
            autosuggest_url: cfg.autosuggest_url.clone(),
        }
    }

    #[instrument(skip(self))]
    async fn browse_impl(
        &self,
        code: &CategoryCode,
        origin: Coordinate,
        limit: usize,
    ) -> Result<Vec<PlaceResult>, ProviderError> {
        let query = [
            ("at", origin.to_query_param()),
            ("categories", code.to_string()),
            ("limit", limit.to_string()),
            ("apiKey", self.api_key.clone()),
        ];
        let resp: BrowseResponse = get_json(&self.http, &self.browse_url, &query).await?;
        Ok(normalize_browse(resp))
    }

    #[instrument(skip(self, address))]
    async fn geocode_impl(&self, address: &str) -> Result<Vec<Coordinate>, ProviderError> {
        let query = [("q", address.to_string()), ("apiKey", self.api_key.clone())];
        let resp: GeocodeResponse = get_json(&self.http, &self.geocode_url, &query).await?;
        Ok(normalize_geocode(resp))
    }

    #[instrument(skip(self, text))]
    async fn suggest_impl(
        &self,
        text: &str,
        near: Option<Coordinate>,
        limit: usize,
    ) -> Result<Vec<Suggestion>, ProviderError> {
        let mut query = vec![("q", text.to_string()), ("limit", limit.to_string())];
        if let Some(at) = near {
            query.push(("at", at.to_query_param()));
        }
        query.push(("apiKey", self.api_key.clone()));
        let resp: SuggestResponse = get_json(&self.http, &self.autosuggest_url, &query).await?;
        Ok(normalize_suggest(resp))
    }
}

impl PlaceSearchProvider for HereSearchClient {
    fn browse<'a>(
        &'a self,
        code: &'a CategoryCode,
        origin: Coordinate,
        limit: usize,
    ) -> BoxFuture<'a, Result<Vec<PlaceResult>, ProviderError>> {
        Box::pin(self.browse_impl(code, origin, limit))
    }
}

impl GeocodeProvider for HereSearchClient {
    fn geocode<'a>(
        &'a self,
        address: &'a str,
    ) -> BoxFuture<'a, Result<Vec<Coordinate>, ProviderError>> {
        Box::pin(self.geocode_impl(address))
    }
}

impl SuggestProvider for HereSearchClient {
    fn suggest<'a>(
        &'a self,
        query: &'a str,
        near: Option<Coordinate>,
        limit: usize,
    ) -> BoxFuture<'a, Result<Vec<Suggestion>, ProviderError>> {
        Box::pin(self.suggest_impl(query, near, limit))
    }
}

/* --- wire types ------------------------------------------------------------ */

#[derive(Debug, Deserialize)]
pub(crate) struct BrowseResponse {
    #[serde(default)]
    items: Vec<BrowseItem>,
}

#[derive(Debug, Deserialize)]
struct BrowseItem {
    title: Option<String>,
    position: Option<LatLng>,
    address: Option<HereAddress>,
    distance: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct HereAddress {
    label: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeocodeResponse {
    #[serde(default)]
    items: Vec<GeocodeItem>,
}

#[derive(Debug, Deserialize)]
struct GeocodeItem {
    position: Option<LatLng>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SuggestResponse {
    #[serde(default)]
    items: Vec<SuggestItem>,
}

#[derive(Debug, Deserialize)]
struct SuggestItem {
    title: Option<String>,
    address: Option<HereAddress>,
    position: Option<LatLng>,
}

/* --- normalization --------------------------------------------------------- */

fn valid_position(raw: Option<LatLng>) -> Option<Coordinate> {
    raw.and_then(|p| Coordinate::try_from(p).ok())
}

fn address_label(address: Option<HereAddress>) -> Option<String> {
    address.and_then(|a| a.label).filter(|l| !l.trim().is_empty())
}

/// Drops items that lack a title, a valid position or a distance.
pub(crate) fn normalize_browse(resp: BrowseResponse) -> Vec<PlaceResult> {
    let total = resp.items.len();
    let places: Vec<PlaceResult> = resp
        .items
        .into_iter()
        .filter_map(|item| {
            let name = item.title.filter(|t| !t.is_empty())?;
            let position = valid_position(item.position)?;
            let distance = item.distance.filter(|d| d.is_finite())?;
            Some(PlaceResult {
                name,
                position,
                address: address_label(item.address)
                    .unwrap_or_else(|| ADDRESS_NOT_AVAILABLE.to_string()),
                distance,
            })
        })
        .collect();

    if places.len() < total {
        warn!(
            skipped = total - places.len(),
            total, "browse items without title/position/distance skipped"
        );
    }
    places
}

/// Candidates in provider rank order; items without a valid position are dropped.
pub(crate) fn normalize_geocode(resp: GeocodeResponse) -> Vec<Coordinate> {
    resp.items
        .into_iter()
        .filter_map(|item| valid_position(item.position))
        .collect()
}

pub(crate) fn normalize_suggest(resp: SuggestResponse) -> Vec<Suggestion> {
    resp.items
        .into_iter()
        .filter_map(|item| {
            Some(Suggestion {
                title: item.title.filter(|t| !t.is_empty())?,
                address: address_label(item.address),
                position: valid_position(item.position),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn browse_items_are_normalized_and_incomplete_ones_skipped() {
        let resp: BrowseResponse = serde_json::from_value(json!({
            "items": [
                {
                    "title": "Cafe Central",
                    "position": { "lat": 48.21, "lng": 16.36 },
                    "address": { "label": "Herrengasse 14, Wien" },
                    "distance": 420
                },
                {
                    "title": "No Address Bistro",
                    "position": { "lat": 48.2, "lng": 16.37 },
                    "distance": 980.5
                },
                { "title": "Lost", "distance": 10 },
                { "title": "Far Out", "position": { "lat": 91.0, "lng": 0.0 }, "distance": 1 },
                { "position": { "lat": 1.0, "lng": 1.0 }, "distance": 1 },
                { "title": "No Distance", "position": { "lat": 1.0, "lng": 1.0 } }
            ]
        }))
        .unwrap();

        let places = normalize_browse(resp);
        assert_eq!(places.len(), 2);
        assert_eq!(places[0].name, "Cafe Central");
        assert_eq!(places[0].address, "Herrengasse 14, Wien");
        assert_eq!(places[0].distance, 420.0);
        assert_eq!(places[1].address, ADDRESS_NOT_AVAILABLE);
    }

    #[test]
    fn missing_items_field_means_no_results() {
        let resp: BrowseResponse = serde_json::from_value(json!({})).unwrap();
        assert!(normalize_browse(resp).is_empty());
    }

    #[test]
    fn geocode_keeps_rank_order() {
        let resp: GeocodeResponse = serde_json::from_value(json!({
            "items": [
                { "title": "bad", "position": { "lat": 500.0, "lng": 0.0 } },
                { "title": "first", "position": { "lat": 52.52, "lng": 13.405 } },
                { "title": "second", "position": { "lat": 52.0, "lng": 13.0 } }
            ]
        }))
        .unwrap();
        let coords = normalize_geocode(resp);
        assert_eq!(coords.len(), 2);
        assert_eq!(coords[0], Coordinate::new(52.52, 13.405).unwrap());
    }

    #[test]
    fn suggestions_tolerate_missing_position() {
        let resp: SuggestResponse = serde_json::from_value(json!({
            "items": [
                { "title": "Berlin, Germany", "position": { "lat": 52.52, "lng": 13.4 } },
                { "title": "Berlin Hauptbahnhof", "address": { "label": "Europaplatz 1" } },
                { "address": { "label": "untitled" } }
            ]
        }))
        .unwrap();
        let items = normalize_suggest(resp);
        assert_eq!(items.len(), 2);
        assert!(items[0].position.is_some());
        assert_eq!(items[1].address.as_deref(), Some("Europaplatz 1"));
        assert!(items[1].position.is_none());
    }
}
