//! Concurrent category search with merge, dedup, rank and truncate.
//!
//! All per-code queries are created up front and awaited once through
//! `join_all`, so a slow or failing code never short-circuits its siblings.
//! A failed query contributes an empty list.

use std::{collections::HashSet, sync::Arc};

use futures::future::join_all;
use geo_services::Coordinate;
use tracing::{debug, info, instrument, warn};

use crate::{
    categories::{CategoryCode, CategoryCodes},
    model::PlaceResult,
    providers::PlaceSearchProvider,
};

/// Result cap sent with every per-code query.
pub const PER_CODE_LIMIT: usize = 10;

/// Maximum number of results returned by [`SearchOrchestrator::search`].
pub const MAX_RESULTS: usize = 20;

pub struct SearchOrchestrator {
    provider: Arc<dyn PlaceSearchProvider>,
    per_code_limit: usize,
    max_results: usize,
}

impl SearchOrchestrator {
    pub fn new(provider: Arc<dyn PlaceSearchProvider>) -> Self {
        Self {
            provider,
            per_code_limit: PER_CODE_LIMIT,
            max_results: MAX_RESULTS,
        }
    }

    /// Places for every code around `origin`, nearest first, at most 20.
    ///
    /// Never fails: a query error is logged and treated as "no places".
    #[instrument(skip(self, codes), fields(codes = codes.len()))]
    pub async fn search(&self, codes: &CategoryCodes, origin: Coordinate) -> Vec<PlaceResult> {
        let queries = codes
            .as_slice()
            .iter()
            .map(|code| self.query_code(code, origin));
        let per_code = join_all(queries).await;

        let results = merge_ranked(per_code, self.max_results);
        info!(results = results.len(), "search complete");
        results
    }

    async fn query_code(&self, code: &CategoryCode, origin: Coordinate) -> Vec<PlaceResult> {
        match self.provider.browse(code, origin, self.per_code_limit).await {
            Ok(places) => {
                debug!(%code, places = places.len(), "browse ok");
                places
            }
            Err(e) => {
                warn!(%code, error = %e, "browse failed; treating as no results");
                Vec::new()
            }
        }
    }
}

/// Flattens in code order, drops repeated dedup keys (first wins), sorts
/// stably by distance and keeps the first `max` entries.
pub fn merge_ranked(per_code: Vec<Vec<PlaceResult>>, max: usize) -> Vec<PlaceResult> {
    let mut seen = HashSet::new();
    let mut merged: Vec<PlaceResult> = per_code
        .into_iter()
        .flatten()
        .filter(|p| seen.insert(p.dedup_key()))
        .collect();

    // `sort_by` is stable: equal distances keep first-seen order.
    merged.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    merged.truncate(max);
    merged
}
