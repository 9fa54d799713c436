//! Type-ahead suggestions. Failures fold to an empty list.

use std::sync::Arc;

use geo_services::Coordinate;
use tracing::{instrument, warn};

use crate::{model::Suggestion, providers::SuggestProvider};

pub const SUGGESTION_LIMIT: usize = 5;

pub struct AutosuggestService {
    provider: Arc<dyn SuggestProvider>,
}

impl AutosuggestService {
    pub fn new(provider: Arc<dyn SuggestProvider>) -> Self {
        Self { provider }
    }

    #[instrument(skip(self, query))]
    pub async fn suggest(&self, query: &str, near: Option<Coordinate>) -> Vec<Suggestion> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }
        match self.provider.suggest(query, near, SUGGESTION_LIMIT).await {
            Ok(mut items) => {
                items.truncate(SUGGESTION_LIMIT);
                items
            }
            Err(e) => {
                warn!(error = %e, "autosuggest failed");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::future::BoxFuture;
    use geo_services::ProviderError;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeSuggest {
        fail: bool,
        seen: Mutex<Vec<(String, Option<Coordinate>, usize)>>,
    }

    impl SuggestProvider for FakeSuggest {
        fn suggest<'a>(
            &'a self,
            query: &'a str,
            near: Option<Coordinate>,
            limit: usize,
        ) -> BoxFuture<'a, Result<Vec<Suggestion>, ProviderError>> {
            self.seen
                .lock()
                .unwrap()
                .push((query.to_string(), near, limit));
            let fail = self.fail;
            Box::pin(async move {
                if fail {
                    return Err(ProviderError::Network("reset".into()));
                }
                Ok((0..8)
                    .map(|i| Suggestion {
                        title: format!("{query} {i}"),
                        address: None,
                        position: None,
                    })
                    .collect())
            })
        }
    }

    #[tokio::test]
    async fn blank_query_sends_nothing() {
        let fake = Arc::new(FakeSuggest::default());
        let svc = AutosuggestService::new(fake.clone());
        assert!(svc.suggest("  ", None).await.is_empty());
        assert!(fake.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn results_are_limited_to_five() {
        let fake = Arc::new(FakeSuggest::default());
        let svc = AutosuggestService::new(fake.clone());
        let near = Coordinate::new(1.0, 2.0).ok();

        let out = svc.suggest(" ber ", near).await;
        assert_eq!(out.len(), SUGGESTION_LIMIT);
        assert_eq!(out[0].title, "ber 0");
        assert_eq!(
            fake.seen.lock().unwrap()[0],
            ("ber".to_string(), near, SUGGESTION_LIMIT)
        );
    }

    #[tokio::test]
    async fn provider_failure_folds_to_empty() {
        let fake = Arc::new(FakeSuggest {
            fail: true,
            ..Default::default()
        });
        let svc = AutosuggestService::new(fake);
        assert!(svc.suggest("berlin", None).await.is_empty());
    }
}
