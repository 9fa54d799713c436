//! Static map-SDK assets, fetched once during context init.
//!
//! The SDK CDN rate-limits aggressively, so every fetch goes through
//! [`retry_with_policy`] and is retried on HTTP 429 only.

use std::sync::Arc;

use futures::future::BoxFuture;
use geo_services::{
    ProviderError,
    http::get_bytes,
    retry::{RetryPolicy, retry_with_policy},
};
use reqwest::Client;
use tracing::{debug, info, instrument};

use crate::errors::{SessionError, SessionResult};

/// Raw byte source for asset URLs.
pub trait AssetSource: Send + Sync {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Vec<u8>, ProviderError>>;
}

/// Plain HTTP GET.
#[derive(Debug, Clone)]
pub struct HttpAssetSource {
    http: Client,
}

impl HttpAssetSource {
    pub fn new(http: Client) -> Self {
        Self { http }
    }
}

impl AssetSource for HttpAssetSource {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Vec<u8>, ProviderError>> {
        Box::pin(get_bytes(&self.http, url))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadedAsset {
    /// Last path segment of the URL, e.g. `mapsjs-core.js`.
    pub name: String,
    pub url: String,
    pub content_type: &'static str,
    pub bytes: Arc<[u8]>,
}

/// Assets in load order, looked up by name.
#[derive(Debug, Clone, Default)]
pub struct AssetBundle {
    assets: Vec<LoadedAsset>,
}

impl AssetBundle {
    pub fn get(&self, name: &str) -> Option<&LoadedAsset> {
        self.assets.iter().find(|a| a.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.assets.iter().map(|a| a.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

pub struct SdkAssetLoader {
    source: Arc<dyn AssetSource>,
    policy: RetryPolicy,
}

impl SdkAssetLoader {
    pub fn new(source: Arc<dyn AssetSource>, policy: RetryPolicy) -> Self {
        Self { source, policy }
    }

    /// Fetches one asset, retrying rate-limited responses.
    #[instrument(skip(self))]
    pub async fn load(&self, url: &str) -> Result<LoadedAsset, ProviderError> {
        let bytes = retry_with_policy(self.policy, ProviderError::is_rate_limited, |attempt| {
            debug!(attempt, "fetching asset");
            self.source.fetch(url)
        })
        .await?;

        let name = asset_name(url);
        Ok(LoadedAsset {
            content_type: content_type_for(&name),
            name,
            url: url.to_string(),
            bytes: bytes.into(),
        })
    }

    /// Loads every URL in order; the first terminal failure aborts.
    pub async fn load_all(&self, urls: &[String]) -> SessionResult<AssetBundle> {
        let mut assets = Vec::with_capacity(urls.len());
        for url in urls {
            let asset = self.load(url).await.map_err(|source| SessionError::Asset {
                url: url.clone(),
                source,
            })?;
            assets.push(asset);
        }
        info!(count = assets.len(), "map assets loaded");
        Ok(AssetBundle { assets })
    }
}

fn asset_name(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.rsplit('/')
        .find(|s| !s.is_empty())
        .unwrap_or(path)
        .to_string()
}

fn content_type_for(name: &str) -> &'static str {
    match name.rsplit_once('.').map(|(_, ext)| ext) {
        Some("js") => "application/javascript",
        Some("css") => "text/css",
        Some("json") => "application/json",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{collections::HashMap, sync::Mutex, time::Duration};

    /// Fails each URL with the queued errors first, then serves `ok:<url>`.
    #[derive(Default)]
    struct ScriptedSource {
        failures: Mutex<HashMap<String, Vec<ProviderError>>>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedSource {
        fn failing(url: &str, errors: Vec<ProviderError>) -> Arc<Self> {
            let src = Self::default();
            src.failures.lock().unwrap().insert(url.to_string(), errors);
            Arc::new(src)
        }
    }

    impl AssetSource for ScriptedSource {
        fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Vec<u8>, ProviderError>> {
            self.calls.lock().unwrap().push(url.to_string());
            let next = self
                .failures
                .lock()
                .unwrap()
                .get_mut(url)
                .and_then(|queue| (!queue.is_empty()).then(|| queue.remove(0)));
            Box::pin(async move {
                match next {
                    Some(e) => Err(e),
                    None => Ok(format!("ok:{url}").into_bytes()),
                }
            })
        }
    }

    const CORE: &str = "https://js.api.here.com/v3/3.1/mapsjs-core.js";
    const CSS: &str = "https://js.api.here.com/v3/3.1/mapsjs-ui.css";

    fn rate_limited() -> ProviderError {
        ProviderError::RateLimited {
            retry_after_secs: None,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn rate_limit_is_retried_until_success() {
        let src = ScriptedSource::failing(CORE, vec![rate_limited(), rate_limited()]);
        let loader = SdkAssetLoader::new(src.clone(), RetryPolicy::default());
        let started = tokio::time::Instant::now();

        let asset = loader.load(CORE).await.unwrap();

        assert_eq!(asset.name, "mapsjs-core.js");
        assert_eq!(asset.content_type, "application/javascript");
        assert_eq!(&*asset.bytes, format!("ok:{CORE}").as_bytes());
        assert_eq!(src.calls.lock().unwrap().len(), 3);
        assert_eq!(started.elapsed(), Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn exhausted_retries_surface_terminal_failure() {
        let src = ScriptedSource::failing(CORE, vec![rate_limited(); 10]);
        let loader = SdkAssetLoader::new(src.clone(), RetryPolicy::default());

        let err = loader.load_all(&[CORE.to_string(), CSS.to_string()]).await.unwrap_err();

        assert!(matches!(
            err,
            SessionError::Asset { ref url, source: ProviderError::RateLimited { .. } } if url == CORE
        ));
        // five attempts on the first asset, the second never requested
        assert_eq!(src.calls.lock().unwrap().len(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn other_failures_are_not_retried() {
        let src = ScriptedSource::failing(CSS, vec![ProviderError::NotFound]);
        let loader = SdkAssetLoader::new(src.clone(), RetryPolicy::default());
        assert_eq!(loader.load(CSS).await.unwrap_err(), ProviderError::NotFound);
        assert_eq!(src.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn bundle_is_indexed_by_name() {
        let loader = SdkAssetLoader::new(Arc::new(ScriptedSource::default()), RetryPolicy::default());
        let bundle = loader
            .load_all(&[CORE.to_string(), CSS.to_string()])
            .await
            .unwrap();

        assert_eq!(bundle.names().collect::<Vec<_>>(), vec!["mapsjs-core.js", "mapsjs-ui.css"]);
        assert_eq!(bundle.get("mapsjs-ui.css").unwrap().content_type, "text/css");
        assert!(bundle.get("missing.js").is_none());
    }

    #[test]
    fn names_ignore_query_strings() {
        assert_eq!(asset_name("https://cdn.example/a/b/app.js?v=3"), "app.js");
        assert_eq!(asset_name("https://cdn.example/a/b/"), "b");
        assert_eq!(content_type_for("font.woff2"), "application/octet-stream");
    }
}
