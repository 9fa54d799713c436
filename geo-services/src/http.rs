//! Thin HTTP helpers shared by every provider client.
//!
//! One `reqwest::Client` is built per context and cloned into each service
//! (clones share the connection pool).

use reqwest::{Client, Response, header};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    config::ProviderConfig,
    errors::{ConfigError, ProviderError},
};

const USER_AGENT: &str = concat!("wayfinder/", env!("CARGO_PKG_VERSION"));

/// Longest response-body snippet kept in error messages.
const SNIPPET_CHARS: usize = 240;

/// Builds the shared client with the configured timeout and compression.
pub fn build_client(cfg: &ProviderConfig) -> Result<Client, ConfigError> {
    let client = Client::builder()
        .timeout(cfg.timeout())
        .user_agent(USER_AGENT)
        .gzip(true)
        .build()?;
    Ok(client)
}

/// `GET url?query` and decode the JSON body into `T`.
///
/// The `apiKey` value is expected inside `query`; it is never logged.
pub async fn get_json<T>(
    client: &Client,
    url: &str,
    query: &[(&str, String)],
) -> Result<T, ProviderError>
where
    T: DeserializeOwned,
{
    debug!(
        url,
        params = ?query.iter().map(|(k, _)| *k).collect::<Vec<_>>(),
        "GET"
    );
    let resp = client.get(url).query(query).send().await?;
    let resp = ensure_success(resp).await?;
    let body = resp.bytes().await?;
    serde_json::from_slice::<T>(&body).map_err(ProviderError::from)
}

/// `GET url` returning the raw body.
pub async fn get_bytes(client: &Client, url: &str) -> Result<Vec<u8>, ProviderError> {
    debug!(url, "GET (raw)");
    let resp = client.get(url).send().await?;
    let resp = ensure_success(resp).await?;
    Ok(resp.bytes().await?.to_vec())
}

/// Turns non-2xx responses into a classified [`ProviderError`].
async fn ensure_success(resp: Response) -> Result<Response, ProviderError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let retry_after = resp
        .headers()
        .get(header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok());
    let text = resp.text().await.unwrap_or_default();
    let snippet = make_snippet(&text);

    Err(ProviderError::from_status(
        status.as_u16(),
        retry_after,
        snippet,
    ))
}

/// Trimmed prefix of a response body for diagnostics.
pub fn make_snippet(text: &str) -> String {
    text.trim().chars().take(SNIPPET_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snippet_is_trimmed_and_bounded() {
        assert_eq!(make_snippet("  oops \n"), "oops");
        let long = "x".repeat(1000);
        assert_eq!(make_snippet(&long).len(), SNIPPET_CHARS);
    }

    #[test]
    fn client_builds_from_default_config() {
        let cfg = ProviderConfig::new_default("key");
        assert!(build_client(&cfg).is_ok());
    }
}
