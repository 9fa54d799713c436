//! HERE Routing v8 client.
//!
//! GET {router_url}?origin=lat,lng&destination=lat,lng&routingMode=fast
//!     &transportMode=car&return=...&spans=incidents&apiKey=...

use futures::future::BoxFuture;
use geo_services::{ProviderError, config::ProviderConfig, http::get_json};
use reqwest::Client;
use tracing::{debug, instrument, warn};

use super::{RETURN_FIELDS, RawRoute, RouteRequest, RouterResponse, RoutingProvider, SPAN_FIELDS};

#[derive(Debug, Clone)]
pub struct HereRouterClient {
    http: Client,
    api_key: String,
    router_url: String,
}

impl HereRouterClient {
    pub fn new(http: Client, cfg: &ProviderConfig) -> Self {
        debug!("Creating HereRouterClient with router_url={}", cfg.router_url);
        Self {
            http,
            api_key: cfg.api_key.clone(),
            router_url: cfg.router_url.clone(),
        }
    }

    #[instrument(skip_all, fields(origin = %request.origin, destination = %request.destination))]
    async fn calculate(&self, request: &RouteRequest) -> Result<Vec<RawRoute>, ProviderError> {
        let query = [
            ("origin", request.origin.to_query_param()),
            ("destination", request.destination.to_query_param()),
            ("routingMode", request.routing_mode.as_str().to_string()),
            ("transportMode", request.transport_mode.as_str().to_string()),
            ("return", RETURN_FIELDS.to_string()),
            ("spans", SPAN_FIELDS.to_string()),
            ("apiKey", self.api_key.clone()),
        ];
        let resp: RouterResponse = get_json(&self.http, &self.router_url, &query).await?;

        for notice in &resp.notices {
            warn!(code = %notice.code, title = %notice.title, "router notice");
        }
        debug!(routes = resp.routes.len(), "router answered");
        Ok(resp.routes)
    }
}

impl RoutingProvider for HereRouterClient {
    fn calculate_route<'a>(
        &'a self,
        request: &'a RouteRequest,
    ) -> BoxFuture<'a, Result<Vec<RawRoute>, ProviderError>> {
        Box::pin(self.calculate(request))
    }
}
