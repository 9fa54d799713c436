//! Process-wide map context.
//!
//! Owns every service (registry, locator, search, geocode, autosuggest,
//! routing) and the loaded SDK assets. Built once by the composition root via
//! [`MapContext::init`] and shared behind an `Arc`; after [`MapContext::teardown`]
//! every operation fails with [`SessionError::TornDown`].

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use geo_services::{
    Coordinate,
    config::{LocationConfig, ProviderConfig, sdk_assets_from_env},
    http::build_client,
    locator::GeoLocator,
    retry::RetryPolicy,
};
use place_search::{
    AutosuggestService, CategoryRegistry, GeocodeProvider, GeocodeResolver, HereSearchClient,
    PlaceResult, PlaceSearchProvider, SearchOrchestrator, SuggestProvider, Suggestion,
    categories::CategoryGroup,
};
use route_engine::{HereRouterClient, Route, RouteEngine, RouteError, RoutingProvider};
use tracing::{debug, info, instrument};

use crate::{
    assets::{AssetBundle, HttpAssetSource, LoadedAsset, SdkAssetLoader},
    errors::{SessionError, SessionResult},
};

/// Everything [`MapContext::init`] needs.
#[derive(Debug, Clone)]
pub struct MapConfig {
    pub provider: ProviderConfig,
    pub location: LocationConfig,
    pub sdk_assets: Vec<String>,
    pub retry: RetryPolicy,
}

impl MapConfig {
    pub fn from_env() -> SessionResult<Self> {
        Ok(Self {
            provider: ProviderConfig::from_env()?,
            location: LocationConfig::from_env()?,
            sdk_assets: sdk_assets_from_env()?,
            retry: RetryPolicy::default(),
        })
    }
}

/// Provider implementations wired into a context.
pub struct Services {
    pub places: Arc<dyn PlaceSearchProvider>,
    pub geocoder: Arc<dyn GeocodeProvider>,
    pub suggester: Arc<dyn SuggestProvider>,
    pub router: Arc<dyn RoutingProvider>,
    pub locator: GeoLocator,
}

pub struct MapContext {
    registry: CategoryRegistry,
    locator: GeoLocator,
    orchestrator: SearchOrchestrator,
    geocoder: GeocodeResolver,
    autosuggest: AutosuggestService,
    router: RouteEngine,
    assets: AssetBundle,
    live: AtomicBool,
}

impl MapContext {
    /// Builds the HERE-backed services and loads the SDK assets.
    #[instrument(skip_all, fields(assets = cfg.sdk_assets.len()))]
    pub async fn init(cfg: MapConfig) -> SessionResult<Self> {
        cfg.provider.validate()?;
        let http = build_client(&cfg.provider)?;

        let search = Arc::new(HereSearchClient::new(http.clone(), &cfg.provider));
        let router = Arc::new(HereRouterClient::new(http.clone(), &cfg.provider));
        let services = Services {
            places: search.clone(),
            geocoder: search.clone(),
            suggester: search,
            router,
            locator: GeoLocator::from_config(&cfg.location),
        };

        let loader = SdkAssetLoader::new(Arc::new(HttpAssetSource::new(http)), cfg.retry);
        let assets = loader.load_all(&cfg.sdk_assets).await?;

        info!(
            location_capable = services.locator.is_capable(),
            assets = assets.len(),
            "map context initialized"
        );
        Ok(Self::with_services(services, assets))
    }

    /// Context over caller-supplied providers.
    pub fn with_services(services: Services, assets: AssetBundle) -> Self {
        Self {
            registry: CategoryRegistry::default(),
            locator: services.locator,
            orchestrator: SearchOrchestrator::new(services.places),
            geocoder: GeocodeResolver::new(services.geocoder),
            autosuggest: AutosuggestService::new(services.suggester),
            router: RouteEngine::new(services.router),
            assets,
            live: AtomicBool::new(true),
        }
    }

    /// Marks the context dead. Idempotent.
    pub fn teardown(&self) {
        if self.live.swap(false, Ordering::SeqCst) {
            info!("map context torn down");
        }
    }

    pub fn is_live(&self) -> bool {
        self.live.load(Ordering::SeqCst)
    }

    fn ensure_live(&self) -> SessionResult<()> {
        if self.is_live() {
            Ok(())
        } else {
            Err(SessionError::TornDown)
        }
    }

    pub fn categories(&self) -> SessionResult<&'static [CategoryGroup]> {
        self.ensure_live()?;
        Ok(self.registry.groups())
    }

    /// Places for a category label around `origin`, or around the current
    /// location when no origin is given.
    ///
    /// Unknown labels abort before any location lookup or query.
    #[instrument(skip(self))]
    pub async fn quick_search(
        &self,
        label: &str,
        origin: Option<Coordinate>,
    ) -> SessionResult<Vec<PlaceResult>> {
        self.ensure_live()?;
        let codes = self
            .registry
            .codes_for(label)
            .ok_or_else(|| SessionError::UnknownCategory(label.to_string()))?;
        let origin = match origin {
            Some(o) => o,
            None => self.locator.current_location().await?,
        };
        debug!(codes = codes.len(), %origin, "quick search");
        Ok(self.orchestrator.search(&codes, origin).await)
    }

    pub async fn direct_search(&self, address: &str) -> SessionResult<Coordinate> {
        self.ensure_live()?;
        Ok(self.geocoder.resolve(address).await?)
    }

    pub async fn suggest(
        &self,
        query: &str,
        near: Option<Coordinate>,
    ) -> SessionResult<Vec<Suggestion>> {
        self.ensure_live()?;
        Ok(self.autosuggest.suggest(query, near).await)
    }

    pub async fn locate(&self) -> SessionResult<Coordinate> {
        self.ensure_live()?;
        Ok(self.locator.current_location().await?)
    }

    /// Route to `destination`, starting at `origin` or at the current
    /// location. A missing destination is rejected before any lookup.
    #[instrument(skip(self))]
    pub async fn route(
        &self,
        origin: Option<Coordinate>,
        destination: Option<Coordinate>,
    ) -> SessionResult<Route> {
        self.ensure_live()?;
        if destination.is_none() {
            return Err(RouteError::InvalidRouteEndpoints.into());
        }
        let origin = match origin {
            Some(o) => o,
            None => self.locator.current_location().await?,
        };
        Ok(self.router.plan(Some(origin), destination).await?)
    }

    pub fn asset(&self, name: &str) -> SessionResult<Option<&LoadedAsset>> {
        self.ensure_live()?;
        Ok(self.assets.get(name))
    }
}
