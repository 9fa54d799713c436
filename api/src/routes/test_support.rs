//! Handler fixtures: one in-memory provider behind every trait.

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
    time::Duration,
};

use axum::response::Response;
use futures::future::BoxFuture;
use geo_services::{
    Coordinate, ProviderError,
    locator::{FixedPositionSource, GeoLocator, PositionSource},
};
use map_session::{AssetBundle, MapContext, Services};
use place_search::{
    CategoryCode, GeocodeProvider, PlaceResult, PlaceSearchProvider, SuggestProvider, Suggestion,
};
use route_engine::{
    RouteRequest, RoutingProvider, TravelSummary,
    provider::{RawAction, RawRoute, RawSection},
};

use crate::core::app_state::AppState;

pub fn home() -> Coordinate {
    Coordinate::new(50.1, 8.7).unwrap()
}

#[derive(Default)]
pub struct Fixture {
    calls: AtomicUsize,
    fail_routes: AtomicBool,
}

impl Fixture {
    /// Provider calls of any kind.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn fail_routes(&self) {
        self.fail_routes.store(true, Ordering::SeqCst);
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

impl PlaceSearchProvider for Fixture {
    fn browse<'a>(
        &'a self,
        code: &'a CategoryCode,
        origin: Coordinate,
        _limit: usize,
    ) -> BoxFuture<'a, Result<Vec<PlaceResult>, ProviderError>> {
        self.hit();
        Box::pin(async move {
            Ok(vec![PlaceResult {
                name: format!("place {code}"),
                position: origin,
                address: "1 Main St".into(),
                distance: 350.0,
            }])
        })
    }
}

impl GeocodeProvider for Fixture {
    fn geocode<'a>(
        &'a self,
        _address: &'a str,
    ) -> BoxFuture<'a, Result<Vec<Coordinate>, ProviderError>> {
        self.hit();
        let found = Coordinate::new(52.517, 13.389).unwrap();
        Box::pin(async move { Ok(vec![found]) })
    }
}

impl SuggestProvider for Fixture {
    fn suggest<'a>(
        &'a self,
        query: &'a str,
        _near: Option<Coordinate>,
        _limit: usize,
    ) -> BoxFuture<'a, Result<Vec<Suggestion>, ProviderError>> {
        self.hit();
        Box::pin(async move {
            Ok(vec![Suggestion {
                title: format!("{query} Street"),
                address: None,
                position: None,
            }])
        })
    }
}

impl RoutingProvider for Fixture {
    fn calculate_route<'a>(
        &'a self,
        _request: &'a RouteRequest,
    ) -> BoxFuture<'a, Result<Vec<RawRoute>, ProviderError>> {
        self.hit();
        let fail = self.fail_routes.load(Ordering::SeqCst);
        Box::pin(async move {
            if fail {
                return Err(ProviderError::Server(500));
            }
            Ok(vec![RawRoute {
                id: None,
                sections: vec![RawSection {
                    polyline: "BFoz5xJ67i1B1B7PzIhaxL7Y".into(),
                    actions: vec![RawAction {
                        instruction: Some("Head west".into()),
                        offset: Some(0),
                        ..Default::default()
                    }],
                    travel_summary: Some(TravelSummary {
                        duration: 1508,
                        length: 21_400,
                    }),
                    ..Default::default()
                }],
            }])
        })
    }
}

pub fn state(location: Option<Coordinate>) -> (Arc<AppState>, Arc<Fixture>) {
    let fixture = Arc::new(Fixture::default());
    let locator = GeoLocator::new(
        location.map(|c| Arc::new(FixedPositionSource::new(c)) as Arc<dyn PositionSource>),
        Duration::from_secs(5),
    );
    let map = MapContext::with_services(
        Services {
            places: fixture.clone(),
            geocoder: fixture.clone(),
            suggester: fixture.clone(),
            router: fixture.clone(),
            locator,
        },
        AssetBundle::default(),
    );
    (Arc::new(AppState::new(Arc::new(map))), fixture)
}

pub async fn body_json(res: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
