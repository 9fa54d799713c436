//! In-memory providers shared by the context and session tests.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use futures::future::BoxFuture;
use geo_services::{
    Coordinate, ProviderError,
    locator::{FixedPositionSource, GeoLocator, PositionSource},
};
use place_search::{
    CategoryCode, GeocodeProvider, PlaceResult, PlaceSearchProvider, SuggestProvider, Suggestion,
};
use route_engine::{
    RouteRequest, RoutingProvider,
    provider::{RawAction, RawRoute, RawSection},
};

use crate::{
    assets::AssetBundle,
    context::{MapContext, Services},
    projector::{DrawCommand, RenderSurface},
};

/// 2D flexible polyline with four points starting at (50.10228, 8.69821).
pub const FOUR_POINTS: &str = "BFoz5xJ67i1B1B7PzIhaxL7Y";

pub fn coord(lat: f64, lng: f64) -> Coordinate {
    Coordinate::new(lat, lng).unwrap()
}

pub fn home() -> Coordinate {
    coord(50.1, 8.7)
}

#[derive(Default)]
pub struct FakeProviders {
    pub browsed: Mutex<Vec<(String, Coordinate)>>,
    pub geocoded: Mutex<Vec<String>>,
    pub suggested: Mutex<Vec<String>>,
    pub routed: Mutex<Vec<RouteRequest>>,
    pub route_failure: Mutex<Option<ProviderError>>,
}

impl FakeProviders {
    pub fn browse_count(&self) -> usize {
        self.browsed.lock().unwrap().len()
    }

    pub fn route_count(&self) -> usize {
        self.routed.lock().unwrap().len()
    }
}

impl PlaceSearchProvider for FakeProviders {
    fn browse<'a>(
        &'a self,
        code: &'a CategoryCode,
        origin: Coordinate,
        _limit: usize,
    ) -> BoxFuture<'a, Result<Vec<PlaceResult>, ProviderError>> {
        self.browsed
            .lock()
            .unwrap()
            .push((code.as_str().to_string(), origin));
        let place = PlaceResult {
            name: format!("place {code}"),
            position: coord(origin.lat() + 0.01, origin.lng()),
            address: "1 Main St".into(),
            distance: 1100.0,
        };
        Box::pin(async move { Ok(vec![place]) })
    }
}

impl GeocodeProvider for FakeProviders {
    fn geocode<'a>(
        &'a self,
        address: &'a str,
    ) -> BoxFuture<'a, Result<Vec<Coordinate>, ProviderError>> {
        self.geocoded.lock().unwrap().push(address.to_string());
        let found = if address.contains("Nowhere") {
            vec![]
        } else {
            vec![coord(52.52, 13.405)]
        };
        Box::pin(async move { Ok(found) })
    }
}

impl SuggestProvider for FakeProviders {
    fn suggest<'a>(
        &'a self,
        query: &'a str,
        _near: Option<Coordinate>,
        _limit: usize,
    ) -> BoxFuture<'a, Result<Vec<Suggestion>, ProviderError>> {
        self.suggested.lock().unwrap().push(query.to_string());
        let hit = Suggestion {
            title: format!("{query} Street"),
            address: None,
            position: None,
        };
        Box::pin(async move { Ok(vec![hit]) })
    }
}

impl RoutingProvider for FakeProviders {
    fn calculate_route<'a>(
        &'a self,
        request: &'a RouteRequest,
    ) -> BoxFuture<'a, Result<Vec<RawRoute>, ProviderError>> {
        self.routed.lock().unwrap().push(*request);
        let failure = self.route_failure.lock().unwrap().clone();
        Box::pin(async move {
            if let Some(e) = failure {
                return Err(e);
            }
            Ok(vec![RawRoute {
                id: Some("r0".into()),
                sections: vec![RawSection {
                    polyline: FOUR_POINTS.into(),
                    actions: vec![RawAction {
                        instruction: Some("Head north".into()),
                        offset: Some(0),
                        ..Default::default()
                    }],
                    ..Default::default()
                }],
            }])
        })
    }
}

pub fn context_with(fake: &Arc<FakeProviders>, location: Option<Coordinate>) -> MapContext {
    let locator = GeoLocator::new(
        location.map(|c| Arc::new(FixedPositionSource::new(c)) as Arc<dyn PositionSource>),
        Duration::from_secs(5),
    );
    MapContext::with_services(
        Services {
            places: fake.clone(),
            geocoder: fake.clone(),
            suggester: fake.clone(),
            router: fake.clone(),
            locator,
        },
        AssetBundle::default(),
    )
}

/// Surface that keeps every applied batch.
#[derive(Default)]
pub struct RecordingSurface {
    pub batches: Mutex<Vec<Vec<DrawCommand>>>,
}

impl RecordingSurface {
    pub fn batches(&self) -> Vec<Vec<DrawCommand>> {
        self.batches.lock().unwrap().clone()
    }
}

impl RenderSurface for RecordingSurface {
    fn apply(&self, commands: &[DrawCommand]) {
        self.batches.lock().unwrap().push(commands.to_vec());
    }
}
