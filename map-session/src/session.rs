//! UI-facing controller: debounced triggers in, draw commands out.

use std::sync::Arc;

use geo_services::{Coordinate, debounce::Debouncer};
use place_search::Suggestion;
use tracing::{debug, warn};

use crate::{
    context::MapContext,
    errors::{SessionError, SessionResult},
    projector::{DrawCommand, RenderSurface, ResultProjector},
};

/// One debouncer per trigger site, all rendering into the same surface.
pub struct MapSession {
    ctx: Arc<MapContext>,
    surface: Arc<dyn RenderSurface>,
    quick_search: Debouncer,
    direct_search: Debouncer,
    autosuggest: Debouncer,
    directions: Debouncer,
}

impl MapSession {
    pub fn new(ctx: Arc<MapContext>, surface: Arc<dyn RenderSurface>) -> Self {
        Self {
            ctx,
            surface,
            quick_search: Debouncer::default(),
            direct_search: Debouncer::default(),
            autosuggest: Debouncer::default(),
            directions: Debouncer::default(),
        }
    }

    pub fn context(&self) -> &Arc<MapContext> {
        &self.ctx
    }

    /// Category button. Searches around the current location.
    pub fn on_category_pressed(&self, label: impl Into<String>) {
        let label = label.into();
        let ctx = Arc::clone(&self.ctx);
        let surface = Arc::clone(&self.surface);

        self.quick_search.trigger(move || async move {
            let commands = match ctx.quick_search(&label, None).await {
                Ok(places) => ResultProjector::places(&places),
                Err(SessionError::TornDown) => return,
                Err(SessionError::UnknownCategory(label)) => {
                    warn!(%label, "ignoring unknown category");
                    return;
                }
                Err(e) => {
                    warn!(error = %e, %label, "quick search failed");
                    vec![ResultProjector::no_results()]
                }
            };
            render(&ctx, surface.as_ref(), &commands);
        });
    }

    /// Address picked from the search box.
    pub fn on_address_selected(&self, address: impl Into<String>) {
        let address = address.into();
        let ctx = Arc::clone(&self.ctx);
        let surface = Arc::clone(&self.surface);

        self.direct_search.trigger(move || async move {
            let commands = match ctx.direct_search(&address).await {
                Ok(position) => ResultProjector::address(&address, position),
                Err(SessionError::TornDown) => return,
                Err(e) => {
                    warn!(error = %e, "direct search failed");
                    vec![ResultProjector::no_results()]
                }
            };
            render(&ctx, surface.as_ref(), &commands);
        });
    }

    /// Keystroke in the search box. `on_ready` receives the suggestions of
    /// the last query in a burst; it is not called after teardown.
    pub fn on_query_changed<F>(
        &self,
        query: impl Into<String>,
        near: Option<Coordinate>,
        on_ready: F,
    ) where
        F: FnOnce(Vec<Suggestion>) + Send + 'static,
    {
        let query = query.into();
        let ctx = Arc::clone(&self.ctx);

        self.autosuggest.trigger(move || async move {
            match ctx.suggest(&query, near).await {
                Ok(suggestions) if ctx.is_live() => on_ready(suggestions),
                Ok(_) | Err(_) => debug!("suggestions dropped, context torn down"),
            }
        });
    }

    /// "Get Directions" from a popup. `origin` defaults to the current location.
    pub fn on_directions_requested(&self, origin: Option<Coordinate>, destination: Coordinate) {
        let ctx = Arc::clone(&self.ctx);
        let surface = Arc::clone(&self.surface);

        self.directions.trigger(move || async move {
            let commands = match ctx.route(origin, Some(destination)).await {
                Ok(route) => {
                    debug!(
                        sections = route.sections.len(),
                        duration_secs = route.summary.duration,
                        "route ready"
                    );
                    ResultProjector::route(&route)
                }
                Err(SessionError::TornDown) => return,
                Err(e) => {
                    warn!(error = %e, "route calculation failed");
                    ResultProjector::route_error(&e)
                }
            };
            render(&ctx, surface.as_ref(), &commands);
        });
    }

    /// Pinpoints the current location. Not debounced.
    pub async fn locate(&self) -> SessionResult<Coordinate> {
        let position = self.ctx.locate().await?;
        render(
            &self.ctx,
            self.surface.as_ref(),
            &ResultProjector::current_location(position),
        );
        Ok(position)
    }

    /// Cancels every pending trigger. The context stays alive; tearing it
    /// down is up to whoever built it.
    pub fn teardown(&self) {
        self.quick_search.cancel();
        self.direct_search.cancel();
        self.autosuggest.cancel();
        self.directions.cancel();
        debug!("map session torn down");
    }
}

fn render(ctx: &MapContext, surface: &dyn RenderSurface, commands: &[DrawCommand]) {
    if !ctx.is_live() {
        debug!("render skipped, context torn down");
        return;
    }
    surface.apply(commands);
}
