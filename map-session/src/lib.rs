//! Map context lifecycle and UI controllers.
//!
//! - [`context`]: `MapContext`: every service plus SDK assets, `init`/`teardown`
//! - [`session`]: `MapSession`: debounced triggers rendering into a surface
//! - [`projector`]: results → `DrawCommand` batches
//! - [`assets`]: SDK asset loading with rate-limit retry

pub mod assets;
pub mod context;
pub mod errors;
pub mod projector;
pub mod session;

#[cfg(test)]
mod testing;

pub use assets::{AssetBundle, LoadedAsset, SdkAssetLoader};
pub use context::{MapConfig, MapContext, Services};
pub use errors::{SessionError, SessionResult};
pub use projector::{
    DrawCommand, Marker, MarkerKind, PolylineShape, RenderSurface, ResultProjector,
    route_alert_message,
};
pub use session::MapSession;
