//! Error hierarchy for route-engine.

use serde::Serialize;
use thiserror::Error;

/// Convenient alias for planning results.
pub type RouteResult<T> = Result<T, RouteError>;

/// Root error of a route plan.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RouteError {
    /// Origin or destination missing.
    #[error("invalid origin or destination coordinates")]
    InvalidRouteEndpoints,

    /// Provider failure, or no candidate route.
    #[error("no route found: {0}")]
    NoRouteFound(String),

    /// A section's geometry could not be decoded.
    #[error("malformed geometry in section {section}: {source}")]
    MalformedGeometry {
        section: usize,
        #[source]
        source: PolylineError,
    },
}

/// Flexible-polyline decoding/encoding failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PolylineError {
    #[error("empty polyline")]
    Empty,

    #[error("invalid character {ch:?} at position {position}")]
    InvalidCharacter { ch: char, position: usize },

    #[error("unsupported format version {0}")]
    UnsupportedVersion(u64),

    #[error("reserved third dimension type {0}")]
    ReservedThirdDimension(u8),

    #[error("precision {0} out of range (0..=15)")]
    PrecisionOutOfRange(u32),

    /// Input ended inside a value or inside a point tuple.
    #[error("truncated polyline")]
    Truncated,

    #[error("value overflows 64 bits")]
    Overflow,

    /// A decoded point is not a valid WGS84 coordinate.
    #[error("point {index} is not a valid coordinate")]
    CoordinateOutOfRange { index: usize },
}

/// A single unresolvable annotation. Recorded on the section and skipped;
/// never fails the plan.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataIntegrityFault {
    #[error("maneuver {maneuver} offset {offset} outside path of {path_len} points")]
    ManeuverOffsetOutOfBounds {
        maneuver: usize,
        offset: i64,
        path_len: usize,
    },

    #[error("maneuver {maneuver} has no offset")]
    ManeuverWithoutOffset { maneuver: usize },

    #[error("span offset {offset} outside path of {path_len} points")]
    SpanOffsetOutOfBounds { offset: i64, path_len: usize },

    #[error("span {span} has incidents but no offset")]
    SpanWithoutOffset { span: usize },

    #[error("span at offset {span_offset} references missing incident {index} (section has {available})")]
    DanglingIncident {
        span_offset: usize,
        index: i64,
        available: usize,
    },
}
