//! Error types shared by the measurement engine.

use thiserror::Error;

/// Input rejected by the programmatic line entry point.
///
/// A rejected transition never touches controller state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("a line needs at least two points, got {count}")]
    TooFewCoordinates { count: usize },
    #[error("a line needs at least two different points")]
    IdenticalEndpoints,
    #[error("point {index} is out of range: lng {lon}, lat {lat}")]
    CoordinateOutOfRange { index: usize, lon: f64, lat: f64 },
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(String),
}

/// Failure reported by a rendering surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    #[error("source '{0}' already exists")]
    DuplicateSource(String),
    #[error("layer '{0}' already exists")]
    DuplicateLayer(String),
    #[error("source '{0}' does not exist")]
    MissingSource(String),
    #[error("layer '{0}' does not exist")]
    MissingLayer(String),
    #[error("source '{source_id}' is still used by layer '{layer_id}'")]
    SourceInUse { source_id: String, layer_id: String },
}

/// Failure reported by a drawing backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrawError {
    #[error("unknown feature '{0}'")]
    UnknownFeature(String),
    #[error("feature is not a LineString")]
    NotALineString,
    #[error("position {0} has fewer than two ordinates")]
    MalformedPosition(usize),
}

/// Error returned by a controller transition.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Surface(#[from] SurfaceError),
    #[error(transparent)]
    Draw(#[from] DrawError),
}
