//! Geodesic line measurement and bearing-label overlay engine.
//!
//! A single polyline is drawn with an external drawing tool. The engine
//! measures it, derives one bearing label per segment and keeps a label
//! overlay on the map surface consistent with the line.

pub mod annotation;
pub mod config;
pub mod controller;
pub mod draw;
pub mod error;
pub mod geodesy;
pub mod geometry;
pub mod overlay;
pub mod summary;
pub mod surface;

pub use annotation::Annotation;
pub use config::EngineConfig;
pub use controller::{LineController, LineState};
pub use error::{DrawError, LineError, SurfaceError, ValidationError};
pub use geometry::{Coordinate, Line};
