//! Geographic primitives: coordinates, lines and their segments.

pub mod coordinate;
pub mod line;

pub use coordinate::Coordinate;
pub use line::{Line, Segment};
