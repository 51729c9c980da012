use super::Coordinate;
use crate::error::ValidationError;

/// Pair of consecutive line vertices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Coordinate,
    pub end: Coordinate,
}

impl Segment {
    pub fn new(start: Coordinate, end: Coordinate) -> Self {
        Self { start, end }
    }

    /// Returns `true` when both endpoints are the same position.
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }
}

/// Ordered polyline vertices.
///
/// Edits return a new line; the original is never patched in place.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Line {
    coordinates: Vec<Coordinate>,
}

impl Line {
    pub fn new(coordinates: Vec<Coordinate>) -> Self {
        Self { coordinates }
    }

    pub fn coordinates(&self) -> &[Coordinate] {
        &self.coordinates
    }

    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    /// Iterates the `len() - 1` segments from first to last.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.coordinates
            .windows(2)
            .map(|pair| Segment::new(pair[0], pair[1]))
    }

    /// Returns a copy with `point` appended.
    pub fn with_point(&self, point: Coordinate) -> Self {
        let mut coordinates = self.coordinates.clone();
        coordinates.push(point);
        Self { coordinates }
    }

    /// Returns a copy without the vertex at `index`. Out of range indices
    /// leave the copy unchanged.
    pub fn without_point(&self, index: usize) -> Self {
        let coordinates = self
            .coordinates
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, c)| *c)
            .collect();
        Self { coordinates }
    }

    /// Returns a copy with the vertex at `index` replaced.
    pub fn with_replaced(&self, index: usize, point: Coordinate) -> Self {
        let mut coordinates = self.coordinates.clone();
        if let Some(slot) = coordinates.get_mut(index) {
            *slot = point;
        }
        Self { coordinates }
    }

    /// Checks the line is acceptable as programmatic input: at least two
    /// vertices, every vertex in range and not all vertices identical.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.coordinates.len() < 2 {
            return Err(ValidationError::TooFewCoordinates {
                count: self.coordinates.len(),
            });
        }
        if let Some((index, c)) = self
            .coordinates
            .iter()
            .enumerate()
            .find(|(_, c)| !c.is_in_range())
        {
            return Err(ValidationError::CoordinateOutOfRange {
                index,
                lon: c.lon,
                lat: c.lat,
            });
        }
        let first = self.coordinates[0];
        if self.coordinates.iter().all(|c| *c == first) {
            return Err(ValidationError::IdenticalEndpoints);
        }
        Ok(())
    }

    /// GeoJSON `LineString` geometry value.
    pub fn to_geojson_value(&self) -> geojson::Value {
        geojson::Value::LineString(
            self.coordinates
                .iter()
                .map(|c| c.to_position())
                .collect(),
        )
    }
}

impl From<Vec<Coordinate>> for Line {
    fn from(coordinates: Vec<Coordinate>) -> Self {
        Self::new(coordinates)
    }
}
