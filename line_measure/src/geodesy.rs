//! Great-circle computations on a spherical earth.
//!
//! All angles are in degrees and all distances in kilometers. The functions
//! are pure and never fail: a zero-length segment has bearing 0.

use geo::{Bearing, Distance, Haversine, InterpolatePoint, Point};

use crate::geometry::{Coordinate, Line};

/// Range used when reporting bearings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BearingConvention {
    /// Degrees clockwise from north in [0, 360).
    #[default]
    Compass,
    /// Degrees in (-180, 180], negative towards the west.
    Signed,
}

impl BearingConvention {
    /// Maps any angle in degrees into this convention's range.
    pub fn normalize(self, degrees: f64) -> f64 {
        let compass = degrees.rem_euclid(360.0);
        let compass = if compass >= 360.0 { 0.0 } else { compass };
        match self {
            BearingConvention::Compass => compass,
            BearingConvention::Signed if compass > 180.0 => compass - 360.0,
            BearingConvention::Signed => compass,
        }
    }
}

/// Great-circle (haversine) distance between two coordinates, on a sphere
/// with the mean earth radius of 6371.0088 km.
pub fn distance(from: Coordinate, to: Coordinate) -> f64 {
    Haversine::distance(Point::from(from), Point::from(to)) / 1000.0
}

/// Total geodesic length of `line`. Zero for fewer than two vertices.
pub fn length(line: &Line) -> f64 {
    line.segments().map(|seg| distance(seg.start, seg.end)).sum()
}

/// Initial compass bearing from `from` to `to` in [0, 360).
///
/// Returns 0 when the points coincide.
pub fn bearing(from: Coordinate, to: Coordinate) -> f64 {
    bearing_with(from, to, BearingConvention::Compass)
}

/// Initial bearing reported in the given convention.
pub fn bearing_with(from: Coordinate, to: Coordinate, convention: BearingConvention) -> f64 {
    if from == to {
        return 0.0;
    }
    convention.normalize(Haversine::bearing(Point::from(from), Point::from(to)))
}

/// Point halfway along the great circle between `from` and `to`.
pub fn midpoint(from: Coordinate, to: Coordinate) -> Coordinate {
    if from == to {
        return from;
    }
    let mid = Coordinate::from(Haversine::point_at_ratio_between(
        Point::from(from),
        Point::from(to),
        0.5,
    ));
    Coordinate::new(normalize_lon(mid.lon), mid.lat)
}

fn normalize_lon(lon: f64) -> f64 {
    (lon + 540.0).rem_euclid(360.0) - 180.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn one_degree_of_latitude() {
        let d = distance(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 1.0));
        assert_close(d, 111.195, 1e-3);
    }

    #[test]
    fn length_of_short_lines_is_zero() {
        assert_eq!(length(&Line::default()), 0.0);
        assert_eq!(length(&Line::new(vec![Coordinate::new(3.0, 4.0)])), 0.0);
    }

    #[test]
    fn length_sums_segments() {
        let line = Line::new(vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.0, 1.0),
            Coordinate::new(0.0, 2.0),
        ]);
        assert_close(length(&line), 2.0 * 111.195, 1e-2);
    }

    #[test]
    fn cardinal_bearings() {
        let o = Coordinate::new(0.0, 0.0);
        assert_close(bearing(o, Coordinate::new(0.0, 1.0)), 0.0, 1e-9);
        assert_close(bearing(o, Coordinate::new(1.0, 0.0)), 90.0, 1e-9);
        assert_close(bearing(o, Coordinate::new(0.0, -1.0)), 180.0, 1e-9);
        assert_close(bearing(o, Coordinate::new(-1.0, 0.0)), 270.0, 1e-9);
    }

    #[test]
    fn signed_convention() {
        let o = Coordinate::new(0.0, 0.0);
        let west = Coordinate::new(-1.0, 0.0);
        assert_close(bearing_with(o, west, BearingConvention::Signed), -90.0, 1e-9);
        assert_close(BearingConvention::Signed.normalize(180.0), 180.0, 1e-12);
        assert_close(BearingConvention::Compass.normalize(-90.0), 270.0, 1e-12);
        assert_close(BearingConvention::Compass.normalize(720.0), 0.0, 1e-12);
    }

    #[test]
    fn coincident_points_have_zero_bearing() {
        let p = Coordinate::new(16.6, 49.2);
        assert_eq!(bearing(p, p), 0.0);
        assert_eq!(bearing_with(p, p, BearingConvention::Signed), 0.0);
        assert_eq!(midpoint(p, p), p);
    }

    #[test]
    fn midpoint_on_equator() {
        let m = midpoint(Coordinate::new(0.0, 0.0), Coordinate::new(10.0, 0.0));
        assert_close(m.lon, 5.0, 1e-9);
        assert_close(m.lat, 0.0, 1e-9);
    }

    #[test]
    fn midpoint_follows_great_circle_at_high_latitude() {
        let m = midpoint(Coordinate::new(-40.0, 70.0), Coordinate::new(40.0, 70.0));
        assert_close(m.lon, 0.0, 1e-9);
        // the great circle bulges towards the pole
        assert!(m.lat > 72.0, "midpoint latitude {}", m.lat);
    }

    #[test]
    fn midpoint_across_antimeridian() {
        let m = midpoint(Coordinate::new(179.0, 0.0), Coordinate::new(-179.0, 0.0));
        assert_close(m.lon.abs(), 180.0, 1e-9);
    }
}
