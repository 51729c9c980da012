//! Read model for displaying the current line.

use std::fmt;

use crate::geometry::Coordinate;

/// Vertices and length of the active line, as shown to the user.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct LineSummary {
    pub coordinates: Vec<Coordinate>,
    pub length_km: f64,
}

impl LineSummary {
    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }
}

impl fmt::Display for LineSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "Draw a line to see the info");
        }
        for (i, c) in self.coordinates.iter().enumerate() {
            writeln!(f, "Point {}", i + 1)?;
            writeln!(f, "  Lng: {}  Lat: {}", c.lon, c.lat)?;
        }
        writeln!(f, "Length")?;
        writeln!(f, "  {:.3}km", self.length_km)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_summary_prompts_for_a_line() {
        assert_eq!(LineSummary::default().to_string(), "Draw a line to see the info\n");
    }

    #[test]
    fn lists_points_and_length() {
        let summary = LineSummary {
            coordinates: vec![Coordinate::new(16.6, 49.2), Coordinate::new(16.7, 49.3)],
            length_km: 13.2794,
        };
        let text = summary.to_string();
        assert!(text.contains("Point 2\n  Lng: 16.7  Lat: 49.3"));
        assert!(text.ends_with("Length\n  13.279km\n"));
    }
}
