//! Per-segment bearing labels derived from a line.

use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue, Value};
use log::warn;

use crate::geodesy::{self, BearingConvention};
use crate::geometry::{Coordinate, Line};

/// Bearing label placed at a segment midpoint.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Annotation {
    /// Index of the source segment along the line.
    pub segment: usize,
    pub position: Coordinate,
    pub bearing: f64,
    pub label: String,
    /// Set when the segment has zero length and the bearing carries no
    /// direction.
    pub degenerate: bool,
}

/// Builds one annotation per segment using compass bearings.
pub fn build(line: &Line) -> Vec<Annotation> {
    build_with(line, BearingConvention::Compass)
}

/// Builds one annotation per segment, in segment order.
///
/// Every call returns a fresh collection; lines with fewer than two
/// vertices yield none.
pub fn build_with(line: &Line, convention: BearingConvention) -> Vec<Annotation> {
    line.segments()
        .enumerate()
        .map(|(segment, seg)| {
            let degenerate = seg.is_degenerate();
            if degenerate {
                warn!(
                    "segment {} has zero length at {}, reporting bearing 0",
                    segment, seg.start
                );
            }
            let bearing = geodesy::bearing_with(seg.start, seg.end, convention);
            Annotation {
                segment,
                position: geodesy::midpoint(seg.start, seg.end),
                bearing,
                label: format_bearing(bearing),
                degenerate,
            }
        })
        .collect()
}

/// Formats an angle to one decimal place followed by a degree sign.
pub fn format_bearing(degrees: f64) -> String {
    let mut rounded = (degrees * 10.0).round() / 10.0;
    if rounded == 0.0 || rounded == 360.0 {
        // also clears a negative zero
        rounded = 0.0;
    } else if rounded == -180.0 {
        rounded = 180.0;
    }
    format!("{:.1}\u{00B0}", rounded)
}

impl Annotation {
    /// GeoJSON point feature with the label stored under `label_property`.
    pub fn to_feature(&self, label_property: &str) -> Feature {
        let mut properties = JsonObject::new();
        properties.insert(
            label_property.to_string(),
            JsonValue::String(self.label.clone()),
        );
        properties.insert("bearing".to_string(), JsonValue::from(self.bearing));
        properties.insert("segment".to_string(), JsonValue::from(self.segment));
        properties.insert("degenerate".to_string(), JsonValue::Bool(self.degenerate));
        Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::Point(self.position.to_position()))),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        }
    }
}

/// Collects annotations into the feature collection fed to the overlay
/// source.
pub fn annotations_to_feature_collection(
    annotations: &[Annotation],
    label_property: &str,
) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: annotations
            .iter()
            .map(|a| a.to_feature(label_property))
            .collect(),
        foreign_members: None,
    }
}
