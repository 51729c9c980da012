//! Drawing tool interface.
//!
//! The drawing tool owns the geometry the user edits. It hands out GeoJSON
//! features and reports changes through [`DrawEvent`]s.

use geojson::feature::Id;
use geojson::{Feature, Geometry, Value};

use crate::error::DrawError;
use crate::geometry::{Coordinate, Line};

pub type FeatureId = String;

/// Kind of change reported by the drawing tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawEventKind {
    Create,
    Update,
    Delete,
}

/// Change notification carrying the affected features.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawEvent {
    Create(Vec<Feature>),
    Update(Vec<Feature>),
    Delete(Vec<Feature>),
}

impl DrawEvent {
    pub fn kind(&self) -> DrawEventKind {
        match self {
            DrawEvent::Create(_) => DrawEventKind::Create,
            DrawEvent::Update(_) => DrawEventKind::Update,
            DrawEvent::Delete(_) => DrawEventKind::Delete,
        }
    }

    pub fn features(&self) -> &[Feature] {
        match self {
            DrawEvent::Create(f) | DrawEvent::Update(f) | DrawEvent::Delete(f) => f,
        }
    }
}

/// Capabilities the controller needs from an interactive drawing tool.
pub trait DrawBackend {
    /// Every feature currently held, oldest first.
    fn get_all(&self) -> Vec<Feature>;
    /// Adds a feature and returns its id. A feature whose id already exists
    /// replaces the stored one.
    fn add(&mut self, feature: Feature) -> FeatureId;
    fn delete(&mut self, id: &str) -> Result<(), DrawError>;
    fn delete_all(&mut self);
}

/// String form of a feature id.
pub fn feature_id(feature: &Feature) -> Option<FeatureId> {
    match feature.id.as_ref()? {
        Id::String(s) => Some(s.clone()),
        Id::Number(n) => Some(n.to_string()),
    }
}

/// Extracts the line carried by a `LineString` feature.
pub fn line_from_feature(feature: &Feature) -> Result<Line, DrawError> {
    let Some(Value::LineString(positions)) = feature.geometry.as_ref().map(|g| &g.value) else {
        return Err(DrawError::NotALineString);
    };
    positions
        .iter()
        .enumerate()
        .map(|(i, p)| Coordinate::from_position(p).ok_or(DrawError::MalformedPosition(i)))
        .collect::<Result<Vec<_>, _>>()
        .map(Line::new)
}

/// `LineString` feature without an id, ready to hand to a drawing tool.
pub fn line_feature(line: &Line) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(line.to_geojson_value())),
        id: None,
        properties: None,
        foreign_members: None,
    }
}

/// Drawing tool kept in memory. Ids are assigned as `feature-<n>`.
#[derive(Debug, Default)]
pub struct MemoryDrawBackend {
    features: Vec<Feature>,
    next_id: u64,
}

impl MemoryDrawBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Stores a freshly drawn line and returns the create event the tool
    /// would emit.
    pub fn draw(&mut self, line: &Line) -> DrawEvent {
        let id = self.add(line_feature(line));
        let feature = self.feature(&id).cloned().into_iter().collect();
        DrawEvent::Create(feature)
    }

    /// Replaces the geometry of `id` and returns the matching update event.
    pub fn edit(&mut self, id: &str, line: &Line) -> Result<DrawEvent, DrawError> {
        let feature = self
            .features
            .iter_mut()
            .find(|f| feature_id(f).as_deref() == Some(id))
            .ok_or_else(|| DrawError::UnknownFeature(id.to_string()))?;
        feature.geometry = Some(Geometry::new(line.to_geojson_value()));
        Ok(DrawEvent::Update(vec![feature.clone()]))
    }

    pub fn feature(&self, id: &str) -> Option<&Feature> {
        self.features
            .iter()
            .find(|f| feature_id(f).as_deref() == Some(id))
    }
}

impl DrawBackend for MemoryDrawBackend {
    fn get_all(&self) -> Vec<Feature> {
        self.features.clone()
    }

    fn add(&mut self, mut feature: Feature) -> FeatureId {
        let id = match feature_id(&feature) {
            Some(id) => id,
            None => {
                self.next_id += 1;
                let id = format!("feature-{}", self.next_id);
                feature.id = Some(Id::String(id.clone()));
                id
            }
        };
        match self
            .features
            .iter_mut()
            .find(|f| feature_id(f).as_deref() == Some(id.as_str()))
        {
            Some(existing) => *existing = feature,
            None => self.features.push(feature),
        }
        id
    }

    fn delete(&mut self, id: &str) -> Result<(), DrawError> {
        let idx = self
            .features
            .iter()
            .position(|f| feature_id(f).as_deref() == Some(id))
            .ok_or_else(|| DrawError::UnknownFeature(id.to_string()))?;
        self.features.remove(idx);
        Ok(())
    }

    fn delete_all(&mut self) {
        self.features.clear();
    }
}
