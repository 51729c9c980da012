//! Rendering surface interface and an in-memory implementation.
//!
//! The surface owns named GeoJSON sources and the layers that render them.
//! The engine only ever talks to it through [`RenderSurface`].

use std::collections::BTreeMap;

use geojson::{FeatureCollection, JsonValue};
use serde::Serialize;

use crate::config::{LabelStyle, ViewState};
use crate::error::SurfaceError;
use crate::geometry::Coordinate;

/// Operations the engine needs from a map rendering surface.
pub trait RenderSurface {
    /// Whether the surface accepts source and layer calls yet.
    fn is_ready(&self) -> bool;
    fn has_source(&self, id: &str) -> bool;
    fn add_source(&mut self, id: &str, data: FeatureCollection) -> Result<(), SurfaceError>;
    /// Replaces the whole data of an existing source.
    fn set_source_data(&mut self, id: &str, data: FeatureCollection) -> Result<(), SurfaceError>;
    fn remove_source(&mut self, id: &str) -> Result<(), SurfaceError>;
    fn has_layer(&self, id: &str) -> bool;
    fn add_layer(&mut self, spec: LayerSpec) -> Result<(), SurfaceError>;
    fn remove_layer(&mut self, id: &str) -> Result<(), SurfaceError>;
    fn fly_to(&mut self, center: Coordinate);
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct SymbolLayout {
    pub text_field: JsonValue,
    pub text_size: f64,
    pub text_anchor: String,
    pub text_offset: [f64; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct SymbolPaint {
    pub text_color: String,
    pub text_halo_color: String,
    pub text_halo_width: f64,
}

/// Style layer description. Serialises to a Mapbox style layer object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerSpec {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub source: String,
    pub layout: SymbolLayout,
    pub paint: SymbolPaint,
}

impl LayerSpec {
    /// Text-label layer drawing `label_property` of every feature in
    /// `source`.
    pub fn symbol_labels(id: &str, source: &str, label_property: &str, style: &LabelStyle) -> Self {
        Self {
            id: id.to_string(),
            kind: "symbol".to_string(),
            source: source.to_string(),
            layout: SymbolLayout {
                text_field: serde_json::json!(["get", label_property]),
                text_size: style.text_size,
                text_anchor: style.text_anchor.clone(),
                text_offset: style.text_offset,
            },
            paint: SymbolPaint {
                text_color: style.text_color.clone(),
                text_halo_color: style.halo_color.clone(),
                text_halo_width: style.halo_width,
            },
        }
    }
}

/// Call recorded by [`MemorySurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    AddSource(String),
    SetSourceData(String),
    RemoveSource(String),
    AddLayer(String),
    RemoveLayer(String),
    FlyTo(Coordinate),
}

/// Surface kept entirely in memory.
///
/// It rejects the misuse a real map would: duplicate sources or layers,
/// layers over missing sources and removing a source a layer still uses.
#[derive(Debug)]
pub struct MemorySurface {
    ready: bool,
    sources: BTreeMap<String, FeatureCollection>,
    layers: Vec<LayerSpec>,
    view: ViewState,
    calls: Vec<SurfaceCall>,
}

impl MemorySurface {
    /// Creates a ready surface centred on `view`.
    pub fn new(view: ViewState) -> Self {
        Self {
            ready: true,
            sources: BTreeMap::new(),
            layers: Vec::new(),
            view,
            calls: Vec::new(),
        }
    }

    /// Creates a surface that is still loading.
    pub fn loading(view: ViewState) -> Self {
        Self {
            ready: false,
            ..Self::new(view)
        }
    }

    pub fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }

    pub fn source_data(&self, id: &str) -> Option<&FeatureCollection> {
        self.sources.get(id)
    }

    pub fn layer(&self, id: &str) -> Option<&LayerSpec> {
        self.layers.iter().find(|l| l.id == id)
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn center(&self) -> Coordinate {
        self.view.center
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    /// Calls issued so far, oldest first.
    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<SurfaceCall> {
        std::mem::take(&mut self.calls)
    }
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::new(ViewState::default())
    }
}

impl RenderSurface for MemorySurface {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn has_source(&self, id: &str) -> bool {
        self.sources.contains_key(id)
    }

    fn add_source(&mut self, id: &str, data: FeatureCollection) -> Result<(), SurfaceError> {
        if self.sources.contains_key(id) {
            return Err(SurfaceError::DuplicateSource(id.to_string()));
        }
        self.sources.insert(id.to_string(), data);
        self.calls.push(SurfaceCall::AddSource(id.to_string()));
        Ok(())
    }

    fn set_source_data(&mut self, id: &str, data: FeatureCollection) -> Result<(), SurfaceError> {
        let slot = self
            .sources
            .get_mut(id)
            .ok_or_else(|| SurfaceError::MissingSource(id.to_string()))?;
        *slot = data;
        self.calls.push(SurfaceCall::SetSourceData(id.to_string()));
        Ok(())
    }

    fn remove_source(&mut self, id: &str) -> Result<(), SurfaceError> {
        if let Some(layer) = self.layers.iter().find(|l| l.source == id) {
            return Err(SurfaceError::SourceInUse {
                source_id: id.to_string(),
                layer_id: layer.id.clone(),
            });
        }
        self.sources
            .remove(id)
            .ok_or_else(|| SurfaceError::MissingSource(id.to_string()))?;
        self.calls.push(SurfaceCall::RemoveSource(id.to_string()));
        Ok(())
    }

    fn has_layer(&self, id: &str) -> bool {
        self.layers.iter().any(|l| l.id == id)
    }

    fn add_layer(&mut self, spec: LayerSpec) -> Result<(), SurfaceError> {
        if self.has_layer(&spec.id) {
            return Err(SurfaceError::DuplicateLayer(spec.id));
        }
        if !self.sources.contains_key(&spec.source) {
            return Err(SurfaceError::MissingSource(spec.source));
        }
        self.calls.push(SurfaceCall::AddLayer(spec.id.clone()));
        self.layers.push(spec);
        Ok(())
    }

    fn remove_layer(&mut self, id: &str) -> Result<(), SurfaceError> {
        let idx = self
            .layers
            .iter()
            .position(|l| l.id == id)
            .ok_or_else(|| SurfaceError::MissingLayer(id.to_string()))?;
        self.layers.remove(idx);
        self.calls.push(SurfaceCall::RemoveLayer(id.to_string()));
        Ok(())
    }

    fn fly_to(&mut self, center: Coordinate) {
        self.view.center = center;
        self.calls.push(SurfaceCall::FlyTo(center));
    }
}
