//! Engine configuration loaded from JSON.

use serde::{Deserialize, Serialize};

use crate::geodesy::BearingConvention;
use crate::geometry::Coordinate;

/// Text style of the bearing labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelStyle {
    pub text_size: f64,
    pub text_anchor: String,
    pub text_offset: [f64; 2],
    pub text_color: String,
    pub halo_color: String,
    pub halo_width: f64,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            text_size: 14.0,
            text_anchor: "center".to_string(),
            text_offset: [0.0, 0.0],
            text_color: "#ff0000".to_string(),
            halo_color: "#ffffff".to_string(),
            halo_width: 1.0,
        }
    }
}

/// Names and style of the overlay source/layer pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Shared id of the source and of the layer rendering it.
    pub id: String,
    /// Feature property holding the label text.
    pub label_property: String,
    pub style: LabelStyle,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            id: "azimuth-labels".to_string(),
            label_property: "azimuth".to_string(),
            style: LabelStyle::default(),
        }
    }
}

/// Camera position of a rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub center: Coordinate,
    pub zoom: f64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            center: Coordinate::new(16.598509, 49.212132),
            zoom: 14.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub overlay: OverlayConfig,
    pub bearing: BearingConvention,
    pub initial_view: ViewState,
}

impl EngineConfig {
    /// Parses a JSON document. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> std::io::Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }

    pub fn to_json_string(&self) -> std::io::Result<String> {
        serde_json::to_string_pretty(self).map_err(std::io::Error::other)
    }
}

pub fn read_config_json(path: &str) -> std::io::Result<EngineConfig> {
    let contents = std::fs::read_to_string(path)?;
    EngineConfig::from_json_str(&contents)
}

pub fn write_config_json(path: &str, config: &EngineConfig) -> std::io::Result<()> {
    std::fs::write(path, config.to_json_string()?)
}
