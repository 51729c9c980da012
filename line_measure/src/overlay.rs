//! Keeps the label overlay on a rendering surface in step with the current
//! annotations.
//!
//! The overlay source and its layer exist exactly when there is at least one
//! annotation. Data is always replaced wholesale.

use log::debug;

use crate::annotation::{annotations_to_feature_collection, Annotation};
use crate::config::OverlayConfig;
use crate::error::SurfaceError;
use crate::surface::{LayerSpec, RenderSurface};

/// What a reconcile pass did to the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// The surface is not ready; nothing was touched.
    Deferred,
    /// No annotations and no overlay present.
    Absent,
    /// Layer and source were removed.
    Removed,
    /// The existing source received new data.
    Updated,
    /// Source and layer were created.
    Created,
}

#[derive(Debug, Clone, Default)]
pub struct OverlaySynchronizer {
    config: OverlayConfig,
}

impl OverlaySynchronizer {
    pub fn new(config: OverlayConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// Brings the surface overlay into agreement with `annotations`.
    pub fn reconcile<S: RenderSurface + ?Sized>(
        &self,
        surface: &mut S,
        annotations: &[Annotation],
    ) -> Result<ReconcileOutcome, SurfaceError> {
        if !surface.is_ready() {
            debug!("surface not ready, deferring overlay '{}'", self.config.id);
            return Ok(ReconcileOutcome::Deferred);
        }
        if annotations.is_empty() {
            return self.remove(surface);
        }

        let id = self.config.id.as_str();
        let data = annotations_to_feature_collection(annotations, &self.config.label_property);
        if surface.has_source(id) {
            surface.set_source_data(id, data)?;
            // heal a surface that lost the layer but kept the source
            if !surface.has_layer(id) {
                surface.add_layer(self.layer_spec())?;
            }
            debug!("overlay '{}' updated with {} labels", id, annotations.len());
            Ok(ReconcileOutcome::Updated)
        } else {
            surface.add_source(id, data)?;
            if !surface.has_layer(id) {
                surface.add_layer(self.layer_spec())?;
            }
            debug!("overlay '{}' created with {} labels", id, annotations.len());
            Ok(ReconcileOutcome::Created)
        }
    }

    fn remove<S: RenderSurface + ?Sized>(
        &self,
        surface: &mut S,
    ) -> Result<ReconcileOutcome, SurfaceError> {
        let id = self.config.id.as_str();
        let layer_exists = surface.has_layer(id);
        let source_exists = surface.has_source(id);
        // the layer references the source, so it goes first
        if layer_exists {
            surface.remove_layer(id)?;
        }
        if source_exists {
            surface.remove_source(id)?;
        }
        if layer_exists || source_exists {
            debug!("overlay '{}' removed", id);
            Ok(ReconcileOutcome::Removed)
        } else {
            Ok(ReconcileOutcome::Absent)
        }
    }

    fn layer_spec(&self) -> LayerSpec {
        LayerSpec::symbol_labels(
            &self.config.id,
            &self.config.id,
            &self.config.label_property,
            &self.config.style,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::build;
    use crate::geometry::{Coordinate, Line};
    use crate::surface::{MemorySurface, SurfaceCall};

    fn annotations() -> Vec<Annotation> {
        build(&Line::new(vec![
            Coordinate::new(16.6, 49.2),
            Coordinate::new(16.7, 49.3),
            Coordinate::new(16.8, 49.3),
        ]))
    }

    #[test]
    fn creates_then_updates() {
        let sync = OverlaySynchronizer::default();
        let mut surface = MemorySurface::default();
        assert_eq!(sync.reconcile(&mut surface, &annotations()), Ok(ReconcileOutcome::Created));
        assert_eq!(sync.reconcile(&mut surface, &annotations()), Ok(ReconcileOutcome::Updated));
        assert_eq!(surface.source_count(), 1);
        assert_eq!(surface.layer_count(), 1);
        assert_eq!(
            surface.calls(),
            &[
                SurfaceCall::AddSource("azimuth-labels".into()),
                SurfaceCall::AddLayer("azimuth-labels".into()),
                SurfaceCall::SetSourceData("azimuth-labels".into()),
            ]
        );
        assert_eq!(surface.source_data("azimuth-labels").unwrap().features.len(), 2);
    }

    #[test]
    fn empty_input_removes_layer_before_source() {
        let sync = OverlaySynchronizer::default();
        let mut surface = MemorySurface::default();
        sync.reconcile(&mut surface, &annotations()).unwrap();
        surface.take_calls();
        assert_eq!(sync.reconcile(&mut surface, &[]), Ok(ReconcileOutcome::Removed));
        assert_eq!(
            surface.take_calls(),
            vec![
                SurfaceCall::RemoveLayer("azimuth-labels".into()),
                SurfaceCall::RemoveSource("azimuth-labels".into()),
            ]
        );
        assert_eq!(sync.reconcile(&mut surface, &[]), Ok(ReconcileOutcome::Absent));
        assert!(surface.calls().is_empty());
    }

    #[test]
    fn not_ready_surface_is_left_alone() {
        let sync = OverlaySynchronizer::default();
        let mut surface = MemorySurface::loading(Default::default());
        assert_eq!(sync.reconcile(&mut surface, &annotations()), Ok(ReconcileOutcome::Deferred));
        assert!(surface.calls().is_empty());
        surface.set_ready(true);
        assert_eq!(sync.reconcile(&mut surface, &annotations()), Ok(ReconcileOutcome::Created));
    }

    #[test]
    fn restores_missing_layer() {
        let sync = OverlaySynchronizer::default();
        let mut surface = MemorySurface::default();
        sync.reconcile(&mut surface, &annotations()).unwrap();
        surface.remove_layer("azimuth-labels").unwrap();
        assert_eq!(sync.reconcile(&mut surface, &annotations()), Ok(ReconcileOutcome::Updated));
        assert!(surface.has_layer("azimuth-labels"));
    }

    #[test]
    fn uses_configured_ids() {
        let config = OverlayConfig {
            id: "bearings".into(),
            label_property: "label".into(),
            ..Default::default()
        };
        let sync = OverlaySynchronizer::new(config);
        let mut surface = MemorySurface::default();
        sync.reconcile(&mut surface, &annotations()).unwrap();
        let layer = surface.layer("bearings").unwrap();
        assert_eq!(layer.layout.text_field, serde_json::json!(["get", "label"]));
        let props = surface.source_data("bearings").unwrap().features[0]
            .properties
            .clone()
            .unwrap();
        assert!(props.contains_key("label"));
    }
}
