//! Line interaction state machine.
//!
//! [`LineController`] owns the single active line, derives its annotations
//! and pushes them to the overlay after every transition. Transitions take
//! `&mut self` and run to completion, so no event can observe a half
//! applied change.

use geojson::Feature;
use log::{debug, error, info, warn};

use crate::annotation::{self, Annotation};
use crate::config::EngineConfig;
use crate::draw::{feature_id, line_feature, line_from_feature, DrawBackend, DrawEvent, DrawEventKind};
use crate::error::{DrawError, LineError};
use crate::geodesy::{self, BearingConvention};
use crate::geometry::{Coordinate, Line};
use crate::overlay::{OverlaySynchronizer, ReconcileOutcome};
use crate::summary::LineSummary;
use crate::surface::RenderSurface;

/// Whether a line is currently active.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LineState {
    #[default]
    Empty,
    Active(Line),
}

pub struct LineController<D: DrawBackend, S: RenderSurface> {
    draw: D,
    surface: S,
    overlay: OverlaySynchronizer,
    convention: BearingConvention,
    state: LineState,
    annotations: Vec<Annotation>,
    length_km: f64,
}

impl<D: DrawBackend, S: RenderSurface> LineController<D, S> {
    /// Drawing tool events that change controller state. Deletions are not
    /// among them: every delete goes through [`LineController::clear`].
    pub const SUBSCRIPTIONS: [DrawEventKind; 2] = [DrawEventKind::Create, DrawEventKind::Update];

    pub fn new(draw: D, surface: S, config: &EngineConfig) -> Self {
        Self {
            draw,
            surface,
            overlay: OverlaySynchronizer::new(config.overlay.clone()),
            convention: config.bearing,
            state: LineState::Empty,
            annotations: Vec::new(),
            length_km: 0.0,
        }
    }

    /// Routes a drawing tool event to its transition.
    pub fn handle(&mut self, event: &DrawEvent) -> Result<(), LineError> {
        match event {
            DrawEvent::Create(features) => self.on_draw_create(features),
            DrawEvent::Update(features) => self.on_draw_update(features),
            DrawEvent::Delete(features) => {
                debug!(
                    "ignoring native delete of {} feature(s), use clear()",
                    features.len()
                );
                Ok(())
            }
        }
    }

    /// A line was drawn with the tool.
    ///
    /// The tool may briefly hold the previous line as well; everything but
    /// the created feature is deleted from it. When the tool does not hold
    /// the created feature, its newest line is kept and becomes the active
    /// line instead.
    pub fn on_draw_create(&mut self, features: &[Feature]) -> Result<(), LineError> {
        let Some((feature, line)) = first_line(features) else {
            debug!("create event without a LineString feature");
            return Ok(());
        };
        let line = match self.keep_only(feature)? {
            Some(kept) => line_from_feature(&kept)?,
            None => line,
        };
        info!("line created with {} points", line.len());
        self.apply(LineState::Active(line))
    }

    /// The active line was edited with the tool. Ignored while empty.
    pub fn on_draw_update(&mut self, features: &[Feature]) -> Result<(), LineError> {
        if self.state == LineState::Empty {
            debug!("update event without an active line");
            return Ok(());
        }
        let Some((_, line)) = first_line(features) else {
            debug!("update event without a LineString feature");
            return Ok(());
        };
        debug!("line updated to {} points", line.len());
        self.apply(LineState::Active(line))
    }

    /// Replaces the current line with `coords` and centres the view on its
    /// first point.
    ///
    /// Invalid input is rejected before anything changes.
    pub fn set_line_programmatically(&mut self, coords: &[Coordinate]) -> Result<(), LineError> {
        let line = Line::new(coords.to_vec());
        if let Err(e) = line.validate() {
            warn!("rejected line: {}", e);
            return Err(e.into());
        }

        self.clear()?;
        let id = self.draw.add(line_feature(&line));
        let created = self
            .draw
            .get_all()
            .into_iter()
            .find(|f| feature_id(f).as_deref() == Some(id.as_str()))
            .ok_or_else(|| DrawError::UnknownFeature(id.clone()))?;
        self.on_draw_create(std::slice::from_ref(&created))?;

        self.recenter(coords[0]);
        Ok(())
    }

    /// Removes the line from the tool and the overlay. Safe to repeat.
    pub fn clear(&mut self) -> Result<(), LineError> {
        self.draw.delete_all();
        if self.state != LineState::Empty {
            info!("line cleared");
        }
        self.apply(LineState::Empty)
    }

    /// Pushes the current annotations to the surface again, e.g. once it
    /// finished loading.
    pub fn sync_overlay(&mut self) -> Result<ReconcileOutcome, LineError> {
        Ok(self.overlay.reconcile(&mut self.surface, &self.annotations)?)
    }

    pub fn state(&self) -> &LineState {
        &self.state
    }

    pub fn line(&self) -> Option<&Line> {
        match &self.state {
            LineState::Active(line) => Some(line),
            LineState::Empty => None,
        }
    }

    /// Vertices of the active line; empty when there is none.
    pub fn coordinates(&self) -> &[Coordinate] {
        self.line().map(Line::coordinates).unwrap_or(&[])
    }

    /// Geodesic length of the active line in kilometers.
    pub fn length_km(&self) -> f64 {
        self.length_km
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn summary(&self) -> LineSummary {
        LineSummary {
            coordinates: self.coordinates().to_vec(),
            length_km: self.length_km,
        }
    }

    pub fn draw_backend(&self) -> &D {
        &self.draw
    }

    /// Host access to the drawing tool, where the user draws and edits.
    pub fn draw_backend_mut(&mut self) -> &mut D {
        &mut self.draw
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Host access to the surface, e.g. to report readiness. Overlay data
    /// must still only be written by the controller.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_parts(self) -> (D, S) {
        (self.draw, self.surface)
    }

    /// Reduces the tool to a single feature and returns the one kept: the
    /// created feature if the tool holds it, otherwise the newest line.
    fn keep_only(&mut self, created: &Feature) -> Result<Option<Feature>, LineError> {
        let all = self.draw.get_all();
        let created_id = feature_id(created);
        let kept_idx = created_id
            .as_ref()
            .and_then(|id| all.iter().position(|f| feature_id(f).as_ref() == Some(id)))
            .or_else(|| all.iter().rposition(|f| line_from_feature(f).is_ok()));
        let Some(kept_idx) = kept_idx else {
            return Ok(None);
        };
        let kept = all[kept_idx].clone();
        if all.len() == 1 {
            return Ok(Some(kept));
        }

        warn!("drawing tool held {} features, keeping one", all.len());
        let stale: Option<Vec<String>> = all
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != kept_idx)
            .map(|(_, f)| feature_id(f))
            .collect();
        match stale {
            Some(ids) => {
                for id in ids {
                    self.draw.delete(&id)?;
                }
                Ok(Some(kept))
            }
            None => {
                // features without an id cannot be deleted one by one
                self.draw.delete_all();
                let id = self.draw.add(kept.clone());
                let stored = self
                    .draw
                    .get_all()
                    .into_iter()
                    .find(|f| feature_id(f).as_deref() == Some(id.as_str()))
                    .unwrap_or(kept);
                Ok(Some(stored))
            }
        }
    }

    fn apply(&mut self, state: LineState) -> Result<(), LineError> {
        self.state = state;
        let (annotations, length_km) = match &self.state {
            LineState::Empty => (Vec::new(), 0.0),
            LineState::Active(line) => (
                annotation::build_with(line, self.convention),
                geodesy::length(line),
            ),
        };
        self.annotations = annotations;
        self.length_km = length_km;
        match self.overlay.reconcile(&mut self.surface, &self.annotations) {
            Ok(outcome) => {
                debug!("overlay reconcile: {:?}", outcome);
                Ok(())
            }
            Err(e) => {
                error!("overlay reconcile failed: {}", e);
                Err(e.into())
            }
        }
    }

    fn recenter(&mut self, center: Coordinate) {
        if self.surface.is_ready() {
            self.surface.fly_to(center);
        } else {
            debug!("surface not ready, skipping fly to {}", center);
        }
    }
}

fn first_line(features: &[Feature]) -> Option<(&Feature, Line)> {
    features.iter().find_map(|f| match line_from_feature(f) {
        Ok(line) => Some((f, line)),
        Err(DrawError::NotALineString) => None,
        Err(e) => {
            warn!("skipping malformed line feature: {}", e);
            None
        }
    })
}
