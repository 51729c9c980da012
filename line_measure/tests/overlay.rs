use line_measure::annotation::build;
use line_measure::config::OverlayConfig;
use line_measure::geometry::{Coordinate, Line};
use line_measure::overlay::{OverlaySynchronizer, ReconcileOutcome};
use line_measure::surface::{MemorySurface, RenderSurface, SurfaceCall};

fn annotations() -> Vec<line_measure::Annotation> {
    build(&Line::new(vec![
        Coordinate::new(0.0, 0.0),
        Coordinate::new(1.0, 0.0),
        Coordinate::new(1.0, 1.0),
    ]))
}

#[test]
fn reconcile_twice_matches_reconcile_once() {
    let sync = OverlaySynchronizer::default();

    let mut once = MemorySurface::default();
    sync.reconcile(&mut once, &annotations()).unwrap();

    let mut twice = MemorySurface::default();
    sync.reconcile(&mut twice, &annotations()).unwrap();
    sync.reconcile(&mut twice, &annotations()).unwrap();

    assert_eq!(once.source_data("azimuth-labels"), twice.source_data("azimuth-labels"));
    assert_eq!(once.layer("azimuth-labels"), twice.layer("azimuth-labels"));
    let creates = twice
        .calls()
        .iter()
        .filter(|c| matches!(c, SurfaceCall::AddSource(_) | SurfaceCall::AddLayer(_)))
        .count();
    assert_eq!(creates, 2);
}

#[test]
fn empty_after_non_empty_leaves_nothing() {
    let sync = OverlaySynchronizer::default();
    let mut surface = MemorySurface::default();
    sync.reconcile(&mut surface, &annotations()).unwrap();
    sync.reconcile(&mut surface, &[]).unwrap();
    assert!(!surface.has_source("azimuth-labels"));
    assert!(!surface.has_layer("azimuth-labels"));
}

#[test]
fn empty_on_fresh_surface_is_a_no_op() {
    let sync = OverlaySynchronizer::default();
    let mut surface = MemorySurface::default();
    assert_eq!(sync.reconcile(&mut surface, &[]), Ok(ReconcileOutcome::Absent));
    assert!(surface.calls().is_empty());
}

#[test]
fn overlay_is_never_left_empty_but_present() {
    let sync = OverlaySynchronizer::new(OverlayConfig::default());
    let mut surface = MemorySurface::default();
    for n in [3usize, 0, 2, 1, 0, 4] {
        let line = Line::new((0..n).map(|i| Coordinate::new(i as f64, 0.0)).collect());
        let annotations = build(&line);
        sync.reconcile(&mut surface, &annotations).unwrap();
        let present = surface.has_source("azimuth-labels");
        assert_eq!(present, !annotations.is_empty());
        assert_eq!(surface.has_layer("azimuth-labels"), present);
        if let Some(data) = surface.source_data("azimuth-labels") {
            assert_eq!(data.features.len(), annotations.len());
        }
    }
}
