use line_measure::annotation::build;
use line_measure::geodesy::{bearing, length, midpoint};
use line_measure::geometry::{Coordinate, Line};

fn brno_line() -> Line {
    Line::new(vec![Coordinate::new(16.6, 49.2), Coordinate::new(16.7, 49.3)])
}

#[test]
fn brno_segment_length() {
    let km = length(&brno_line());
    assert!(km > 13.2 && km < 13.4, "length {}", km);
}

#[test]
fn brno_segment_annotation() {
    let line = brno_line();
    let annotations = build(&line);
    assert_eq!(annotations.len(), 1);
    let a = &annotations[0];
    assert!((a.position.lon - 16.65).abs() < 1e-2);
    assert!((a.position.lat - 49.25).abs() < 1e-2);
    let expected = bearing(line.coordinates()[0], line.coordinates()[1]);
    assert!((a.bearing - expected).abs() < 1e-12);
    assert!((a.bearing - 33.1).abs() < 0.1, "bearing {}", a.bearing);
    assert_eq!(a.label, "33.1\u{00B0}");
}

#[test]
fn annotation_count_matches_segments() {
    for n in 0..6usize {
        let line = Line::new(
            (0..n)
                .map(|i| Coordinate::new(i as f64 * 0.5, (i % 2) as f64))
                .collect(),
        );
        let annotations = build(&line);
        assert_eq!(annotations.len(), n.saturating_sub(1));
        for (i, a) in annotations.iter().enumerate() {
            assert_eq!(a.segment, i);
            let seg_mid = midpoint(line.coordinates()[i], line.coordinates()[i + 1]);
            assert_eq!(a.position, seg_mid);
        }
    }
}

#[test]
fn build_returns_fresh_collections() {
    let line = brno_line();
    let first = build(&line);
    let extended = build(&line.with_point(Coordinate::new(16.8, 49.3)));
    assert_eq!(first.len(), 1);
    assert_eq!(extended.len(), 2);
    assert_eq!(first[0], extended[0]);
}
