use super::*;
use crate::error::DacError;

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

#[test]
fn bisector_keeps_first_point_on_the_left() {
    let a = p(0.0, 0.0);
    let b = p(10.0, 0.0);
    let line = bisector(&a, &b).unwrap();
    assert!((line.origin - p(5.0, 0.0)).norm() < 1e-12);
    assert!(line.dir.x.abs() < 1e-12 && (line.dir.y - 1.0).abs() < 1e-12);
    assert!(line.side(&a) > 0.0);
    assert!(line.side(&b) < 0.0);
    assert!(bisector(&a, &a).is_none());
}

#[test]
fn line_intersection_parameters() {
    let h = Line::through(p(0.0, 1.0), p(4.0, 1.0)).unwrap();
    let v = Line::through(p(2.0, -3.0), p(2.0, 5.0)).unwrap();
    let (t, u) = h.intersect(&v).unwrap();
    assert!((h.at(t) - p(2.0, 1.0)).norm() < 1e-12);
    assert!((v.at(u) - p(2.0, 1.0)).norm() < 1e-12);
    assert!((h.param_of(&p(2.0, 7.0)) - 2.0).abs() < 1e-12);
    let parallel = Line::through(p(0.0, 2.0), p(1.0, 2.0)).unwrap();
    assert!(h.intersect(&parallel).is_none());
}

#[test]
fn segment_bisector_matches_free_function() {
    let s = Segment::new(p(1.0, 1.0), p(3.0, 5.0));
    assert!((s.length() - 20f64.sqrt()).abs() < 1e-12);
    assert_eq!(s.perpendicular_bisector(), bisector(&s.first, &s.second));
    let mid = s.midpoint();
    assert!((mid - p(2.0, 3.0)).norm() < 1e-12);
}

#[test]
fn circumcenter_right_triangle() {
    let c = circumcenter(&p(0.0, 0.0), &p(1.0, 0.0), &p(0.0, 1.0)).unwrap();
    assert!((c - p(0.5, 0.5)).norm() < 1e-12);
    assert!(circumcenter(&p(0.0, 0.0), &p(1.0, 1.0), &p(2.0, 2.0)).is_none());
}

#[test]
fn preprocess_sorts_and_breaks_x_ties() {
    let pts = vec![p(1.0, 0.0), p(0.0, 1.0), p(0.0, 0.0), p(0.0, 2.0), p(-3.0, 4.0)];
    let out = preprocess_points(pts).unwrap();
    assert_eq!(out.len(), 5);
    for w in out.windows(2) {
        assert!(w[0].x < w[1].x, "x must strictly increase: {:?}", out);
    }
    // The topmost point of the x = 0 run keeps its coordinate.
    assert!(out.iter().any(|q| q.x == 0.0 && q.y == 2.0));
    assert_eq!(out[0], p(-3.0, 4.0));
    assert!(out[1].y == 0.0 && out[2].y == 1.0);
}

#[test]
fn preprocess_separates_duplicates() {
    let out = preprocess_points(vec![p(2.0, 2.0), p(2.0, 2.0), p(2.0, 2.0)]).unwrap();
    assert!(out[0].x < out[1].x && out[1].x < out[2].x);
    assert!((out[2].x - 2.0).abs() < 1e-12);
}

#[test]
fn preprocess_rejects_bad_input() {
    assert_eq!(preprocess_points(Vec::new()), Err(DacError::EmptyInput));
    assert_eq!(
        preprocess_points(vec![p(0.0, 0.0), p(f64::NAN, 1.0)]),
        Err(DacError::NonFinitePoint { index: 1 })
    );
}

#[test]
fn monotone_chain_ccw_without_collinear_vertices() {
    let pts = vec![
        p(0.0, 0.0),
        p(1.0, 0.0),
        p(2.0, 0.0),
        p(2.0, 2.0),
        p(0.0, 2.0),
        p(1.0, 1.0),
    ];
    let hull = monotone_chain(&sites_of(&pts, 0));
    let idx: Vec<usize> = hull.iter().map(|s| s.index).collect();
    assert_eq!(idx, vec![0, 2, 3, 4]);
    let line = monotone_chain(&sites_of(&[p(0.0, 0.0), p(1.0, 1.0), p(2.0, 2.0)], 10));
    assert_eq!(line.iter().map(|s| s.index).collect::<Vec<_>>(), vec![10, 12]);
}
