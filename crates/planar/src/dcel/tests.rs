use super::*;
use crate::geom2::Point;

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn bounded_faces(dcel: &Dcel) -> Vec<FaceId> {
    dcel.face_ids().filter(|&f| f != UNBOUNDED).collect()
}

#[test]
fn triangle_has_one_bounded_face() {
    let pts = [p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0)];
    let dcel = Dcel::from_plane_graph(&pts, &[(0, 1), (1, 2), (2, 0)]);
    dcel.validate().unwrap();
    assert_eq!(dcel.num_vertices(), 3);
    assert_eq!(dcel.num_half_edges(), 6);
    assert_eq!(dcel.num_faces(), 2);
    let inner = bounded_faces(&dcel)[0];
    let cycle: Vec<_> = dcel.face_half_edges(inner).collect();
    assert_eq!(cycle.len(), 3);
    assert!((dcel.cycle_area(cycle[0]).unwrap() - 0.5).abs() < 1e-12);
    let outer: Vec<_> = dcel.face_half_edges(UNBOUNDED).collect();
    assert_eq!(outer.len(), 3);
    assert!(dcel.cycle_area(outer[0]).unwrap() < 0.0);
}

#[test]
fn square_with_diagonal_splits_in_two() {
    let pts = [p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)];
    let edges = [(0, 1), (1, 2), (2, 3), (3, 0), (0, 2), (2, 0), (1, 1)];
    let dcel = Dcel::from_plane_graph(&pts, &edges);
    dcel.validate().unwrap();
    assert_eq!(dcel.num_half_edges(), 10);
    let faces = bounded_faces(&dcel);
    assert_eq!(faces.len(), 2);
    for f in faces {
        let start = dcel.face(f).half_edge.unwrap();
        assert_eq!(dcel.face_cycle(start).count(), 3);
        assert!((dcel.cycle_area(start).unwrap() - 0.5).abs() < 1e-12);
    }
}

#[test]
fn path_only_touches_the_unbounded_face() {
    let pts = [p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0)];
    let dcel = Dcel::from_plane_graph(&pts, &[(0, 1), (1, 2)]);
    dcel.validate().unwrap();
    assert_eq!(dcel.num_faces(), 1);
    assert_eq!(dcel.face_half_edges(UNBOUNDED).count(), 4);
    assert_eq!(dcel.outgoing(VertexId(1)).len(), 2);
}

#[test]
fn ideal_vertices_close_an_unbounded_strip() {
    // Two cells split by the vertical line x = 0, closed by arcs at infinity.
    let mut dcel = Dcel::new();
    let left = dcel.add_face(Some(0));
    let right = dcel.add_face(Some(1));
    let up = dcel.add_vertex(Location::Ideal(Vector::new(0.0, 1.0)));
    let down = dcel.add_vertex(Location::Ideal(Vector::new(0.0, -1.0)));
    let (line, line_t) = dcel.add_edge(up, down, left, right);
    let (arc_l, arc_l_t) = dcel.add_edge(down, up, left, UNBOUNDED);
    let (arc_r, arc_r_t) = dcel.add_edge(up, down, right, UNBOUNDED);
    dcel.set_next(line, arc_l);
    dcel.set_next(arc_l, line);
    dcel.set_next(line_t, arc_r);
    dcel.set_next(arc_r, line_t);
    dcel.set_next(arc_l_t, arc_r_t);
    dcel.set_next(arc_r_t, arc_l_t);
    dcel.validate().unwrap();
    assert!(dcel.is_arc(arc_l) && dcel.is_arc(arc_r_t));
    assert!(!dcel.is_arc(line));
    assert_eq!(dcel.cycle_area(line), None);
    assert_eq!(dcel.face(left).site, Some(0));
    assert_eq!(dcel.face_half_edges(UNBOUNDED).count(), 2);
}

#[test]
fn validate_reports_broken_links() {
    let pts = [p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0)];
    let mut dcel = Dcel::from_plane_graph(&pts, &[(0, 1), (1, 2), (2, 0)]);
    let he = HalfEdgeId(0);
    let twin = dcel.twin(he);
    dcel.set_next(he, twin);
    assert!(dcel.validate().is_err());
    // A corrupted cycle still terminates.
    assert!(dcel.face_cycle(he).count() <= dcel.num_half_edges());
}

#[test]
fn validate_reports_face_mismatch() {
    let pts = [p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0)];
    let mut dcel = Dcel::from_plane_graph(&pts, &[(0, 1), (1, 2), (2, 0)]);
    let inner = bounded_faces(&dcel)[0];
    let start = dcel.face(inner).half_edge.unwrap();
    let other = dcel.next(start);
    dcel.set_face(other, UNBOUNDED);
    assert!(matches!(dcel.validate(), Err(DcelError::Face { .. })));
}
