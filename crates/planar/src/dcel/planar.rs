//! Build a DCEL from an embedded straight-line graph.

use super::{Dcel, HalfEdgeId, Location, UNBOUNDED};
use crate::geom2::{cross2, Point};

impl Dcel {
    /// Subdivision induced by straight edges between `points`.
    ///
    /// Vertex `i` is `points[i]`. Self-loops and repeated edges are ignored.
    /// Half-edges leaving a vertex are ordered by angle; cycles with positive
    /// signed area become bounded faces, every other cycle (outer boundaries,
    /// paths, trees) is attached to `UNBOUNDED`. Assumes the edges do not
    /// cross.
    pub fn from_plane_graph(points: &[Point], edges: &[(usize, usize)]) -> Dcel {
        let mut dcel = Dcel::new();
        let verts: Vec<_> = points
            .iter()
            .map(|p| dcel.add_vertex(Location::Finite(*p)))
            .collect();

        let mut pairs: Vec<(usize, usize)> = edges
            .iter()
            .filter(|(u, v)| u != v)
            .map(|&(u, v)| if u < v { (u, v) } else { (v, u) })
            .collect();
        pairs.sort_unstable();
        pairs.dedup();

        let mut star: Vec<Vec<HalfEdgeId>> = vec![Vec::new(); points.len()];
        for &(u, v) in &pairs {
            let (uv, vu) = dcel.add_edge(verts[u], verts[v], UNBOUNDED, UNBOUNDED);
            star[u].push(uv);
            star[v].push(vu);
        }
        dcel.set_face_edge(UNBOUNDED, None);

        for (v, out) in star.iter_mut().enumerate() {
            let origin = points[v];
            out.sort_by(|&a, &b| {
                let da = points[dcel.dest(a).0] - origin;
                let db = points[dcel.dest(b).0] - origin;
                da.y.atan2(da.x).total_cmp(&db.y.atan2(db.x))
            });
            let k = out.len();
            for i in 0..k {
                // Arriving along e_i, the face on the left continues along the
                // clockwise neighbour e_{i-1}.
                let incoming = dcel.twin(out[i]);
                dcel.set_next(incoming, out[(i + k - 1) % k]);
            }
        }

        let mut seen = vec![false; dcel.num_half_edges()];
        for start in dcel.half_edge_ids().collect::<Vec<_>>() {
            if seen[start.0] {
                continue;
            }
            let cycle: Vec<HalfEdgeId> = dcel.face_cycle(start).collect();
            for he in &cycle {
                seen[he.0] = true;
            }
            let face = if dcel.cycle_area(start).is_some_and(|a| a > 0.0) {
                dcel.add_face(None)
            } else {
                UNBOUNDED
            };
            for he in cycle {
                dcel.set_face(he, face);
            }
        }
        dcel
    }

    /// Signed (shoelace) area enclosed by the cycle through `start`.
    ///
    /// `None` if the cycle touches an ideal vertex.
    pub fn cycle_area(&self, start: HalfEdgeId) -> Option<f64> {
        let mut twice = 0.0;
        for he in self.face_cycle(start) {
            let a = self.location(self.origin(he)).finite()?;
            let b = self.location(self.dest(he)).finite()?;
            twice += cross2(a.coords, b.coords);
        }
        Some(0.5 * twice)
    }
}
