//! Direct constructions: closed-form base cases, collinear strips, brute force.

use tracing::{debug, warn};

use super::{assemble, tolerance, End, Ridge, VoronoiDiagram};
use crate::dcel::Dcel;
use crate::geom2::{circumcenter, cross, Point, Site, EPS};

impl VoronoiDiagram {
    /// Closed-form diagram of up to three sites (sorted by index).
    ///
    /// One site owns the whole plane; two sites are split by their bisector;
    /// three non-collinear sites get three rays from the circumcenter; any
    /// collinear set becomes parallel strips. Larger inputs use `direct`.
    pub fn base(sites: &[Site]) -> VoronoiDiagram {
        match sites {
            [a, b, c] if !all_collinear(sites) => {
                let mut ccw = [0usize, 1, 2];
                if cross(&a.point, &b.point, &c.point) < 0.0 {
                    ccw.swap(1, 2);
                }
                let Some(center) = circumcenter(&a.point, &b.point, &c.point) else {
                    return Self::collinear(sites);
                };
                // The ridge between consecutive CCW sites p, q leaves the
                // circumcenter along the outward normal of edge p → q.
                let ridges: Vec<Ridge> = (0..3)
                    .map(|k| Ridge {
                        left: ccw[(k + 1) % 3],
                        right: ccw[k],
                        from: End::Vertex(0),
                        to: End::Infinite,
                    })
                    .collect();
                Self::finish(sites, &[center], &ridges)
            }
            [_, _, _, _, ..] => Self::direct(sites),
            _ => Self::collinear(sites),
        }
    }

    /// Parallel strips for sites on a common line, ordered along it by index.
    pub(crate) fn collinear(sites: &[Site]) -> VoronoiDiagram {
        let ridges: Vec<Ridge> = (1..sites.len())
            .map(|k| Ridge {
                left: k - 1,
                right: k,
                from: End::Infinite,
                to: End::Infinite,
            })
            .collect();
        Self::finish(sites, &[], &ridges)
    }

    /// Brute-force construction in `O(n³)`.
    ///
    /// For every site pair the bisector is clipped by the half-planes of all
    /// other sites; the surviving interval (if any) is a Voronoi edge. Nearby
    /// endpoints are merged so edges meeting at one vertex share it.
    pub fn direct(sites: &[Site]) -> VoronoiDiagram {
        if sites.len() < 3 || all_collinear(sites) {
            return Self::collinear(sites);
        }
        let tol = tolerance(sites);
        let mut vertices: Vec<Point> = Vec::new();
        let mut ridges = Vec::new();
        for i in 0..sites.len() {
            for j in (i + 1)..sites.len() {
                let pi = sites[i].point;
                let Some(line) = Ridge {
                    left: i,
                    right: j,
                    from: End::Infinite,
                    to: End::Infinite,
                }
                .line(sites) else {
                    continue;
                };
                let (mut lo, mut hi) = (f64::NEG_INFINITY, f64::INFINITY);
                for (k, sk) in sites.iter().enumerate() {
                    if k == i || k == j {
                        continue;
                    }
                    // |x - pi| <= |x - pk|  ⇔  (pk - pi)·x <= (|pk|² - |pi|²) / 2
                    let n = sk.point - pi;
                    let rhs = 0.5 * (sk.point.coords.norm_squared() - pi.coords.norm_squared())
                        - n.dot(&line.origin.coords);
                    let coef = n.dot(&line.dir);
                    if coef.abs() <= f64::EPSILON * n.norm() {
                        if rhs < -tol * n.norm() {
                            lo = f64::INFINITY;
                        }
                        continue;
                    }
                    let t = rhs / coef;
                    if coef > 0.0 {
                        hi = hi.min(t);
                    } else {
                        lo = lo.max(t);
                    }
                }
                if lo == f64::INFINITY || hi - lo <= tol {
                    continue;
                }
                let from = if lo.is_finite() {
                    End::Vertex(intern(&mut vertices, line.at(lo), tol))
                } else {
                    End::Infinite
                };
                let to = if hi.is_finite() {
                    End::Vertex(intern(&mut vertices, line.at(hi), tol))
                } else {
                    End::Infinite
                };
                ridges.push(Ridge {
                    left: i,
                    right: j,
                    from,
                    to,
                });
            }
        }
        debug!(
            sites = sites.len(),
            vertices = vertices.len(),
            ridges = ridges.len(),
            "direct voronoi construction"
        );
        Self::finish(sites, &vertices, &ridges)
    }

    /// Assemble a direct construction. Topology that cannot be linked (only
    /// possible under severe rounding) leaves the cells without edges.
    fn finish(sites: &[Site], vertices: &[Point], ridges: &[Ridge]) -> VoronoiDiagram {
        match assemble(sites.to_vec(), vertices, ridges) {
            Ok(d) => d,
            Err(err) => {
                warn!(%err, sites = sites.len(), "direct voronoi construction failed to link");
                let mut dcel = Dcel::new();
                for s in sites {
                    dcel.add_face(Some(s.index));
                }
                VoronoiDiagram {
                    sites: sites.to_vec(),
                    dcel,
                }
            }
        }
    }
}

/// Whether all sites lie on the line through the first and last one.
///
/// Sites are x-sorted, so those two are extreme and `|cross| ≤ EPS·|b - a|²`
/// bounds the sine of every deviation angle.
pub(super) fn all_collinear(sites: &[Site]) -> bool {
    let (Some(first), Some(last)) = (sites.first(), sites.last()) else {
        return true;
    };
    let (a, b) = (first.point, last.point);
    let bound = EPS * (b - a).norm_squared();
    sites.iter().all(|s| cross(&a, &b, &s.point).abs() <= bound)
}

/// Index of a vertex within `tol` of `p`, inserting `p` if there is none.
fn intern(vertices: &mut Vec<Point>, p: Point, tol: f64) -> usize {
    let snap = 16.0 * tol;
    match vertices.iter().position(|q| (q - p).norm() <= snap) {
        Some(k) => k,
        None => {
            vertices.push(p);
            vertices.len() - 1
        }
    }
}
