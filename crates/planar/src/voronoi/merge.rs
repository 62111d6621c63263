//! Bisector-chain merge of two x-separated Voronoi diagrams.
//!
//! Walk
//! - Start on the upper hull bridge `(a, b)` (a left, b right) at infinity and
//!   follow their bisector downward. The next chain vertex is the first point
//!   where the bisector leaves cell `a` of the left diagram or cell `b` of the
//!   right diagram; the crossed ridge names the new `a` (or `b`). Hits on both
//!   sides within tolerance switch both sites at once.
//! - The walk ends when neither cell is left again; the final pair must be the
//!   lower hull bridge.
//!
//! Pruning
//! - The chain is strictly y-monotone, so a point is classified west or east
//!   of it by locating its y among the chain vertices. Each child ridge is cut
//!   at its chain crossings and every piece is kept if it lies on its own
//!   diagram's side.
//!
//! Any inconsistency is reported as a `VoronoiError`; the caller then rebuilds
//! the node directly.

use tracing::{trace, warn};

use super::base::all_collinear;
use super::{assemble, tolerance, End, Ridge, VoronoiDiagram, VoronoiError};
use crate::geom2::{bisector, cross2, Line, Point, Site};
use crate::hull::ConvexHull;

impl VoronoiDiagram {
    /// Merge the diagrams of two x-separated site sets.
    ///
    /// Every site of `left` must have a smaller index (and x) than every site
    /// of `right`; `hull` is the convex hull of the union. Collinear unions
    /// become strips directly; a failed chain walk degrades to `direct`.
    pub fn merge(left: &VoronoiDiagram, right: &VoronoiDiagram, hull: &ConvexHull) -> VoronoiDiagram {
        if left.sites.is_empty() {
            return right.clone();
        }
        if right.sites.is_empty() {
            return left.clone();
        }
        let sites: Vec<Site> = left.sites.iter().chain(right.sites.iter()).copied().collect();
        if all_collinear(&sites) {
            return Self::collinear(&sites);
        }
        match merge_chain(left, right, hull, &sites) {
            Ok(merged) => merged,
            Err(err) => {
                warn!(%err, sites = sites.len(), "voronoi merge failed; rebuilding directly");
                Self::direct(&sites)
            }
        }
    }
}

/// Crossing of the chain with a ridge of the current cell.
#[derive(Clone, Copy, Debug)]
struct Hit {
    ridge: usize,
    /// Parameter along the chain bisector.
    t: f64,
    /// Parameter along the crossed ridge.
    u: f64,
    /// Site on the other side of the crossed ridge.
    opposite: usize,
}

#[derive(Clone, Copy, Debug)]
struct Cut {
    u: f64,
    vertex: usize,
}

/// The dividing chain, top to bottom.
struct Chain {
    /// Chain vertices with strictly decreasing y.
    points: Vec<Point>,
    /// Supporting line of each chain ridge (`points.len() + 1` entries).
    lines: Vec<Line>,
}

impl Chain {
    /// Positive east of the chain, negative west of it.
    fn side(&self, q: &Point) -> f64 {
        let m = self.points.partition_point(|p| p.y > q.y);
        let line = &self.lines[m.min(self.lines.len() - 1)];
        let anchor = match (self.points.get(m), m.checked_sub(1)) {
            (Some(p), _) => *p,
            (None, Some(prev)) => self.points[prev],
            (None, None) => line.origin,
        };
        // The chain runs downward, so east is on its left.
        cross2(line.dir, q - anchor)
    }
}

pub(super) fn merge_chain(
    left: &VoronoiDiagram,
    right: &VoronoiDiagram,
    hull: &ConvexHull,
    sites: &[Site],
) -> Result<VoronoiDiagram, VoronoiError> {
    let nl = left.sites.len();
    let split = right.sites[0].index;
    let bridges = hull.bridges(split).ok_or(VoronoiError::NoBridges)?;
    let slot = |s: &Site| {
        sites
            .binary_search_by_key(&s.index, |x| x.index)
            .map_err(|_| VoronoiError::NoBridges)
    };
    let (mut a, mut b) = (slot(&bridges.upper.0)?, slot(&bridges.upper.1)?);
    let lower = (slot(&bridges.lower.0)?, slot(&bridges.lower.1)?);

    let (mut vertices, left_ridges) = left.ridges(0);
    let offset = vertices.len();
    let (right_vertices, right_ridges) = right.ridges(nl);
    vertices.extend(right_vertices);
    let right_ridges: Vec<Ridge> = right_ridges
        .into_iter()
        .map(|r| Ridge {
            from: shift(r.from, offset),
            to: shift(r.to, offset),
            ..r
        })
        .collect();

    let tol = tolerance(sites);
    let cap = left_ridges.len() + right_ridges.len() + 4;
    let mut left_cuts: Vec<Vec<Cut>> = vec![Vec::new(); left_ridges.len()];
    let mut right_cuts: Vec<Vec<Cut>> = vec![Vec::new(); right_ridges.len()];
    let mut chain_ridges: Vec<Ridge> = Vec::new();
    let mut chain = Chain {
        points: Vec::new(),
        lines: Vec::new(),
    };
    let mut from = End::Infinite;
    let mut skip: (Option<usize>, Option<usize>) = (None, None);

    for _ in 0..=cap {
        // Downward bisector: `b` (east) on its left.
        let line = bisector(&sites[b].point, &sites[a].point)
            .ok_or(VoronoiError::BadRidge { left: b, right: a })?;
        chain.lines.push(line);
        let t_from = chain
            .points
            .last()
            .map_or(f64::NEG_INFINITY, |p| line.param_of(p));
        let hit_l = exit_hit(sites, &vertices, &left_ridges, a, &line, t_from, skip.0, tol);
        let hit_r = exit_hit(sites, &vertices, &right_ridges, b, &line, t_from, skip.1, tol);
        let (take_l, take_r, t) = match (hit_l, hit_r) {
            (None, None) => {
                chain_ridges.push(Ridge {
                    left: b,
                    right: a,
                    from,
                    to: End::Infinite,
                });
                if (a, b) != lower {
                    return Err(VoronoiError::WrongBridge {
                        left: sites[a].index,
                        right: sites[b].index,
                    });
                }
                let mut kept = Vec::with_capacity(left_ridges.len() + right_ridges.len() + chain_ridges.len());
                clip(sites, &vertices, &left_ridges, left_cuts, &chain, false, &mut kept);
                clip(sites, &vertices, &right_ridges, right_cuts, &chain, true, &mut kept);
                kept.extend(chain_ridges);
                return assemble(sites.to_vec(), &vertices, &kept);
            }
            (Some(l), None) => (Some(l), None, l.t),
            (None, Some(r)) => (None, Some(r), r.t),
            (Some(l), Some(r)) if (l.t - r.t).abs() <= tol => (Some(l), Some(r), l.t.min(r.t)),
            (Some(l), Some(r)) if l.t < r.t => (Some(l), None, l.t),
            (Some(_), Some(r)) => (None, Some(r), r.t),
        };
        let x = line.at(t);
        let vertex = vertices.len();
        vertices.push(x);
        chain.points.push(x);
        chain_ridges.push(Ridge {
            left: b,
            right: a,
            from,
            to: End::Vertex(vertex),
        });
        // Only the ridges crossed at this vertex are excluded from the next
        // step; later steps may cross the same child ridge again.
        skip = (None, None);
        if let Some(h) = take_l {
            left_cuts[h.ridge].push(Cut { u: h.u, vertex });
            a = h.opposite;
            skip.0 = Some(h.ridge);
        }
        if let Some(h) = take_r {
            right_cuts[h.ridge].push(Cut { u: h.u, vertex });
            b = h.opposite;
            skip.1 = Some(h.ridge);
        }
        trace!(a, b, x = x.x, y = x.y, "bisector chain vertex");
        from = End::Vertex(vertex);
    }
    Err(VoronoiError::ChainTooLong { steps: cap })
}

fn shift(end: End, offset: usize) -> End {
    match end {
        End::Vertex(k) => End::Vertex(k + offset),
        End::Infinite => End::Infinite,
    }
}

/// Parameter interval of a ridge along its own bisector.
fn param_range(r: &Ridge, line: &Line, vertices: &[Point]) -> (f64, f64) {
    let lo = match r.from {
        End::Vertex(v) => line.param_of(&vertices[v]),
        End::Infinite => f64::NEG_INFINITY,
    };
    let hi = match r.to {
        End::Vertex(v) => line.param_of(&vertices[v]),
        End::Infinite => f64::INFINITY,
    };
    (lo, hi)
}

/// First crossing of `line` beyond `t_from` with a ridge bounding `cell`.
#[allow(clippy::too_many_arguments)]
fn exit_hit(
    sites: &[Site],
    vertices: &[Point],
    ridges: &[Ridge],
    cell: usize,
    line: &Line,
    t_from: f64,
    skip: Option<usize>,
    tol: f64,
) -> Option<Hit> {
    let mut best: Option<Hit> = None;
    for (k, r) in ridges.iter().enumerate() {
        if Some(k) == skip {
            continue;
        }
        let opposite = if r.left == cell {
            r.right
        } else if r.right == cell {
            r.left
        } else {
            continue;
        };
        let Some(edge) = r.line(sites) else {
            continue;
        };
        let Some((t, u)) = line.intersect(&edge) else {
            continue;
        };
        if t <= t_from + tol {
            continue;
        }
        let (lo, hi) = param_range(r, &edge, vertices);
        if u < lo - tol || u > hi + tol {
            continue;
        }
        if best.map_or(true, |h| t < h.t) {
            best = Some(Hit {
                ridge: k,
                t,
                u,
                opposite,
            });
        }
    }
    best
}

/// Cut ridges at their chain crossings and keep the pieces on the wanted side.
fn clip(
    sites: &[Site],
    vertices: &[Point],
    ridges: &[Ridge],
    mut cuts: Vec<Vec<Cut>>,
    chain: &Chain,
    keep_east: bool,
    out: &mut Vec<Ridge>,
) {
    let reach = 1.0
        + sites
            .iter()
            .map(|s| s.point.coords.norm())
            .fold(0.0f64, f64::max);
    for (r, cs) in ridges.iter().zip(cuts.iter_mut()) {
        let Some(line) = r.line(sites) else {
            continue;
        };
        cs.sort_by(|p, q| p.u.total_cmp(&q.u));
        let (lo, hi) = param_range(r, &line, vertices);
        let mut ends = Vec::with_capacity(cs.len() + 2);
        ends.push((r.from, lo));
        ends.extend(cs.iter().map(|c| (End::Vertex(c.vertex), c.u)));
        ends.push((r.to, hi));
        for w in ends.windows(2) {
            let ((e0, u0), (e1, u1)) = (w[0], w[1]);
            let sample = match (u0.is_finite(), u1.is_finite()) {
                (true, true) => line.at(0.5 * (u0 + u1)),
                (true, false) => line.at(u0 + reach),
                (false, true) => line.at(u1 - reach),
                (false, false) => line.origin,
            };
            let east = chain.side(&sample) > 0.0;
            if east == keep_east {
                out.push(Ridge {
                    from: e0,
                    to: e1,
                    ..*r
                });
            }
        }
    }
}
