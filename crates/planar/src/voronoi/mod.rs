//! Voronoi diagrams as DCELs with one face per site.
//!
//! Purpose
//! - Closed-form base cases, the bisector-chain merge of two x-separated
//!   diagrams, and a direct (brute-force) construction used as the merge
//!   fallback.
//!
//! Representation
//! - `dcel` faces: `UNBOUNDED` sentinel, then one face per site in slot order
//!   (`FaceId(slot + 1)`); `Face::site` holds the global site index.
//! - Unbounded edges end at ideal vertices; consecutive ideal vertices of a
//!   cell are joined by arcs whose twins bound the sentinel.
//! - Constructions produce a flat edge list (`Ridge`: two site slots and two
//!   ends) which `assemble` turns into a linked, validated DCEL. A ridge with
//!   site `left` on its left runs along `perp(p_right - p_left)`.
//!
//! Code cross-refs: `crate::dcel`, `crate::hull::ConvexHull::bridges`,
//! `merge::merge_chain`

mod base;
mod merge;

use std::collections::HashMap;
use std::f64::consts::TAU;

use thiserror::Error;

use crate::dcel::{Dcel, DcelError, FaceId, HalfEdgeId, Location, VertexId, UNBOUNDED};
use crate::geom2::{bisector, Line, Point, Site, Vector, EPS};

/// Angular slack when matching a chain end with the next chain start at infinity.
const ANGLE_TOL: f64 = 1e-9;

/// Why a Voronoi construction could not be assembled into a DCEL.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum VoronoiError {
    #[error("ridge between slots {left} and {right} is invalid")]
    BadRidge { left: usize, right: usize },
    #[error("cell of site {site} has no boundary")]
    EmptyCell { site: usize },
    #[error("boundary of the cell of site {site} does not close")]
    OpenCell { site: usize },
    #[error("ideal vertex {vertex} is not shared by exactly two arcs")]
    DanglingArc { vertex: VertexId },
    #[error("bisector chain did not finish within {steps} steps")]
    ChainTooLong { steps: usize },
    #[error("bisector chain ended between sites {left} and {right}, not on the lower bridge")]
    WrongBridge { left: usize, right: usize },
    #[error("merged hull has no bridges across the split")]
    NoBridges,
    #[error("face count {found} does not match site count {expected}")]
    FaceCount { expected: usize, found: usize },
    #[error(transparent)]
    Topology(#[from] DcelError),
}

/// One end of a ridge: a finite vertex (index into the vertex list) or infinity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum End {
    Vertex(usize),
    Infinite,
}

/// Voronoi edge between two site slots, `left` on its left.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Ridge {
    pub left: usize,
    pub right: usize,
    pub from: End,
    pub to: End,
}

impl Ridge {
    /// Supporting bisector, oriented along the ridge.
    pub fn line(&self, sites: &[Site]) -> Option<Line> {
        bisector(&sites[self.left].point, &sites[self.right].point)
    }
}

/// Geometry of one Voronoi edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EdgeGeometry {
    Segment { from: Point, to: Point },
    /// Half-line from `origin` along the unit vector `dir`.
    Ray { origin: Point, dir: Vector },
    /// Full line through `point` along `dir`.
    Line { point: Point, dir: Vector },
}

/// A Voronoi edge with the global indices of the sites on its two sides.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VoronoiEdge {
    pub left: usize,
    pub right: usize,
    pub geometry: EdgeGeometry,
}

/// Voronoi diagram of a site set.
#[derive(Clone, Debug, PartialEq)]
pub struct VoronoiDiagram {
    sites: Vec<Site>,
    dcel: Dcel,
}

#[inline]
pub(crate) fn face_of_slot(slot: usize) -> FaceId {
    FaceId(slot + 1)
}

#[inline]
pub(crate) fn slot_of_face(face: FaceId) -> Option<usize> {
    face.0.checked_sub(1)
}

/// Distance tolerance for a site set (`EPS` scaled by the coordinate magnitude).
pub(crate) fn tolerance(sites: &[Site]) -> f64 {
    let scale = sites
        .iter()
        .map(|s| s.point.x.abs().max(s.point.y.abs()))
        .fold(1.0f64, f64::max);
    EPS * scale
}

impl VoronoiDiagram {
    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    pub fn dcel(&self) -> &Dcel {
        &self.dcel
    }

    pub fn num_cells(&self) -> usize {
        self.sites.len()
    }

    /// Face of the site with global index `site`.
    pub fn cell(&self, site: usize) -> Option<FaceId> {
        self.sites
            .binary_search_by_key(&site, |s| s.index)
            .ok()
            .map(face_of_slot)
    }

    /// Site owning `face` (`None` for the sentinel).
    pub fn site_of(&self, face: FaceId) -> Option<Site> {
        slot_of_face(face).and_then(|slot| self.sites.get(slot).copied())
    }

    /// Finite Voronoi vertices.
    pub fn vertices(&self) -> Vec<Point> {
        self.dcel
            .vertex_ids()
            .filter_map(|v| self.dcel.location(v).finite())
            .collect()
    }

    /// Voronoi edges (arcs at infinity excluded), one per twin pair.
    ///
    /// Rays start at their finite end; `left`/`right` follow the direction of travel.
    pub fn edges(&self) -> Vec<VoronoiEdge> {
        let d = &self.dcel;
        let mut out = Vec::new();
        for he in d.half_edge_ids() {
            let twin = d.twin(he);
            if twin < he || d.face_of(he) == UNBOUNDED || d.face_of(twin) == UNBOUNDED {
                continue;
            }
            let he = if d.location(d.origin(he)).is_ideal() && !d.location(d.dest(he)).is_ideal() {
                twin
            } else {
                he
            };
            let (Some(left), Some(right)) = (
                self.site_of(d.face_of(he)),
                self.site_of(d.face_of(d.twin(he))),
            ) else {
                continue;
            };
            let geometry = match (d.location(d.origin(he)), d.location(d.dest(he))) {
                (Location::Finite(from), Location::Finite(to)) => EdgeGeometry::Segment { from, to },
                (Location::Finite(origin), Location::Ideal(dir)) => EdgeGeometry::Ray { origin, dir },
                (Location::Ideal(_), Location::Ideal(dir)) => EdgeGeometry::Line {
                    point: nalgebra::center(&left.point, &right.point),
                    dir,
                },
                // Swapped above so that rays start at their finite end.
                (Location::Ideal(dir), Location::Finite(origin)) => EdgeGeometry::Ray {
                    origin,
                    dir,
                },
            };
            out.push(VoronoiEdge {
                left: left.index,
                right: right.index,
                geometry,
            });
        }
        out
    }

    /// Pairs of sites whose cells share an edge, as sorted global index pairs.
    pub fn adjacent_pairs(&self) -> Vec<(usize, usize)> {
        let mut pairs: Vec<(usize, usize)> = self
            .edges()
            .into_iter()
            .map(|e| (e.left.min(e.right), e.left.max(e.right)))
            .collect();
        pairs.sort_unstable();
        pairs.dedup();
        pairs
    }

    /// DCEL invariants plus one face per site.
    pub fn check(&self) -> Result<(), VoronoiError> {
        self.dcel.validate()?;
        let found = self.dcel.num_faces() - 1;
        if found != self.sites.len() {
            return Err(VoronoiError::FaceCount {
                expected: self.sites.len(),
                found,
            });
        }
        Ok(())
    }

    /// Flatten back into a vertex list and ridges over slots shifted by `offset`.
    pub(crate) fn ridges(&self, offset: usize) -> (Vec<Point>, Vec<Ridge>) {
        let d = &self.dcel;
        let mut index: HashMap<VertexId, usize> = HashMap::new();
        let mut points = Vec::new();
        for v in d.vertex_ids() {
            if let Location::Finite(p) = d.location(v) {
                index.insert(v, points.len());
                points.push(p);
            }
        }
        let end = |v: VertexId| match index.get(&v) {
            Some(&k) => End::Vertex(k),
            None => End::Infinite,
        };
        let mut ridges = Vec::new();
        for he in d.half_edge_ids() {
            let twin = d.twin(he);
            if twin < he {
                continue;
            }
            let (Some(left), Some(right)) =
                (slot_of_face(d.face_of(he)), slot_of_face(d.face_of(twin)))
            else {
                continue;
            };
            ridges.push(Ridge {
                left: left + offset,
                right: right + offset,
                from: end(d.origin(he)),
                to: end(d.dest(he)),
            });
        }
        (points, ridges)
    }
}

/// Link a flat ridge list into a Voronoi DCEL and validate it.
///
/// `sites` must be sorted by global index; ridge slots index into it. Finite
/// vertices no ridge refers to are dropped.
pub(crate) fn assemble(
    sites: Vec<Site>,
    vertices: &[Point],
    ridges: &[Ridge],
) -> Result<VoronoiDiagram, VoronoiError> {
    let n = sites.len();
    let mut dcel = Dcel::new();
    for s in &sites {
        dcel.add_face(Some(s.index));
    }
    let mut finite: HashMap<usize, VertexId> = HashMap::new();
    let mut per_cell: Vec<Vec<HalfEdgeId>> = vec![Vec::new(); n];
    for r in ridges {
        let bad = VoronoiError::BadRidge {
            left: r.left,
            right: r.right,
        };
        if r.left >= n || r.right >= n || r.left == r.right {
            return Err(bad);
        }
        let line = r.line(&sites).ok_or(bad.clone())?;
        let u = end_vertex(&mut dcel, &mut finite, vertices, r.from, -line.dir).ok_or(bad.clone())?;
        let v = end_vertex(&mut dcel, &mut finite, vertices, r.to, line.dir).ok_or(bad)?;
        let (uv, vu) = dcel.add_edge(u, v, face_of_slot(r.left), face_of_slot(r.right));
        per_cell[r.left].push(uv);
        per_cell[r.right].push(vu);
    }

    let mut arcs = Vec::new();
    for (slot, hes) in per_cell.iter().enumerate() {
        if hes.is_empty() {
            if n == 1 {
                continue;
            }
            return Err(VoronoiError::EmptyCell {
                site: sites[slot].index,
            });
        }
        link_cell(&mut dcel, slot, hes, &mut arcs).ok_or(VoronoiError::OpenCell {
            site: sites[slot].index,
        })?;
    }

    // Sentinel: next(twin(a)) = twin(b) where b is the arc arriving at origin(a).
    let mut arriving: HashMap<VertexId, HalfEdgeId> = HashMap::new();
    for &a in &arcs {
        let dest = dcel.dest(a);
        if arriving.insert(dest, a).is_some() {
            return Err(VoronoiError::DanglingArc { vertex: dest });
        }
    }
    for &a in &arcs {
        let origin = dcel.origin(a);
        let b = *arriving
            .get(&origin)
            .ok_or(VoronoiError::DanglingArc { vertex: origin })?;
        let (ta, tb) = (dcel.twin(a), dcel.twin(b));
        dcel.set_next(ta, tb);
    }

    dcel.validate()?;
    Ok(VoronoiDiagram { sites, dcel })
}

fn end_vertex(
    dcel: &mut Dcel,
    finite: &mut HashMap<usize, VertexId>,
    vertices: &[Point],
    end: End,
    ideal_dir: Vector,
) -> Option<VertexId> {
    match end {
        End::Vertex(k) => {
            let p = *vertices.get(k)?;
            Some(
                *finite
                    .entry(k)
                    .or_insert_with(|| dcel.add_vertex(Location::Finite(p))),
            )
        }
        End::Infinite => Some(dcel.add_vertex(Location::Ideal(ideal_dir))),
    }
}

/// Link the half-edges of one cell; chains that run off to infinity are closed with arcs.
fn link_cell(
    dcel: &mut Dcel,
    slot: usize,
    hes: &[HalfEdgeId],
    arcs: &mut Vec<HalfEdgeId>,
) -> Option<()> {
    let mut by_origin: HashMap<VertexId, HalfEdgeId> = HashMap::new();
    let mut starts: Vec<(f64, HalfEdgeId)> = Vec::new();
    for &h in hes {
        let o = dcel.origin(h);
        match dcel.location(o) {
            Location::Finite(_) => {
                if by_origin.insert(o, h).is_some() {
                    return None;
                }
            }
            Location::Ideal(dir) => starts.push((dir.y.atan2(dir.x), h)),
        }
    }
    let mut ends: Vec<(f64, HalfEdgeId)> = Vec::new();
    for &h in hes {
        let d = dcel.dest(h);
        match dcel.location(d) {
            Location::Finite(_) => {
                let nx = by_origin.remove(&d)?;
                dcel.set_next(h, nx);
            }
            Location::Ideal(dir) => ends.push((dir.y.atan2(dir.x), h)),
        }
    }
    if !by_origin.is_empty() || ends.len() != starts.len() {
        return None;
    }

    // Walking the cell CCW, infinity is traversed counter-clockwise from a
    // chain end to the next chain start.
    let mut used = vec![false; starts.len()];
    for (angle, h_end) in ends {
        let k = (0..starts.len())
            .filter(|&k| !used[k])
            .min_by(|&a, &b| ccw_turn(angle, starts[a].0).total_cmp(&ccw_turn(angle, starts[b].0)))?;
        used[k] = true;
        let h_start = starts[k].1;
        let (u, v) = (dcel.dest(h_end), dcel.origin(h_start));
        let (arc, _) = dcel.add_edge(u, v, face_of_slot(slot), UNBOUNDED);
        dcel.set_next(h_end, arc);
        dcel.set_next(arc, h_start);
        arcs.push(arc);
    }
    Some(())
}

/// Counter-clockwise rotation from angle `from` to angle `to`, in `[0, TAU)`;
/// near-full turns count as zero.
fn ccw_turn(from: f64, to: f64) -> f64 {
    let t = (to - from).rem_euclid(TAU);
    if t > TAU - ANGLE_TOL {
        0.0
    } else {
        t
    }
}
