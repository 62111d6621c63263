//! Doubly-connected edge list (half-edge structure) for planar subdivisions.
//!
//! Purpose
//! - Canonical result representation for Voronoi diagrams and Delaunay
//!   subdivisions: vertices, directed half-edges and faces with full
//!   topological links.
//!
//! Conventions
//! - Arena storage with typed ids; `FaceId(0)` is the unbounded sentinel
//!   (`UNBOUNDED`), pre-inserted by `Dcel::new`.
//! - A half-edge bounds the face on its left; `next`/`prev` walk that face
//!   counter-clockwise (the sentinel is walked clockwise).
//! - Vertices are either finite points or ideal points (a direction at
//!   infinity). Unbounded edges end at ideal vertices; consecutive ideal
//!   vertices of a cell are joined by "arc" half-edges whose twins bound the
//!   sentinel, so every face cycle closes.
//!
//! Invariants (checked by `validate`)
//! - `twin(twin(e)) == e`, `prev(next(e)) == e`.
//! - `origin(e) == dest(prev(e))`, i.e. `origin(e) == origin(twin(prev(e)))`.
//! - All half-edges of a `next` cycle share the same face; cycles close in at
//!   most `|E|` steps.

mod check;
mod planar;

use std::fmt;

use crate::geom2::{Point, Vector};

pub use check::DcelError;

macro_rules! idx {
    ($name:ident) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub usize);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

idx!(VertexId);
idx!(HalfEdgeId);
idx!(FaceId);

/// The unbounded sentinel face.
pub const UNBOUNDED: FaceId = FaceId(0);

/// Where a vertex sits: a finite point or an ideal point at infinity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Location {
    Finite(Point),
    /// Unit direction of the point at infinity.
    Ideal(Vector),
}

impl Location {
    #[inline]
    pub fn finite(&self) -> Option<Point> {
        match *self {
            Location::Finite(p) => Some(p),
            Location::Ideal(_) => None,
        }
    }

    #[inline]
    pub fn is_ideal(&self) -> bool {
        matches!(self, Location::Ideal(_))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Vertex {
    pub location: Location,
    /// Any half-edge leaving this vertex; `None` while isolated.
    pub half_edge: Option<HalfEdgeId>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct HalfEdge {
    pub origin: VertexId,
    pub twin: HalfEdgeId,
    pub next: HalfEdgeId,
    pub prev: HalfEdgeId,
    /// Face on the left.
    pub face: FaceId,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Face {
    /// Any half-edge on the boundary; `None` for a face without edges
    /// (the whole plane of a one-site diagram, or the sentinel of a bounded-free map).
    pub half_edge: Option<HalfEdgeId>,
    /// Global index of the site owning this face (Voronoi cells only).
    pub site: Option<usize>,
}

/// Half-edge structure over `f64` points.
#[derive(Clone, Debug, PartialEq)]
pub struct Dcel {
    vertices: Vec<Vertex>,
    half_edges: Vec<HalfEdge>,
    faces: Vec<Face>,
}

impl Default for Dcel {
    fn default() -> Self {
        Self::new()
    }
}

impl Dcel {
    /// Empty structure with the sentinel face pre-inserted.
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            half_edges: Vec::new(),
            faces: vec![Face {
                half_edge: None,
                site: None,
            }],
        }
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }
    pub fn num_half_edges(&self) -> usize {
        self.half_edges.len()
    }
    /// Number of faces including the sentinel.
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[id.0]
    }
    pub fn half_edge(&self, id: HalfEdgeId) -> &HalfEdge {
        &self.half_edges[id.0]
    }
    pub fn face(&self, id: FaceId) -> &Face {
        &self.faces[id.0]
    }

    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> {
        (0..self.vertices.len()).map(VertexId)
    }
    pub fn half_edge_ids(&self) -> impl Iterator<Item = HalfEdgeId> {
        (0..self.half_edges.len()).map(HalfEdgeId)
    }
    pub fn face_ids(&self) -> impl Iterator<Item = FaceId> {
        (0..self.faces.len()).map(FaceId)
    }

    #[inline]
    pub fn origin(&self, he: HalfEdgeId) -> VertexId {
        self.half_edges[he.0].origin
    }
    #[inline]
    pub fn twin(&self, he: HalfEdgeId) -> HalfEdgeId {
        self.half_edges[he.0].twin
    }
    #[inline]
    pub fn next(&self, he: HalfEdgeId) -> HalfEdgeId {
        self.half_edges[he.0].next
    }
    #[inline]
    pub fn prev(&self, he: HalfEdgeId) -> HalfEdgeId {
        self.half_edges[he.0].prev
    }
    #[inline]
    pub fn face_of(&self, he: HalfEdgeId) -> FaceId {
        self.half_edges[he.0].face
    }
    /// Destination vertex (origin of the twin).
    #[inline]
    pub fn dest(&self, he: HalfEdgeId) -> VertexId {
        self.origin(self.twin(he))
    }
    #[inline]
    pub fn location(&self, v: VertexId) -> Location {
        self.vertices[v.0].location
    }

    /// Whether `he` runs along the circle at infinity: both ends ideal, one side the sentinel.
    pub fn is_arc(&self, he: HalfEdgeId) -> bool {
        (self.face_of(he) == UNBOUNDED || self.face_of(self.twin(he)) == UNBOUNDED)
            && self.location(self.origin(he)).is_ideal()
            && self.location(self.dest(he)).is_ideal()
    }

    // Builders

    pub fn add_vertex(&mut self, location: Location) -> VertexId {
        let id = VertexId(self.vertices.len());
        self.vertices.push(Vertex {
            location,
            half_edge: None,
        });
        id
    }

    pub fn add_face(&mut self, site: Option<usize>) -> FaceId {
        let id = FaceId(self.faces.len());
        self.faces.push(Face {
            half_edge: None,
            site,
        });
        id
    }

    /// Add the twin pair `u → v` (face `left`) and `v → u` (face `right`).
    ///
    /// `next`/`prev` start as self-loops; link them with `set_next`. Faces and
    /// vertices without a representative half-edge adopt the new ones.
    pub fn add_edge(
        &mut self,
        u: VertexId,
        v: VertexId,
        left: FaceId,
        right: FaceId,
    ) -> (HalfEdgeId, HalfEdgeId) {
        let uv = HalfEdgeId(self.half_edges.len());
        let vu = HalfEdgeId(uv.0 + 1);
        self.half_edges.push(HalfEdge {
            origin: u,
            twin: vu,
            next: uv,
            prev: uv,
            face: left,
        });
        self.half_edges.push(HalfEdge {
            origin: v,
            twin: uv,
            next: vu,
            prev: vu,
            face: right,
        });
        if self.vertices[u.0].half_edge.is_none() {
            self.vertices[u.0].half_edge = Some(uv);
        }
        if self.vertices[v.0].half_edge.is_none() {
            self.vertices[v.0].half_edge = Some(vu);
        }
        if self.faces[left.0].half_edge.is_none() {
            self.faces[left.0].half_edge = Some(uv);
        }
        if self.faces[right.0].half_edge.is_none() {
            self.faces[right.0].half_edge = Some(vu);
        }
        (uv, vu)
    }

    /// Set `next(he) = next` and `prev(next) = he`.
    pub fn set_next(&mut self, he: HalfEdgeId, next: HalfEdgeId) {
        self.half_edges[he.0].next = next;
        self.half_edges[next.0].prev = he;
    }

    /// Reassign the face on the left of `he` (used when faces are discovered after linking).
    pub fn set_face(&mut self, he: HalfEdgeId, face: FaceId) {
        self.half_edges[he.0].face = face;
        if self.faces[face.0].half_edge.is_none() {
            self.faces[face.0].half_edge = Some(he);
        }
    }

    /// Override the representative half-edge of a face.
    pub fn set_face_edge(&mut self, face: FaceId, he: Option<HalfEdgeId>) {
        self.faces[face.0].half_edge = he;
    }

    // Traversal

    /// Half-edges of the `next` cycle through `start`, beginning at `start`.
    ///
    /// Stops after `|E|` steps on corrupted links instead of looping forever.
    pub fn face_cycle(&self, start: HalfEdgeId) -> FaceCycle<'_> {
        FaceCycle {
            dcel: self,
            start,
            current: Some(start),
            budget: self.half_edges.len(),
        }
    }

    /// Boundary of `face` (empty if the face has no half-edge).
    pub fn face_half_edges(&self, face: FaceId) -> FaceCycle<'_> {
        match self.faces[face.0].half_edge {
            Some(start) => self.face_cycle(start),
            None => FaceCycle {
                dcel: self,
                start: HalfEdgeId(0),
                current: None,
                budget: 0,
            },
        }
    }

    /// Half-edges leaving `v`, in no particular order.
    pub fn outgoing(&self, v: VertexId) -> Vec<HalfEdgeId> {
        self.half_edge_ids()
            .filter(|&he| self.origin(he) == v)
            .collect()
    }
}

/// Iterator over one `next` cycle.
pub struct FaceCycle<'a> {
    dcel: &'a Dcel,
    start: HalfEdgeId,
    current: Option<HalfEdgeId>,
    budget: usize,
}

impl Iterator for FaceCycle<'_> {
    type Item = HalfEdgeId;

    fn next(&mut self) -> Option<HalfEdgeId> {
        let cur = self.current?;
        if self.budget == 0 {
            self.current = None;
            return None;
        }
        self.budget -= 1;
        let nxt = self.dcel.next(cur);
        self.current = if nxt == self.start { None } else { Some(nxt) };
        Some(cur)
    }
}

#[cfg(test)]
mod tests;
