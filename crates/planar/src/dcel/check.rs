use thiserror::Error;

use super::{Dcel, FaceId, HalfEdgeId, VertexId};

/// Broken topological invariant found by `Dcel::validate`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DcelError {
    #[error("{he} refers to a record that does not exist")]
    OutOfRange { he: HalfEdgeId },
    #[error("twin of twin of {he} is not {he}")]
    Twin { he: HalfEdgeId },
    #[error("prev of next of {he} is not {he}")]
    NextPrev { he: HalfEdgeId },
    #[error("{he} does not start where its predecessor ends")]
    Origin { he: HalfEdgeId },
    #[error("{he} lies on {found} but its cycle belongs to {expected}")]
    Face {
        he: HalfEdgeId,
        expected: FaceId,
        found: FaceId,
    },
    #[error("cycle through {he} does not close")]
    OpenCycle { he: HalfEdgeId },
    #[error("{face} points at a half-edge of another face")]
    FaceEdge { face: FaceId },
    #[error("{vertex} points at a half-edge that does not leave it")]
    VertexEdge { vertex: VertexId },
    #[error("{he} has the same origin and destination")]
    Loop { he: HalfEdgeId },
}

impl Dcel {
    /// Check the half-edge invariants listed in the module docs.
    ///
    /// Runs in `O(|E|)`; the first violation found is returned.
    pub fn validate(&self) -> Result<(), DcelError> {
        let n_he = self.half_edges.len();
        for (i, rec) in self.half_edges.iter().enumerate() {
            let he = HalfEdgeId(i);
            if rec.twin.0 >= n_he
                || rec.next.0 >= n_he
                || rec.prev.0 >= n_he
                || rec.origin.0 >= self.vertices.len()
                || rec.face.0 >= self.faces.len()
            {
                return Err(DcelError::OutOfRange { he });
            }
        }
        for he in self.half_edge_ids() {
            if self.twin(self.twin(he)) != he || self.twin(he) == he {
                return Err(DcelError::Twin { he });
            }
            if self.prev(self.next(he)) != he {
                return Err(DcelError::NextPrev { he });
            }
            if self.origin(he) != self.dest(self.prev(he)) {
                return Err(DcelError::Origin { he });
            }
            if self.origin(he) == self.dest(he) {
                return Err(DcelError::Loop { he });
            }
        }

        // Every cycle closes and is single-faced.
        let mut seen = vec![false; n_he];
        for start in self.half_edge_ids() {
            if seen[start.0] {
                continue;
            }
            let face = self.face_of(start);
            let mut cur = start;
            let mut steps = 0usize;
            loop {
                seen[cur.0] = true;
                if self.face_of(cur) != face {
                    return Err(DcelError::Face {
                        he: cur,
                        expected: face,
                        found: self.face_of(cur),
                    });
                }
                cur = self.next(cur);
                steps += 1;
                if cur == start {
                    break;
                }
                if steps > n_he {
                    return Err(DcelError::OpenCycle { he: start });
                }
            }
        }

        for face in self.face_ids() {
            if let Some(he) = self.face(face).half_edge {
                if he.0 >= n_he || self.face_of(he) != face {
                    return Err(DcelError::FaceEdge { face });
                }
            }
        }
        for vertex in self.vertex_ids() {
            if let Some(he) = self.vertex(vertex).half_edge {
                if he.0 >= n_he || self.origin(he) != vertex {
                    return Err(DcelError::VertexEdge { vertex });
                }
            }
        }
        Ok(())
    }
}
