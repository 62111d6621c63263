//! Curated internal API (UNSTABLE).
//!
//! Important
//! - This is not a public API. It is a convenience surface for the CLI and
//!   experiments. Breaking changes are allowed and expected.

// Tree and registry
pub use crate::algorithm::builtin::algorithms as builtin_algorithms;
pub use crate::algorithm::{
    Algorithm, AlgorithmDescriptor, AlgorithmName, AlgorithmOps, AlgorithmResult, BaseFn, MergeFn,
    Registry,
};
pub use crate::dac::{DacCfg, DacNode, DacTree, MergeCtx, NodeId, NodeView, MAX_LEAF_SIZE};
pub use crate::error::{DacError, DacResult};
// Geometry
pub use crate::geom2::rand::{draw_points, CloudCfg, CloudShape, ReplayToken as CloudReplay};
pub use crate::geom2::{
    bisector, circumcenter, cross, preprocess_points, sites_of, Line, Point, Segment, Site, Vector,
    EPS, TIE_BREAK_STEP,
};
// Subdivisions
pub use crate::dcel::{Dcel, DcelError, FaceId, HalfEdgeId, Location, VertexId, UNBOUNDED};
pub use crate::delaunay::Triangulation;
pub use crate::graph::SiteGraph;
pub use crate::hull::{Bridges, ConvexHull};
pub use crate::voronoi::{EdgeGeometry, VoronoiDiagram, VoronoiEdge, VoronoiError};
