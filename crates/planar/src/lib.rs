//! Planar structures over point sets by divide and conquer.
//!
//! Purpose
//! - Convex hull, Voronoi diagram, Delaunay triangulation, Euclidean minimum
//!   spanning tree and all nearest neighbours, evaluated on one median-split
//!   tree with per-node cached results.
//! - Subdivisions are doubly-connected edge lists (`dcel::Dcel`).
//!
//! Layout
//! - `geom2`: points, lines, bisectors, preprocessing, random clouds.
//! - `dcel`: arena DCEL with ideal vertices and invariant checks.
//! - `algorithm`: names, descriptors, operator tables and the validated registry.
//! - `dac`: the tree, node views and evaluation driver.
//! - `hull`, `voronoi`, `delaunay`, `graph`: the built-in algorithms.
//!
//! API Policy
//! - This crate is project-internal. There is no stable public API; `api`
//!   and `prelude` are convenience surfaces, not compatibility promises.

pub mod algorithm;
pub mod api;
pub mod dac;
pub mod dcel;
pub mod delaunay;
pub mod error;
pub mod geom2;
pub mod graph;
pub mod hull;
pub mod voronoi;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{DacError, DacResult};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::algorithm::{builtin, Algorithm, AlgorithmName, AlgorithmResult, Registry};
    pub use crate::dac::{DacCfg, DacTree, MergeCtx, NodeId, NodeView};
    pub use crate::error::{DacError, DacResult};
    pub use crate::geom2::rand::{draw_points, CloudCfg, CloudShape, ReplayToken};
    pub use crate::geom2::{Point, Site, Vector};
    pub use crate::hull::ConvexHull;
    pub use crate::voronoi::{EdgeGeometry, VoronoiDiagram, VoronoiEdge};
}
