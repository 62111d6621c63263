//! Algorithm identities, descriptors and operator tables.
//!
//! Purpose
//! - An algorithm is a name, an ordered list of dependency names, and two plain
//!   function pointers: a base-case constructor for leaves and a merge operator
//!   for internal nodes. The set is closed once a `Registry` validates it.
//! - Results are a closed enum; typed accessors on `NodeView` turn a shape
//!   mismatch into `DacError::ResultShape`.
//!
//! Code cross-refs: `registry::Registry`, `builtin::algorithms`, `crate::dac::DacTree`

pub mod builtin;
mod registry;

use std::borrow::Cow;
use std::fmt;

use crate::dac::{MergeCtx, NodeView};
use crate::delaunay::Triangulation;
use crate::error::DacResult;
use crate::graph::SiteGraph;
use crate::hull::ConvexHull;
use crate::voronoi::VoronoiDiagram;

pub use registry::Registry;

/// Interned algorithm identifier used as the result-table key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AlgorithmName(Cow<'static, str>);

impl AlgorithmName {
    pub const CONVEX_HULL: AlgorithmName = AlgorithmName::from_static("convex-hull");
    pub const VORONOI_DIAGRAM: AlgorithmName = AlgorithmName::from_static("voronoi-diagram");
    pub const DELAUNAY_TRIANGULATION: AlgorithmName = AlgorithmName::from_static("delaunay-triangulation");
    /// Reserved; no built-in operator is registered under this name.
    pub const MINIMUM_AREA_POLYGON: AlgorithmName = AlgorithmName::from_static("minimum-area-polygon");
    pub const SPANNING_TREE: AlgorithmName = AlgorithmName::from_static("spanning-tree");
    pub const ALL_NEAREST_NEIGHBOURS: AlgorithmName = AlgorithmName::from_static("all-nearest-neighbours");

    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AlgorithmName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for AlgorithmName {
    fn from(name: &'static str) -> Self {
        Self::from_static(name)
    }
}

/// Name plus the algorithms whose results must exist at a node before this one runs there.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlgorithmDescriptor {
    pub name: AlgorithmName,
    pub dependencies: Vec<AlgorithmName>,
}

pub type BaseFn = fn(NodeView<'_>) -> DacResult<AlgorithmResult>;
pub type MergeFn = fn(MergeCtx<'_>) -> DacResult<AlgorithmResult>;

/// Base-case constructor and merge operator.
#[derive(Clone, Copy)]
pub struct AlgorithmOps {
    pub base: BaseFn,
    pub merge: MergeFn,
}

/// A registrable algorithm.
#[derive(Clone)]
pub struct Algorithm {
    pub descriptor: AlgorithmDescriptor,
    pub ops: AlgorithmOps,
}

impl Algorithm {
    pub fn new(
        name: AlgorithmName,
        dependencies: impl IntoIterator<Item = AlgorithmName>,
        base: BaseFn,
        merge: MergeFn,
    ) -> Self {
        Self {
            descriptor: AlgorithmDescriptor {
                name,
                dependencies: dependencies.into_iter().collect(),
            },
            ops: AlgorithmOps { base, merge },
        }
    }

    pub fn name(&self) -> &AlgorithmName {
        &self.descriptor.name
    }
}

impl fmt::Debug for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Algorithm")
            .field("name", &self.descriptor.name)
            .field("dependencies", &self.descriptor.dependencies)
            .finish_non_exhaustive()
    }
}

/// Immutable result of one algorithm at one node.
#[derive(Clone, Debug, PartialEq)]
pub enum AlgorithmResult {
    Hull(ConvexHull),
    Voronoi(VoronoiDiagram),
    Delaunay(Triangulation),
    Graph(SiteGraph),
}

impl AlgorithmResult {
    /// Shape name used in `ResultShape` errors.
    pub fn kind(&self) -> &'static str {
        match self {
            AlgorithmResult::Hull(_) => "convex hull",
            AlgorithmResult::Voronoi(_) => "voronoi diagram",
            AlgorithmResult::Delaunay(_) => "delaunay triangulation",
            AlgorithmResult::Graph(_) => "site graph",
        }
    }

    pub fn as_hull(&self) -> Option<&ConvexHull> {
        match self {
            AlgorithmResult::Hull(h) => Some(h),
            _ => None,
        }
    }

    pub fn as_voronoi(&self) -> Option<&VoronoiDiagram> {
        match self {
            AlgorithmResult::Voronoi(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_delaunay(&self) -> Option<&Triangulation> {
        match self {
            AlgorithmResult::Delaunay(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_graph(&self) -> Option<&SiteGraph> {
        match self {
            AlgorithmResult::Graph(g) => Some(g),
            _ => None,
        }
    }
}
