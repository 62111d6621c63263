//! Divide-and-conquer evaluation tree over a preprocessed point sequence.
//!
//! Purpose
//! - Split the sorted points at the median index until ranges reach the
//!   base-case size, then evaluate registered algorithms bottom-up: base-case
//!   constructors at leaves, merge operators at internal nodes.
//! - Cache every result in a write-once table per `(node, algorithm)`.
//!
//! Assumptions and conventions
//! - Nodes live in an arena indexed by `NodeId`; the root is `NodeId(0)` and
//!   children always have larger ids than their parent, so sweeping ids in
//!   reverse is a valid bottom-up order.
//! - Node ranges are contiguous; every left child lies strictly left in x of
//!   its sibling (guaranteed by `preprocess_points`).
//! - Operators see read-only views: `NodeView` for one node, `MergeCtx` for a
//!   node plus its two children. Dependencies are looked up at the same node.
//!
//! Code cross-refs: `tree::DacTree`, `crate::algorithm::Registry`

mod tree;

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Range;

use crate::algorithm::{AlgorithmName, AlgorithmResult};
use crate::delaunay::Triangulation;
use crate::error::{DacError, DacResult};
use crate::geom2::{sites_of, Point, Site};
use crate::graph::SiteGraph;
use crate::hull::ConvexHull;
use crate::voronoi::VoronoiDiagram;

pub use tree::DacTree;

/// Index into the node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Largest base case every built-in algorithm constructs in closed form.
pub const MAX_LEAF_SIZE: usize = 3;

/// Tree shape parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DacCfg {
    /// Ranges of at most this many points become leaves. Clamped to `1..=3`.
    pub leaf_size: usize,
}

impl Default for DacCfg {
    fn default() -> Self {
        Self {
            leaf_size: MAX_LEAF_SIZE,
        }
    }
}

impl DacCfg {
    pub fn with_leaf_size(leaf_size: usize) -> Self {
        Self { leaf_size }
    }

    pub(crate) fn effective_leaf_size(&self) -> usize {
        self.leaf_size.clamp(1, MAX_LEAF_SIZE)
    }
}

/// One tree node: a point range, optional children and its result table.
#[derive(Clone, Debug)]
pub struct DacNode {
    pub(crate) range: Range<usize>,
    pub(crate) children: Option<(NodeId, NodeId)>,
    pub(crate) depth: usize,
    pub(crate) results: BTreeMap<AlgorithmName, AlgorithmResult>,
}

impl DacNode {
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    pub fn children(&self) -> Option<(NodeId, NodeId)> {
        self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn result(&self, name: &AlgorithmName) -> Option<&AlgorithmResult> {
        self.results.get(name)
    }

    /// Names with a cached result, sorted.
    pub fn computed(&self) -> impl Iterator<Item = &AlgorithmName> {
        self.results.keys()
    }
}

/// Read-only view of one node handed to operators.
#[derive(Clone, Copy, Debug)]
pub struct NodeView<'a> {
    id: NodeId,
    node: &'a DacNode,
    points: &'a [Point],
}

impl<'a> NodeView<'a> {
    pub(crate) fn new(id: NodeId, node: &'a DacNode, points: &'a [Point]) -> Self {
        Self { id, node, points }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn range(&self) -> Range<usize> {
        self.node.range()
    }

    pub fn len(&self) -> usize {
        self.node.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node.is_empty()
    }

    /// Points of this node's range.
    pub fn points(&self) -> &'a [Point] {
        &self.points[self.node.range()]
    }

    /// Points of this node's range tagged with their global indices.
    pub fn sites(&self) -> Vec<Site> {
        sites_of(self.points(), self.node.range.start)
    }

    /// Cached result of `name` at this node.
    pub fn result(&self, name: &AlgorithmName) -> DacResult<&'a AlgorithmResult> {
        self.node.results.get(name).ok_or_else(|| DacError::NoData {
            name: name.clone(),
            node: self.id,
        })
    }

    pub fn hull(&self) -> DacResult<&'a ConvexHull> {
        let name = AlgorithmName::CONVEX_HULL;
        let res = self.result(&name)?;
        res.as_hull().ok_or_else(|| shape(name, "convex hull", res))
    }

    pub fn voronoi(&self) -> DacResult<&'a VoronoiDiagram> {
        let name = AlgorithmName::VORONOI_DIAGRAM;
        let res = self.result(&name)?;
        res.as_voronoi().ok_or_else(|| shape(name, "voronoi diagram", res))
    }

    pub fn delaunay(&self) -> DacResult<&'a Triangulation> {
        let name = AlgorithmName::DELAUNAY_TRIANGULATION;
        let res = self.result(&name)?;
        res.as_delaunay()
            .ok_or_else(|| shape(name, "delaunay triangulation", res))
    }

    /// Site graph cached under `name` (spanning tree, nearest neighbours, ...).
    pub fn graph(&self, name: &AlgorithmName) -> DacResult<&'a SiteGraph> {
        let res = self.result(name)?;
        res.as_graph()
            .ok_or_else(|| shape(name.clone(), "site graph", res))
    }
}

fn shape(name: AlgorithmName, expected: &'static str, found: &AlgorithmResult) -> DacError {
    DacError::ResultShape {
        name,
        expected,
        found: found.kind(),
    }
}

/// Inputs of a merge operator: the node being computed and its two children.
///
/// `left` covers strictly smaller x than `right`.
#[derive(Clone, Copy, Debug)]
pub struct MergeCtx<'a> {
    pub node: NodeView<'a>,
    pub left: NodeView<'a>,
    pub right: NodeView<'a>,
}

impl MergeCtx<'_> {
    /// First global index of the right child.
    pub fn split(&self) -> usize {
        self.right.range().start
    }
}

#[cfg(test)]
mod tests;
