use tracing::{debug, trace};

use super::{DacCfg, DacNode, MergeCtx, NodeId, NodeView};
use crate::algorithm::{Algorithm, AlgorithmName, AlgorithmResult, Registry};
use crate::delaunay::Triangulation;
use crate::error::{DacError, DacResult};
use crate::geom2::{preprocess_points, Point};
use crate::graph::SiteGraph;
use crate::hull::ConvexHull;
use crate::voronoi::VoronoiDiagram;

/// The tree: preprocessed points, node arena and the validated registry.
///
/// Immutable after `build` except for the per-node result tables, which are
/// filled by `process_algorithm` and never overwritten.
#[derive(Clone, Debug)]
pub struct DacTree {
    points: Vec<Point>,
    nodes: Vec<DacNode>,
    registry: Registry,
    cfg: DacCfg,
}

impl DacTree {
    /// Validate `algorithms`, preprocess `points` and split.
    ///
    /// Registry errors are reported before any point is looked at. No result
    /// is computed here; see `process_algorithm` and `process_all`.
    pub fn build(points: Vec<Point>, algorithms: Vec<Algorithm>) -> DacResult<Self> {
        let registry = Registry::new(algorithms)?;
        Self::with_registry(points, registry, DacCfg::default())
    }

    /// Build over an already validated registry.
    pub fn with_registry(points: Vec<Point>, registry: Registry, cfg: DacCfg) -> DacResult<Self> {
        let points = preprocess_points(points)?;
        let nodes = split(points.len(), cfg.effective_leaf_size());
        debug!(
            points = points.len(),
            nodes = nodes.len(),
            leaf_size = cfg.effective_leaf_size(),
            "built divide-and-conquer tree"
        );
        Ok(Self {
            points,
            nodes,
            registry,
            cfg,
        })
    }

    /// Ensure `name` and its dependencies are computed at every node; return the root result.
    ///
    /// Cached `(node, name)` pairs are skipped, so repeated calls do no work
    /// and return the same result.
    pub fn process_algorithm(&mut self, name: &AlgorithmName) -> DacResult<&AlgorithmResult> {
        for alg in self.registry.closure(name)? {
            self.evaluate(&alg)?;
        }
        self.algorithm_result(name)
    }

    /// Evaluate every registered algorithm in resolved order.
    pub fn process_all(&mut self) -> DacResult<()> {
        let order = self.registry.resolve_order().to_vec();
        for alg in &order {
            self.evaluate(alg)?;
        }
        Ok(())
    }

    /// Bottom-up sweep of one algorithm; dependencies must already be cached.
    fn evaluate(&mut self, name: &AlgorithmName) -> DacResult<()> {
        let ops = self.registry.lookup(name)?.ops;
        let mut computed = 0usize;
        for k in (0..self.nodes.len()).rev() {
            if self.nodes[k].results.contains_key(name) {
                continue;
            }
            let id = NodeId(k);
            let result = {
                let node = NodeView::new(id, &self.nodes[k], &self.points);
                match self.nodes[k].children {
                    None => (ops.base)(node)?,
                    Some((l, r)) => {
                        let ctx = MergeCtx {
                            node,
                            left: NodeView::new(l, &self.nodes[l.0], &self.points),
                            right: NodeView::new(r, &self.nodes[r.0], &self.points),
                        };
                        trace!(algorithm = %name, node = %id, split = ctx.split(), "merge");
                        (ops.merge)(ctx)?
                    }
                }
            };
            self.nodes[k].results.insert(name.clone(), result);
            computed += 1;
        }
        if computed > 0 {
            debug!(algorithm = %name, nodes = computed, "evaluated algorithm");
        }
        Ok(())
    }

    /// Cached result of `name` at the root.
    pub fn algorithm_result(&self, name: &AlgorithmName) -> DacResult<&AlgorithmResult> {
        self.node_result(NodeId::ROOT, name)
    }

    /// Cached result of `name` at `id`.
    ///
    /// Errors: `UnknownAlgorithm` if `name` is not registered, `NoData` if it
    /// has not been computed at `id` yet.
    pub fn node_result(&self, id: NodeId, name: &AlgorithmName) -> DacResult<&AlgorithmResult> {
        self.registry.lookup(name)?;
        self.nodes
            .get(id.0)
            .and_then(|n| n.results.get(name))
            .ok_or_else(|| DacError::NoData {
                name: name.clone(),
                node: id,
            })
    }

    pub fn convex_hull(&self) -> DacResult<&ConvexHull> {
        self.root().hull()
    }

    pub fn voronoi_diagram(&self) -> DacResult<&VoronoiDiagram> {
        self.root().voronoi()
    }

    pub fn delaunay_triangulation(&self) -> DacResult<&Triangulation> {
        self.root().delaunay()
    }

    pub fn spanning_tree(&self) -> DacResult<&SiteGraph> {
        self.root().graph(&AlgorithmName::SPANNING_TREE)
    }

    pub fn nearest_neighbours(&self) -> DacResult<&SiteGraph> {
        self.root().graph(&AlgorithmName::ALL_NEAREST_NEIGHBOURS)
    }

    fn root(&self) -> NodeView<'_> {
        NodeView::new(NodeId::ROOT, &self.nodes[0], &self.points)
    }

    /// Preprocessed points (sorted, strictly increasing x).
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn nodes(&self) -> &[DacNode] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> Option<&DacNode> {
        self.nodes.get(id.0)
    }

    pub fn leaves(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.is_leaf())
            .map(|(k, _)| NodeId(k))
    }

    pub fn depth(&self) -> usize {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn cfg(&self) -> DacCfg {
        self.cfg
    }
}

/// Median splits with an explicit work stack; children get larger ids than parents.
fn split(n: usize, leaf_size: usize) -> Vec<DacNode> {
    let mut nodes = vec![DacNode {
        range: 0..n,
        children: None,
        depth: 0,
        results: Default::default(),
    }];
    let mut stack = vec![NodeId::ROOT];
    while let Some(id) = stack.pop() {
        let (range, depth) = (nodes[id.0].range.clone(), nodes[id.0].depth);
        if range.len() <= leaf_size {
            continue;
        }
        let mid = range.start + range.len() / 2;
        let left = NodeId(nodes.len());
        let right = NodeId(nodes.len() + 1);
        for r in [range.start..mid, mid..range.end] {
            nodes.push(DacNode {
                range: r,
                children: None,
                depth: depth + 1,
                results: Default::default(),
            });
        }
        nodes[id.0].children = Some((left, right));
        stack.push(right);
        stack.push(left);
    }
    nodes
}
