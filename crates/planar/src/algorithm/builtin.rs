//! Built-in operators.
//!
//! | name                     | depends on             | base                 | merge                         |
//! |--------------------------|------------------------|----------------------|-------------------------------|
//! | `convex-hull`            | –                      | closed form          | tangent splice                |
//! | `voronoi-diagram`        | `convex-hull`          | closed form          | bisector chain (node hull)    |
//! | `delaunay-triangulation` | `voronoi-diagram`      | dual of node diagram | dual of node diagram          |
//! | `spanning-tree`          | `delaunay-triangulation` | Kruskal on leaf DT | children + crossing DT edges  |
//! | `all-nearest-neighbours` | `delaunay-triangulation` | brute force        | children + crossing DT edges  |
//!
//! `minimum-area-polygon` is a reserved name without a built-in operator.

use super::{Algorithm, AlgorithmName, AlgorithmResult};
use crate::dac::{MergeCtx, NodeView};
use crate::delaunay::Triangulation;
use crate::error::DacResult;
use crate::graph::SiteGraph;
use crate::hull::ConvexHull;
use crate::voronoi::VoronoiDiagram;

/// Every built-in algorithm, dependencies registered first.
pub fn algorithms() -> Vec<Algorithm> {
    vec![
        convex_hull(),
        voronoi_diagram(),
        delaunay_triangulation(),
        spanning_tree(),
        all_nearest_neighbours(),
    ]
}

pub fn convex_hull() -> Algorithm {
    Algorithm::new(AlgorithmName::CONVEX_HULL, Vec::<AlgorithmName>::new(), hull_base, hull_merge)
}

pub fn voronoi_diagram() -> Algorithm {
    Algorithm::new(
        AlgorithmName::VORONOI_DIAGRAM,
        [AlgorithmName::CONVEX_HULL],
        voronoi_base,
        voronoi_merge,
    )
}

pub fn delaunay_triangulation() -> Algorithm {
    Algorithm::new(
        AlgorithmName::DELAUNAY_TRIANGULATION,
        [AlgorithmName::VORONOI_DIAGRAM],
        delaunay_base,
        delaunay_merge,
    )
}

pub fn spanning_tree() -> Algorithm {
    Algorithm::new(
        AlgorithmName::SPANNING_TREE,
        [AlgorithmName::DELAUNAY_TRIANGULATION],
        emst_base,
        emst_merge,
    )
}

pub fn all_nearest_neighbours() -> Algorithm {
    Algorithm::new(
        AlgorithmName::ALL_NEAREST_NEIGHBOURS,
        [AlgorithmName::DELAUNAY_TRIANGULATION],
        ann_base,
        ann_merge,
    )
}

fn hull_base(view: NodeView<'_>) -> DacResult<AlgorithmResult> {
    Ok(AlgorithmResult::Hull(ConvexHull::base(&view.sites())))
}

fn hull_merge(ctx: MergeCtx<'_>) -> DacResult<AlgorithmResult> {
    Ok(AlgorithmResult::Hull(ConvexHull::merge(
        ctx.left.hull()?,
        ctx.right.hull()?,
    )))
}

fn voronoi_base(view: NodeView<'_>) -> DacResult<AlgorithmResult> {
    Ok(AlgorithmResult::Voronoi(VoronoiDiagram::base(&view.sites())))
}

fn voronoi_merge(ctx: MergeCtx<'_>) -> DacResult<AlgorithmResult> {
    Ok(AlgorithmResult::Voronoi(VoronoiDiagram::merge(
        ctx.left.voronoi()?,
        ctx.right.voronoi()?,
        ctx.node.hull()?,
    )))
}

fn delaunay_base(view: NodeView<'_>) -> DacResult<AlgorithmResult> {
    Ok(AlgorithmResult::Delaunay(Triangulation::from_voronoi(
        view.voronoi()?,
    )))
}

/// The node's Voronoi diagram already spans both children, so the dual is
/// rebuilt from it and the child triangulations are not read.
fn delaunay_merge(ctx: MergeCtx<'_>) -> DacResult<AlgorithmResult> {
    delaunay_base(ctx.node)
}

fn emst_base(view: NodeView<'_>) -> DacResult<AlgorithmResult> {
    Ok(AlgorithmResult::Graph(SiteGraph::spanning_tree(
        view.delaunay()?,
    )))
}

fn emst_merge(ctx: MergeCtx<'_>) -> DacResult<AlgorithmResult> {
    let name = AlgorithmName::SPANNING_TREE;
    Ok(AlgorithmResult::Graph(SiteGraph::merge_spanning_trees(
        ctx.left.graph(&name)?,
        ctx.right.graph(&name)?,
        ctx.node.delaunay()?,
    )))
}

fn ann_base(view: NodeView<'_>) -> DacResult<AlgorithmResult> {
    Ok(AlgorithmResult::Graph(SiteGraph::nearest_neighbours(
        &view.sites(),
    )))
}

fn ann_merge(ctx: MergeCtx<'_>) -> DacResult<AlgorithmResult> {
    let name = AlgorithmName::ALL_NEAREST_NEIGHBOURS;
    Ok(AlgorithmResult::Graph(SiteGraph::merge_nearest_neighbours(
        ctx.left.graph(&name)?,
        ctx.right.graph(&name)?,
        ctx.node.delaunay()?,
    )))
}
