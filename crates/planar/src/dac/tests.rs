use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::*;
use crate::algorithm::{builtin, Algorithm, Registry};
use crate::geom2::{monotone_chain, sites_of};
use crate::voronoi::EdgeGeometry;

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn builtin_tree(points: Vec<Point>) -> DacTree {
    DacTree::build(points, builtin::algorithms()).unwrap()
}

fn random_points(seed: u64, n: usize) -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| p(rng.gen_range(-100.0..100.0), rng.gen_range(-100.0..100.0)))
        .collect()
}

fn dummy_base(view: NodeView<'_>) -> DacResult<AlgorithmResult> {
    Ok(AlgorithmResult::Graph(SiteGraph::nearest_neighbours(&view.sites())))
}

fn dummy_merge(ctx: MergeCtx<'_>) -> DacResult<AlgorithmResult> {
    dummy_base(ctx.node)
}

#[test]
fn triangle_scenario() {
    let mut tree = builtin_tree(vec![p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0)]);
    assert_eq!(tree.nodes().len(), 1);

    tree.process_algorithm(&AlgorithmName::VORONOI_DIAGRAM).unwrap();
    let hull = tree.convex_hull().unwrap();
    assert_eq!(hull.len(), 3);
    assert!(hull.area() > 0.49);
    let pts = hull.points();
    assert!((pts[1] - p(1.0, 0.0)).norm() < 1e-12);
    assert!((pts[2] - p(0.0, 1.0)).norm() < 1e-12);

    let vd = tree.voronoi_diagram().unwrap();
    vd.check().unwrap();
    assert_eq!(vd.num_cells(), 3);
    let vs = vd.vertices();
    assert_eq!(vs.len(), 1);
    assert!((vs[0] - p(0.5, 0.5)).norm() < 1e-7);
    assert!(vd
        .edges()
        .iter()
        .all(|e| matches!(e.geometry, EdgeGeometry::Ray { .. })));
}

#[test]
fn two_points_are_split_by_a_vertical_line() {
    let mut tree = builtin_tree(vec![p(10.0, 0.0), p(0.0, 0.0)]);
    tree.process_algorithm(&AlgorithmName::VORONOI_DIAGRAM).unwrap();
    let vd = tree.voronoi_diagram().unwrap();
    assert_eq!(vd.num_cells(), 2);
    let edges = vd.edges();
    assert_eq!(edges.len(), 1);
    match edges[0].geometry {
        EdgeGeometry::Line { point, dir } => {
            assert!((point.x - 5.0).abs() < 1e-12);
            assert!(dir.x.abs() < 1e-12);
        }
        other => panic!("expected a line, got {other:?}"),
    }
}

#[test]
fn lookup_before_processing_is_no_data() {
    let tree = builtin_tree(vec![p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0)]);
    let err = tree
        .algorithm_result(&AlgorithmName::VORONOI_DIAGRAM)
        .unwrap_err();
    assert_eq!(
        err,
        DacError::NoData {
            name: AlgorithmName::VORONOI_DIAGRAM,
            node: NodeId::ROOT,
        }
    );
    assert!(matches!(tree.voronoi_diagram(), Err(DacError::NoData { .. })));
}

#[test]
fn processing_pulls_in_dependencies_only() {
    let mut tree = builtin_tree(random_points(5, 20));
    tree.process_algorithm(&AlgorithmName::VORONOI_DIAGRAM).unwrap();
    for node in tree.nodes() {
        let names: Vec<&str> = node.computed().map(|n| n.as_str()).collect();
        assert_eq!(names, vec!["convex-hull", "voronoi-diagram"]);
    }
    assert!(matches!(
        tree.spanning_tree(),
        Err(DacError::NoData { .. })
    ));
}

#[test]
fn cycle_is_reported_before_points_are_checked() {
    let algs = vec![
        Algorithm::new(AlgorithmName::from_static("A"), [AlgorithmName::from_static("B")], dummy_base, dummy_merge),
        Algorithm::new(AlgorithmName::from_static("B"), [AlgorithmName::from_static("A")], dummy_base, dummy_merge),
    ];
    let err = DacTree::build(Vec::new(), algs).unwrap_err();
    assert!(matches!(err, DacError::CyclicDependency { .. }));
    assert_eq!(
        DacTree::build(Vec::new(), builtin::algorithms()).unwrap_err(),
        DacError::EmptyInput
    );
    assert_eq!(
        DacTree::build(vec![p(0.0, f64::NAN)], builtin::algorithms()).unwrap_err(),
        DacError::NonFinitePoint { index: 0 }
    );
}

#[test]
fn processing_twice_is_idempotent() {
    let mut tree = builtin_tree(random_points(11, 37));
    let first = tree
        .process_algorithm(&AlgorithmName::VORONOI_DIAGRAM)
        .unwrap()
        .clone();
    let second = tree
        .process_algorithm(&AlgorithmName::VORONOI_DIAGRAM)
        .unwrap();
    assert_eq!(&first, second);
}

#[test]
fn every_site_gets_one_cell() {
    for (seed, n) in [(1, 4), (2, 9), (3, 31), (4, 64)] {
        let mut tree = builtin_tree(random_points(seed, n));
        tree.process_all().unwrap();
        let vd = tree.voronoi_diagram().unwrap();
        vd.check().unwrap();
        assert_eq!(vd.num_cells(), n);
        for k in 0..n {
            assert!(vd.cell(k).is_some(), "site {k} has no cell (n = {n})");
        }

        let sites = sites_of(tree.points(), 0);
        let expected: Vec<usize> = monotone_chain(&sites).iter().map(|s| s.index).collect();
        let hull: Vec<usize> = tree
            .convex_hull()
            .unwrap()
            .vertices()
            .iter()
            .map(|s| s.index)
            .collect();
        assert_eq!(hull, expected);

        assert_eq!(tree.spanning_tree().unwrap().edges().len(), n - 1);
        assert_eq!(
            tree.nearest_neighbours().unwrap(),
            &SiteGraph::nearest_neighbours(&sites)
        );
    }
}

#[test]
fn unknown_names_are_rejected() {
    let mut tree = builtin_tree(random_points(7, 6));
    let ghost = AlgorithmName::new("ghost");
    assert!(matches!(
        tree.process_algorithm(&ghost),
        Err(DacError::UnknownAlgorithm { required_by: None, .. })
    ));
    assert!(matches!(
        tree.algorithm_result(&AlgorithmName::MINIMUM_AREA_POLYGON),
        Err(DacError::UnknownAlgorithm { .. })
    ));
    tree.process_all().unwrap();
    assert!(matches!(
        tree.node_result(NodeId(999), &AlgorithmName::CONVEX_HULL),
        Err(DacError::NoData { .. })
    ));
}

#[test]
fn wrong_result_shape_is_reported() {
    let algs = vec![Algorithm::new(
        AlgorithmName::CONVEX_HULL,
        Vec::<AlgorithmName>::new(),
        dummy_base,
        dummy_merge,
    )];
    let mut tree = DacTree::build(random_points(8, 5), algs).unwrap();
    tree.process_all().unwrap();
    assert_eq!(
        tree.convex_hull().unwrap_err(),
        DacError::ResultShape {
            name: AlgorithmName::CONVEX_HULL,
            expected: "convex hull",
            found: "site graph",
        }
    );
}

#[test]
fn leaf_size_shapes_the_tree() {
    let registry = Registry::builtin().unwrap();
    let points = random_points(12, 5);

    let tree = DacTree::with_registry(points.clone(), registry.clone(), DacCfg::default()).unwrap();
    // 5 -> (2, 3)
    assert_eq!(tree.nodes().len(), 3);
    assert_eq!(tree.depth(), 1);

    let tree = DacTree::with_registry(points.clone(), registry.clone(), DacCfg::with_leaf_size(0)).unwrap();
    assert_eq!(tree.leaves().count(), 5);
    assert!(tree.leaves().all(|id| tree.node(id).map_or(false, |n| n.len() == 1)));
    for (k, node) in tree.nodes().iter().enumerate() {
        if let Some((l, r)) = node.children() {
            assert!(l.0 > k && r.0 > k);
            assert_eq!(tree.nodes()[l.0].range().end, tree.nodes()[r.0].range().start);
        }
    }

    let tree = DacTree::with_registry(points, registry, DacCfg::with_leaf_size(10)).unwrap();
    assert_eq!(tree.nodes().len(), 3);
    assert_eq!(tree.cfg().leaf_size, 10);
}

#[test]
fn duplicate_x_coordinates_are_separated() {
    let mut tree = builtin_tree(vec![p(1.0, 0.0), p(1.0, 2.0), p(1.0, 1.0), p(0.0, 0.0), p(3.0, 3.0)]);
    assert!(tree.points().windows(2).all(|w| w[0].x < w[1].x));
    tree.process_all().unwrap();
    assert_eq!(tree.voronoi_diagram().unwrap().num_cells(), 5);
}

#[test]
fn delaunay_at_every_node_is_the_dual_of_its_diagram() {
    let mut tree = builtin_tree(random_points(21, 48));
    tree.process_algorithm(&AlgorithmName::DELAUNAY_TRIANGULATION).unwrap();
    for k in 0..tree.nodes().len() {
        let id = NodeId(k);
        let vd = tree
            .node_result(id, &AlgorithmName::VORONOI_DIAGRAM)
            .unwrap()
            .as_voronoi()
            .unwrap();
        let dt = tree
            .node_result(id, &AlgorithmName::DELAUNAY_TRIANGULATION)
            .unwrap();
        assert_eq!(dt, &AlgorithmResult::Delaunay(Triangulation::from_voronoi(vd)));
    }
}
