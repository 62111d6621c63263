//! Site graphs derived from the Delaunay subdivision: Euclidean minimum
//! spanning tree and all nearest neighbours.
//!
//! Both only need Delaunay edges as candidates (the EMST and the nearest
//! neighbour graph are subgraphs of any Delaunay triangulation), so a merge
//! combines the children's answers with the node's Delaunay edges crossing
//! the split.
//!
//! Distances are compared as `(squared length, index)` pairs, so equal
//! lengths resolve towards smaller site indices and results are deterministic.

use std::cmp::Ordering;

use crate::delaunay::Triangulation;
use crate::geom2::{Point, Site};

/// Edges between sites, by global index.
///
/// Spanning trees store undirected edges `(u, v)` with `u < v`, sorted.
/// Nearest-neighbour graphs store one directed edge `(site, nearest)` per
/// site, sorted by site.
#[derive(Clone, Debug, PartialEq)]
pub struct SiteGraph {
    sites: Vec<Site>,
    edges: Vec<(usize, usize)>,
}

impl SiteGraph {
    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    /// Sum of Euclidean edge lengths.
    pub fn total_length(&self) -> f64 {
        self.edges
            .iter()
            .filter_map(|&(u, v)| Some((self.point(u)? - self.point(v)?).norm()))
            .sum()
    }

    /// Target of the directed edge leaving `site`, if any.
    pub fn successor(&self, site: usize) -> Option<usize> {
        self.edges.iter().find(|e| e.0 == site).map(|e| e.1)
    }

    fn slot(&self, site: usize) -> Option<usize> {
        self.sites.binary_search_by_key(&site, |s| s.index).ok()
    }

    fn point(&self, site: usize) -> Option<Point> {
        self.slot(site).map(|k| self.sites[k].point)
    }

    fn dist2(&self, u: usize, v: usize) -> f64 {
        match (self.point(u), self.point(v)) {
            (Some(a), Some(b)) => (a - b).norm_squared(),
            _ => f64::INFINITY,
        }
    }

    // Spanning tree

    /// Minimum spanning tree of the Delaunay graph of one leaf.
    pub fn spanning_tree(delaunay: &Triangulation) -> Self {
        let graph = Self {
            sites: delaunay.sites().to_vec(),
            edges: Vec::new(),
        };
        graph.kruskal(delaunay.edges().to_vec())
    }

    /// Spanning tree of the union of two x-separated children.
    ///
    /// Candidates are the children's tree edges plus the Delaunay edges of
    /// the node that cross the split.
    pub fn merge_spanning_trees(left: &SiteGraph, right: &SiteGraph, delaunay: &Triangulation) -> Self {
        let split = right.sites.first().map_or(usize::MAX, |s| s.index);
        let mut candidates: Vec<(usize, usize)> = left.edges.clone();
        candidates.extend_from_slice(&right.edges);
        candidates.extend(delaunay.crossing_edges(split));
        let graph = Self {
            sites: delaunay.sites().to_vec(),
            edges: Vec::new(),
        };
        graph.kruskal(candidates)
    }

    fn kruskal(mut self, mut candidates: Vec<(usize, usize)>) -> Self {
        candidates.retain(|&(u, v)| u != v && self.slot(u).is_some() && self.slot(v).is_some());
        for e in candidates.iter_mut() {
            if e.0 > e.1 {
                *e = (e.1, e.0);
            }
        }
        candidates.sort_by(|&a, &b| self.cmp_edges(a, b));
        candidates.dedup();
        let mut forest = UnionFind::new(self.sites.len());
        let mut edges = Vec::with_capacity(self.sites.len().saturating_sub(1));
        for (u, v) in candidates {
            let (Some(su), Some(sv)) = (self.slot(u), self.slot(v)) else {
                continue;
            };
            if forest.union(su, sv) {
                edges.push((u, v));
            }
        }
        edges.sort_unstable();
        self.edges = edges;
        self
    }

    fn cmp_edges(&self, a: (usize, usize), b: (usize, usize)) -> Ordering {
        self.dist2(a.0, a.1)
            .total_cmp(&self.dist2(b.0, b.1))
            .then(a.cmp(&b))
    }

    // Nearest neighbours

    /// Nearest neighbour of every site by exhaustive search.
    pub fn nearest_neighbours(sites: &[Site]) -> Self {
        let edges = sites
            .iter()
            .filter_map(|s| {
                sites
                    .iter()
                    .filter(|o| o.index != s.index)
                    .min_by(|a, b| {
                        (a.point - s.point)
                            .norm_squared()
                            .total_cmp(&(b.point - s.point).norm_squared())
                            .then(a.index.cmp(&b.index))
                    })
                    .map(|o| (s.index, o.index))
            })
            .collect();
        Self {
            sites: sites.to_vec(),
            edges,
        }
    }

    /// Nearest neighbours of the union of two x-separated children.
    ///
    /// A site's new nearest neighbour is either its old one or a Delaunay
    /// neighbour across the split.
    pub fn merge_nearest_neighbours(left: &SiteGraph, right: &SiteGraph, delaunay: &Triangulation) -> Self {
        let split = right.sites.first().map_or(usize::MAX, |s| s.index);
        let mut graph = Self {
            sites: delaunay.sites().to_vec(),
            edges: Vec::new(),
        };
        let mut best: Vec<Option<usize>> = graph
            .sites
            .iter()
            .map(|s| left.successor(s.index).or_else(|| right.successor(s.index)))
            .collect();
        for (u, v) in delaunay.crossing_edges(split) {
            for (from, to) in [(u, v), (v, u)] {
                let Some(k) = graph.slot(from) else {
                    continue;
                };
                let better = match best[k] {
                    None => true,
                    Some(cur) => graph
                        .dist2(from, to)
                        .total_cmp(&graph.dist2(from, cur))
                        .then(to.cmp(&cur))
                        .is_lt(),
                };
                if better {
                    best[k] = Some(to);
                }
            }
        }
        graph.edges = graph
            .sites
            .iter()
            .zip(best)
            .filter_map(|(s, nn)| nn.map(|t| (s.index, t)))
            .collect();
        graph
    }
}

/// Disjoint sets with path halving and union by size.
struct UnionFind {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    /// Join the sets of `a` and `b`; false if they were already joined.
    fn union(&mut self, a: usize, b: usize) -> bool {
        let (mut ra, mut rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        if self.size[ra] < self.size[rb] {
            std::mem::swap(&mut ra, &mut rb);
        }
        self.parent[rb] = ra;
        self.size[ra] += self.size[rb];
        true
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::geom2::{cmp_xy, sites_of};
    use crate::voronoi::VoronoiDiagram;

    fn random_sites(seed: u64, n: usize) -> Vec<Site> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut pts: Vec<Point> = (0..n)
            .map(|_| Point::new(rng.gen_range(0.0..50.0), rng.gen_range(0.0..50.0)))
            .collect();
        pts.sort_by(cmp_xy);
        sites_of(&pts, 0)
    }

    /// Prim's algorithm on the complete graph, for comparison.
    fn brute_mst_length(sites: &[Site]) -> f64 {
        let n = sites.len();
        let mut in_tree = vec![false; n];
        let mut dist = vec![f64::INFINITY; n];
        dist[0] = 0.0;
        let mut total = 0.0;
        for _ in 0..n {
            let k = (0..n)
                .filter(|&k| !in_tree[k])
                .min_by(|&a, &b| dist[a].total_cmp(&dist[b]))
                .unwrap();
            in_tree[k] = true;
            total += dist[k];
            for j in 0..n {
                let d = (sites[j].point - sites[k].point).norm();
                if !in_tree[j] && d < dist[j] {
                    dist[j] = d;
                }
            }
        }
        total
    }

    #[test]
    fn merged_spanning_tree_is_minimal() {
        let sites = random_sites(9, 24);
        let mid = sites.len() / 2;
        let tri = |s: &[Site]| Triangulation::from_voronoi(&VoronoiDiagram::direct(s));
        let left = SiteGraph::spanning_tree(&tri(&sites[..mid]));
        let right = SiteGraph::spanning_tree(&tri(&sites[mid..]));
        let merged = SiteGraph::merge_spanning_trees(&left, &right, &tri(&sites));
        assert_eq!(merged.edges().len(), sites.len() - 1);
        assert!((merged.total_length() - brute_mst_length(&sites)).abs() < 1e-9);
    }

    #[test]
    fn merged_nearest_neighbours_match_brute_force() {
        let sites = random_sites(17, 30);
        let mid = sites.len() / 2;
        let tri = Triangulation::from_voronoi(&VoronoiDiagram::direct(&sites));
        let left = SiteGraph::nearest_neighbours(&sites[..mid]);
        let right = SiteGraph::nearest_neighbours(&sites[mid..]);
        let merged = SiteGraph::merge_nearest_neighbours(&left, &right, &tri);
        assert_eq!(merged, SiteGraph::nearest_neighbours(&sites));
    }

    #[test]
    fn ties_prefer_the_smaller_index() {
        let sites = sites_of(&[Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(2.0, 0.0)], 0);
        let nn = SiteGraph::nearest_neighbours(&sites);
        assert_eq!(nn.edges(), &[(0, 1), (1, 0), (2, 1)]);
        assert_eq!(nn.successor(1), Some(0));
        let single = SiteGraph::nearest_neighbours(&sites[..1]);
        assert!(single.edges().is_empty());
    }
}
