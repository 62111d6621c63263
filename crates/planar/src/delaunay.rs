//! Delaunay subdivision as the straight-line dual of a Voronoi diagram.
//!
//! Two sites are joined iff their Voronoi cells share an edge. Faces are
//! triangles in general position; cocircular sites give larger convex faces.
//! Collinear site sets give a path and no bounded face.

use crate::dcel::{Dcel, UNBOUNDED};
use crate::geom2::{Point, Site};
use crate::voronoi::VoronoiDiagram;

#[derive(Clone, Debug, PartialEq)]
pub struct Triangulation {
    sites: Vec<Site>,
    /// Vertex `k` is `sites[k]`.
    dcel: Dcel,
    /// Undirected edges as sorted global index pairs.
    edges: Vec<(usize, usize)>,
}

impl Triangulation {
    pub fn from_voronoi(voronoi: &VoronoiDiagram) -> Self {
        let sites = voronoi.sites().to_vec();
        let first = sites.first().map_or(0, |s| s.index);
        let edges = voronoi.adjacent_pairs();
        let points: Vec<Point> = sites.iter().map(|s| s.point).collect();
        let local: Vec<(usize, usize)> = edges
            .iter()
            .map(|&(u, v)| (u - first, v - first))
            .collect();
        let dcel = Dcel::from_plane_graph(&points, &local);
        Self { sites, dcel, edges }
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    pub fn dcel(&self) -> &Dcel {
        &self.dcel
    }

    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    /// Edges with one endpoint below `split` and the other at or above it.
    pub fn crossing_edges(&self, split: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.edges
            .iter()
            .copied()
            .filter(move |&(u, v)| u < split && v >= split)
    }

    /// Bounded faces as global site indices in CCW order.
    pub fn faces(&self) -> Vec<Vec<usize>> {
        self.dcel
            .face_ids()
            .filter(|&f| f != UNBOUNDED)
            .map(|f| {
                self.dcel
                    .face_half_edges(f)
                    .map(|he| self.sites[self.dcel.origin(he).0].index)
                    .collect()
            })
            .collect()
    }

    /// Bounded faces with exactly three corners.
    pub fn triangles(&self) -> Vec<[usize; 3]> {
        self.faces()
            .into_iter()
            .filter_map(|f| <[usize; 3]>::try_from(f).ok())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom2::sites_of;

    #[test]
    fn flat_rhombus_takes_the_short_diagonal() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.5),
            Point::new(1.1, -0.5),
            Point::new(2.0, 0.0),
        ];
        let sites = sites_of(&pts, 0);
        let t = Triangulation::from_voronoi(&VoronoiDiagram::direct(&sites));
        t.dcel().validate().unwrap();
        assert_eq!(t.triangles().len(), 2);
        assert_eq!(t.edges().len(), 5);
        assert!(t.edges().contains(&(1, 2)));
        assert_eq!(t.crossing_edges(2).count(), 3);
    }

    #[test]
    fn collinear_sites_form_a_path() {
        let pts: Vec<Point> = (0..4).map(|k| Point::new(k as f64, 0.5 * k as f64)).collect();
        let t = Triangulation::from_voronoi(&VoronoiDiagram::direct(&sites_of(&pts, 10)));
        assert_eq!(t.edges(), &[(10, 11), (11, 12), (12, 13)]);
        assert!(t.faces().is_empty());
    }
}
