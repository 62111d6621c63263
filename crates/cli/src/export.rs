//! JSON shapes for algorithm results.

use planar::algorithm::AlgorithmResult;
use planar::delaunay::Triangulation;
use planar::geom2::{Point, Site};
use planar::graph::SiteGraph;
use planar::hull::ConvexHull;
use planar::voronoi::{EdgeGeometry, VoronoiDiagram};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SiteOut {
    pub index: usize,
    pub x: f64,
    pub y: f64,
}

impl From<&Site> for SiteOut {
    fn from(s: &Site) -> Self {
        Self {
            index: s.index,
            x: s.point.x,
            y: s.point.y,
        }
    }
}

fn xy(p: &Point) -> [f64; 2] {
    [p.x, p.y]
}

#[derive(Debug, Serialize)]
pub struct HullOut {
    pub vertices: Vec<SiteOut>,
    pub area: f64,
}

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EdgeOut {
    Segment {
        left: usize,
        right: usize,
        from: [f64; 2],
        to: [f64; 2],
    },
    Ray {
        left: usize,
        right: usize,
        origin: [f64; 2],
        dir: [f64; 2],
    },
    Line {
        left: usize,
        right: usize,
        point: [f64; 2],
        dir: [f64; 2],
    },
}

#[derive(Debug, Serialize)]
pub struct VoronoiOut {
    pub cells: usize,
    pub vertices: Vec<[f64; 2]>,
    pub edges: Vec<EdgeOut>,
}

#[derive(Debug, Serialize)]
pub struct DelaunayOut {
    pub edges: Vec<(usize, usize)>,
    pub faces: Vec<Vec<usize>>,
}

#[derive(Debug, Serialize)]
pub struct GraphOut {
    pub edges: Vec<(usize, usize)>,
    pub total_length: f64,
}

pub fn hull(h: &ConvexHull) -> HullOut {
    HullOut {
        vertices: h.vertices().iter().map(SiteOut::from).collect(),
        area: h.area(),
    }
}

pub fn voronoi(d: &VoronoiDiagram) -> VoronoiOut {
    let edges = d
        .edges()
        .into_iter()
        .map(|e| {
            let (left, right) = (e.left, e.right);
            match e.geometry {
                EdgeGeometry::Segment { from, to } => EdgeOut::Segment {
                    left,
                    right,
                    from: xy(&from),
                    to: xy(&to),
                },
                EdgeGeometry::Ray { origin, dir } => EdgeOut::Ray {
                    left,
                    right,
                    origin: xy(&origin),
                    dir: [dir.x, dir.y],
                },
                EdgeGeometry::Line { point, dir } => EdgeOut::Line {
                    left,
                    right,
                    point: xy(&point),
                    dir: [dir.x, dir.y],
                },
            }
        })
        .collect();
    VoronoiOut {
        cells: d.num_cells(),
        vertices: d.vertices().iter().map(xy).collect(),
        edges,
    }
}

pub fn delaunay(t: &Triangulation) -> DelaunayOut {
    DelaunayOut {
        edges: t.edges().to_vec(),
        faces: t.faces(),
    }
}

pub fn graph(g: &SiteGraph) -> GraphOut {
    GraphOut {
        edges: g.edges().to_vec(),
        total_length: g.total_length(),
    }
}

pub fn result(r: &AlgorithmResult) -> serde_json::Result<serde_json::Value> {
    match r {
        AlgorithmResult::Hull(h) => serde_json::to_value(hull(h)),
        AlgorithmResult::Voronoi(d) => serde_json::to_value(voronoi(d)),
        AlgorithmResult::Delaunay(t) => serde_json::to_value(delaunay(t)),
        AlgorithmResult::Graph(g) => serde_json::to_value(graph(g)),
    }
}
