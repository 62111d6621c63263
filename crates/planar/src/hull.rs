//! Convex hulls of site sets: closed-form base case and tangent-line merge.
//!
//! Purpose
//! - `ConvexHull::base` for ≤3 sites, `ConvexHull::merge` for two hulls that
//!   are separated in x (every left site has a smaller x than every right site).
//! - The merged hull also yields the two bridges (upper/lower tangents) that
//!   seed the Voronoi bisector chain.
//!
//! Conventions
//! - Vertices are CCW, start at the (x, y)-smallest vertex and contain no
//!   collinear vertices. A hull of collinear sites is its two extreme sites;
//!   a single site is a one-vertex hull.
//! - The tangent walk is linear in the combined vertex count; a safety cap
//!   (and any input with fewer than three vertices) falls back to Andrew's
//!   monotone chain over the union.
//!
//! Code cross-refs: `geom2::monotone_chain`, `voronoi::merge`

use tracing::{trace, warn};

use crate::geom2::{cmp_xy, cross, monotone_chain, Point, Site, EPS};

/// Convex polygon over sites, CCW.
#[derive(Clone, Debug, PartialEq)]
pub struct ConvexHull {
    vertices: Vec<Site>,
}

/// Hull edges that cross a split between left (`index < split`) and right sites.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bridges {
    /// `(left, right)` endpoints of the upper tangent.
    pub upper: (Site, Site),
    /// `(left, right)` endpoints of the lower tangent.
    pub lower: (Site, Site),
}

impl ConvexHull {
    /// Direct construction over any number of sites.
    pub fn from_sites(sites: &[Site]) -> Self {
        Self {
            vertices: monotone_chain(sites),
        }
    }

    /// Closed-form hull for up to three sites (a point, a segment or a CCW triangle).
    pub fn base(sites: &[Site]) -> Self {
        let mut s = sites.to_vec();
        s.sort_by(|a, b| cmp_xy(&a.point, &b.point).then(a.index.cmp(&b.index)));
        let vertices = match s.as_slice() {
            [] => Vec::new(),
            [a] => vec![*a],
            [a, b] if a.point == b.point => vec![*a],
            [a, b] => vec![*a, *b],
            [a, b, c] => {
                let o = cross(&a.point, &b.point, &c.point);
                if o > 0.0 {
                    vec![*a, *b, *c]
                } else if o < 0.0 {
                    vec![*a, *c, *b]
                } else if a.point == c.point {
                    vec![*a]
                } else {
                    vec![*a, *c]
                }
            }
            _ => monotone_chain(&s),
        };
        Self { vertices }
    }

    /// Merge two x-separated hulls via their upper and lower tangents.
    pub fn merge(left: &ConvexHull, right: &ConvexHull) -> Self {
        if left.vertices.len() < 3 || right.vertices.len() < 3 {
            return Self::union_direct(left, right);
        }
        match tangent_splice(&left.vertices, &right.vertices) {
            Some(vertices) => Self { vertices },
            None => {
                warn!(
                    left = left.vertices.len(),
                    right = right.vertices.len(),
                    "hull tangent walk did not settle; rebuilding directly"
                );
                Self::union_direct(left, right)
            }
        }
    }

    fn union_direct(left: &ConvexHull, right: &ConvexHull) -> Self {
        let all: Vec<Site> = left
            .vertices
            .iter()
            .chain(right.vertices.iter())
            .copied()
            .collect();
        Self::from_sites(&all)
    }

    pub fn vertices(&self) -> &[Site] {
        &self.vertices
    }

    pub fn points(&self) -> Vec<Point> {
        self.vertices.iter().map(|s| s.point).collect()
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Enclosed area (zero for fewer than three vertices).
    pub fn area(&self) -> f64 {
        let n = self.vertices.len();
        if n < 3 {
            return 0.0;
        }
        let o = self.vertices[0].point;
        (1..n - 1)
            .map(|k| cross(&o, &self.vertices[k].point, &self.vertices[k + 1].point))
            .sum::<f64>()
            * 0.5
    }

    /// Whether `p` lies inside or on the boundary (within `EPS`, scaled by magnitude).
    pub fn contains(&self, p: &Point) -> bool {
        let tol = EPS * p.coords.norm().max(1.0);
        match self.vertices.as_slice() {
            [] => false,
            [a] => (a.point - p).norm() <= tol,
            [a, b] => {
                let d = b.point - a.point;
                let len = d.norm();
                let off = cross(&a.point, &b.point, p).abs() / len;
                let t = (p - a.point).dot(&d) / (len * len);
                off <= tol && (-tol..=1.0 + tol).contains(&t)
            }
            vs => {
                let n = vs.len();
                (0..n).all(|k| {
                    let a = vs[k].point;
                    let b = vs[(k + 1) % n].point;
                    cross(&a, &b, p) / (b - a).norm() >= -tol
                })
            }
        }
    }

    /// Upper and lower bridges between sites with `index < split` and the rest.
    ///
    /// `None` if the hull does not have sites on both sides of `split`.
    pub fn bridges(&self, split: usize) -> Option<Bridges> {
        let vs = &self.vertices;
        let n = vs.len();
        if n < 2 {
            return None;
        }
        let mut upper = None;
        let mut lower = None;
        for k in 0..n {
            let a = vs[k];
            let b = vs[(k + 1) % n];
            match (a.index < split, b.index < split) {
                (false, true) => upper = Some((b, a)),
                (true, false) => lower = Some((a, b)),
                _ => {}
            }
        }
        Some(Bridges {
            upper: upper?,
            lower: lower?,
        })
    }
}

/// Upper/lower tangents and splice; `None` when the walk exceeds its step budget.
fn tangent_splice(l: &[Site], r: &[Site]) -> Option<Vec<Site>> {
    let nl = l.len();
    let nr = r.len();
    let cap = 2 * (nl + nr) + 4;
    let right_of_l = (0..nl).max_by(|&a, &b| cmp_xy(&l[a].point, &l[b].point))?;

    // Upper: advance L counter-clockwise and R clockwise while a vertex lies above.
    let (mut i, mut j) = (right_of_l, 0usize);
    let mut steps = 0usize;
    loop {
        let mut moved = false;
        while cross(&l[i].point, &r[j].point, &l[(i + 1) % nl].point) > 0.0 {
            i = (i + 1) % nl;
            moved = true;
            steps += 1;
            if steps > cap {
                return None;
            }
        }
        while cross(&l[i].point, &r[j].point, &r[(j + nr - 1) % nr].point) > 0.0 {
            j = (j + nr - 1) % nr;
            moved = true;
            steps += 1;
            if steps > cap {
                return None;
            }
        }
        if !moved {
            break;
        }
    }
    let (iu, ju) = (i, j);

    // Lower: mirror image.
    let (mut i, mut j) = (right_of_l, 0usize);
    loop {
        let mut moved = false;
        while cross(&l[i].point, &r[j].point, &l[(i + nl - 1) % nl].point) < 0.0 {
            i = (i + nl - 1) % nl;
            moved = true;
            steps += 1;
            if steps > cap {
                return None;
            }
        }
        while cross(&l[i].point, &r[j].point, &r[(j + 1) % nr].point) < 0.0 {
            j = (j + 1) % nr;
            moved = true;
            steps += 1;
            if steps > cap {
                return None;
            }
        }
        if !moved {
            break;
        }
    }
    let (il, jl) = (i, j);
    trace!(iu, ju, il, jl, "hull tangents");

    let mut out = Vec::with_capacity(nl + nr);
    let mut k = iu;
    loop {
        out.push(l[k]);
        if k == il {
            break;
        }
        k = (k + 1) % nl;
    }
    let mut k = jl;
    loop {
        out.push(r[k]);
        if k == ju {
            break;
        }
        k = (k + 1) % nr;
    }
    strip_collinear(&mut out);
    let start = (0..out.len()).min_by(|&a, &b| cmp_xy(&out[a].point, &out[b].point))?;
    out.rotate_left(start);
    Some(out)
}

/// Drop vertices that do not make a strict left turn.
fn strip_collinear(poly: &mut Vec<Site>) {
    let mut changed = true;
    while changed && poly.len() >= 3 {
        changed = false;
        let n = poly.len();
        for k in 0..n {
            let prev = poly[(k + n - 1) % n].point;
            let next = poly[(k + 1) % n].point;
            if cross(&prev, &poly[k].point, &next) <= 0.0 {
                poly.remove(k);
                changed = true;
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom2::sites_of;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn indices(h: &ConvexHull) -> Vec<usize> {
        h.vertices().iter().map(|s| s.index).collect()
    }

    #[test]
    fn base_triangle_is_ccw() {
        let sites = sites_of(&[p(0.0, 0.0), p(0.0, 1.0), p(1.0, 0.0)], 0);
        let h = ConvexHull::base(&sites);
        assert_eq!(indices(&h), vec![0, 2, 1]);
        assert!((h.area() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn base_degenerate_cases() {
        let one = ConvexHull::base(&sites_of(&[p(3.0, 4.0)], 7));
        assert_eq!(indices(&one), vec![7]);
        assert!(one.contains(&p(3.0, 4.0)));
        let line = ConvexHull::base(&sites_of(&[p(0.0, 0.0), p(1.0, 1.0), p(2.0, 2.0)], 0));
        assert_eq!(indices(&line), vec![0, 2]);
        assert!(line.contains(&p(1.5, 1.5)));
        assert!(!line.contains(&p(1.5, 1.0)));
        assert_eq!(line.area(), 0.0);
    }

    #[test]
    fn merge_square_halves() {
        // Left: (0,0) (0.1,2) (1,1); right: (2,1) (3,0) (3.1,2)
        let pts = [
            p(0.0, 0.0),
            p(0.1, 2.0),
            p(1.0, 1.0),
            p(2.0, 1.0),
            p(3.0, 0.0),
            p(3.1, 2.0),
        ];
        let sites = sites_of(&pts, 0);
        let l = ConvexHull::base(&sites[..3]);
        let r = ConvexHull::base(&sites[3..]);
        let m = ConvexHull::merge(&l, &r);
        assert_eq!(indices(&m), vec![0, 4, 5, 1]);
        let b = m.bridges(3).unwrap();
        assert_eq!((b.upper.0.index, b.upper.1.index), (1, 5));
        assert_eq!((b.lower.0.index, b.lower.1.index), (0, 4));
        for q in &pts {
            assert!(m.contains(q));
        }
    }

    #[test]
    fn merge_matches_direct_construction() {
        let mut rng = StdRng::seed_from_u64(11);
        for n in [6usize, 9, 17, 40] {
            let mut pts: Vec<Point> = (0..n)
                .map(|_| p(rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0)))
                .collect();
            pts.sort_by(cmp_xy);
            let sites = sites_of(&pts, 0);
            let mid = n / 2;
            let l = ConvexHull::from_sites(&sites[..mid]);
            let r = ConvexHull::from_sites(&sites[mid..]);
            let merged = ConvexHull::merge(&l, &r);
            let direct = ConvexHull::from_sites(&sites);
            assert_eq!(indices(&merged), indices(&direct), "n = {n}");
        }
    }

    #[test]
    fn merge_with_collinear_child_falls_back() {
        let pts = [p(0.0, 0.0), p(1.0, 0.0), p(2.0, 1.0), p(3.0, -1.0), p(4.0, 0.5)];
        let sites = sites_of(&pts, 0);
        let l = ConvexHull::base(&sites[..2]);
        let r = ConvexHull::base(&sites[2..]);
        let m = ConvexHull::merge(&l, &r);
        assert_eq!(indices(&m), vec![0, 3, 4, 2]);
        assert!(m.bridges(2).is_some());
    }
}
