//! Lines, segments and perpendicular bisectors.
//!
//! Convention: a `Line` has a unit direction. The bisector of a segment
//! `first → second` runs along `perp(second - first)`, so `first` lies on its
//! left. Voronoi edges reuse the same convention: the half-edge that has site
//! `a` on its left travels along the bisector of `Segment::new(a, b)`.

use super::types::{cross2, perp, Point, Vector, EPS};

/// Infinite line `origin + t · dir` with `‖dir‖ = 1`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
    pub origin: Point,
    pub dir: Vector,
}

impl Line {
    /// Line through `origin` along `dir`; `None` if `dir` is (numerically) zero.
    pub fn new(origin: Point, dir: Vector) -> Option<Self> {
        let norm = dir.norm();
        if !norm.is_finite() || norm <= 0.0 {
            return None;
        }
        Some(Self {
            origin,
            dir: dir / norm,
        })
    }

    #[inline]
    pub fn through(a: Point, b: Point) -> Option<Self> {
        Self::new(a, b - a)
    }

    #[inline]
    pub fn at(&self, t: f64) -> Point {
        self.origin + self.dir * t
    }

    /// Parameter of the orthogonal projection of `p` onto the line.
    #[inline]
    pub fn param_of(&self, p: &Point) -> f64 {
        (p - self.origin).dot(&self.dir)
    }

    /// Signed distance of `p`; positive on the left of `dir`.
    #[inline]
    pub fn side(&self, p: &Point) -> f64 {
        cross2(self.dir, p - self.origin)
    }

    /// Parameters `(t, u)` with `self.at(t) == other.at(u)`; `None` when parallel.
    pub fn intersect(&self, other: &Line) -> Option<(f64, f64)> {
        let den = cross2(self.dir, other.dir);
        if den.abs() <= EPS * EPS {
            return None;
        }
        let w = other.origin - self.origin;
        Some((cross2(w, other.dir) / den, cross2(w, self.dir) / den))
    }
}

/// Segment between two shared points (points are `Copy`; no ownership implied).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub first: Point,
    pub second: Point,
}

impl Segment {
    #[inline]
    pub fn new(first: Point, second: Point) -> Self {
        Self { first, second }
    }

    #[inline]
    pub fn direction(&self) -> Vector {
        self.second - self.first
    }

    #[inline]
    pub fn midpoint(&self) -> Point {
        nalgebra::center(&self.first, &self.second)
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.direction().norm()
    }

    /// Perpendicular bisector through the midpoint, `first` on its left.
    ///
    /// Returns `None` for coincident endpoints.
    pub fn perpendicular_bisector(&self) -> Option<Line> {
        Line::new(self.midpoint(), perp(self.direction()))
    }
}

/// Bisector of two sites, oriented so that `left` lies on its left.
#[inline]
pub fn bisector(left: &Point, right: &Point) -> Option<Line> {
    Segment::new(*left, *right).perpendicular_bisector()
}

/// Center of the circle through `a`, `b`, `c`; `None` for collinear input.
pub fn circumcenter(a: &Point, b: &Point, c: &Point) -> Option<Point> {
    let ab = b - a;
    let ac = c - a;
    let d = 2.0 * cross2(ab, ac);
    if d.abs() <= EPS * EPS {
        return None;
    }
    let ab2 = ab.norm_squared();
    let ac2 = ac.norm_squared();
    let ux = (ac.y * ab2 - ab.y * ac2) / d;
    let uy = (ab.x * ac2 - ac.x * ab2) / d;
    Some(Point::new(a.x + ux, a.y + uy))
}
