//! Basic 2D types and tolerances shared by every algorithm.
//!
//! - `Point`/`Vector`: nalgebra aliases; `p - q` is a `Vector`, `p + v` a `Point`.
//! - `Site`: a point tagged with its index in the preprocessed global sequence.
//! - `EPS`: tolerance for geometric comparisons (scale-agnostic, O(1) inputs).
//!
//! Code cross-refs: `line::{Line, Segment}`, `util::{cross, preprocess_points}`

use std::cmp::Ordering;

use nalgebra::{Point2, Vector2};

/// Planar point.
pub type Point = Point2<f64>;
/// Displacement between two points.
pub type Vector = Vector2<f64>;

/// Numerical tolerance used for geometric predicates.
pub const EPS: f64 = 1e-9;

/// Step used to separate points sharing an x coordinate (scaled by `max(1, |x|)`).
pub const TIE_BREAK_STEP: f64 = 5.0 * EPS;

/// A point together with its index in the preprocessed point sequence.
///
/// Indices are global: every node of the divide-and-conquer tree covers a
/// contiguous index range, so `index` also orders sites by (x, y).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Site {
    pub index: usize,
    pub point: Point,
}

impl Site {
    #[inline]
    pub fn new(index: usize, point: Point) -> Self {
        Self { index, point }
    }
}

/// Lexicographic (x, then y) ordering; NaNs compare via `total_cmp`.
#[inline]
pub fn cmp_xy(a: &Point, b: &Point) -> Ordering {
    a.x.total_cmp(&b.x).then_with(|| a.y.total_cmp(&b.y))
}

/// CCW rotation by 90°: `(x, y) ↦ (-y, x)`.
#[inline]
pub fn perp(v: Vector) -> Vector {
    Vector::new(-v.y, v.x)
}

/// 2D cross product (z-component of `a × b`).
#[inline]
pub fn cross2(a: Vector, b: Vector) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Orientation of `c` relative to the directed line `a → b`.
/// Positive when `a, b, c` turn counter-clockwise.
#[inline]
pub fn cross(a: &Point, b: &Point, c: &Point) -> f64 {
    cross2(b - a, c - a)
}
