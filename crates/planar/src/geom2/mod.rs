//! 2D geometry primitives (points, vectors, lines, segments, bisectors).
//!
//! Purpose
//! - Provide the small, eps-aware toolbox shared by the hull and Voronoi
//!   algorithms, plus the one-time point preprocessing the divide-and-conquer
//!   split relies on (sorted by (x, y), strictly increasing x).
//!
//! Assumptions and conventions
//! - Orientation: `cross(a, b, c) > 0` iff `a → b → c` turns counter-clockwise.
//! - Bisectors are oriented: `bisector(a, b)` keeps `a` on its left.
//! - Equal-x points are separated by a tiny leftward shift (`TIE_BREAK_STEP`).
//!   This perturbs input geometry; exact predicates would be the sound
//!   replacement if drift ever matters.
//!
//! Code cross-refs: `crate::hull`, `crate::voronoi`, `crate::dac::DacTree::build`

mod line;
pub mod rand;
mod types;
mod util;

pub use line::{bisector, circumcenter, Line, Segment};
pub use types::{cmp_xy, cross, cross2, perp, Point, Site, Vector, EPS, TIE_BREAK_STEP};
pub use util::{monotone_chain, preprocess_points, sites_of};

#[cfg(test)]
mod tests;
