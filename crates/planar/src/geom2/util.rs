use tracing::debug;

use super::types::{cmp_xy, cross, Point, Site, TIE_BREAK_STEP};
use crate::error::{DacError, DacResult};

/// Sort points by (x, y) and separate points that share an x coordinate.
///
/// A run of `k` points with equal x (sorted by y) keeps its topmost point and
/// shifts the `j`-th point left by `(k - 1 - j)` steps of
/// `TIE_BREAK_STEP · max(1, |x|)`. This is the fixpoint of repeatedly nudging
/// the earlier point of every equal-x adjacent pair. The pass repeats until x
/// is strictly increasing, since a shifted point may land on a neighbour.
///
/// Errors: `EmptyInput` for no points, `NonFinitePoint` for NaN/∞ coordinates.
pub fn preprocess_points(mut points: Vec<Point>) -> DacResult<Vec<Point>> {
    if points.is_empty() {
        return Err(DacError::EmptyInput);
    }
    if let Some(index) = points
        .iter()
        .position(|p| !(p.x.is_finite() && p.y.is_finite()))
    {
        return Err(DacError::NonFinitePoint { index });
    }
    let mut passes = 0usize;
    loop {
        points.sort_by(cmp_xy);
        if !separate_equal_x(&mut points) {
            break;
        }
        passes += 1;
        // Each pass strictly separates the runs it sees; new collisions need
        // an exact coordinate coincidence, so this bound is never reached in practice.
        if passes > points.len() {
            break;
        }
    }
    debug!(points = points.len(), passes, "preprocessed point set");
    Ok(points)
}

/// One tie-break pass over sorted points; returns whether anything moved.
fn separate_equal_x(points: &mut [Point]) -> bool {
    let mut moved = false;
    let mut start = 0usize;
    while start < points.len() {
        let x = points[start].x;
        let mut end = start + 1;
        while end < points.len() && points[end].x == x {
            end += 1;
        }
        let run = end - start;
        if run > 1 {
            let step = TIE_BREAK_STEP * x.abs().max(1.0);
            for (j, p) in points[start..end].iter_mut().enumerate() {
                p.x = x - ((run - 1 - j) as f64) * step;
            }
            moved = true;
        }
        start = end;
    }
    moved
}

/// Wrap a preprocessed point slice into sites with global indices.
pub fn sites_of(points: &[Point], offset: usize) -> Vec<Site> {
    points
        .iter()
        .enumerate()
        .map(|(k, p)| Site::new(offset + k, *p))
        .collect()
}

/// Andrew's monotone chain convex hull (CCW, starts at the (x, y)-smallest site).
///
/// Collinear vertices are dropped; exact duplicates collapse to one vertex.
/// Fewer than three non-collinear sites yield one or two vertices.
pub fn monotone_chain(sites: &[Site]) -> Vec<Site> {
    let mut pts: Vec<Site> = sites.to_vec();
    pts.sort_by(|a, b| cmp_xy(&a.point, &b.point).then(a.index.cmp(&b.index)));
    pts.dedup_by(|a, b| a.point == b.point);
    if pts.len() < 3 {
        return pts;
    }
    let mut lower: Vec<Site> = Vec::with_capacity(pts.len());
    for p in &pts {
        while lower.len() >= 2
            && cross(&lower[lower.len() - 2].point, &lower[lower.len() - 1].point, &p.point) <= 0.0
        {
            lower.pop();
        }
        lower.push(*p);
    }
    let mut upper: Vec<Site> = Vec::with_capacity(pts.len());
    for p in pts.iter().rev() {
        while upper.len() >= 2
            && cross(&upper[upper.len() - 2].point, &upper[upper.len() - 1].point, &p.point) <= 0.0
        {
            upper.pop();
        }
        upper.push(*p);
    }
    lower.pop();
    upper.pop();
    let mut hull = lower;
    hull.extend(upper);
    hull
}
