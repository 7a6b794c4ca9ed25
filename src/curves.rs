//! Bezier curve sampling (quadratic and cubic).
//!
//! Curves are flattened by uniform parameter sampling: `resolution` points at
//! `t = j / resolution` for `j = 0..resolution`. The end point (`t = 1`) is
//! never produced, since it is the next on-curve vertex of the path.

use crate::basics::PointD;

/// Point on the quadratic Bezier `(p0, p1, p2)` at parameter `t`.
#[inline]
pub fn quadratic_point(p0: PointD, p1: PointD, p2: PointD, t: f64) -> PointD {
    let mt = 1.0 - t;
    let a = mt * mt;
    let b = 2.0 * mt * t;
    let c = t * t;
    PointD::new(
        a * p0.x + b * p1.x + c * p2.x,
        a * p0.y + b * p1.y + c * p2.y,
    )
}

/// Point on the cubic Bezier `(p0, p1, p2, p3)` at parameter `t`.
#[inline]
pub fn cubic_point(p0: PointD, p1: PointD, p2: PointD, p3: PointD, t: f64) -> PointD {
    let mt = 1.0 - t;
    let a = mt * mt * mt;
    let b = 3.0 * mt * mt * t;
    let c = 3.0 * mt * t * t;
    let d = t * t * t;
    PointD::new(
        a * p0.x + b * p1.x + c * p2.x + d * p3.x,
        a * p0.y + b * p1.y + c * p2.y + d * p3.y,
    )
}

/// Parameter values `j / resolution` for `j = 0..resolution`.
fn sample_params(resolution: usize) -> impl Iterator<Item = f64> {
    (0..resolution).map(move |j| j as f64 / resolution as f64)
}

/// Flatten a quadratic Bezier into `resolution` points, start included.
pub fn sample_quadratic(p0: PointD, p1: PointD, p2: PointD, resolution: usize) -> Vec<PointD> {
    sample_params(resolution)
        .map(|t| quadratic_point(p0, p1, p2, t))
        .collect()
}

/// Flatten a cubic Bezier into `resolution` points, start included.
pub fn sample_cubic(
    p0: PointD,
    p1: PointD,
    p2: PointD,
    p3: PointD,
    resolution: usize,
) -> Vec<PointD> {
    sample_params(resolution)
        .map(|t| cubic_point(p0, p1, p2, p3, t))
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
