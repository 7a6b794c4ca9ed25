//! Geometric math utilities.
//!
//! Distances, signed ring area, ring centroid, point-in-ring tests, and
//! interpolation along segments.

use crate::basics::PointD;

// ============================================================================
// Constants
// ============================================================================

/// Coinciding points maximal distance (epsilon).
pub const VERTEX_DIST_EPSILON: f64 = 1e-14;

// ============================================================================
// Distance calculations
// ============================================================================

/// Euclidean distance between two points.
#[inline]
pub fn calc_distance(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    let dx = x2 - x1;
    let dy = y2 - y1;
    (dx * dx + dy * dy).sqrt()
}

/// Total length of the polyline through `points`.
pub fn calc_polyline_length(points: &[PointD]) -> f64 {
    points
        .windows(2)
        .map(|w| calc_distance(w[0].x, w[0].y, w[1].x, w[1].y))
        .sum()
}

// ============================================================================
// Area and centroid
// ============================================================================

/// Signed area of a polygon defined by a slice of points.
///
/// Positive for counter-clockwise rings (y up). A repeated closing point
/// contributes nothing, so open and closed rings give the same result.
pub fn calc_polygon_area(vertices: &[PointD]) -> f64 {
    if vertices.is_empty() {
        return 0.0;
    }
    let mut sum = 0.0;
    let mut x = vertices[0].x;
    let mut y = vertices[0].y;
    let xs = x;
    let ys = y;

    for v in &vertices[1..] {
        sum += x * v.y - y * v.x;
        x = v.x;
        y = v.y;
    }
    (sum + x * ys - y * xs) * 0.5
}

/// Area-weighted centroid of a ring, returned as `(cx * area, cy * area, area)`
/// so several rings can be accumulated before dividing.
pub fn calc_ring_moments(vertices: &[PointD]) -> (f64, f64, f64) {
    let n = vertices.len();
    if n < 3 {
        return (0.0, 0.0, 0.0);
    }
    let mut cx = 0.0;
    let mut cy = 0.0;
    let mut area = 0.0;
    for i in 0..n {
        let p = vertices[i];
        let q = vertices[(i + 1) % n];
        let cross = p.x * q.y - q.x * p.y;
        area += cross;
        cx += (p.x + q.x) * cross;
        cy += (p.y + q.y) * cross;
    }
    (cx / 6.0, cy / 6.0, area * 0.5)
}

/// Even-odd test of point (x, y) against a ring.
pub fn point_in_ring(vertices: &[PointD], x: f64, y: f64) -> bool {
    let n = vertices.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let pi = vertices[i];
        let pj = vertices[j];
        if (pi.y > y) != (pj.y > y) && x < (pj.x - pi.x) * (y - pi.y) / (pj.y - pi.y) + pi.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

// ============================================================================
// Interpolation
// ============================================================================

/// Point at fraction `t` of segment (x1,y1)→(x2,y2), displaced perpendicular
/// to the segment by `offset` (positive to the left).
#[inline]
pub fn calc_segment_point(x1: f64, y1: f64, x2: f64, y2: f64, t: f64, offset: f64) -> PointD {
    let dx = x2 - x1;
    let dy = y2 - y1;
    let mut x = x1 + t * dx;
    let mut y = y1 + t * dy;
    if offset != 0.0 {
        let len = (dx * dx + dy * dy).sqrt();
        if len > VERTEX_DIST_EPSILON {
            x -= dy / len * offset;
            y += dx / len * offset;
        }
    }
    PointD::new(x, y)
}

// ============================================================================
// Tests
// ============================================================================
