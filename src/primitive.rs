//! Primitive synthesizer.
//!
//! Expands parametric primitives into polygon rings. Curved primitives use a
//! fixed point count regardless of size.

use crate::arc::Arc;
use crate::basics::{PointD, PI};
use crate::ellipse::Ellipse;
use crate::error::{ConvertError, Result};
use crate::geometry::{LinearRing, Polygon};
use crate::shape::{Primitive, PrimitiveKind};

/// Number of parameters each polygonal kind reads.
fn required_params(kind: PrimitiveKind) -> usize {
    match kind {
        PrimitiveKind::Ellipse | PrimitiveKind::Rect => 4,
        PrimitiveKind::Triangle | PrimitiveKind::Arc => 6,
        PrimitiveKind::Quad => 8,
        PrimitiveKind::Point => 2,
        PrimitiveKind::Line => 4,
        PrimitiveKind::Box | PrimitiveKind::Sphere => 0,
    }
}

/// Build the polygon equivalent of `primitive`.
///
/// `num_points` is the point count of curved outlines (ellipse, arc) and the
/// density of rectangle sides. Non-polygonal and 3D kinds log a warning and
/// yield the empty polygon.
pub fn synthesize(primitive: &Primitive, num_points: usize) -> Result<Polygon> {
    let kind = primitive.kind;
    match kind {
        PrimitiveKind::Line | PrimitiveKind::Point => {
            log::warn!("non-polygon primitives are not supported ({})", kind.name());
            return Ok(Polygon::empty());
        }
        PrimitiveKind::Box | PrimitiveKind::Sphere => {
            log::warn!("3D primitives are not supported ({})", kind.name());
            return Ok(Polygon::empty());
        }
        _ => {}
    }

    let expected = required_params(kind);
    if primitive.params.len() < expected {
        return Err(ConvertError::MissingParameters {
            kind: kind.name(),
            expected,
            actual: primitive.params.len(),
        });
    }
    let p = &primitive.params;
    let num = u32::try_from(num_points).unwrap_or(u32::MAX);

    let ring = match kind {
        PrimitiveKind::Ellipse => Ellipse::from_bounds(p[0], p[1], p[2], p[3], num).ring(),
        PrimitiveKind::Rect => rect_ring(p[0], p[1], p[2], p[3], num_points),
        PrimitiveKind::Triangle => corner_ring(&p[..6]),
        PrimitiveKind::Quad => corner_ring(&p[..8]),
        PrimitiveKind::Arc => Arc::new(
            p[0],
            p[1],
            p[2] / 2.0,
            p[3] / 2.0,
            -PI / 2.0 + p[4],
            p[5],
            num,
        )
        .sector(),
        PrimitiveKind::Line | PrimitiveKind::Point | PrimitiveKind::Box | PrimitiveKind::Sphere => {
            return Ok(Polygon::empty());
        }
    };
    Ok(Polygon::new(LinearRing::new(ring)?, Vec::new()))
}

/// Ring through flat `[x0, y0, x1, y1, ...]` corners, closed by repeating the first.
fn corner_ring(coords: &[f64]) -> Vec<PointD> {
    let mut pts: Vec<PointD> = coords
        .chunks_exact(2)
        .map(|c| PointD::new(c[0], c[1]))
        .collect();
    if let Some(first) = pts.first().copied() {
        pts.push(first);
    }
    pts
}

/// Rectangle ring centred on (cx, cy) with `num_points / 4` points per side,
/// starting at the minimum corner and running counter-clockwise.
fn rect_ring(cx: f64, cy: f64, width: f64, height: f64, num_points: usize) -> Vec<PointD> {
    let n_side = (num_points / 4).max(1);
    let (x1, y1) = (cx - width / 2.0, cy - height / 2.0);
    let (x2, y2) = (cx + width / 2.0, cy + height / 2.0);
    let dx = width / n_side as f64;
    let dy = height / n_side as f64;

    let mut pts = Vec::with_capacity(4 * n_side + 1);
    for i in 0..n_side {
        pts.push(PointD::new(x1 + i as f64 * dx, y1));
    }
    for i in 0..n_side {
        pts.push(PointD::new(x2, y1 + i as f64 * dy));
    }
    for i in 0..n_side {
        pts.push(PointD::new(x2 - i as f64 * dx, y2));
    }
    for i in 0..n_side {
        pts.push(PointD::new(x1, y2 - i as f64 * dy));
    }
    pts.push(pts[0]);
    pts
}

// ============================================================================
// Tests
// ============================================================================
