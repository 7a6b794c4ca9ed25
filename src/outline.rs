//! Point sampling along polygon outlines.
//!
//! A ring is indexed by cumulative arc length. Points are located by binary
//! search over that index and can be pushed sideways off the segment they
//! fall on (positive offsets to the left of the direction of travel).

use crate::basics::PointD;
use crate::decode::Decoder;
use crate::error::{ConvertError, Result};
use crate::geometry::{LinearRing, Polygon};
use crate::math::{calc_distance, calc_segment_point};
use crate::shape::Shape;

/// Vertex sequence with the running distance at each vertex.
#[derive(Debug, Clone)]
pub struct LengthIndex<'a> {
    points: &'a [PointD],
    dist: Vec<f64>,
}

impl<'a> LengthIndex<'a> {
    pub fn new(points: &'a [PointD]) -> Self {
        let mut dist = Vec::with_capacity(points.len());
        let mut total = 0.0;
        for (i, p) in points.iter().enumerate() {
            if i > 0 {
                let q = points[i - 1];
                total += calc_distance(q.x, q.y, p.x, p.y);
            }
            dist.push(total);
        }
        Self { points, dist }
    }

    /// Total length of the line.
    pub fn length(&self) -> f64 {
        self.dist.last().copied().unwrap_or(0.0)
    }

    /// Point `index` units along the line, offset perpendicular to it.
    ///
    /// Negative indices count back from the end. Indices past either end are
    /// clamped. Returns `None` for an empty line.
    pub fn extract_point(&self, index: f64, offset: f64) -> Option<PointD> {
        let first = *self.points.first()?;
        if self.points.len() < 2 {
            return Some(first);
        }
        let length = self.length();
        let index = if index < 0.0 { length + index } else { index };
        let index = index.clamp(0.0, length);

        // Last vertex whose distance does not exceed the index.
        let mut i = 0usize;
        let mut j = self.points.len() - 1;
        while j - i > 1 {
            let k = (i + j) >> 1;
            if index < self.dist[k] {
                j = k;
            } else {
                i = k;
            }
        }
        // Skip zero-length segments so the offset has a direction.
        while i + 1 < self.points.len() - 1 && self.dist[i + 1] - self.dist[i] <= 0.0 {
            i += 1;
        }

        let seg = self.dist[i + 1] - self.dist[i];
        let t = if seg > 0.0 {
            (index - self.dist[i]) / seg
        } else {
            0.0
        };
        let (a, b) = (self.points[i], self.points[i + 1]);
        Some(calc_segment_point(a.x, a.y, b.x, b.y, t, offset))
    }

    /// `count` points at equal spacing starting from the first vertex.
    pub fn equidistant(&self, count: usize, offset: f64) -> Vec<PointD> {
        let length = self.length();
        (0..count)
            .filter_map(|i| self.extract_point(i as f64 / count as f64 * length, offset))
            .collect()
    }
}

/// Polygon of a shape for outline sampling; fails when it has no exterior.
fn outline_polygon(shape: &Shape) -> Result<Polygon> {
    let polygon = Decoder::new().decode_polygon(shape)?;
    if polygon.is_empty() {
        return Err(ConvertError::EmptyGeometry);
    }
    Ok(polygon)
}

fn rings(polygon: &Polygon) -> impl Iterator<Item = &LinearRing> {
    std::iter::once(polygon.exterior()).chain(polygon.interiors())
}

/// Point at `fraction` of the way around the shape's exterior.
///
/// The fraction wraps modulo 1; negative values run the other direction
/// from the start vertex.
pub fn point_on_outline(shape: &Shape, fraction: f64, offset: f64) -> Result<PointD> {
    let polygon = outline_polygon(shape)?;
    let index = LengthIndex::new(polygon.exterior().coords());
    index
        .extract_point((fraction % 1.0) * index.length(), offset)
        .ok_or(ConvertError::EmptyGeometry)
}

/// `points` equally spaced samples per ring, exterior first then each hole.
pub fn equidistant_outline(shape: &Shape, points: usize, offset: f64) -> Result<Vec<PointD>> {
    let polygon = outline_polygon(shape)?;
    Ok(rings(&polygon)
        .flat_map(|ring| LengthIndex::new(ring.coords()).equidistant(points, offset))
        .collect())
}

/// Samples spaced roughly `spacing` apart along every ring.
///
/// Each ring gets `round(length / spacing)` evenly spaced points, so the
/// actual spacing is the nearest value that divides the ring evenly.
pub fn equidistant_outline_by_distance(
    shape: &Shape,
    spacing: f64,
    offset: f64,
) -> Result<Vec<PointD>> {
    let polygon = outline_polygon(shape)?;
    let length = polygon.exterior().length();
    if spacing > length || spacing <= 0.0 {
        return Err(ConvertError::InterPointTooLarge {
            distance: spacing,
            length,
        });
    }
    Ok(rings(&polygon)
        .flat_map(|ring| {
            let index = LengthIndex::new(ring.coords());
            let count = (index.length() / spacing).round() as usize;
            index.equidistant(count, offset)
        })
        .collect())
}

// ============================================================================
// Tests
// ============================================================================
