//! Shape tree helpers: traversal, bulk styling and measurements taken on the
//! decoded geometry.

use crate::basics::{PointD, RectD};
use crate::decode::Decoder;
use crate::encode::Encoder;
use crate::error::{ConvertError, Result};
use crate::geometry::Geometry;
use crate::math::calc_distance;
use crate::shape::{Shape, ShapeBody};
use crate::style::{Rgba8, Style};

// ============================================================================
// Traversal
// ============================================================================

/// Every node of the tree in depth-first pre-order, the root included.
pub fn flatten_children(shape: &Shape) -> Vec<&Shape> {
    let mut out = Vec::new();
    let mut stack = vec![shape];
    while let Some(node) = stack.pop() {
        out.push(node);
        stack.extend(node.children().iter().rev());
    }
    out
}

/// Apply `f` to the style of every node, creating a default style where
/// a node has none.
fn for_each_style(shape: &mut Shape, f: impl Fn(&mut Style)) {
    let mut stack = vec![shape];
    while let Some(node) = stack.pop() {
        f(node.style_mut().get_or_insert_with(Style::default));
        if let ShapeBody::Group(children) = node.body_mut() {
            stack.extend(children.iter_mut());
        }
    }
}

// ============================================================================
// Styling
// ============================================================================

/// Fill every node with `color` and turn strokes off.
pub fn set_all_fill_color(shape: &mut Shape, color: Rgba8) {
    for_each_style(shape, |style| {
        style.fill = Some(color);
        style.stroke = None;
    });
}

/// Stroke every node with `color` at `weight`.
pub fn set_all_stroke_color(shape: &mut Shape, color: Rgba8, weight: f64) {
    for_each_style(shape, |style| {
        style.stroke = Some(color);
        style.stroke_weight = weight;
    });
}

pub fn disable_all_fill(shape: &mut Shape) {
    for_each_style(shape, |style| style.fill = None);
}

// ============================================================================
// Measurements
// ============================================================================

/// Enclosed area of the shape, holes subtracted.
pub fn area(shape: &Shape) -> Result<f64> {
    Ok(Decoder::new().decode(shape)?.area())
}

pub fn centroid(shape: &Shape) -> Result<PointD> {
    Decoder::new()
        .decode(shape)?
        .centroid()
        .ok_or(ConvertError::EmptyGeometry)
}

/// Bounding box as (x1, y1, x2, y2).
pub fn bound_coords(shape: &Shape) -> Result<RectD> {
    Decoder::new()
        .decode(shape)?
        .envelope()
        .ok_or(ConvertError::EmptyGeometry)
}

/// Bounding box as `[x, y, width, height]`.
pub fn bounds(shape: &Shape) -> Result<[f64; 4]> {
    let r = bound_coords(shape)?;
    Ok([r.x1, r.y1, r.width(), r.height()])
}

/// Vertices of the decoded geometry, curves tessellated and rings closed.
pub fn vertices(shape: &Shape) -> Result<Vec<PointD>> {
    Ok(Decoder::new().decode(shape)?.coordinates())
}

// ============================================================================
// Spatial queries
// ============================================================================

/// Whether `point` lies inside the shape's area. Points in holes are outside.
pub fn contains_point(shape: &Shape, point: PointD) -> Result<bool> {
    Ok(Decoder::new().decode(shape)?.contains_point(point))
}

/// Decoded vertex nearest to `point`; the first one wins a tie.
pub fn closest_vertex_to_point(shape: &Shape, point: PointD) -> Result<PointD> {
    let mut best: Option<(PointD, f64)> = None;
    for v in vertices(shape)? {
        let d = calc_distance(v.x, v.y, point.x, point.y);
        if best.map_or(true, |(_, bd)| d < bd) {
            best = Some((v, d));
        }
    }
    best.map(|(v, _)| v).ok_or(ConvertError::EmptyGeometry)
}

/// Outline of the shape: every exterior and hole ring as a closed line,
/// written back as a group of paths.
pub fn boundary(shape: &Shape) -> Result<Shape> {
    let decoded = Decoder::new().decode(shape)?;
    let mut lines = Vec::new();
    for poly in decoded.polygons() {
        lines.push(poly.exterior().clone().into_line_string());
        lines.extend(poly.interiors().iter().cloned().map(|r| r.into_line_string()));
    }
    lines.retain(|l| !l.is_empty());
    Encoder::new().encode(Some(&Geometry::MultiLineString(lines)))
}

// ============================================================================
// Tests
// ============================================================================
