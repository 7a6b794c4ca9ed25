//! Geometry → shape encoder.
//!
//! Collections become GROUP shapes with one child per member, lines and
//! polygons become PATH shapes. Closed rings are written without their
//! duplicated closing coordinate and marked closed instead.

use crate::basics::PointD;
use crate::decode::DEFAULT_MAX_DEPTH;
use crate::error::{ConvertError, Result};
use crate::geometry::{Geometry, Polygon};
use crate::shape::{PathData, Shape};
use crate::style::Style;

/// Encoder settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EncoderConfig {
    /// Style assigned to every produced shape; `None` leaves shapes unstyled.
    pub style: Option<Style>,
    pub max_depth: usize,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            style: Some(Style::highlight()),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Geometry to shape converter.
#[derive(Debug, Clone, Default)]
pub struct Encoder {
    config: EncoderConfig,
}

/// Collection being encoded: members still to visit and children built so far.
struct Frame<'a> {
    members: std::slice::Iter<'a, Geometry>,
    children: Vec<Shape>,
}

impl Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EncoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Convert a geometry to a shape.
    ///
    /// `None` yields the empty placeholder shape. Nested geometry
    /// collections are walked with an explicit stack; nesting deeper than
    /// `max_depth` is reported as [`ConvertError::DepthExceeded`].
    pub fn encode(&self, geometry: Option<&Geometry>) -> Result<Shape> {
        let Some(geometry) = geometry else {
            return Ok(self.styled(Shape::empty()));
        };
        let members = match geometry {
            Geometry::GeometryCollection(members) => members,
            other => return Ok(self.encode_single(other)),
        };
        if self.config.max_depth == 0 {
            return Err(ConvertError::DepthExceeded { limit: 0 });
        }

        let mut stack = vec![Frame {
            members: members.iter(),
            children: Vec::with_capacity(members.len()),
        }];
        loop {
            let Some(frame) = stack.last_mut() else {
                return Ok(self.styled(Shape::empty()));
            };
            match frame.members.next() {
                Some(Geometry::GeometryCollection(inner)) => {
                    if stack.len() >= self.config.max_depth {
                        return Err(ConvertError::DepthExceeded {
                            limit: self.config.max_depth,
                        });
                    }
                    stack.push(Frame {
                        members: inner.iter(),
                        children: Vec::with_capacity(inner.len()),
                    });
                }
                Some(member) => {
                    let child = self.encode_single(member);
                    frame.children.push(child);
                }
                None => {
                    let done = stack.pop().map(|f| f.children).unwrap_or_default();
                    let group = self.styled(Shape::group(done));
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(group),
                        None => return Ok(group),
                    }
                }
            }
        }
    }

    /// Encode any geometry that is not a geometry collection.
    fn encode_single(&self, geometry: &Geometry) -> Shape {
        let shape = match geometry {
            Geometry::LineString(line) => Shape::path(line_path(line.coords())),
            Geometry::LinearRing(ring) => Shape::path(line_path(ring.coords())),
            Geometry::Polygon(poly) => Shape::path(polygon_path(poly)),
            Geometry::MultiPolygon(polys) => Shape::group(
                polys
                    .iter()
                    .map(|p| self.styled(Shape::path(polygon_path(p))))
                    .collect(),
            ),
            Geometry::MultiLineString(lines) => Shape::group(
                lines
                    .iter()
                    .map(|l| self.styled(Shape::path(line_path(l.coords()))))
                    .collect(),
            ),
            Geometry::Point(_) | Geometry::MultiPoint(_) => {
                log::warn!(
                    "geometry type {} is not supported",
                    geometry.geometry_type().name()
                );
                Shape::empty()
            }
            Geometry::GeometryCollection(_) => {
                log::warn!("nested collection reached the single-geometry encoder");
                Shape::empty()
            }
        };
        self.styled(shape)
    }

    fn styled(&self, mut shape: Shape) -> Shape {
        if let Some(style) = self.config.style {
            shape.set_style(Some(style));
        }
        shape
    }
}

/// Coordinates to write for a ring, and whether the ring was closed.
fn open_ring(coords: &[PointD]) -> (&[PointD], bool) {
    match coords {
        [first, .., last] if first == last => (&coords[..coords.len() - 1], true),
        _ => (coords, false),
    }
}

fn line_path(coords: &[PointD]) -> PathData {
    let (pts, closed) = open_ring(coords);
    let mut path = PathData::new();
    path.begin_shape();
    for p in pts {
        path.vertex(p.x, p.y);
    }
    path.end_shape(closed);
    path
}

/// One PATH with the exterior first and every hole in its own contour.
fn polygon_path(polygon: &Polygon) -> PathData {
    let mut path = PathData::new();
    path.begin_shape();
    for p in open_ring(polygon.exterior().coords()).0 {
        path.vertex(p.x, p.y);
    }
    for hole in polygon.interiors() {
        path.begin_contour();
        for p in open_ring(hole.coords()).0 {
            path.vertex(p.x, p.y);
        }
        path.end_contour();
    }
    path.end_shape(true);
    path
}

// ============================================================================
// Tests
// ============================================================================
