//! Path-command shapes.
//!
//! A [`Shape`] is a tree node: a group owning child shapes, a flat vertex
//! stream annotated with [`VertexCode`]s, or a parametric primitive.
//! [`PathData`] is the vertex container; it stores physical vertices and a
//! parallel code stream, and offers the `begin_shape` / `vertex` /
//! `begin_contour` / `end_contour` / `end_shape` builder the encoder uses.

use std::borrow::Cow;

use crate::basics::{consumed_vertex_count, PointD, VertexCode};
use crate::error::{ConvertError, Result};
use crate::style::Style;

// ============================================================================
// PathData
// ============================================================================

/// Vertex container for PATH and GEOMETRY shapes.
///
/// Curve codes own several physical vertices: a `QuadraticVertex` code is
/// backed by its control point and end point, a `BezierVertex` code by two
/// control points and the end point. `Break` codes own none.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathData {
    vertices: Vec<PointD>,
    codes: Vec<VertexCode>,
    closed: bool,
    pending_break: bool,
    open_contour: bool,
}

impl PathData {
    /// Create an empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a path from raw parts without checking them.
    pub fn from_parts(vertices: Vec<PointD>, codes: Vec<VertexCode>, closed: bool) -> Self {
        Self {
            vertices,
            codes,
            closed,
            pending_break: false,
            open_contour: false,
        }
    }

    /// Build a closed polygon path of plain vertices.
    pub fn from_points(points: &[PointD]) -> Self {
        let mut p = Self::new();
        p.begin_shape();
        for pt in points {
            p.vertex(pt.x, pt.y);
        }
        p.end_shape(true);
        p
    }

    // ---------------------------------------------------------------
    // Path construction
    // ---------------------------------------------------------------

    /// Start recording, discarding any previous content.
    pub fn begin_shape(&mut self) {
        self.vertices.clear();
        self.codes.clear();
        self.closed = false;
        self.pending_break = false;
        self.open_contour = false;
    }

    /// Emit a deferred contour break ahead of the next vertex code.
    fn flush_break(&mut self) {
        if self.pending_break {
            if !self.codes.is_empty() {
                self.codes.push(VertexCode::Break);
            }
            self.pending_break = false;
        }
    }

    /// Add a straight vertex.
    pub fn vertex(&mut self, x: f64, y: f64) {
        self.flush_break();
        self.vertices.push(PointD::new(x, y));
        self.codes.push(VertexCode::Vertex);
    }

    /// Add a quadratic segment from the previous vertex.
    pub fn quadratic_vertex(&mut self, cx: f64, cy: f64, x: f64, y: f64) {
        self.flush_break();
        self.vertices.push(PointD::new(cx, cy));
        self.vertices.push(PointD::new(x, y));
        self.codes.push(VertexCode::QuadraticVertex);
    }

    /// Add a cubic segment from the previous vertex.
    #[allow(clippy::too_many_arguments)]
    pub fn bezier_vertex(&mut self, cx1: f64, cy1: f64, cx2: f64, cy2: f64, x: f64, y: f64) {
        self.flush_break();
        self.vertices.push(PointD::new(cx1, cy1));
        self.vertices.push(PointD::new(cx2, cy2));
        self.vertices.push(PointD::new(x, y));
        self.codes.push(VertexCode::BezierVertex);
    }

    /// Add a spline vertex.
    pub fn curve_vertex(&mut self, x: f64, y: f64) {
        self.flush_break();
        self.vertices.push(PointD::new(x, y));
        self.codes.push(VertexCode::CurveVertex);
    }

    /// Open a new contour. The break is written lazily with the next vertex,
    /// so a contour opened before any vertex does not produce a leading break.
    pub fn begin_contour(&mut self) {
        if self.open_contour {
            log::warn!("begin_contour() called while a contour is already open");
        }
        self.open_contour = true;
        self.pending_break = true;
    }

    /// Close the current contour.
    pub fn end_contour(&mut self) {
        if !self.open_contour {
            log::warn!("end_contour() called without begin_contour()");
        }
        self.open_contour = false;
    }

    /// Finish recording. `close` joins the last vertex back to the first.
    pub fn end_shape(&mut self, close: bool) {
        if self.open_contour {
            log::warn!("end_shape() called with an open contour");
            self.open_contour = false;
        }
        self.pending_break = false;
        self.closed = close;
    }

    // ---------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------

    /// Number of physical vertices stored.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get a vertex by index.
    pub fn get_vertex(&self, idx: usize) -> Option<PointD> {
        self.vertices.get(idx).copied()
    }

    pub fn vertices(&self) -> &[PointD] {
        &self.vertices
    }

    /// Number of codes stored.
    pub fn vertex_code_count(&self) -> usize {
        self.codes.len()
    }

    /// Get a code by index.
    pub fn get_vertex_code(&self, idx: usize) -> Option<VertexCode> {
        self.codes.get(idx).copied()
    }

    pub fn codes(&self) -> &[VertexCode] {
        &self.codes
    }

    /// Code stream used for decoding. A path with vertices but no codes is
    /// a plain polygon, one `Vertex` per stored point.
    pub fn effective_codes(&self) -> Cow<'_, [VertexCode]> {
        if self.codes.is_empty() && !self.vertices.is_empty() {
            Cow::Owned(vec![VertexCode::Vertex; self.vertices.len()])
        } else {
            Cow::Borrowed(&self.codes)
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Number of contours: one plus the number of breaks, zero when empty.
    pub fn contour_count(&self) -> usize {
        if self.vertices.is_empty() {
            return 0;
        }
        1 + self
            .codes
            .iter()
            .filter(|c| **c == VertexCode::Break)
            .count()
    }

    /// Check the code stream against the vertex storage.
    ///
    /// The consumed vertex count must match the stored count, and every
    /// break must be followed by a straight vertex that starts the next contour.
    pub fn validate(&self) -> Result<()> {
        let codes = self.effective_codes();
        let expected = consumed_vertex_count(&codes);
        if expected != self.vertices.len() {
            return Err(ConvertError::CodeCountMismatch {
                expected,
                actual: self.vertices.len(),
            });
        }
        for (index, code) in codes.iter().enumerate() {
            if *code == VertexCode::Break
                && !codes
                    .get(index + 1)
                    .is_some_and(|next| next.is_vertex() && !next.is_curve())
            {
                return Err(ConvertError::BreakWithoutVertex { index });
            }
        }
        Ok(())
    }
}

// ============================================================================
// Primitive
// ============================================================================

/// Kind tag of a parametric primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Point,
    Line,
    Triangle,
    Quad,
    Rect,
    Ellipse,
    Arc,
    Box,
    Sphere,
}

impl PrimitiveKind {
    pub fn name(self) -> &'static str {
        match self {
            PrimitiveKind::Point => "point",
            PrimitiveKind::Line => "line",
            PrimitiveKind::Triangle => "triangle",
            PrimitiveKind::Quad => "quad",
            PrimitiveKind::Rect => "rect",
            PrimitiveKind::Ellipse => "ellipse",
            PrimitiveKind::Arc => "arc",
            PrimitiveKind::Box => "box",
            PrimitiveKind::Sphere => "sphere",
        }
    }

    /// Returns `true` for box and sphere.
    pub fn is_3d(self) -> bool {
        matches!(self, PrimitiveKind::Box | PrimitiveKind::Sphere)
    }
}

/// A built-in parametric shape: a kind tag plus its ordered parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    pub kind: PrimitiveKind,
    pub params: Vec<f64>,
}

impl Primitive {
    pub fn new(kind: PrimitiveKind, params: Vec<f64>) -> Self {
        Self { kind, params }
    }

    pub fn point(x: f64, y: f64) -> Self {
        Self::new(PrimitiveKind::Point, vec![x, y])
    }

    pub fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::new(PrimitiveKind::Line, vec![x1, y1, x2, y2])
    }

    pub fn triangle(x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64) -> Self {
        Self::new(PrimitiveKind::Triangle, vec![x1, y1, x2, y2, x3, y3])
    }

    #[allow(clippy::too_many_arguments)]
    pub fn quad(x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64, x4: f64, y4: f64) -> Self {
        Self::new(PrimitiveKind::Quad, vec![x1, y1, x2, y2, x3, y3, x4, y4])
    }

    /// Axis-aligned rectangle centred on (cx, cy).
    pub fn rect(cx: f64, cy: f64, width: f64, height: f64) -> Self {
        Self::new(PrimitiveKind::Rect, vec![cx, cy, width, height])
    }

    /// Ellipse centred on (cx, cy).
    pub fn ellipse(cx: f64, cy: f64, width: f64, height: f64) -> Self {
        Self::new(PrimitiveKind::Ellipse, vec![cx, cy, width, height])
    }

    /// Pie-slice arc; angles in radians.
    pub fn arc(cx: f64, cy: f64, width: f64, height: f64, start: f64, extent: f64) -> Self {
        Self::new(PrimitiveKind::Arc, vec![cx, cy, width, height, start, extent])
    }

    pub fn get_param(&self, idx: usize) -> Option<f64> {
        self.params.get(idx).copied()
    }
}

// ============================================================================
// Shape
// ============================================================================

/// Family tag of a shape node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeFamily {
    Group,
    Path,
    Geometry,
    Primitive,
}

/// Content of a shape node.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeBody {
    Group(Vec<Shape>),
    Path(PathData),
    Geometry(PathData),
    Primitive(Primitive),
}

/// A node of a shape tree. Groups own their children exclusively.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    body: ShapeBody,
    style: Option<Style>,
}

impl Shape {
    pub fn new(body: ShapeBody) -> Self {
        Self { body, style: None }
    }

    pub fn group(children: Vec<Shape>) -> Self {
        Self::new(ShapeBody::Group(children))
    }

    pub fn path(data: PathData) -> Self {
        Self::new(ShapeBody::Path(data))
    }

    pub fn geometry(data: PathData) -> Self {
        Self::new(ShapeBody::Geometry(data))
    }

    pub fn primitive(primitive: Primitive) -> Self {
        Self::new(ShapeBody::Primitive(primitive))
    }

    /// Placeholder: a GEOMETRY shape without vertices.
    pub fn empty() -> Self {
        Self::geometry(PathData::new())
    }

    /// Closed PATH shape through `points`.
    pub fn polygon(points: &[PointD]) -> Self {
        Self::path(PathData::from_points(points))
    }

    pub fn body(&self) -> &ShapeBody {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut ShapeBody {
        &mut self.body
    }

    pub fn family(&self) -> ShapeFamily {
        match self.body {
            ShapeBody::Group(_) => ShapeFamily::Group,
            ShapeBody::Path(_) => ShapeFamily::Path,
            ShapeBody::Geometry(_) => ShapeFamily::Geometry,
            ShapeBody::Primitive(_) => ShapeFamily::Primitive,
        }
    }

    /// Primitive kind, `None` for other families.
    pub fn kind(&self) -> Option<PrimitiveKind> {
        match &self.body {
            ShapeBody::Primitive(p) => Some(p.kind),
            _ => None,
        }
    }

    /// Vertex data of PATH and GEOMETRY shapes.
    pub fn path_data(&self) -> Option<&PathData> {
        match &self.body {
            ShapeBody::Path(p) | ShapeBody::Geometry(p) => Some(p),
            _ => None,
        }
    }

    pub fn path_data_mut(&mut self) -> Option<&mut PathData> {
        match &mut self.body {
            ShapeBody::Path(p) | ShapeBody::Geometry(p) => Some(p),
            _ => None,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.path_data().map_or(0, PathData::vertex_count)
    }

    pub fn get_vertex(&self, idx: usize) -> Option<PointD> {
        self.path_data().and_then(|p| p.get_vertex(idx))
    }

    pub fn vertex_code_count(&self) -> usize {
        self.path_data().map_or(0, PathData::vertex_code_count)
    }

    pub fn get_vertex_code(&self, idx: usize) -> Option<VertexCode> {
        self.path_data().and_then(|p| p.get_vertex_code(idx))
    }

    pub fn get_param(&self, idx: usize) -> Option<f64> {
        match &self.body {
            ShapeBody::Primitive(p) => p.get_param(idx),
            _ => None,
        }
    }

    /// Direct children; empty for non-group shapes.
    pub fn children(&self) -> &[Shape] {
        match &self.body {
            ShapeBody::Group(children) => children,
            _ => &[],
        }
    }

    pub fn child_count(&self) -> usize {
        self.children().len()
    }

    /// Append a child. Only groups accept children; returns `false` otherwise.
    pub fn add_child(&mut self, child: Shape) -> bool {
        if let ShapeBody::Group(children) = &mut self.body {
            children.push(child);
            return true;
        }
        log::warn!("cannot add a child to a {:?} shape", self.family());
        false
    }

    pub fn style(&self) -> Option<&Style> {
        self.style.as_ref()
    }

    pub fn style_mut(&mut self) -> &mut Option<Style> {
        &mut self.style
    }

    pub fn set_style(&mut self, style: Option<Style>) {
        self.style = style;
    }

    /// `true` for empty groups and vertex-less paths. Primitives are never empty.
    pub fn is_empty(&self) -> bool {
        match &self.body {
            ShapeBody::Group(children) => children.is_empty(),
            ShapeBody::Path(p) | ShapeBody::Geometry(p) => p.vertex_count() == 0,
            ShapeBody::Primitive(_) => false,
        }
    }
}

impl From<PathData> for Shape {
    fn from(data: PathData) -> Self {
        Shape::path(data)
    }
}

impl From<Primitive> for Shape {
    fn from(primitive: Primitive) -> Self {
        Shape::primitive(primitive)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_empty() {
        let p = PathData::new();
        assert_eq!(p.vertex_count(), 0);
        assert_eq!(p.vertex_code_count(), 0);
        assert_eq!(p.contour_count(), 0);
        assert!(!p.is_closed());
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_vertex_and_close() {
        let mut p = PathData::new();
        p.begin_shape();
        p.vertex(10.0, 20.0);
        p.vertex(30.0, 40.0);
        p.vertex(50.0, 60.0);
        p.end_shape(true);

        assert_eq!(p.vertex_count(), 3);
        assert_eq!(p.codes(), &[VertexCode::Vertex; 3]);
        assert_eq!(p.get_vertex(1), Some(PointD::new(30.0, 40.0)));
        assert_eq!(p.get_vertex(3), None);
        assert!(p.is_closed());
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_curves_store_all_vertices() {
        let mut p = PathData::new();
        p.begin_shape();
        p.vertex(0.0, 0.0);
        p.quadratic_vertex(5.0, 10.0, 10.0, 0.0);
        p.bezier_vertex(10.0, -5.0, 5.0, -10.0, 0.0, -5.0);
        p.end_shape(true);

        assert_eq!(p.vertex_count(), 6);
        assert_eq!(
            p.codes(),
            &[
                VertexCode::Vertex,
                VertexCode::QuadraticVertex,
                VertexCode::BezierVertex
            ]
        );
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_contour_break_is_deferred() {
        let mut p = PathData::new();
        p.begin_shape();
        p.begin_contour();
        p.vertex(0.0, 0.0);
        p.vertex(10.0, 0.0);
        p.vertex(10.0, 10.0);
        p.end_contour();
        p.begin_contour();
        p.vertex(2.0, 2.0);
        p.vertex(4.0, 2.0);
        p.vertex(4.0, 4.0);
        p.end_contour();
        p.end_shape(true);

        // No leading break for the first contour.
        assert_eq!(p.get_vertex_code(0), Some(VertexCode::Vertex));
        assert_eq!(p.get_vertex_code(3), Some(VertexCode::Break));
        assert_eq!(p.vertex_code_count(), 7);
        assert_eq!(p.contour_count(), 2);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_empty_contour_leaves_no_break() {
        let mut p = PathData::new();
        p.begin_shape();
        p.vertex(0.0, 0.0);
        p.begin_contour();
        p.end_contour();
        p.end_shape(false);
        assert_eq!(p.codes(), &[VertexCode::Vertex]);
    }

    #[test]
    fn test_effective_codes_default_to_vertex() {
        let p = PathData::from_parts(
            vec![PointD::new(0.0, 0.0), PointD::new(1.0, 0.0), PointD::new(1.0, 1.0)],
            Vec::new(),
            true,
        );
        assert_eq!(p.effective_codes().as_ref(), &[VertexCode::Vertex; 3]);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_validate_count_mismatch() {
        let p = PathData::from_parts(
            vec![PointD::new(0.0, 0.0), PointD::new(1.0, 0.0)],
            vec![VertexCode::Vertex, VertexCode::QuadraticVertex],
            false,
        );
        assert_eq!(
            p.validate(),
            Err(ConvertError::CodeCountMismatch {
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn test_validate_trailing_break() {
        let p = PathData::from_parts(
            vec![PointD::new(0.0, 0.0)],
            vec![VertexCode::Vertex, VertexCode::Break],
            false,
        );
        assert_eq!(
            p.validate(),
            Err(ConvertError::BreakWithoutVertex { index: 1 })
        );
    }

    #[test]
    fn test_validate_curve_after_break() {
        let p = PathData::from_parts(
            vec![PointD::new(0.0, 0.0); 5],
            vec![
                VertexCode::Vertex,
                VertexCode::Vertex,
                VertexCode::Vertex,
                VertexCode::Break,
                VertexCode::QuadraticVertex,
            ],
            false,
        );
        assert_eq!(
            p.validate(),
            Err(ConvertError::BreakWithoutVertex { index: 3 })
        );
    }

    #[test]
    fn test_shape_accessors() {
        let mut s = Shape::polygon(&[
            PointD::new(0.0, 0.0),
            PointD::new(1.0, 0.0),
            PointD::new(1.0, 1.0),
        ]);
        assert_eq!(s.family(), ShapeFamily::Path);
        assert_eq!(s.vertex_count(), 3);
        assert_eq!(s.vertex_code_count(), 3);
        assert_eq!(s.kind(), None);
        assert!(s.children().is_empty());
        assert!(!s.add_child(Shape::empty()));
        assert!(!s.is_empty());

        let e = Shape::primitive(Primitive::ellipse(1.0, 2.0, 3.0, 4.0));
        assert_eq!(e.family(), ShapeFamily::Primitive);
        assert_eq!(e.kind(), Some(PrimitiveKind::Ellipse));
        assert_eq!(e.get_param(2), Some(3.0));
        assert_eq!(e.get_param(9), None);
        assert_eq!(e.vertex_count(), 0);
    }

    #[test]
    fn test_group_children() {
        let mut g = Shape::group(Vec::new());
        assert!(g.is_empty());
        assert!(g.add_child(Shape::empty()));
        assert!(g.add_child(Shape::primitive(Primitive::point(0.0, 0.0))));
        assert_eq!(g.child_count(), 2);
        assert_eq!(g.family(), ShapeFamily::Group);
        assert_eq!(g.children()[1].kind(), Some(PrimitiveKind::Point));
    }

    #[test]
    fn test_style_slot() {
        let mut s = Shape::empty();
        assert!(s.style().is_none());
        s.set_style(Some(Style::highlight()));
        assert_eq!(s.style().map(|st| st.stroke_weight), Some(4.0));
        *s.style_mut() = None;
        assert!(s.style().is_none());
    }

    #[test]
    fn test_primitive_kind_names() {
        assert_eq!(PrimitiveKind::Ellipse.name(), "ellipse");
        assert!(PrimitiveKind::Sphere.is_3d());
        assert!(!PrimitiveKind::Rect.is_3d());
    }
}
