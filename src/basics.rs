//! Foundation types, constants, and vertex code utilities.
//!
//! The most fundamental types that everything else in the crate depends on:
//! points, rectangles, and the per-vertex command codes of a path shape.

// ============================================================================
// Mathematical constants
// ============================================================================

pub const PI: f64 = std::f64::consts::PI;

// ============================================================================
// Rect
// ============================================================================

/// A rectangle defined by two corner points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect<T: Copy> {
    pub x1: T,
    pub y1: T,
    pub x2: T,
    pub y2: T,
}

impl<T: Copy> Rect<T> {
    pub fn new(x1: T, y1: T, x2: T, y2: T) -> Self {
        Self { x1, y1, x2, y2 }
    }
}

impl Rect<f64> {
    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }
}

/// Compute the union (bounding box) of two rectangles.
pub fn unite_rectangles<T: Copy + PartialOrd>(r1: &Rect<T>, r2: &Rect<T>) -> Rect<T> {
    let mut r = *r1;
    if r.x2 < r2.x2 {
        r.x2 = r2.x2;
    }
    if r.y2 < r2.y2 {
        r.y2 = r2.y2;
    }
    if r.x1 > r2.x1 {
        r.x1 = r2.x1;
    }
    if r.y1 > r2.y1 {
        r.y1 = r2.y1;
    }
    r
}

/// Rectangle with `f64` coordinates.
pub type RectD = Rect<f64>;

// ============================================================================
// Vertex codes
// ============================================================================

/// Command code attached to each element of a path shape's code stream.
///
/// A code tells how many raw vertices it consumes and how they combine.
/// `Break` consumes none and separates contours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexCode {
    /// A straight vertex.
    Vertex,
    /// Quadratic segment: control point followed by the end point.
    QuadraticVertex,
    /// Cubic segment: two control points followed by the end point.
    BezierVertex,
    /// Catmull-Rom style vertex, kept as a plain point for ring purposes.
    CurveVertex,
    /// Contour boundary.
    Break,
}

impl VertexCode {
    /// Number of physical vertices this code stands for.
    #[inline]
    pub fn consumed_vertices(self) -> usize {
        match self {
            VertexCode::Vertex | VertexCode::CurveVertex => 1,
            VertexCode::QuadraticVertex => 2,
            VertexCode::BezierVertex => 3,
            VertexCode::Break => 0,
        }
    }

    /// Returns `true` for every code that produces vertices.
    #[inline]
    pub fn is_vertex(self) -> bool {
        self != VertexCode::Break
    }

    /// Returns `true` for the quadratic and cubic codes.
    #[inline]
    pub fn is_curve(self) -> bool {
        matches!(self, VertexCode::QuadraticVertex | VertexCode::BezierVertex)
    }
}

/// Total number of physical vertices a code stream consumes.
pub fn consumed_vertex_count(codes: &[VertexCode]) -> usize {
    codes.iter().map(|c| c.consumed_vertices()).sum()
}

// ============================================================================
// Point
// ============================================================================

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointBase<T: Copy> {
    pub x: T,
    pub y: T,
}

impl<T: Copy> PointBase<T> {
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

pub type PointD = PointBase<f64>;

impl From<(f64, f64)> for PointD {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

// ============================================================================
// Tests
// ============================================================================
