//! Polygonal geometry model.
//!
//! The construction and query surface of the geometry engine: line strings,
//! closed rings, polygons with holes, and multi-geometries. Boolean algebra,
//! buffering and triangulation live outside this crate; see
//! [`GeometryEngine`](crate::engine::GeometryEngine).

use crate::basics::{unite_rectangles, PointD, RectD};
use crate::error::{ConvertError, Result};
use crate::math::{calc_polygon_area, calc_polyline_length, calc_ring_moments, point_in_ring};

// ============================================================================
// LineString
// ============================================================================

/// An ordered sequence of points, open or closed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineString {
    coords: Vec<PointD>,
}

impl LineString {
    pub fn new(coords: Vec<PointD>) -> Self {
        Self { coords }
    }

    pub fn coords(&self) -> &[PointD] {
        &self.coords
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// `true` when the first and last coordinates coincide.
    pub fn is_closed(&self) -> bool {
        is_closed_sequence(&self.coords)
    }

    pub fn length(&self) -> f64 {
        calc_polyline_length(&self.coords)
    }
}

fn is_closed_sequence(coords: &[PointD]) -> bool {
    match (coords.first(), coords.last()) {
        (Some(first), Some(last)) => coords.len() > 1 && first == last,
        _ => false,
    }
}

// ============================================================================
// LinearRing
// ============================================================================

/// A closed line string: empty, or at least four points with the last
/// equal to the first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearRing {
    coords: Vec<PointD>,
}

impl LinearRing {
    /// Build a ring from an already closed point sequence.
    pub fn new(coords: Vec<PointD>) -> Result<Self> {
        if coords.is_empty() {
            return Ok(Self::default());
        }
        if coords.len() < 4 || !is_closed_sequence(&coords) {
            return Err(ConvertError::OpenRing { len: coords.len() });
        }
        Ok(Self { coords })
    }

    /// Build a ring, appending a copy of the first point when it is missing.
    pub fn closed(mut coords: Vec<PointD>) -> Result<Self> {
        if let Some(first) = coords.first().copied() {
            if coords.last() != Some(&first) {
                coords.push(first);
            }
        }
        Self::new(coords)
    }

    pub fn coords(&self) -> &[PointD] {
        &self.coords
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Signed area, positive for counter-clockwise rings.
    pub fn signed_area(&self) -> f64 {
        calc_polygon_area(&self.coords)
    }

    pub fn is_ccw(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// Reverse the point order in place.
    pub fn reverse(&mut self) {
        self.coords.reverse();
    }

    pub fn length(&self) -> f64 {
        calc_polyline_length(&self.coords)
    }

    pub fn contains_point(&self, p: PointD) -> bool {
        point_in_ring(&self.coords, p.x, p.y)
    }

    /// The ring as a plain line string, closing point kept.
    pub fn into_line_string(self) -> LineString {
        LineString::new(self.coords)
    }
}

// ============================================================================
// Polygon
// ============================================================================

/// One exterior ring plus zero or more holes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polygon {
    exterior: LinearRing,
    interiors: Vec<LinearRing>,
}

impl Polygon {
    pub fn new(exterior: LinearRing, interiors: Vec<LinearRing>) -> Self {
        Self {
            exterior,
            interiors,
        }
    }

    /// The empty polygon placeholder.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Hole-less polygon from a ring's points; the ring is closed if needed.
    pub fn from_points(points: Vec<PointD>) -> Result<Self> {
        Ok(Self::new(LinearRing::closed(points)?, Vec::new()))
    }

    pub fn exterior(&self) -> &LinearRing {
        &self.exterior
    }

    pub fn exterior_mut(&mut self) -> &mut LinearRing {
        &mut self.exterior
    }

    pub fn num_interior_rings(&self) -> usize {
        self.interiors.len()
    }

    pub fn interior_ring_n(&self, n: usize) -> Option<&LinearRing> {
        self.interiors.get(n)
    }

    pub fn interiors(&self) -> &[LinearRing] {
        &self.interiors
    }

    pub fn interiors_mut(&mut self) -> &mut [LinearRing] {
        &mut self.interiors
    }

    pub fn is_empty(&self) -> bool {
        self.exterior.is_empty()
    }

    /// Enclosed area: exterior minus holes, orientation ignored.
    pub fn area(&self) -> f64 {
        let holes: f64 = self.interiors.iter().map(|r| r.signed_area().abs()).sum();
        self.exterior.signed_area().abs() - holes
    }

    /// Area moments `(mx, my, area)` with holes subtracted.
    fn moments(&self) -> (f64, f64, f64) {
        let (mut mx, mut my, mut area) = oriented_moments(self.exterior.coords());
        for hole in &self.interiors {
            let (hx, hy, ha) = oriented_moments(hole.coords());
            mx -= hx;
            my -= hy;
            area -= ha;
        }
        (mx, my, area)
    }

    /// Even-odd containment: inside the exterior and outside every hole.
    pub fn contains_point(&self, p: PointD) -> bool {
        self.exterior.contains_point(p) && !self.interiors.iter().any(|h| h.contains_point(p))
    }

    /// All ring coordinates, exterior first.
    pub fn coordinates(&self) -> Vec<PointD> {
        let mut out = self.exterior.coords().to_vec();
        for hole in &self.interiors {
            out.extend_from_slice(hole.coords());
        }
        out
    }
}

/// Ring moments normalized to a positive area.
fn oriented_moments(coords: &[PointD]) -> (f64, f64, f64) {
    let (mx, my, a) = calc_ring_moments(coords);
    if a < 0.0 {
        (-mx, -my, -a)
    } else {
        (mx, my, a)
    }
}

// ============================================================================
// Geometry
// ============================================================================

/// Geometry type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryType {
    Point,
    MultiPoint,
    LineString,
    LinearRing,
    Polygon,
    MultiPolygon,
    MultiLineString,
    GeometryCollection,
}

impl GeometryType {
    pub fn name(self) -> &'static str {
        match self {
            GeometryType::Point => "Point",
            GeometryType::MultiPoint => "MultiPoint",
            GeometryType::LineString => "LineString",
            GeometryType::LinearRing => "LinearRing",
            GeometryType::Polygon => "Polygon",
            GeometryType::MultiPolygon => "MultiPolygon",
            GeometryType::MultiLineString => "MultiLineString",
            GeometryType::GeometryCollection => "GeometryCollection",
        }
    }
}

/// Any geometry the engine can hold.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(PointD),
    MultiPoint(Vec<PointD>),
    LineString(LineString),
    LinearRing(LinearRing),
    Polygon(Polygon),
    MultiPolygon(Vec<Polygon>),
    MultiLineString(Vec<LineString>),
    GeometryCollection(Vec<Geometry>),
}

impl Geometry {
    pub fn geometry_type(&self) -> GeometryType {
        match self {
            Geometry::Point(_) => GeometryType::Point,
            Geometry::MultiPoint(_) => GeometryType::MultiPoint,
            Geometry::LineString(_) => GeometryType::LineString,
            Geometry::LinearRing(_) => GeometryType::LinearRing,
            Geometry::Polygon(_) => GeometryType::Polygon,
            Geometry::MultiPolygon(_) => GeometryType::MultiPolygon,
            Geometry::MultiLineString(_) => GeometryType::MultiLineString,
            Geometry::GeometryCollection(_) => GeometryType::GeometryCollection,
        }
    }

    /// Member count for collections, 1 for single geometries.
    pub fn num_geometries(&self) -> usize {
        match self {
            Geometry::MultiPoint(v) => v.len(),
            Geometry::MultiPolygon(v) => v.len(),
            Geometry::MultiLineString(v) => v.len(),
            Geometry::GeometryCollection(v) => v.len(),
            _ => 1,
        }
    }

    /// Copy of the `n`-th member. A single geometry is its own member 0.
    pub fn geometry_n(&self, n: usize) -> Option<Geometry> {
        match self {
            Geometry::MultiPoint(v) => v.get(n).copied().map(Geometry::Point),
            Geometry::MultiPolygon(v) => v.get(n).cloned().map(Geometry::Polygon),
            Geometry::MultiLineString(v) => v.get(n).cloned().map(Geometry::LineString),
            Geometry::GeometryCollection(v) => v.get(n).cloned(),
            single => (n == 0).then(|| single.clone()),
        }
    }

    pub fn as_polygon(&self) -> Option<&Polygon> {
        match self {
            Geometry::Polygon(p) => Some(p),
            _ => None,
        }
    }

    /// Non-collection parts in pre-order, walked with an explicit stack.
    fn leaves(&self) -> Vec<&Geometry> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(g) = stack.pop() {
            match g {
                Geometry::GeometryCollection(members) => stack.extend(members.iter().rev()),
                other => out.push(other),
            }
        }
        out
    }

    /// Polygons of this geometry, including those nested in collections.
    pub fn polygons(&self) -> Vec<&Polygon> {
        let mut out = Vec::new();
        for leaf in self.leaves() {
            match leaf {
                Geometry::Polygon(p) => out.push(p),
                Geometry::MultiPolygon(ps) => out.extend(ps.iter()),
                _ => {}
            }
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.leaves().iter().all(|leaf| match leaf {
            Geometry::Point(_) => false,
            Geometry::MultiPoint(v) => v.is_empty(),
            Geometry::LineString(l) => l.is_empty(),
            Geometry::LinearRing(r) => r.is_empty(),
            Geometry::Polygon(p) => p.is_empty(),
            Geometry::MultiPolygon(v) => v.iter().all(Polygon::is_empty),
            Geometry::MultiLineString(v) => v.iter().all(LineString::is_empty),
            Geometry::GeometryCollection(_) => true,
        })
    }

    /// All coordinates in storage order.
    pub fn coordinates(&self) -> Vec<PointD> {
        let mut out = Vec::new();
        for leaf in self.leaves() {
            match leaf {
                Geometry::Point(p) => out.push(*p),
                Geometry::MultiPoint(v) => out.extend_from_slice(v),
                Geometry::LineString(l) => out.extend_from_slice(l.coords()),
                Geometry::LinearRing(r) => out.extend_from_slice(r.coords()),
                Geometry::Polygon(p) => out.extend(p.coordinates()),
                Geometry::MultiPolygon(v) => v.iter().for_each(|p| out.extend(p.coordinates())),
                Geometry::MultiLineString(v) => {
                    v.iter().for_each(|l| out.extend_from_slice(l.coords()))
                }
                Geometry::GeometryCollection(_) => {}
            }
        }
        out
    }

    /// Total polygonal area; zero for points and lines.
    pub fn area(&self) -> f64 {
        self.polygons().iter().map(|p| p.area()).sum()
    }

    /// Area-weighted centroid of the polygonal parts, or the mean of all
    /// coordinates when there is no area. `None` when empty.
    pub fn centroid(&self) -> Option<PointD> {
        let (mut mx, mut my, mut area) = (0.0, 0.0, 0.0);
        for p in self.polygons() {
            let (px, py, pa) = p.moments();
            mx += px;
            my += py;
            area += pa;
        }
        if area.abs() > f64::EPSILON {
            return Some(PointD::new(mx / area, my / area));
        }
        let coords = self.coordinates();
        if coords.is_empty() {
            return None;
        }
        let n = coords.len() as f64;
        let (sx, sy) = coords
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        Some(PointD::new(sx / n, sy / n))
    }

    /// Axis-aligned bounding box, `None` when empty.
    pub fn envelope(&self) -> Option<RectD> {
        self.coordinates()
            .iter()
            .map(|p| RectD::new(p.x, p.y, p.x, p.y))
            .reduce(|a, b| unite_rectangles(&a, &b))
    }

    /// Even-odd containment against the polygonal parts.
    pub fn contains_point(&self, p: PointD) -> bool {
        self.polygons().iter().any(|poly| poly.contains_point(p))
    }
}

impl From<Polygon> for Geometry {
    fn from(p: Polygon) -> Self {
        Geometry::Polygon(p)
    }
}

impl From<LineString> for Geometry {
    fn from(l: LineString) -> Self {
        Geometry::LineString(l)
    }
}

impl From<LinearRing> for Geometry {
    fn from(r: LinearRing) -> Self {
        Geometry::LinearRing(r)
    }
}

// ============================================================================
// Tests
// ============================================================================
