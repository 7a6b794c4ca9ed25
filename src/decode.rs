//! Shape → geometry decoder.
//!
//! Walks a path-command stream, splits it into contours at breaks,
//! tessellates curve segments, closes every contour into a ring, and builds
//! a polygon from the outer ring and its holes. Groups are flattened into
//! their leaf shapes, decoded one by one, and merged by the geometry engine.
//! Primitives go through the [primitive synthesizer](crate::primitive).

use crate::basics::{PointD, VertexCode};
use crate::curves::{sample_cubic, sample_quadratic};
use crate::engine::{DefaultEngine, GeometryEngine};
use crate::error::{ConvertError, Result};
use crate::geometry::{Geometry, LinearRing, Polygon};
use crate::math::calc_polygon_area;
use crate::primitive::synthesize;
use crate::shape::{PathData, Shape, ShapeBody};

/// Samples generated per curve segment.
pub const DEFAULT_CURVE_RESOLUTION: usize = 20;
/// Primitive outlines use `curve_resolution * DEFAULT_PRIMITIVE_MULTIPLIER` points.
pub const DEFAULT_PRIMITIVE_MULTIPLIER: usize = 4;
/// Deepest group or collection nesting accepted by default.
///
/// Conversion walks trees iteratively, but the derived `Drop`, `Clone`,
/// `PartialEq` and `Debug` of [`Shape`] and [`Geometry`] still recurse. A
/// tree far deeper than this cap is rejected here yet can still exhaust the
/// stack when it is dropped or cloned by the caller.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Which contour of a multi-contour path becomes the exterior ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OuterRing {
    /// Contour 0, whatever its extent. Holes drawn first yield an invalid polygon.
    FirstContour,
    /// The contour with the largest absolute area; ties go to the earliest.
    #[default]
    LargestArea,
}

/// Decoder settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderConfig {
    pub curve_resolution: usize,
    pub primitive_multiplier: usize,
    pub max_depth: usize,
    pub outer_ring: OuterRing,
}

impl DecoderConfig {
    /// Point count for ellipse and arc primitives.
    pub fn primitive_points(&self) -> usize {
        self.curve_resolution.saturating_mul(self.primitive_multiplier)
    }
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            curve_resolution: DEFAULT_CURVE_RESOLUTION,
            primitive_multiplier: DEFAULT_PRIMITIVE_MULTIPLIER,
            max_depth: DEFAULT_MAX_DEPTH,
            outer_ring: OuterRing::default(),
        }
    }
}

/// Shape to geometry converter.
#[derive(Debug, Clone, Default)]
pub struct Decoder<E = DefaultEngine> {
    config: DecoderConfig,
    engine: E,
}

impl Decoder<DefaultEngine> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DecoderConfig) -> Self {
        Self {
            config,
            engine: DefaultEngine::default(),
        }
    }
}

impl<E: GeometryEngine> Decoder<E> {
    /// Decoder that merges group members through `engine`.
    pub fn with_engine(config: DecoderConfig, engine: E) -> Self {
        Self { config, engine }
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Convert a shape to geometry.
    ///
    /// Groups become the engine's repaired multi-polygon; a child that fails
    /// to decode is logged and left out. Any other shape becomes a polygon.
    pub fn decode(&self, shape: &Shape) -> Result<Geometry> {
        if let ShapeBody::Group(_) = shape.body() {
            let leaves = flatten_leaves(shape, self.config.max_depth)?;
            let mut polygons = Vec::with_capacity(leaves.len());
            for (i, leaf) in leaves.into_iter().enumerate() {
                match self.decode_polygon(leaf) {
                    Ok(p) => polygons.push(p),
                    Err(e) => log::warn!("skipping group member {i}: {e}"),
                }
            }
            return Ok(self.engine.repair(polygons));
        }
        self.decode_polygon(shape).map(Geometry::Polygon)
    }

    /// Convert a single non-group shape to a polygon.
    pub fn decode_polygon(&self, shape: &Shape) -> Result<Polygon> {
        match shape.body() {
            ShapeBody::Path(data) | ShapeBody::Geometry(data) => self.decode_path(data),
            ShapeBody::Primitive(p) => synthesize(p, self.config.primitive_points()),
            ShapeBody::Group(_) => {
                log::warn!("group shapes decode to multi-polygons, not a single polygon");
                Ok(Polygon::empty())
            }
        }
    }

    /// Assemble the contours of a vertex stream into a polygon.
    pub fn decode_path(&self, data: &PathData) -> Result<Polygon> {
        let count = data.vertex_count();
        if count < 3 {
            return Err(ConvertError::TooFewVertices { count });
        }
        data.validate()?;

        let mut contours = self.collect_contours(data)?;
        for contour in &mut contours {
            close_contour(contour);
        }

        let outer = self.pick_outer(&contours);
        let exterior = LinearRing::new(contours.remove(outer))?;
        let holes = contours
            .into_iter()
            .map(LinearRing::new)
            .collect::<Result<Vec<_>>>()?;
        Ok(Polygon::new(exterior, holes))
    }

    /// Split the vertex stream into contours, tessellating curves.
    fn collect_contours(&self, data: &PathData) -> Result<Vec<Vec<PointD>>> {
        let codes = data.effective_codes();
        let groups = contour_groups(&codes);
        let types = vertex_types(&codes);
        let verts = data.vertices();
        let resolution = self.config.curve_resolution;

        let mut contours = Vec::new();
        let mut current = Vec::new();
        let mut last_group = groups.first().copied().unwrap_or(0);
        let mut i = 0;
        while i < verts.len() {
            if groups[i] != last_group {
                contours.push(std::mem::take(&mut current));
                last_group = groups[i];
            }
            match types[i] {
                // Validation guarantees the trailing curve vertices exist.
                VertexCode::QuadraticVertex => {
                    let start = curve_start(verts, i)?;
                    let end = verts[i + 1];
                    current.extend(sample_quadratic(start, verts[i], end, resolution));
                    i += 2;
                }
                VertexCode::BezierVertex => {
                    let start = curve_start(verts, i)?;
                    let ctrl2 = verts[i + 1];
                    let end = verts[i + 2];
                    current.extend(sample_cubic(start, verts[i], ctrl2, end, resolution));
                    i += 3;
                }
                _ => {
                    current.push(verts[i]);
                    i += 1;
                }
            }
        }
        contours.push(current);
        log::debug!(
            "decoded {} vertices into {} contours",
            verts.len(),
            contours.len()
        );
        Ok(contours)
    }

    /// Index of the contour to use as the exterior ring.
    fn pick_outer(&self, contours: &[Vec<PointD>]) -> usize {
        let mut largest = 0;
        let mut largest_area = f64::NEG_INFINITY;
        for (i, c) in contours.iter().enumerate() {
            let area = calc_polygon_area(c).abs();
            if area > largest_area {
                largest = i;
                largest_area = area;
            }
        }
        if largest == 0 {
            return 0;
        }
        match self.config.outer_ring {
            OuterRing::FirstContour => {
                log::warn!(
                    "contour {largest} encloses more area than contour 0; polygon will be invalid"
                );
                0
            }
            OuterRing::LargestArea => {
                log::warn!("using contour {largest} as the outer ring instead of contour 0");
                largest
            }
        }
    }
}

/// On-curve start of the curve whose first control point is vertex `i`.
fn curve_start(verts: &[PointD], i: usize) -> Result<PointD> {
    i.checked_sub(1)
        .map(|j| verts[j])
        .ok_or(ConvertError::CurveWithoutStart { index: i })
}



/// Append the first point when the contour does not end on it.
fn close_contour(contour: &mut Vec<PointD>) {
    if let (Some(first), Some(last)) = (contour.first().copied(), contour.last()) {
        if first != *last {
            contour.push(first);
        }
    }
}

/// Contour index of every physical vertex.
///
/// Each break starts a new group; curve codes tag all of their vertices
/// with the current group.
pub fn contour_groups(codes: &[VertexCode]) -> Vec<usize> {
    let mut group = 0;
    let mut groups = Vec::with_capacity(codes.len() * 2);
    for code in codes {
        if *code == VertexCode::Break {
            group += 1;
            continue;
        }
        groups.extend(std::iter::repeat(group).take(code.consumed_vertices()));
    }
    groups
}

/// Code of every physical vertex; breaks are dropped.
pub fn vertex_types(codes: &[VertexCode]) -> Vec<VertexCode> {
    let mut types = Vec::with_capacity(codes.len() * 2);
    for code in codes {
        types.extend(std::iter::repeat(*code).take(code.consumed_vertices()));
    }
    types
}

/// Leaf shapes of a tree in depth-first pre-order, groups removed.
///
/// Walks with an explicit stack; nesting deeper than `max_depth` groups is
/// reported as [`ConvertError::DepthExceeded`].
pub fn flatten_leaves(shape: &Shape, max_depth: usize) -> Result<Vec<&Shape>> {
    let mut leaves = Vec::new();
    let mut stack = vec![(shape, 0usize)];
    while let Some((node, depth)) = stack.pop() {
        match node.body() {
            ShapeBody::Group(children) => {
                if depth >= max_depth {
                    return Err(ConvertError::DepthExceeded { limit: max_depth });
                }
                stack.extend(children.iter().rev().map(|c| (c, depth + 1)));
            }
            _ => leaves.push(node),
        }
    }
    Ok(leaves)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Primitive;

    fn square_path(x: f64, y: f64, size: f64) -> PathData {
        PathData::from_points(&[
            PointD::new(x, y),
            PointD::new(x + size, y),
            PointD::new(x + size, y + size),
            PointD::new(x, y + size),
        ])
    }

    fn square_with_hole(hole_first: bool) -> PathData {
        let mut p = PathData::new();
        p.begin_shape();
        let outer = [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)];
        let hole = [(2.0, 2.0), (2.0, 4.0), (4.0, 4.0), (4.0, 2.0)];
        let (first, second) = if hole_first {
            (hole, outer)
        } else {
            (outer, hole)
        };
        for (x, y) in first {
            p.vertex(x, y);
        }
        p.begin_contour();
        for (x, y) in second {
            p.vertex(x, y);
        }
        p.end_contour();
        p.end_shape(true);
        p
    }

    #[test]
    fn test_contour_groups() {
        let codes = [
            VertexCode::Vertex,
            VertexCode::QuadraticVertex,
            VertexCode::Break,
            VertexCode::Vertex,
            VertexCode::BezierVertex,
            VertexCode::CurveVertex,
        ];
        assert_eq!(contour_groups(&codes), vec![0, 0, 0, 1, 1, 1, 1, 1]);
        assert_eq!(
            vertex_types(&codes),
            vec![
                VertexCode::Vertex,
                VertexCode::QuadraticVertex,
                VertexCode::QuadraticVertex,
                VertexCode::Vertex,
                VertexCode::BezierVertex,
                VertexCode::BezierVertex,
                VertexCode::BezierVertex,
                VertexCode::CurveVertex,
            ]
        );
    }

    #[test]
    fn test_decode_square_closes_ring() {
        let poly = Decoder::new().decode_path(&square_path(0.0, 0.0, 10.0)).unwrap();
        let ring = poly.exterior().coords();
        assert_eq!(ring.len(), 5);
        assert_eq!(ring[0], ring[4]);
        assert_eq!(poly.num_interior_rings(), 0);
        assert!((poly.area() - 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_decode_already_closed_contour() {
        let p = PathData::from_points(&[
            PointD::new(0.0, 0.0),
            PointD::new(1.0, 0.0),
            PointD::new(1.0, 1.0),
            PointD::new(0.0, 0.0),
        ]);
        let poly = Decoder::new().decode_path(&p).unwrap();
        assert_eq!(poly.exterior().len(), 4);
    }

    #[test]
    fn test_decode_too_few_vertices() {
        let p = PathData::from_points(&[PointD::new(0.0, 0.0), PointD::new(1.0, 0.0)]);
        assert_eq!(
            Decoder::new().decode(&Shape::path(p)),
            Err(ConvertError::TooFewVertices { count: 2 })
        );
    }

    #[test]
    fn test_decode_with_hole() {
        let poly = Decoder::new().decode_path(&square_with_hole(false)).unwrap();
        assert_eq!(poly.num_interior_rings(), 1);
        assert_eq!(poly.exterior().len(), 5);
        assert_eq!(poly.interiors()[0].len(), 5);
        assert!((poly.area() - 96.0).abs() < 1e-10);
    }

    #[test]
    fn test_outer_ring_largest_area() {
        let poly = Decoder::new().decode_path(&square_with_hole(true)).unwrap();
        assert!((poly.exterior().signed_area().abs() - 100.0).abs() < 1e-10);
        assert!((poly.area() - 96.0).abs() < 1e-10);
    }

    #[test]
    fn test_outer_ring_first_contour() {
        let config = DecoderConfig {
            outer_ring: OuterRing::FirstContour,
            ..DecoderConfig::default()
        };
        let poly = Decoder::with_config(config)
            .decode_path(&square_with_hole(true))
            .unwrap();
        assert!((poly.exterior().signed_area().abs() - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_quadratic_tessellation_count() {
        let mut p = PathData::new();
        p.begin_shape();
        p.vertex(0.0, 0.0);
        p.quadratic_vertex(5.0, 10.0, 10.0, 0.0);
        p.vertex(5.0, -5.0);
        p.end_shape(true);

        let config = DecoderConfig {
            curve_resolution: 8,
            ..DecoderConfig::default()
        };
        let poly = Decoder::with_config(config).decode_path(&p).unwrap();
        let ring = poly.exterior().coords();
        // start, 8 samples, trailing vertex, closing point
        assert_eq!(ring.len(), 1 + 8 + 1 + 1);
        let control = PointD::new(5.0, 10.0);
        assert!(ring[1..9].iter().all(|pt| *pt != control));
        // t = 0 coincides with the start vertex
        assert_eq!(ring[1], PointD::new(0.0, 0.0));
        assert_eq!(ring[9], PointD::new(5.0, -5.0));
    }

    #[test]
    fn test_cubic_tessellation_count() {
        let mut p = PathData::new();
        p.begin_shape();
        p.vertex(0.0, 0.0);
        p.bezier_vertex(0.0, 10.0, 10.0, 10.0, 10.0, 0.0);
        p.vertex(5.0, -5.0);
        p.end_shape(true);

        let poly = Decoder::new().decode_path(&p).unwrap();
        assert_eq!(poly.exterior().len(), 1 + DEFAULT_CURVE_RESOLUTION + 1 + 1);
    }

    #[test]
    fn test_curve_without_start() {
        let p = PathData::from_parts(
            vec![
                PointD::new(5.0, 10.0),
                PointD::new(10.0, 0.0),
                PointD::new(0.0, 0.0),
            ],
            vec![VertexCode::QuadraticVertex, VertexCode::Vertex],
            true,
        );
        assert_eq!(
            Decoder::new().decode_path(&p),
            Err(ConvertError::CurveWithoutStart { index: 0 })
        );
    }

    #[test]
    fn test_degenerate_hole_is_reported() {
        let mut p = square_path(0.0, 0.0, 10.0);
        p.begin_contour();
        p.vertex(1.0, 1.0);
        p.vertex(2.0, 2.0);
        p.end_contour();
        assert_eq!(
            Decoder::new().decode_path(&p),
            Err(ConvertError::OpenRing { len: 3 })
        );
    }

    #[test]
    fn test_uncoded_vertices() {
        let p = PathData::from_parts(
            vec![PointD::new(0.0, 0.0), PointD::new(1.0, 0.0), PointD::new(0.0, 1.0)],
            Vec::new(),
            false,
        );
        let poly = Decoder::new().decode_path(&p).unwrap();
        assert_eq!(poly.exterior().len(), 4);
    }

    #[test]
    fn test_decode_primitive() {
        let g = Decoder::new()
            .decode(&Shape::primitive(Primitive::ellipse(0.0, 0.0, 2.0, 2.0)))
            .unwrap();
        let poly = g.as_polygon().unwrap();
        assert_eq!(poly.exterior().len(), DecoderConfig::default().primitive_points() + 1);
    }

    #[test]
    fn test_primitive_points_saturate() {
        let config = DecoderConfig {
            curve_resolution: usize::MAX / 2,
            primitive_multiplier: 4,
            ..DecoderConfig::default()
        };
        assert_eq!(config.primitive_points(), usize::MAX);
    }

    #[test]
    fn test_curve_missing_end_vertex_is_rejected() {
        let p = PathData::from_parts(
            vec![PointD::new(0.0, 0.0), PointD::new(1.0, 0.0), PointD::new(1.0, 1.0)],
            vec![VertexCode::Vertex, VertexCode::Vertex, VertexCode::BezierVertex],
            true,
        );
        assert_eq!(
            Decoder::new().decode_path(&p),
            Err(ConvertError::CodeCountMismatch {
                expected: 5,
                actual: 3
            })
        );
    }

    #[test]
    fn test_point_primitive_is_empty_polygon() {
        let g = Decoder::new()
            .decode(&Shape::primitive(Primitive::point(1.0, 1.0)))
            .unwrap();
        assert_eq!(g, Geometry::Polygon(Polygon::empty()));
    }

    #[test]
    fn test_flatten_nested_groups() {
        let a = Shape::path(square_path(0.0, 0.0, 1.0));
        let b = Shape::path(square_path(5.0, 0.0, 1.0));
        let tree = Shape::group(vec![Shape::group(vec![a.clone(), b.clone()])]);
        let leaves = flatten_leaves(&tree, DEFAULT_MAX_DEPTH).unwrap();
        assert_eq!(leaves, vec![&a, &b]);
    }

    #[test]
    fn test_flatten_depth_limit() {
        let mut tree = Shape::path(square_path(0.0, 0.0, 1.0));
        for _ in 0..5 {
            tree = Shape::group(vec![tree]);
        }
        assert!(flatten_leaves(&tree, 5).is_ok());
        assert_eq!(
            flatten_leaves(&tree, 4),
            Err(ConvertError::DepthExceeded { limit: 4 })
        );
    }

    #[test]
    fn test_group_skips_bad_members() {
        let tree = Shape::group(vec![
            Shape::path(square_path(0.0, 0.0, 1.0)),
            Shape::primitive(Primitive::point(3.0, 3.0)),
            Shape::path(PathData::from_points(&[PointD::new(0.0, 0.0)])),
            Shape::group(vec![Shape::path(square_path(5.0, 0.0, 2.0))]),
        ]);
        let g = Decoder::new().decode(&tree).unwrap();
        let mut areas: Vec<f64> = g.polygons().iter().map(|p| p.area()).collect();
        areas.sort_by(f64::total_cmp);
        assert_eq!(areas.len(), 2);
        assert!((areas[0] - 1.0).abs() < 1e-10);
        assert!((areas[1] - 4.0).abs() < 1e-10);
    }

    #[cfg(feature = "union")]
    #[test]
    fn test_group_overlaps_are_merged() {
        let tree = Shape::group(vec![
            Shape::path(square_path(0.0, 0.0, 2.0)),
            Shape::path(square_path(1.0, 0.0, 2.0)),
        ]);
        let g = Decoder::new().decode(&tree).unwrap();
        assert_eq!(g.num_geometries(), 1);
        assert!((g.area() - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_group_orientation_repair() {
        let cw = PathData::from_points(&[
            PointD::new(0.0, 0.0),
            PointD::new(0.0, 1.0),
            PointD::new(1.0, 1.0),
            PointD::new(1.0, 0.0),
        ]);
        let g = Decoder::new()
            .decode(&Shape::group(vec![Shape::path(cw)]))
            .unwrap();
        assert!(g.polygons()[0].exterior().is_ccw());
    }

    struct CountingEngine;

    impl GeometryEngine for CountingEngine {
        fn repair(&self, polygons: Vec<Polygon>) -> Geometry {
            Geometry::GeometryCollection(
                polygons.into_iter().map(Geometry::Polygon).collect(),
            )
        }
    }

    #[test]
    fn test_custom_engine() {
        let tree = Shape::group(vec![
            Shape::path(square_path(0.0, 0.0, 1.0)),
            Shape::primitive(Primitive::line(0.0, 0.0, 1.0, 1.0)),
        ]);
        let decoder = Decoder::with_engine(DecoderConfig::default(), CountingEngine);
        let g = decoder.decode(&tree).unwrap();
        // Custom engine sees the empty placeholder too.
        assert_eq!(g.num_geometries(), 2);
    }

    #[test]
    fn test_geometry_family_decodes_like_path() {
        let data = PathData::from_points(&[
            PointD::new(0.0, 0.0),
            PointD::new(4.0, 0.0),
            PointD::new(0.0, 3.0),
        ]);
        let g = Decoder::new().decode(&Shape::geometry(data)).unwrap();
        let poly = g.as_polygon().unwrap();
        assert_eq!(poly.exterior().len(), 4);
        assert!((poly.area() - 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_curve_vertex_codes_are_plain_points() {
        let pts = vec![
            PointD::new(0.0, 0.0),
            PointD::new(2.0, 0.0),
            PointD::new(2.0, 2.0),
            PointD::new(0.0, 2.0),
        ];
        let p = PathData::from_parts(
            pts.clone(),
            vec![
                VertexCode::Vertex,
                VertexCode::CurveVertex,
                VertexCode::CurveVertex,
                VertexCode::CurveVertex,
            ],
            true,
        );
        let poly = Decoder::new().decode_path(&p).unwrap();
        let ring = poly.exterior().coords();
        assert_eq!(&ring[..4], &pts[..]);
        assert_eq!(ring[4], pts[0]);
        assert!((poly.area() - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_curve_inside_hole_contour() {
        let mut p = square_path(0.0, 0.0, 10.0);
        p.begin_contour();
        p.vertex(2.0, 2.0);
        p.quadratic_vertex(3.0, 6.0, 4.0, 2.0);
        p.vertex(3.0, 1.0);
        p.end_contour();

        let codes = p.effective_codes();
        assert_eq!(contour_groups(&codes), vec![0, 0, 0, 0, 1, 1, 1, 1]);

        let config = DecoderConfig {
            curve_resolution: 4,
            ..DecoderConfig::default()
        };
        let poly = Decoder::with_config(config).decode_path(&p).unwrap();
        assert_eq!(poly.exterior().len(), 5);
        assert_eq!(poly.num_interior_rings(), 1);
        let hole = poly.interiors()[0].coords();
        // start, 4 samples, trailing vertex, closing point
        assert_eq!(hole.len(), 1 + 4 + 1 + 1);
        // t = 0.5 sample of the arch
        assert!((hole[3].x - 3.0).abs() < 1e-10);
        assert!((hole[3].y - 4.0).abs() < 1e-10);
        assert!(hole.iter().all(|pt| poly.exterior().contains_point(*pt)));
    }
}
