//! Geometry engine seam.
//!
//! The decoder merges the polygons of a flattened group through
//! [`GeometryEngine::repair`], the zero-distance clean-up pass of a full
//! computational-geometry library. With the `union` feature (on by default)
//! [`UnionRepair`] dissolves overlapping and touching members into one
//! area; [`OrientationRepair`] only normalizes and keeps overlaps.

use crate::geometry::{Geometry, Polygon};

/// Operations the converter needs from a geometry engine.
pub trait GeometryEngine {
    /// Merge a set of polygons into one valid geometry.
    fn repair(&self, polygons: Vec<Polygon>) -> Geometry;
}

/// Engine used by [`Decoder::new`](crate::decode::Decoder::new).
#[cfg(feature = "union")]
pub type DefaultEngine = UnionRepair;
/// Engine used by [`Decoder::new`](crate::decode::Decoder::new).
#[cfg(not(feature = "union"))]
pub type DefaultEngine = OrientationRepair;

/// Drops empty polygons and arranges ring orientation, exteriors
/// counter-clockwise and holes clockwise. Overlaps are kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrientationRepair;

impl OrientationRepair {
    /// Arrange the ring orientation of one polygon in place.
    pub fn arrange_orientation(polygon: &mut Polygon) {
        if polygon.exterior().signed_area() < 0.0 {
            polygon.exterior_mut().reverse();
        }
        for hole in polygon.interiors_mut() {
            if hole.signed_area() > 0.0 {
                hole.reverse();
            }
        }
    }
}

impl GeometryEngine for OrientationRepair {
    fn repair(&self, polygons: Vec<Polygon>) -> Geometry {
        let total = polygons.len();
        let mut kept: Vec<Polygon> = polygons.into_iter().filter(|p| !p.is_empty()).collect();
        if kept.len() < total {
            log::debug!("repair dropped {} empty polygons", total - kept.len());
        }
        for p in &mut kept {
            Self::arrange_orientation(p);
        }
        Geometry::MultiPolygon(kept)
    }
}

impl<E: GeometryEngine + ?Sized> GeometryEngine for &E {
    fn repair(&self, polygons: Vec<Polygon>) -> Geometry {
        (**self).repair(polygons)
    }
}

// ============================================================================
// Boolean union
// ============================================================================

#[cfg(feature = "union")]
pub use boolean::UnionRepair;

#[cfg(feature = "union")]
mod boolean {
    use geo::{BooleanOps, Coord};

    use super::{GeometryEngine, OrientationRepair};
    use crate::basics::PointD;
    use crate::geometry::{Geometry, LinearRing, Polygon};

    /// Unions all members with `geo`'s boolean operations, so overlapping
    /// or edge-sharing polygons come out as one. Zero-area members are
    /// dropped and the result is oriented like [`OrientationRepair`].
    #[derive(Debug, Clone, Copy, Default)]
    pub struct UnionRepair;

    impl GeometryEngine for UnionRepair {
        fn repair(&self, polygons: Vec<Polygon>) -> Geometry {
            let mut merged = geo::MultiPolygon::<f64>::new(Vec::new());
            for p in polygons.iter().filter(|p| p.area() > 0.0) {
                merged = merged.union(&geo::MultiPolygon::new(vec![to_geo(p)]));
            }

            let mut out = Vec::with_capacity(merged.0.len());
            for p in &merged.0 {
                match from_geo(p) {
                    Some(mut poly) => {
                        OrientationRepair::arrange_orientation(&mut poly);
                        out.push(poly);
                    }
                    None => log::debug!("union produced a degenerate polygon, dropped"),
                }
            }
            log::debug!("union merged {} polygons into {}", polygons.len(), out.len());
            Geometry::MultiPolygon(out)
        }
    }

    fn to_geo_ring(ring: &LinearRing) -> geo::LineString<f64> {
        geo::LineString::new(ring.coords().iter().map(|c| Coord { x: c.x, y: c.y }).collect())
    }

    fn to_geo(polygon: &Polygon) -> geo::Polygon<f64> {
        geo::Polygon::new(
            to_geo_ring(polygon.exterior()),
            polygon.interiors().iter().map(to_geo_ring).collect(),
        )
    }

    fn from_geo_ring(ring: &geo::LineString<f64>) -> Option<LinearRing> {
        LinearRing::closed(ring.coords().map(|c| PointD::new(c.x, c.y)).collect()).ok()
    }

    fn from_geo(polygon: &geo::Polygon<f64>) -> Option<Polygon> {
        let exterior = from_geo_ring(polygon.exterior())?;
        let holes = polygon.interiors().iter().filter_map(from_geo_ring).collect();
        Some(Polygon::new(exterior, holes))
    }
}

// ============================================================================
// Tests
// ============================================================================
