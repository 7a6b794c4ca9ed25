//! # pathgeom
//!
//! Two-way conversion between drawing shapes and polygon geometry.
//!
//! A shape is either a vertex-command path (straight vertices, quadratic and
//! cubic Bezier segments, contour breaks), a parametric primitive (ellipse,
//! rectangle, triangle, quad, arc), or a group of shapes. Geometry is the
//! polygonal model used for measurement and spatial operations: rings,
//! polygons with holes, multi-geometries and collections.
//!
//! ## Architecture
//!
//! 1. **Shape model** ([`shape`]) records command streams with
//!    `begin_shape / vertex / begin_contour / end_contour / end_shape`.
//! 2. **Decoder** ([`decode`]) splits streams into contours, tessellates
//!    curves with the [`curves`] sampler, expands primitives with the
//!    [`primitive`] synthesizer, and merges groups through a
//!    [`GeometryEngine`].
//! 3. **Encoder** ([`encode`]) writes geometry back as paths and groups.
//! 4. **Helpers** ([`ops`], [`outline`]) measure and sample converted shapes.
//!
//! ```
//! use pathgeom::{from_shape, to_shape, PointD, Shape};
//!
//! let square = Shape::polygon(&[
//!     PointD::new(0.0, 0.0),
//!     PointD::new(2.0, 0.0),
//!     PointD::new(2.0, 2.0),
//!     PointD::new(0.0, 2.0),
//! ]);
//! let geometry = from_shape(&square)?;
//! assert_eq!(geometry.area(), 4.0);
//!
//! let back = to_shape(Some(&geometry))?;
//! assert_eq!(back.vertex_count(), 4);
//! # Ok::<(), pathgeom::ConvertError>(())
//! ```

// Foundation types & math
pub mod basics;
pub mod error;
pub mod math;
pub mod style;

// Shape and geometry models
pub mod engine;
pub mod geometry;
pub mod shape;

// Generators
pub mod arc;
pub mod curves;
pub mod ellipse;
pub mod primitive;

// Conversion
pub mod decode;
pub mod encode;

// Helpers
pub mod ops;
pub mod outline;

pub use basics::{PointD, RectD, VertexCode};
pub use decode::{Decoder, DecoderConfig, OuterRing};
pub use encode::{Encoder, EncoderConfig};
pub use engine::{DefaultEngine, GeometryEngine, OrientationRepair};
#[cfg(feature = "union")]
pub use engine::UnionRepair;
pub use error::{ConvertError, Result};
pub use geometry::{Geometry, GeometryType, LineString, LinearRing, Polygon};
pub use shape::{PathData, Primitive, PrimitiveKind, Shape, ShapeBody, ShapeFamily};
pub use style::{Rgba8, Style};

/// Decode `shape` with the default configuration.
pub fn from_shape(shape: &Shape) -> Result<Geometry> {
    Decoder::new().decode(shape)
}

/// Encode `geometry` with the default configuration and highlight style.
pub fn to_shape(geometry: Option<&Geometry>) -> Result<Shape> {
    Encoder::new().encode(geometry)
}

// ============================================================================
// Tests
// ============================================================================
