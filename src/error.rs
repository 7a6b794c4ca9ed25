//! Conversion errors.

use thiserror::Error;

/// Errors reported by shape/geometry conversion.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConvertError {
    /// A path shape needs at least three vertices to form a polygon.
    #[error("shape has {count} vertices, a polygon needs at least 3")]
    TooFewVertices { count: usize },
    /// The vertex codes imply a different number of vertices than stored.
    #[error("vertex codes consume {expected} vertices but the shape holds {actual}")]
    CodeCountMismatch { expected: usize, actual: usize },
    /// A contour break is not followed by a vertex-producing code.
    #[error("contour break at code {index} is not followed by a vertex")]
    BreakWithoutVertex { index: usize },
    /// A curve segment has no preceding on-curve vertex.
    #[error("curve at vertex {index} has no start point")]
    CurveWithoutStart { index: usize },
    /// A primitive carries fewer parameters than its kind requires.
    #[error("{kind} primitive needs {expected} parameters, got {actual}")]
    MissingParameters {
        kind: &'static str,
        expected: usize,
        actual: usize,
    },
    /// A ring has too few points to enclose an area.
    #[error("ring with {len} points cannot be closed into a polygon ring")]
    OpenRing { len: usize },
    /// Nested groups or collections exceed the configured depth.
    #[error("nesting deeper than {limit} levels")]
    DepthExceeded { limit: usize },
    /// Requested point spacing is longer than the outline itself.
    #[error("point spacing {distance} exceeds outline length {length}")]
    InterPointTooLarge { distance: f64, length: f64 },
    /// The operation needs a non-empty geometry.
    #[error("geometry is empty")]
    EmptyGeometry,
}

pub type Result<T> = std::result::Result<T, ConvertError>;
