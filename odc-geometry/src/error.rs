use thiserror::Error;

/// Result alias for geometry operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building or evaluating curves, surfaces and solids.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// `pointAt`/`affineAt` called with `s` outside `[0, length]` (+tolerance).
    #[error("parameter {0} is outside curve domain [0, {1}]")]
    DomainOutOfRange(f64, f64),
    /// A curve segment's declared length was below tolerance and was dropped.
    #[error("segment length {0} is below tolerance {1}")]
    DegenerateSegment(f64, f64),
    /// Every segment of a composite curve was filtered out as degenerate.
    #[error("composite curve has no remaining segments after filtering")]
    EmptyComposite,
    /// A polygon needs at least 3 vertices.
    #[error("polygon needs at least 3 vertices, got {0}")]
    NotEnoughVertices(usize),
    /// Duplicate (fuzzy-equal) vertices in a polygon or ring.
    #[error("vertex {0} is fuzzily equal to vertex {1}")]
    DuplicateVertices(usize, usize),
    /// Vertices of a `Polygon3D` are not fuzzily coplanar.
    #[error("vertices are not coplanar within tolerance {0}")]
    NotCoplanar(f64),
    /// All vertices are fuzzily colinear, so no plane (or non-degenerate
    /// polygon) can be fit through them.
    #[error("vertices are colinear, no plane can be fit")]
    Colinear,
    /// A non-finite scalar reached a constructor that requires finiteness.
    #[error("non-finite value where a finite scalar was required")]
    NonFiniteValue,
    /// A solid/surface constructor received a non-positive dimension.
    #[error("dimension {1} ({0}) must be positive")]
    NonPositiveDimension(String, f64),
    /// This solid variant is a descriptor only; building its faces requires
    /// the tessellation backend (triangulation / best-fit-plane projection)
    /// and cannot be done from geometry primitives alone.
    #[error("{0} requires the tessellation backend to build its faces")]
    RequiresTessellationBackend(String),
}

impl From<odc_base::Error> for Error {
    fn from(e: odc_base::Error) -> Self {
        match e {
            odc_base::Error::NonFiniteValue => Error::NonFiniteValue,
            odc_base::Error::OutOfDomain(x, a, b) => Error::DomainOutOfRange(x, b - a),
            _ => Error::NonFiniteValue,
        }
    }
}
