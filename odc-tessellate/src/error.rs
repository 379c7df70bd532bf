use thiserror::Error;

/// Result alias for tessellation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while triangulating rings or building polyhedra/sweeps.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Every stage of the triangulator fallback chain failed.
    #[error("triangulation failed: all fallback stages exhausted")]
    TriangulationFailure,
    /// A ring has fewer than 3 vertices.
    #[error("ring needs at least 3 vertices, got {0}")]
    NotEnoughVertices(usize),
    /// Fan triangulation's pivot vertex (index 0) duplicates another vertex.
    #[error("fan triangulation pivot duplicates vertex {0}")]
    DegeneratePivot(usize),
    /// A vertical outline has fewer than 3 distinct elements after cleanup.
    #[error("vertical outline needs at least 3 distinct elements after cleanup, got {0}")]
    NotEnoughOutlineElements(usize),
    /// Every base point of a vertical outline is colinear (span dimension < 2).
    #[error("vertical outline base points are colinear")]
    ColinearBasePoints,
    /// A geometry primitive underlying a ring or polygon was malformed.
    #[error(transparent)]
    Geometry(#[from] odc_geometry::Error),
}
