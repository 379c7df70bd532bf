use thiserror::Error;

/// Result alias for the OpenDRIVE-record to RoadSpace transform.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building a [`odc_roadspace::RoadspacesModel`] from
/// OpenDRIVE record input. Per spec §7, these are road-scoped: the caller
/// aborts the offending road and emits a fatal report entry, the dataset
/// continues.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A road's plan-view geometry could not be composed into a curve.
    #[error("road {0}: {1}")]
    Geometry(String, odc_geometry::Error),
    /// A lane section, lane or object could not be built.
    #[error("road {0}: {1}")]
    Roadspace(String, odc_roadspace::Error),
    /// A road, junction or lane reference in the input named something
    /// that was never defined.
    #[error("dangling reference to {0} {1}")]
    DanglingReference(&'static str, String),
    /// A piecewise profile (width, height, elevation, superelevation) has
    /// no records, or its records don't cover the declared domain.
    #[error("empty or non-covering profile for {0}")]
    EmptyProfile(String),
}

impl From<odc_base::Error> for Error {
    fn from(e: odc_base::Error) -> Self { Error::Geometry(String::new(), odc_geometry::Error::from(e)) }
}
