use thiserror::Error;

/// Result alias for the RoadSpace to CityGML transform.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while turning a [`odc_roadspace::RoadspacesModel`] into
/// CityGML-ready features. Per spec §7, these are feature-scoped: the
/// caller drops the offending feature and emits a report entry, the
/// dataset continues.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A lane or object surface/solid could not be evaluated or tessellated.
    #[error("geometry: {0}")]
    Geometry(odc_geometry::Error),
    /// The tessellation backend failed to stitch a sweep/polyhedron.
    #[error("tessellation: {0}")]
    Tessellate(odc_tessellate::Error),
    /// A reference into the roadspace model (road/junction/lane) was
    /// invalid.
    #[error("roadspace: {0}")]
    Roadspace(odc_roadspace::Error),
    /// A lane or lane section referenced by a cross-reference lookup
    /// doesn't exist in the model.
    #[error("unknown lane {0:?}")]
    UnknownLane(odc_roadspace::LaneId),
}

impl From<odc_geometry::Error> for Error {
    fn from(e: odc_geometry::Error) -> Self { Error::Geometry(e) }
}

impl From<odc_tessellate::Error> for Error {
    fn from(e: odc_tessellate::Error) -> Self { Error::Tessellate(e) }
}

impl From<odc_roadspace::Error> for Error {
    fn from(e: odc_roadspace::Error) -> Self { Error::Roadspace(e) }
}
