use thiserror::Error;

/// Result alias for roadspace-model operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building or looking up entities in a [`crate::RoadspacesModel`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// No road with this ID exists in the model.
    #[error("unknown road {0:?}")]
    UnknownRoad(crate::identifier::RoadId),
    /// No roadspace object with this ID exists in the model.
    #[error("unknown roadspace object {0:?}")]
    UnknownRoadObject(crate::identifier::RoadObjectId),
    /// No lane section at this index on this road.
    #[error("unknown lane section {0:?}")]
    UnknownLaneSection(crate::identifier::LaneSectionId),
    /// No lane with this ID in this lane section.
    #[error("unknown lane {0:?}")]
    UnknownLane(crate::identifier::LaneId),
    /// No junction with this ID exists in the model.
    #[error("unknown junction {0:?}")]
    UnknownJunction(crate::identifier::JunctionId),
    /// No connection at this index in this junction.
    #[error("unknown connection {0:?}")]
    UnknownConnection(crate::identifier::ConnectionId),
    /// Left/right lane IDs are not gapless (`{1..count}` / `{-1..-count}`).
    #[error("lane numbering is not gapless: {0}")]
    InvalidLaneNumbering(String),
    /// A road's lane-section s-intervals do not fuzzily cover `[0, length]`.
    #[error("lane sections do not cover [0, {0}] within tolerance {1}")]
    LaneSectionCoverageGap(f64, f64),
    /// A connection's lane-link table references a lane that does not exist
    /// in the connecting road's contact section.
    #[error("connection lane link references non-existent lane {0}")]
    DanglingLaneLink(i32),
    /// A required scalar was non-finite.
    #[error("non-finite value where a finite scalar was required")]
    NonFiniteValue,
    /// `Identifier::from_attributes` received a malformed attribute map.
    #[error("invalid identifier attributes: {0}")]
    InvalidAttributes(String),
}

impl From<odc_base::Error> for Error {
    fn from(_: odc_base::Error) -> Self { Error::NonFiniteValue }
}

impl From<odc_geometry::Error> for Error {
    fn from(_: odc_geometry::Error) -> Self { Error::NonFiniteValue }
}
