//! OpenDRIVE record model to RoadSpace transform: curve composition along
//! `s`, lane geometry, road markings, object instantiation and CRS
//! propagation (spec §2 "O->R"). Parsing OpenDRIVE XML into the record
//! types this crate consumes is an external collaborator's job; this crate
//! starts from already-parsed [`input::OpenDriveModelInput`] records.
//!
//! [`convert::convert_model`] is the entry point: it builds a complete
//! [`odc_roadspace::RoadspacesModel`] plus an [`odc_report::Report`] of
//! every healing action and failure encountered along the way, per the
//! road-scoped error-handling contract in spec §7.

pub mod convert;
pub mod crs;
pub mod curve;
pub mod error;
pub mod input;
pub mod lane;
pub mod object;
pub mod profile;

pub use convert::convert_model;
pub use crs::{CrsService, PassThroughCrsService};
pub use curve::{build_lateral_shape, build_road_curve};
pub use error::{Error, Result};
pub use input::{
    ConnectionInput, ExternalId, JunctionInput, LaneInput, LaneSectionInput, OpenDriveModelInput, RoadInput, RoadLinkInput,
    RoadObjectGeometryInput, RoadObjectInput,
};
pub use profile::{build_profile, PolynomialRecord};
