//! RoadSpace model to CityGML transform (spec §2 "R->C", §4.5): routes
//! lanes and roadspace objects to their CityGML module, builds each
//! feature's curve-relative geometry at the granularity `TransformConfig`
//! asks for, fills the gaps plain per-lane tessellation leaves open, and
//! resolves lane-topology cross-references. Serializing the result to
//! GML/XML is an external collaborator's job; this crate stops at typed
//! feature geometry plus ID/cross-reference strings.

pub mod boundary;
pub mod config;
pub mod error;
pub mod filler;
pub mod ids;
pub mod lane_geometry;
pub mod lod;
pub mod object_geometry;
pub mod routing;
pub mod transform;

pub use config::{CityGmlVersion, TransformConfig};
pub use error::{Error, Result};
pub use ids::gml_id;
pub use lod::{FaceCutout, FeatureGeometry, GeometryRef, Lod};
pub use routing::{route_lane, route_object, CityGmlModule};
pub use transform::{transform_model, LaneFeature, ObjectFeature, TransformOutput};
