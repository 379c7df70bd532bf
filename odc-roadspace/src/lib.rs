//! The RoadSpace domain model (spec §3): roads, lane sections, lanes,
//! roadspace objects, junctions and connections, addressed through a
//! central arena ([`RoadspacesModel`]) by opaque key rather than by shared
//! owning pointer (spec Design Notes §9).

pub mod error;
pub mod identifier;
pub mod junction;
pub mod lane;
pub mod lane_section;
pub mod model;
pub mod road;
pub mod roadspace_object;
pub mod topology;

pub use error::{Error, Result};
pub use identifier::{ConnectionId, JunctionId, LaneId, LaneSectionId, RoadId, RoadObjectId};
pub use junction::{Connection, Junction};
pub use lane::{Lane, LaneAttributes, LaneType, RoadMark};
pub use lane_section::LaneSection;
pub use model::RoadspacesModel;
pub use road::{ContactPoint, Road, RoadLink};
pub use roadspace_object::{RoadObjectGeometry, RoadObjectOrientation, RoadspaceObject};
