//! Plain record types representing already-parsed OpenDRIVE data: the
//! boundary this crate actually operates on (XML parsing is a separate,
//! external concern — see crate docs).
//!
//! These mirror the OpenDRIVE schema's own record shapes (one record per
//! `<geometry>`/`<elevation>`/`<width>`/... element) rather than the
//! `RoadspacesModel`'s resolved domain types, since a single
//! `UnivariateFunction` or `Lane` is usually built by combining several
//! records.

use crate::profile::PolynomialRecord;
use odc_geometry::GeometryRecord;
use odc_roadspace::{ContactPoint, LaneAttributes, RoadMark};
use std::collections::BTreeMap;

/// An OpenDRIVE-native road or junction ID, before resolution to a model key.
pub type ExternalId = u64;

/// One `<lane>` record. `lane_type` is the raw OpenDRIVE string (`"driving"`,
/// `"sidewalk"`, ...); unrecognized values are healed to
/// [`odc_roadspace::LaneType::None`] with a report warning.
#[derive(Clone, Debug)]
pub struct LaneInput {
    pub id: i32,
    pub lane_type: String,
    pub width_records: Vec<PolynomialRecord>,
    pub height_records: Vec<PolynomialRecord>,
    pub road_mark: Option<RoadMark>,
    pub successors: Vec<i32>,
    pub predecessors: Vec<i32>,
    pub attributes: LaneAttributes,
}

/// One `<laneSection>` record. `length` is `None` for every section but the
/// last, whose length is the road's remaining length once all prior
/// sections' declared spans are subtracted.
#[derive(Clone, Debug)]
pub struct LaneSectionInput {
    pub s_start: f64,
    pub left: Vec<LaneInput>,
    pub right: Vec<LaneInput>,
}

/// The shape-specific parameters of a `<object>` record.
#[derive(Clone, Debug)]
pub enum RoadObjectGeometryInput {
    Cuboid { length: f64, width: f64, height: f64 },
    Cylinder { radius: f64, height: f64 },
    Point,
    Outline { outline: Vec<(f64, f64)>, height_records: Option<Vec<PolynomialRecord>> },
    Repeated { s_range: (f64, f64), distance: f64 },
    Rectangle { length: f64, width: f64 },
    Polygon { points: Vec<(f64, f64)> },
}

/// One `<object>` record, curve-relative to its owning road.
#[derive(Clone, Debug)]
pub struct RoadObjectInput {
    pub s: f64,
    pub t: f64,
    pub z_offset: f64,
    pub hdg: f64,
    pub pitch: f64,
    pub roll: f64,
    pub geometry: RoadObjectGeometryInput,
    /// The raw OpenDRIVE `<object type="...">` attribute, e.g. `"tree"`.
    pub object_type: String,
}

/// What a road's `<link>` predecessor/successor points at, before the
/// target is resolved to a model key.
#[derive(Clone, Copy, Debug)]
pub enum RoadLinkInput {
    Road { road: ExternalId, contact: ContactPoint },
    Junction(ExternalId),
}

/// One `<road>` record.
#[derive(Clone, Debug)]
pub struct RoadInput {
    pub external_id: ExternalId,
    pub geometry: Vec<GeometryRecord>,
    pub elevation: Vec<PolynomialRecord>,
    pub superelevation: Vec<PolynomialRecord>,
    pub lateral_shape: Vec<PolynomialRecord>,
    pub lane_sections: Vec<LaneSectionInput>,
    pub objects: Vec<RoadObjectInput>,
    pub predecessor: Option<RoadLinkInput>,
    pub successor: Option<RoadLinkInput>,
}

/// One `<connection>` record inside a `<junction>`.
#[derive(Clone, Debug)]
pub struct ConnectionInput {
    pub incoming_road: ExternalId,
    pub connecting_road: ExternalId,
    pub contact_point: ContactPoint,
    pub lane_links: BTreeMap<i32, i32>,
}

/// One `<junction>` record.
#[derive(Clone, Debug)]
pub struct JunctionInput {
    pub external_id: ExternalId,
    pub connections: Vec<ConnectionInput>,
}

/// An entire already-parsed OpenDRIVE dataset.
#[derive(Clone, Debug, Default)]
pub struct OpenDriveModelInput {
    pub roads: Vec<RoadInput>,
    pub junctions: Vec<JunctionInput>,
}
