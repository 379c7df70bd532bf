//! Lanes within a [`crate::LaneSection`] (spec §3 "Lane").

use odc_base::UnivariateFunction;

/// OpenDRIVE lane type, reduced to the categories the R->C routing table
/// (spec §4.5) actually discriminates on.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LaneType {
    /// Routed to `TrafficSpace`.
    Driving,
    /// Routed to `TrafficSpace`.
    Biking,
    /// Routed to `TrafficSpace`.
    Rail,
    /// Routed to `AuxiliaryTrafficSpace`.
    Sidewalk,
    /// Routed to `AuxiliaryTrafficSpace`.
    Shoulder,
    /// Routed to `AuxiliaryTrafficSpace`.
    Parking,
    /// Routed to `AuxiliaryTrafficSpace`.
    Restricted,
    /// Emits no TrafficSpace feature.
    Curb,
    /// Emits no TrafficSpace feature.
    None,
    /// The single zero-width center lane of a section.
    Center,
}

/// Non-geometric per-lane attributes (spec §3 "material/speed/access/rule
/// attribute lists").
#[derive(Clone, PartialEq, Debug, Default)]
pub struct LaneAttributes {
    pub material: Vec<String>,
    pub speed_limits: Vec<f64>,
    pub access: Vec<String>,
    pub rule: Vec<String>,
}

/// A single road mark painted along a lane boundary.
#[derive(Clone, PartialEq, Debug)]
pub struct RoadMark {
    pub kind: String,
    pub color: String,
    pub width: f64,
}

/// A lane: signed ID, type, width/height profile over the section's local
/// `s`, optional road mark, successor/predecessor lane IDs, and attributes.
#[derive(Clone, Debug)]
pub struct Lane {
    id: i32,
    lane_type: LaneType,
    width: UnivariateFunction,
    height: UnivariateFunction,
    road_mark: Option<RoadMark>,
    successors: Vec<i32>,
    predecessors: Vec<i32>,
    attributes: LaneAttributes,
}

impl Lane {
    /// Builds a lane. `width`/`height` must each be defined over the
    /// section's full local-`s` domain; this is checked by
    /// [`crate::LaneSection::new`], not here.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: i32,
        lane_type: LaneType,
        width: UnivariateFunction,
        height: UnivariateFunction,
        road_mark: Option<RoadMark>,
        successors: Vec<i32>,
        predecessors: Vec<i32>,
        attributes: LaneAttributes,
    ) -> Self {
        Lane { id, lane_type, width, height, road_mark, successors, predecessors, attributes }
    }

    /// The center lane: ID 0, type [`LaneType::Center`], zero width everywhere.
    pub fn center(domain: odc_base::Range) -> Self {
        Lane {
            id: 0,
            lane_type: LaneType::Center,
            width: UnivariateFunction::Constant { value: 0.0, domain },
            height: UnivariateFunction::Constant { value: 0.0, domain },
            road_mark: None,
            successors: Vec::new(),
            predecessors: Vec::new(),
            attributes: LaneAttributes::default(),
        }
    }

    pub fn id(&self) -> i32 { self.id }
    pub fn lane_type(&self) -> LaneType { self.lane_type }
    pub fn width(&self) -> &UnivariateFunction { &self.width }
    pub fn height(&self) -> &UnivariateFunction { &self.height }
    pub fn road_mark(&self) -> Option<&RoadMark> { self.road_mark.as_ref() }
    pub fn successors(&self) -> &[i32] { &self.successors }
    pub fn predecessors(&self) -> &[i32] { &self.predecessors }
    pub fn attributes(&self) -> &LaneAttributes { &self.attributes }

    /// `true` for the lane types the R->C transform routes to a
    /// `TrafficSpace` (spec §4.5).
    pub fn is_traffic(&self) -> bool { matches!(self.lane_type, LaneType::Driving | LaneType::Biking | LaneType::Rail) }

    /// `true` for the lane types routed to an `AuxiliaryTrafficSpace`.
    pub fn is_auxiliary_traffic(&self) -> bool {
        matches!(self.lane_type, LaneType::Sidewalk | LaneType::Shoulder | LaneType::Parking | LaneType::Restricted)
    }

    /// Side of the section reference line: `1` for left (id > 0), `-1` for
    /// right (id < 0), `0` for the center lane.
    pub fn side(&self) -> i32 { self.id.signum() }
}
