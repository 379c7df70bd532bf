//! Routes lanes and roadspace objects to their CityGML module (spec §4.5
//! "Routing").

use crate::config::CityGmlVersion;
use odc_roadspace::{Lane, LaneType};

/// The CityGML module/feature family a RoadSpace entity is routed to.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CityGmlModule {
    TrafficSpace,
    AuxiliaryTrafficSpace,
    Marking,
    Building,
    CityFurniture,
    Vegetation,
    GenericOccupiedSpace,
}

/// Routes a lane to its CityGML module, `None` for lane types that emit no
/// feature at all (curb, none) — spec §4.5 names this split directly via
/// [`Lane::is_traffic`]/[`Lane::is_auxiliary_traffic`].
pub fn route_lane(lane: &Lane) -> Option<CityGmlModule> {
    if lane.is_traffic() {
        Some(CityGmlModule::TrafficSpace)
    } else if lane.is_auxiliary_traffic() {
        Some(CityGmlModule::AuxiliaryTrafficSpace)
    } else {
        None
    }
}

/// Routes a raw OpenDRIVE `<object type="...">` string to a CityGML
/// module. The OpenDRIVE schema does not constrain this string to an
/// enumerated list (XML parsing of the attribute vocabulary is out of
/// scope for this crate), so this table is this transform's own decision,
/// total over every string including ones it doesn't recognize (spec §4.5:
/// "a total function over the closed set of types" — closed by falling
/// back to `GenericOccupiedSpace`, documented in DESIGN.md).
///
/// `--convert-to-citygml2` (spec §6) removes the `CityFurniture` module
/// from CityGML 2; under [`CityGmlVersion::V2`] those types route to
/// `GenericOccupiedSpace` instead.
pub fn route_object(object_type: &str, version: CityGmlVersion) -> CityGmlModule {
    let module = match object_type {
        "building" => CityGmlModule::Building,
        "tree" | "vegetation" => CityGmlModule::Vegetation,
        "streetLamp" | "pole" | "gantry" | "railing" | "trafficIsland" => CityGmlModule::CityFurniture,
        "parkingSpace" => CityGmlModule::AuxiliaryTrafficSpace,
        "roadMark" | "crossWalk" => CityGmlModule::Marking,
        _ => CityGmlModule::GenericOccupiedSpace,
    };
    if version == CityGmlVersion::V2 && module == CityGmlModule::CityFurniture {
        CityGmlModule::GenericOccupiedSpace
    } else {
        module
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use odc_base::{Range, UnivariateFunction};
    use odc_roadspace::LaneAttributes;

    fn lane_of(lane_type: LaneType) -> Lane {
        let domain = Range::closed(0.0, 10.0).unwrap();
        Lane::new(
            1,
            lane_type,
            UnivariateFunction::Constant { value: 3.0, domain },
            UnivariateFunction::Constant { value: 0.0, domain },
            None,
            Vec::new(),
            Vec::new(),
            LaneAttributes::default(),
        )
    }

    #[test]
    fn driving_lane_routes_to_traffic_space() {
        assert_eq!(route_lane(&lane_of(LaneType::Driving)), Some(CityGmlModule::TrafficSpace));
    }

    #[test]
    fn sidewalk_routes_to_auxiliary_traffic_space() {
        assert_eq!(route_lane(&lane_of(LaneType::Sidewalk)), Some(CityGmlModule::AuxiliaryTrafficSpace));
    }

    #[test]
    fn curb_and_none_emit_no_feature() {
        assert_eq!(route_lane(&lane_of(LaneType::Curb)), None);
        assert_eq!(route_lane(&lane_of(LaneType::None)), None);
    }

    #[test]
    fn unrecognized_object_type_falls_back_to_generic() {
        assert_eq!(route_object("gargoyle", CityGmlVersion::V3), CityGmlModule::GenericOccupiedSpace);
    }

    #[test]
    fn city_furniture_demotes_to_generic_under_citygml2() {
        assert_eq!(route_object("streetLamp", CityGmlVersion::V3), CityGmlModule::CityFurniture);
        assert_eq!(route_object("streetLamp", CityGmlVersion::V2), CityGmlModule::GenericOccupiedSpace);
    }
}
