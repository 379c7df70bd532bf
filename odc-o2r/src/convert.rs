//! Top-level orchestration: builds a [`RoadspacesModel`] from an
//! [`OpenDriveModelInput`] (spec §3, §4.1-4.3, §7).
//!
//! Road and junction external IDs are resolved to model keys via a
//! two-pass scheme: every external ID is mapped to the [`RoadId`]/
//! [`JunctionId`] its input-list position will receive *before* any road
//! or junction is actually built, so a road's `predecessor`/`successor`
//! can reference a road appearing later in the list. To keep that
//! prediction valid, every input road/junction is inserted into the model
//! exactly once, in list order, even when its own construction fails — a
//! failed entry gets a minimal placeholder instead of being skipped, so a
//! later road's resolved link still lands on the key the map predicted.
//! The placeholder carries no lanes or objects and is always preceded by
//! a fatal [`odc_report::ReportEntry`] naming the failure, per spec §7's
//! "abort the offending road" contract.

use crate::curve::{build_lateral_shape, build_road_curve};
use crate::error::{Error, Result};
use crate::input::{ExternalId, JunctionInput, OpenDriveModelInput, RoadInput, RoadLinkInput};
use crate::lane::build_lane_section;
use crate::object::{build_object_geometry, build_object_orientation};
use odc_base::{Range, UnivariateFunction};
use odc_geometry::{compose_plan_view, AbstractCurve3D, GeometryKind, GeometryRecord, RoadCurve3D};
use odc_report::Report;
use odc_roadspace::{Junction, JunctionId, Lane, LaneSection, LaneSectionId, Road, RoadId, RoadLink, RoadspaceObject, RoadspacesModel};
use rustc_hash::FxHashMap;

/// Builds a complete [`RoadspacesModel`] plus a [`Report`] of every healing
/// action, non-fatal error and fatal abort encountered along the way.
pub fn convert_model(input: &OpenDriveModelInput, tolerance: f64) -> (RoadspacesModel, Report) {
    let mut report = Report::new();
    let mut model = RoadspacesModel::new();

    let road_id_map: FxHashMap<ExternalId, RoadId> =
        input.roads.iter().enumerate().map(|(i, r)| (r.external_id, RoadId(i as u64))).collect();
    let junction_id_map: FxHashMap<ExternalId, JunctionId> =
        input.junctions.iter().enumerate().map(|(i, j)| (j.external_id, JunctionId(i as u64))).collect();

    for road_input in &input.roads {
        let location = format!("road/{}", road_input.external_id);
        match build_road(road_input, &road_id_map, &junction_id_map, tolerance, &mut report, &location) {
            Ok(road) => {
                let road_id = model.insert_road(|_| road);
                insert_objects(&mut model, road_input, road_id, &mut report, &location);
            }
            Err(e) => {
                report.fatal(e.to_string(), location.clone());
                model.insert_road(degenerate_road);
            }
        }
    }

    for junction_input in &input.junctions {
        let location = format!("junction/{}", junction_input.external_id);
        match build_junction(junction_input, &model, &road_id_map, &junction_id_map, &location) {
            Ok(junction) => {
                model.insert_junction(|_| junction);
            }
            Err(e) => {
                report.fatal(e.to_string(), location.clone());
                model.insert_junction(Junction::new);
            }
        }
    }

    (model, report)
}

fn build_road(
    input: &RoadInput,
    road_id_map: &FxHashMap<ExternalId, RoadId>,
    junction_id_map: &FxHashMap<ExternalId, JunctionId>,
    tolerance: f64,
    report: &mut Report,
    location: &str,
) -> Result<Road> {
    let id = *road_id_map.get(&input.external_id).expect("road_id_map covers every input road");

    let (curve, warnings) = build_road_curve(input, tolerance)?;
    for w in warnings {
        report.warn(
            format!("plan-view discontinuity: distance gap {:.4}, angle gap {:.4}", w.distance_gap, w.angle_gap),
            format!("{location}/geometry/{}", w.segment_index),
        );
    }
    let lateral_shape = build_lateral_shape(input, curve.length(), tolerance)?;

    let mut sorted_sections = input.lane_sections.clone();
    sorted_sections.sort_by(|a, b| a.s_start.partial_cmp(&b.s_start).unwrap());
    if sorted_sections.is_empty() {
        return Err(Error::EmptyProfile(format!("{location} has no lane sections")));
    }

    let mut lane_sections = Vec::with_capacity(sorted_sections.len());
    for (index, section_input) in sorted_sections.iter().enumerate() {
        let next_start = sorted_sections.get(index + 1).map(|s| s.s_start).unwrap_or(curve.length());
        let length = (next_start - section_input.s_start).max(0.0);
        let section_location = format!("{location}/section/{index}");
        let section_id = LaneSectionId { road: id, index };
        let section = build_lane_section(section_id, section_input, length, tolerance, report, &section_location)?;
        lane_sections.push(section);
    }

    let predecessor = resolve_link(&input.predecessor, road_id_map, junction_id_map)?;
    let successor = resolve_link(&input.successor, road_id_map, junction_id_map)?;

    let road = Road::new(id, curve, lateral_shape, lane_sections, predecessor, successor);
    road.validate_coverage(tolerance).map_err(|e| Error::Roadspace(location.to_string(), e))?;
    Ok(road)
}

fn resolve_link(
    link: &Option<RoadLinkInput>,
    road_id_map: &FxHashMap<ExternalId, RoadId>,
    junction_id_map: &FxHashMap<ExternalId, JunctionId>,
) -> Result<Option<RoadLink>> {
    match link {
        None => Ok(None),
        Some(RoadLinkInput::Road { road, contact }) => {
            let target = road_id_map.get(road).copied().ok_or_else(|| Error::DanglingReference("road", road.to_string()))?;
            Ok(Some(RoadLink::Road { road: target, contact: *contact }))
        }
        Some(RoadLinkInput::Junction(junction)) => {
            let target =
                junction_id_map.get(junction).copied().ok_or_else(|| Error::DanglingReference("junction", junction.to_string()))?;
            Ok(Some(RoadLink::Junction(target)))
        }
    }
}

fn build_junction(
    input: &JunctionInput,
    model: &RoadspacesModel,
    road_id_map: &FxHashMap<ExternalId, RoadId>,
    junction_id_map: &FxHashMap<ExternalId, JunctionId>,
    location: &str,
) -> Result<Junction> {
    let id = *junction_id_map.get(&input.external_id).expect("junction_id_map covers every input junction");
    let mut junction = Junction::new(id);
    for (index, connection) in input.connections.iter().enumerate() {
        let incoming = road_id_map
            .get(&connection.incoming_road)
            .copied()
            .ok_or_else(|| Error::DanglingReference("road", format!("{location}/connection/{index} incoming {}", connection.incoming_road)))?;
        let connecting = road_id_map.get(&connection.connecting_road).copied().ok_or_else(|| {
            Error::DanglingReference("road", format!("{location}/connection/{index} connecting {}", connection.connecting_road))
        })?;

        let connecting_road = model.road(connecting).map_err(|e| Error::Roadspace(location.to_string(), e))?;
        let connecting_index = match connection.contact_point {
            odc_roadspace::ContactPoint::Start => 0,
            odc_roadspace::ContactPoint::End => connecting_road.lane_sections().len().saturating_sub(1),
        };
        if let Some(connecting_section) = connecting_road.lane_sections().get(connecting_index) {
            for &connecting_lane in connection.lane_links.values() {
                if connecting_section.lane(connecting_lane).is_none() {
                    return Err(Error::Roadspace(
                        format!("{location}/connection/{index}"),
                        odc_roadspace::Error::DanglingLaneLink(connecting_lane),
                    ));
                }
            }
        }

        let incoming_road = model.road(incoming).map_err(|e| Error::Roadspace(location.to_string(), e))?;
        if let Some(incoming_index) = incoming_road.contact_with_junction(id).map(|contact| match contact {
            odc_roadspace::ContactPoint::Start => 0,
            odc_roadspace::ContactPoint::End => incoming_road.lane_sections().len().saturating_sub(1),
        }) {
            if let Some(incoming_section) = incoming_road.lane_sections().get(incoming_index) {
                for &incoming_lane in connection.lane_links.keys() {
                    if incoming_section.lane(incoming_lane).is_none() {
                        return Err(Error::Roadspace(
                            format!("{location}/connection/{index}"),
                            odc_roadspace::Error::DanglingLaneLink(incoming_lane),
                        ));
                    }
                }
            }
        }

        junction.push_connection(incoming, connecting, connection.contact_point, connection.lane_links.clone());
    }
    Ok(junction)
}

fn insert_objects(model: &mut RoadspacesModel, road_input: &RoadInput, road_id: RoadId, report: &mut Report, location: &str) {
    for (index, object_input) in road_input.objects.iter().enumerate() {
        let object_location = format!("{location}/object/{index}");
        let geometry = match build_object_geometry(&object_input.geometry) {
            Ok(g) => g,
            Err(e) => {
                report.error(e.to_string(), object_location);
                continue;
            }
        };
        let orientation = build_object_orientation(object_input.hdg, object_input.pitch, object_input.roll);
        model.insert_object(|id| {
            RoadspaceObject::new(
                id,
                road_id,
                object_input.s,
                object_input.t,
                object_input.z_offset,
                orientation,
                geometry,
                object_input.object_type.clone(),
            )
        });
    }
}

/// A minimal, always-valid road used to occupy a failed road's predicted
/// [`RoadId`] slot: a 1-meter flat line with a single lanesection holding
/// only the center lane, no predecessor/successor links, no objects.
fn degenerate_road(id: RoadId) -> Road {
    let records = vec![GeometryRecord { s: 0.0, x: 0.0, y: 0.0, hdg: 0.0, length: 1.0, kind: GeometryKind::Line }];
    let (xy, _) = compose_plan_view(&records, 1e-6, 1e-6, 1e-6).expect("degenerate curve is always valid");
    let domain = Range::closed(0.0, 1.0).expect("finite bounds");
    let flat = UnivariateFunction::Constant { value: 0.0, domain };
    let curve = RoadCurve3D::new(xy, flat.clone(), flat.clone());
    let section_id = LaneSectionId { road: id, index: 0 };
    let section =
        LaneSection::new(section_id, 0.0, 1.0, Vec::new(), Lane::center(domain), Vec::new()).expect("degenerate section is always valid");
    Road::new(id, curve, flat, vec![section], None, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{ConnectionInput, LaneInput, LaneSectionInput};
    use crate::profile::PolynomialRecord;
    use odc_roadspace::LaneAttributes;
    use std::collections::BTreeMap;

    fn driving_lane(id: i32) -> LaneInput {
        LaneInput {
            id,
            lane_type: "driving".to_string(),
            width_records: vec![PolynomialRecord { s_offset: 0.0, a: 3.5, ..Default::default() }],
            height_records: Vec::new(),
            road_mark: None,
            successors: Vec::new(),
            predecessors: Vec::new(),
            attributes: LaneAttributes::default(),
        }
    }

    fn one_road(external_id: ExternalId, predecessor: Option<RoadLinkInput>, successor: Option<RoadLinkInput>) -> RoadInput {
        RoadInput {
            external_id,
            geometry: vec![GeometryRecord { s: 0.0, x: 0.0, y: 0.0, hdg: 0.0, length: 50.0, kind: GeometryKind::Line }],
            elevation: Vec::new(),
            superelevation: Vec::new(),
            lateral_shape: Vec::new(),
            lane_sections: vec![LaneSectionInput { s_start: 0.0, left: vec![driving_lane(1)], right: vec![driving_lane(-1)] }],
            objects: Vec::new(),
            predecessor,
            successor,
        }
    }

    #[test]
    fn two_linked_roads_resolve_to_each_others_keys() {
        let input = OpenDriveModelInput {
            roads: vec![
                one_road(10, None, Some(RoadLinkInput::Road { road: 20, contact: odc_roadspace::ContactPoint::Start })),
                one_road(20, Some(RoadLinkInput::Road { road: 10, contact: odc_roadspace::ContactPoint::End }), None),
            ],
            junctions: Vec::new(),
        };
        let (model, report) = convert_model(&input, 1e-7);
        assert!(report.is_success());
        let road_a = model.road(RoadId(0)).unwrap();
        let road_b = model.road(RoadId(1)).unwrap();
        assert_eq!(road_a.successor(), Some(RoadLink::Road { road: RoadId(1), contact: odc_roadspace::ContactPoint::Start }));
        assert_eq!(road_b.predecessor(), Some(RoadLink::Road { road: RoadId(0), contact: odc_roadspace::ContactPoint::End }));
    }

    #[test]
    fn dangling_predecessor_aborts_only_that_road() {
        let input = OpenDriveModelInput {
            roads: vec![one_road(1, Some(RoadLinkInput::Road { road: 999, contact: odc_roadspace::ContactPoint::Start }), None)],
            junctions: Vec::new(),
        };
        let (model, report) = convert_model(&input, 1e-7);
        assert!(!report.is_success());
        // the road's slot still exists, as a degenerate placeholder.
        assert!(model.road(RoadId(0)).is_ok());
    }

    #[test]
    fn lane_section_not_starting_at_zero_is_a_fatal_coverage_gap() {
        let mut road = one_road(1, None, None);
        road.lane_sections = vec![LaneSectionInput { s_start: 5.0, left: vec![driving_lane(1)], right: vec![driving_lane(-1)] }];
        let input = OpenDriveModelInput { roads: vec![road], junctions: Vec::new() };
        let (model, report) = convert_model(&input, 1e-7);
        assert!(!report.is_success());
        assert!(model.road(RoadId(0)).is_ok());
    }

    #[test]
    fn junction_connection_with_valid_lane_links_builds() {
        let input = OpenDriveModelInput {
            roads: vec![
                one_road(10, None, Some(RoadLinkInput::Junction(100))),
                one_road(20, None, None),
            ],
            junctions: vec![JunctionInput {
                external_id: 100,
                connections: vec![ConnectionInput {
                    incoming_road: 10,
                    connecting_road: 20,
                    contact_point: odc_roadspace::ContactPoint::Start,
                    lane_links: BTreeMap::from([(1, -1)]),
                }],
            }],
        };
        let (model, report) = convert_model(&input, 1e-7);
        assert!(report.is_success());
        assert!(model.junction(JunctionId(0)).is_ok());
    }

    #[test]
    fn junction_connection_with_dangling_lane_link_is_fatal() {
        let input = OpenDriveModelInput {
            roads: vec![
                one_road(10, None, Some(RoadLinkInput::Junction(100))),
                one_road(20, None, None),
            ],
            junctions: vec![JunctionInput {
                external_id: 100,
                connections: vec![ConnectionInput {
                    incoming_road: 10,
                    connecting_road: 20,
                    contact_point: odc_roadspace::ContactPoint::Start,
                    lane_links: BTreeMap::from([(1, -99)]),
                }],
            }],
        };
        let (_model, report) = convert_model(&input, 1e-7);
        assert!(!report.is_success());
    }

    #[test]
    fn forward_reference_to_a_later_road_resolves() {
        let input = OpenDriveModelInput {
            roads: vec![
                one_road(1, None, Some(RoadLinkInput::Road { road: 2, contact: odc_roadspace::ContactPoint::Start })),
                one_road(2, None, None),
            ],
            junctions: Vec::new(),
        };
        let (model, report) = convert_model(&input, 1e-7);
        assert!(report.is_success());
        let road_a = model.road(RoadId(0)).unwrap();
        assert_eq!(road_a.successor(), Some(RoadLink::Road { road: RoadId(1), contact: odc_roadspace::ContactPoint::Start }));
    }
}
