//! Lane-topology resolution across junctions (spec §4.4).

use crate::error::Result;
use crate::identifier::{LaneId, LaneSectionId};
use crate::model::RoadspacesModel;
use crate::road::{ContactPoint, RoadLink};

/// The successor lanes of `lane`, per spec §4.4.
///
/// For a lane in a non-terminal section, successors live in the next
/// section of the same road. For a lane in the road's last section: if the
/// road has a successor road, successors come from that road's first (or
/// last, if the contact point is `End`) section; if it has a successor
/// junction, successors come from every connection whose incoming road is
/// this one, in the junction's connection order (the tie-break for
/// multi-successor merges, per spec §4.4); otherwise the lane has no
/// successors. Unresolved candidate IDs (naming a lane absent from the
/// target section) are silently skipped — callers see an empty list, not
/// an error, matching "the mapping is total: every lane either has a
/// non-empty successor set or is marked terminal."
pub fn successors(model: &RoadspacesModel, lane: LaneId) -> Result<Vec<LaneId>> {
    let road = model.road(lane.section.road)?;
    let section = &road.lane_sections()[lane.section.index];
    let lane_obj = section.lane(lane.id).ok_or(crate::error::Error::UnknownLane(lane))?;

    if lane.section.index + 1 < road.lane_sections().len() {
        let next_index = lane.section.index + 1;
        let next_section = &road.lane_sections()[next_index];
        return Ok(lane_obj
            .successors()
            .iter()
            .filter(|id| next_section.lane(**id).is_some())
            .map(|&id| LaneId { section: LaneSectionId { road: road.id(), index: next_index }, id })
            .collect());
    }

    match road.successor() {
        Some(RoadLink::Road { road: next_road_id, contact }) => {
            let next_road = model.road(next_road_id)?;
            let target_index = match contact {
                ContactPoint::Start => 0,
                ContactPoint::End => next_road.lane_sections().len().saturating_sub(1),
            };
            let target_section = &next_road.lane_sections()[target_index];
            Ok(lane_obj
                .successors()
                .iter()
                .filter(|id| target_section.lane(**id).is_some())
                .map(|&id| LaneId { section: LaneSectionId { road: next_road_id, index: target_index }, id })
                .collect())
        }
        Some(RoadLink::Junction(junction_id)) => {
            let junction = model.junction(junction_id)?;
            let mut result = Vec::new();
            for connection in junction.connections_from(road.id()) {
                if let Some(connecting_lane) = connection.get_successor_lane(lane.id) {
                    let connecting_road = model.road(connection.connecting_road())?;
                    let target_index = match connection.contact_point() {
                        ContactPoint::Start => 0,
                        ContactPoint::End => connecting_road.lane_sections().len().saturating_sub(1),
                    };
                    if connecting_road.lane_sections()[target_index].lane(connecting_lane).is_some() {
                        result.push(LaneId {
                            section: LaneSectionId { road: connection.connecting_road(), index: target_index },
                            id: connecting_lane,
                        });
                    }
                }
            }
            Ok(result)
        }
        None => Ok(Vec::new()),
    }
}

/// The predecessor lanes of `lane`, symmetric to [`successors`]: walks
/// toward the start of the road instead of the end, and uses
/// `road.predecessor()` / `lane.predecessors()`.
pub fn predecessors(model: &RoadspacesModel, lane: LaneId) -> Result<Vec<LaneId>> {
    let road = model.road(lane.section.road)?;
    let section = &road.lane_sections()[lane.section.index];
    let lane_obj = section.lane(lane.id).ok_or(crate::error::Error::UnknownLane(lane))?;

    if lane.section.index > 0 {
        let prev_index = lane.section.index - 1;
        let prev_section = &road.lane_sections()[prev_index];
        return Ok(lane_obj
            .predecessors()
            .iter()
            .filter(|id| prev_section.lane(**id).is_some())
            .map(|&id| LaneId { section: LaneSectionId { road: road.id(), index: prev_index }, id })
            .collect());
    }

    match road.predecessor() {
        Some(RoadLink::Road { road: prev_road_id, contact }) => {
            let prev_road = model.road(prev_road_id)?;
            let target_index = match contact {
                ContactPoint::End => prev_road.lane_sections().len().saturating_sub(1),
                ContactPoint::Start => 0,
            };
            let target_section = &prev_road.lane_sections()[target_index];
            Ok(lane_obj
                .predecessors()
                .iter()
                .filter(|id| target_section.lane(**id).is_some())
                .map(|&id| LaneId { section: LaneSectionId { road: prev_road_id, index: target_index }, id })
                .collect())
        }
        Some(RoadLink::Junction(junction_id)) => {
            let junction = model.junction(junction_id)?;
            let mut result = Vec::new();
            for connection in junction.connections_to(road.id()) {
                if let Some(incoming_lane) = connection.get_predecessor_lane(lane.id) {
                    let incoming_road_id = connection.incoming_road();
                    let incoming_road = model.road(incoming_road_id)?;
                    let target_index = match incoming_road.contact_with_junction(junction_id) {
                        Some(ContactPoint::Start) => 0,
                        Some(ContactPoint::End) => incoming_road.lane_sections().len().saturating_sub(1),
                        None => continue,
                    };
                    if incoming_road.lane_sections()[target_index].lane(incoming_lane).is_some() {
                        result.push(LaneId {
                            section: LaneSectionId { road: incoming_road_id, index: target_index },
                            id: incoming_lane,
                        });
                    }
                }
            }
            Ok(result)
        }
        None => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifier::RoadId;
    use crate::junction::Junction;
    use crate::lane::{Lane, LaneAttributes, LaneType};
    use crate::lane_section::LaneSection;
    use crate::road::Road;
    use odc_base::{Range, UnivariateFunction};
    use odc_geometry::{compose_plan_view, GeometryKind, GeometryRecord, RoadCurve3D};
    use std::collections::BTreeMap;

    fn straight_road_curve(length: f64) -> RoadCurve3D {
        let records = vec![GeometryRecord { s: 0.0, x: 0.0, y: 0.0, hdg: 0.0, length, kind: GeometryKind::Line }];
        let (xy, _) = compose_plan_view(&records, 1e-7, 1e-7, 1e-7).unwrap();
        let domain = Range::closed(0.0, length).unwrap();
        RoadCurve3D::new(xy, UnivariateFunction::Constant { value: 0.0, domain }, UnivariateFunction::Constant { value: 0.0, domain })
    }

    fn one_lane_road(id: RoadId, length: f64, successor: Option<RoadLink>) -> Road {
        let domain = Range::closed(0.0, length).unwrap();
        let lane = Lane::new(
            -1,
            LaneType::Driving,
            UnivariateFunction::Constant { value: 3.5, domain },
            UnivariateFunction::Constant { value: 0.0, domain },
            None,
            vec![-2],
            Vec::new(),
            LaneAttributes::default(),
        );
        let section = LaneSection::new(
            LaneSectionId { road: id, index: 0 },
            0.0,
            length,
            Vec::new(),
            Lane::center(domain),
            vec![lane],
        )
        .unwrap();
        Road::new(id, straight_road_curve(length), UnivariateFunction::Constant { value: 0.0, domain }, vec![section], None, successor)
    }

    #[test]
    fn junction_successor_matches_connection_link_table() {
        let mut model = RoadspacesModel::new();
        // road_b takes RoadId(0); road_a will take RoadId(1) once inserted below.
        let road_b_id = model.insert_road(|id| one_lane_road(id, 50.0, None));
        let road_a_id_predicted = RoadId(1);
        let junction_id = model.insert_junction(|id| {
            let mut j = Junction::new(id);
            let links = BTreeMap::from([(-1, -2)]);
            j.push_connection(road_a_id_predicted, road_b_id, ContactPoint::Start, links);
            j
        });
        let road_a_id = model.insert_road(|id| one_lane_road(id, 30.0, Some(RoadLink::Junction(junction_id))));
        assert_eq!(road_a_id, road_a_id_predicted);

        let lane = LaneId { section: LaneSectionId { road: road_a_id, index: 0 }, id: -1 };
        let succ = successors(&model, lane).unwrap();
        assert_eq!(succ.len(), 1);
        assert_eq!(succ[0].id, -2);
        assert_eq!(succ[0].section.road, road_b_id);
        assert_eq!(succ[0].section.index, 0);

        let other_lane = LaneId { section: LaneSectionId { road: road_a_id, index: 0 }, id: 0 };
        let none_succ = successors(&model, other_lane);
        assert!(none_succ.is_err() || none_succ.unwrap().is_empty());
    }

    #[test]
    fn junction_predecessor_is_the_reverse_of_the_connection_link_table() {
        let mut model = RoadspacesModel::new();
        // road_b (connecting, downstream) takes RoadId(0); road_a (incoming) RoadId(1);
        // the junction takes JunctionId(0), independent of the road ID sequence.
        let road_a_id_predicted = RoadId(1);
        let junction_id_predicted = JunctionId(0);
        let road_b_id = model.insert_road(|id| {
            let domain = Range::closed(0.0, 50.0).unwrap();
            let lane = Lane::new(
                -2,
                LaneType::Driving,
                UnivariateFunction::Constant { value: 3.5, domain },
                UnivariateFunction::Constant { value: 0.0, domain },
                None,
                Vec::new(),
                Vec::new(),
                LaneAttributes::default(),
            );
            let section = LaneSection::new(LaneSectionId { road: id, index: 0 }, 0.0, 50.0, Vec::new(), Lane::center(domain), vec![lane])
                .unwrap();
            Road::new(
                id,
                straight_road_curve(50.0),
                UnivariateFunction::Constant { value: 0.0, domain },
                vec![section],
                Some(RoadLink::Junction(junction_id_predicted)),
                None,
            )
        });
        let junction_id = model.insert_junction(|id| {
            let mut j = Junction::new(id);
            let links = BTreeMap::from([(-1, -2)]);
            j.push_connection(road_a_id_predicted, road_b_id, ContactPoint::Start, links);
            j
        });
        assert_eq!(junction_id, junction_id_predicted);
        let road_a_id = model.insert_road(|id| one_lane_road(id, 30.0, Some(RoadLink::Junction(junction_id))));
        assert_eq!(road_a_id, road_a_id_predicted);

        let lane = LaneId { section: LaneSectionId { road: road_b_id, index: 0 }, id: -2 };
        let pred = predecessors(&model, lane).unwrap();
        assert_eq!(pred.len(), 1);
        assert_eq!(pred[0].id, -1);
        assert_eq!(pred[0].section.road, road_a_id);
        assert_eq!(pred[0].section.index, 0);
    }
}
