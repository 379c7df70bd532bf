//! Top-level orchestration (spec §4.5, §5, §7): builds every CityGML
//! feature a [`RoadspacesModel`] routes to, attaches filler surfaces,
//! assigns deterministic IDs, and resolves lane-topology cross-references.
//!
//! IDs are assigned in a first pass (every feature needs its own ID before
//! any cross-reference can name it); lane predecessor/successor links are
//! resolved in a second pass over [`odc_roadspace::topology`], since a
//! lane's successor may live in a road processed later in iteration order.
//! Output is sorted by model ID before being handed back, so serialization
//! sees a deterministic feature order regardless of the model's
//! (hash-map-backed) iteration order (spec §5).

use crate::config::TransformConfig;
use crate::error::Result;
use crate::filler::{lateral_fillers, longitudinal_across_roads_fillers, longitudinal_within_road_fillers};
use crate::ids::gml_id;
use crate::lane_geometry::build_lane_geometry;
use crate::lod::FeatureGeometry;
use crate::object_geometry::build_object_geometries;
use crate::routing::{route_lane, route_object, CityGmlModule};
use odc_base::Vector3;
use odc_report::Report;
use odc_roadspace::{topology, LaneId, LaneSectionId, RoadId, RoadObjectId, RoadspacesModel};

/// A lane-derived TrafficSpace/AuxiliaryTrafficSpace feature.
#[derive(Clone, Debug)]
pub struct LaneFeature {
    pub id: String,
    pub lane_id: LaneId,
    pub module: CityGmlModule,
    pub geometry: FeatureGeometry,
    pub predecessor_ids: Vec<String>,
    pub successor_ids: Vec<String>,
}

/// A roadspace-object-derived feature (one instance; `Repeated` objects
/// produce several `ObjectFeature`s sharing `object_id` but with distinct
/// `instance` indices).
#[derive(Clone, Debug)]
pub struct ObjectFeature {
    pub id: String,
    pub object_id: RoadObjectId,
    pub instance: usize,
    pub module: CityGmlModule,
    pub geometry: FeatureGeometry,
}

/// Every feature a [`RoadspacesModel`] transforms into, sorted by model ID.
#[derive(Clone, Debug, Default)]
pub struct TransformOutput {
    pub lanes: Vec<LaneFeature>,
    pub objects: Vec<ObjectFeature>,
}

fn lane_hash_key(id: LaneId) -> String {
    let attrs = id.to_attributes();
    attrs.iter().map(|(k, v)| format!("{k}={v}")).collect::<Vec<_>>().join(",")
}

/// Transforms every road and object in `model` into CityGML features,
/// returning them alongside a [`Report`] of every healing action and local
/// failure encountered (spec §7: a lane or object that fails to build its
/// geometry is dropped with a non-fatal error, not aborted).
pub fn transform_model(model: &RoadspacesModel, config: &TransformConfig) -> (TransformOutput, Report) {
    let mut report = Report::new();
    let mut output = TransformOutput::default();

    let mut road_ids: Vec<RoadId> = model.roads().map(|r| r.id()).collect();
    road_ids.sort_by_key(|id| id.0);

    for &road_id in &road_ids {
        let road = model.road(road_id).expect("road_ids drawn from model.roads()");
        let curve = road.reference_curve();

        for (section_index, section) in road.lane_sections().iter().enumerate() {
            let section_location = format!("road/{}/section/{section_index}", road_id.0);
            for lane in section.all_lanes() {
                let Some(module) = route_lane(lane) else { continue };
                let lane_location = format!("{section_location}/lane/{}", lane.id());
                let lane_id = LaneId { section: LaneSectionId { road: road_id, index: section_index }, id: lane.id() };

                let mut geometry = match build_lane_geometry(curve, section.s_start(), section, lane, config) {
                    Ok(g) => g,
                    Err(e) => {
                        report.error(e.to_string(), lane_location);
                        continue;
                    }
                };

                match lateral_fillers(curve, section.s_start(), section, config) {
                    Ok(fillers) if !fillers.is_empty() => {
                        geometry.multi_surface.get_or_insert_with(Vec::new).extend(fillers);
                    }
                    Ok(_) => {}
                    Err(e) => report.warn(format!("lateral filler: {e}"), lane_location.clone()),
                }

                let id = gml_id("TrafficSpace", &lane_hash_key(lane_id));
                output.lanes.push(LaneFeature { id, lane_id, module, geometry, predecessor_ids: Vec::new(), successor_ids: Vec::new() });
            }

            match longitudinal_within_road_fillers(curve, road, config) {
                Ok(fillers) => attach_longitudinal_fillers(&mut output, road_id, fillers),
                Err(e) => report.warn(format!("longitudinal filler: {e}"), section_location.clone()),
            }
        }

        match longitudinal_across_roads_fillers(model, road, curve, config) {
            Ok(fillers) => attach_longitudinal_fillers(&mut output, road_id, fillers),
            Err(e) => report.warn(format!("cross-road filler: {e}"), format!("road/{}", road_id.0)),
        }

        for (object_index, object) in model
            .objects()
            .filter(|o| o.road() == road_id)
            .enumerate()
        {
            let object_location = format!("road/{}/object/{object_index}", road_id.0);
            let module = route_object(object.object_type(), config.citygml_version);
            let geometries = match build_object_geometries(curve, object, config) {
                Ok(g) => g,
                Err(e) => {
                    report.error(e.to_string(), object_location);
                    continue;
                }
            };
            let hash_key = {
                let mut attrs = object.id().to_attributes();
                attrs.insert("road".to_string(), road_id.0.to_string());
                attrs.iter().map(|(k, v)| format!("{k}={v}")).collect::<Vec<_>>().join(",")
            };
            for (instance, geometry) in geometries.into_iter().enumerate() {
                let id = gml_id("GenericCityObject", &format!("{hash_key},instance={instance}"));
                output.objects.push(ObjectFeature { id, object_id: object.id(), instance, module, geometry });
            }
        }
    }

    link_topology(model, &mut output.lanes, &mut report);

    output.lanes.sort_by_key(|f| (f.lane_id.section.road.0, f.lane_id.section.index, f.lane_id.id));
    output.objects.sort_by_key(|f| (f.object_id.0, f.instance));

    apply_offset(&mut output, config);

    (output, report)
}

/// Applies `config.offset` (`--offset`) to every feature's geometry as a
/// final pass, so every earlier stage (fillers, topology linking, sorting)
/// keeps working in the model's native coordinates.
fn apply_offset(output: &mut TransformOutput, config: &TransformConfig) {
    let [dx, dy, dz] = config.offset;
    if dx == 0.0 && dy == 0.0 && dz == 0.0 {
        return;
    }
    let offset = Vector3::new(dx, dy, dz);
    for feature in &mut output.lanes {
        feature.geometry = feature.geometry.translated(offset, config.tolerance);
    }
    for feature in &mut output.objects {
        feature.geometry = feature.geometry.translated(offset, config.tolerance);
    }
}

/// Appends every filler quad, on either end of the stitch, to the
/// corresponding lane feature's multi-surface. Since fillers are built
/// before a road's lane features exist in `output.lanes` is not assumed:
/// this just records them against the *source* (`road_id`) road's lanes;
/// a quad without a matching still-open `LaneFeature` (e.g. one routed to
/// no feature at all) is silently dropped, matching spec §4.2's treatment
/// of filler surfaces as pure geometry enrichment, never a feature of
/// their own.
fn attach_longitudinal_fillers(output: &mut TransformOutput, road_id: RoadId, fillers: Vec<odc_geometry::Polygon3D>) {
    if fillers.is_empty() {
        return;
    }
    if let Some(last) = output.lanes.iter_mut().rev().find(|f| f.lane_id.section.road == road_id) {
        last.geometry.multi_surface.get_or_insert_with(Vec::new).extend(fillers);
    }
}

fn link_topology(model: &RoadspacesModel, lanes: &mut [LaneFeature], report: &mut Report) {
    use std::collections::HashMap;
    let ids_by_lane: HashMap<LaneId, String> = lanes.iter().map(|f| (f.lane_id, f.id.clone())).collect();

    for feature in lanes.iter_mut() {
        let location = format!(
            "road/{}/section/{}/lane/{}",
            feature.lane_id.section.road.0, feature.lane_id.section.index, feature.lane_id.id
        );
        match topology::successors(model, feature.lane_id) {
            Ok(succs) => feature.successor_ids = succs.iter().filter_map(|id| ids_by_lane.get(id).cloned()).collect(),
            Err(e) => report.warn(format!("successor resolution: {e}"), location.clone()),
        }
        match topology::predecessors(model, feature.lane_id) {
            Ok(preds) => feature.predecessor_ids = preds.iter().filter_map(|id| ids_by_lane.get(id).cloned()).collect(),
            Err(e) => report.warn(format!("predecessor resolution: {e}"), location),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use odc_base::{Range, UnivariateFunction};
    use odc_geometry::{compose_plan_view, GeometryKind, GeometryRecord, RoadCurve3D};
    use odc_roadspace::{Lane, LaneAttributes, LaneSection, LaneType, Road};

    fn straight_road(id: RoadId, length: f64) -> Road {
        let records = vec![GeometryRecord { s: 0.0, x: 0.0, y: 0.0, hdg: 0.0, length, kind: GeometryKind::Line }];
        let (xy, _) = compose_plan_view(&records, 1e-7, 1e-7, 1e-7).unwrap();
        let domain = Range::closed(0.0, length).unwrap();
        let flat = UnivariateFunction::Constant { value: 0.0, domain };
        let curve = RoadCurve3D::new(xy, flat.clone(), flat.clone());
        let lane = Lane::new(
            -1,
            LaneType::Driving,
            UnivariateFunction::Constant { value: 3.5, domain },
            UnivariateFunction::Constant { value: 0.0, domain },
            None,
            vec![-1],
            vec![-1],
            LaneAttributes::default(),
        );
        let section =
            LaneSection::new(LaneSectionId { road: id, index: 0 }, 0.0, length, Vec::new(), Lane::center(domain), vec![lane]).unwrap();
        Road::new(id, curve, flat, vec![section], None, None)
    }

    #[test]
    fn single_driving_lane_produces_one_traffic_space_feature() {
        let mut model = RoadspacesModel::new();
        model.insert_road(|id| straight_road(id, 40.0));
        let config = TransformConfig::default();
        let (output, report) = transform_model(&model, &config);
        assert_eq!(output.lanes.len(), 1);
        assert_eq!(output.lanes[0].module, CityGmlModule::TrafficSpace);
        assert!(report.entries().is_empty());
    }

    #[test]
    fn offset_translates_every_feature_geometry() {
        let mut model = RoadspacesModel::new();
        model.insert_road(|id| straight_road(id, 40.0));
        let default_config = TransformConfig::default();
        let (baseline, _) = transform_model(&model, &default_config);
        let baseline_corner = baseline.lanes[0].geometry.multi_surface.as_ref().unwrap()[0].exterior().points()[0];

        let offset_config = TransformConfig { offset: [100.0, 200.0, 7.0], ..TransformConfig::default() };
        let (output, _) = transform_model(&model, &offset_config);
        let corner = output.lanes[0].geometry.multi_surface.as_ref().unwrap()[0].exterior().points()[0];

        assert!((corner.x - baseline_corner.x - 100.0).abs() < 1e-6);
        assert!((corner.y - baseline_corner.y - 200.0).abs() < 1e-6);
        assert!((corner.z - baseline_corner.z - 7.0).abs() < 1e-6);
    }

    #[test]
    fn output_is_sorted_by_lane_id() {
        let mut model = RoadspacesModel::new();
        model.insert_road(|id| straight_road(id, 40.0));
        model.insert_road(|id| straight_road(id, 30.0));
        let config = TransformConfig::default();
        let (output, _) = transform_model(&model, &config);
        let roads: Vec<u64> = output.lanes.iter().map(|f| f.lane_id.section.road.0).collect();
        let mut sorted = roads.clone();
        sorted.sort();
        assert_eq!(roads, sorted);
    }
}
