//! Filler surfaces (spec §4.2, §4.5): thin ruled surfaces closing gaps the
//! per-lane tessellation otherwise leaves open — between laterally
//! adjacent lanes with differing height offsets, and across the seam
//! between consecutive lane sections (within one road, or across a
//! road-link/junction). Degenerate (zero-area or non-coplanar-within-
//! tolerance) quads are dropped silently, per spec §4.2.

use crate::boundary::{boundary_offsets, lateral_point};
use crate::config::TransformConfig;
use crate::error::Result;
use odc_base::Point3;
use odc_geometry::{LinearRing3D, Polygon3D, RoadCurve3D};
use odc_roadspace::{ContactPoint, Lane, LaneSection, Road, RoadLink, RoadspacesModel};

fn try_quad(points: [Point3; 4], tolerance: f64) -> Option<Polygon3D> {
    let ring = LinearRing3D::new(points.to_vec(), tolerance).ok()?;
    Polygon3D::simple(ring, tolerance).ok()
}

/// Builds the ruled strip between two laterally-adjacent lanes sharing the
/// boundary offset `boundary_offset_fn` returns, differing only in their
/// height profile.
fn ruled_strip(
    curve: &RoadCurve3D,
    s_start: f64,
    samples: &[f64],
    offset_of: impl Fn(f64) -> Result<f64>,
    height_a: &Lane,
    height_b: &Lane,
    tolerance: f64,
) -> Result<Vec<Polygon3D>> {
    let mut quads = Vec::new();
    for pair in samples.windows(2) {
        let (sa, sb) = (pair[0], pair[1]);
        let offset_a = offset_of(sa)?;
        let offset_b = offset_of(sb)?;
        let ha_a = height_a.height().value(sa, tolerance)?;
        let ha_b = height_a.height().value(sb, tolerance)?;
        let hb_a = height_b.height().value(sa, tolerance)?;
        let hb_b = height_b.height().value(sb, tolerance)?;
        if (ha_a - hb_a).abs() <= tolerance && (ha_b - hb_b).abs() <= tolerance {
            continue;
        }
        let p0 = lateral_point(curve, s_start, sa, offset_a, ha_a, tolerance)?;
        let p1 = lateral_point(curve, s_start, sa, offset_a, hb_a, tolerance)?;
        let p2 = lateral_point(curve, s_start, sb, offset_b, hb_b, tolerance)?;
        let p3 = lateral_point(curve, s_start, sb, offset_b, ha_b, tolerance)?;
        if let Some(polygon) = try_quad([p0, p1, p2, p3], tolerance) {
            quads.push(polygon);
        }
    }
    Ok(quads)
}

/// Lateral fillers for every adjacent lane pair in one section: center to
/// each side's nearest lane, and consecutive lanes within each side.
pub fn lateral_fillers(curve: &RoadCurve3D, s_start: f64, section: &LaneSection, config: &TransformConfig) -> Result<Vec<Polygon3D>> {
    let samples = section.domain().arrange(config.discretization_step_size, true, config.tolerance)?;
    let mut quads = Vec::new();

    for side_lanes in [section.left(), section.right()] {
        let mut ordered: Vec<&Lane> = side_lanes.iter().collect();
        ordered.sort_by_key(|l| l.id().abs());
        let mut prev: &Lane = section.center();
        for lane in ordered {
            let lane_id = lane.id();
            let offset_of = |s: f64| -> Result<f64> { Ok(boundary_offsets(section, lane_id, s, config.tolerance)?.0) };
            quads.extend(ruled_strip(curve, s_start, &samples, offset_of, prev, lane, config.tolerance)?);
            prev = lane;
        }
    }
    Ok(quads)
}

/// Stitches the end-of-section boundary of every lane in `section` to the
/// start of the next section of the same road, for every lane ID present
/// in both.
pub fn longitudinal_within_road_fillers(curve: &RoadCurve3D, road: &Road, config: &TransformConfig) -> Result<Vec<Polygon3D>> {
    let mut quads = Vec::new();
    for pair in road.lane_sections().windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        for lane_a in a.all_lanes() {
            if lane_a.id() == 0 {
                continue;
            }
            let Some(lane_b) = b.lane(lane_a.id()) else { continue };
            if let Some(polygon) = stitch_lane_ends(curve, a.s_start(), a, lane_a, curve, b.s_start(), b, lane_b, a.domain().end(), 0.0, config)? {
                quads.push(polygon);
            }
        }
    }
    Ok(quads)
}

#[allow(clippy::too_many_arguments)]
fn stitch_lane_ends(
    curve_a: &RoadCurve3D,
    s_start_a: f64,
    section_a: &LaneSection,
    lane_a: &Lane,
    curve_b: &RoadCurve3D,
    s_start_b: f64,
    section_b: &LaneSection,
    lane_b: &Lane,
    local_s_a: f64,
    local_s_b: f64,
    config: &TransformConfig,
) -> Result<Option<Polygon3D>> {
    let tolerance = config.tolerance;
    let (inner_a, outer_a) = boundary_offsets(section_a, lane_a.id(), local_s_a, tolerance)?;
    let (inner_b, outer_b) = boundary_offsets(section_b, lane_b.id(), local_s_b, tolerance)?;
    let height_a = lane_a.height().value(local_s_a, tolerance)?;
    let height_b = lane_b.height().value(local_s_b, tolerance)?;

    let end_inner = lateral_point(curve_a, s_start_a, local_s_a, inner_a, height_a, tolerance)?;
    let end_outer = lateral_point(curve_a, s_start_a, local_s_a, outer_a, height_a, tolerance)?;
    let start_inner = lateral_point(curve_b, s_start_b, local_s_b, inner_b, height_b, tolerance)?;
    let start_outer = lateral_point(curve_b, s_start_b, local_s_b, outer_b, height_b, tolerance)?;

    Ok(try_quad([end_inner, end_outer, start_outer, start_inner], tolerance))
}

/// Stitches the terminal boundary of every non-center lane in `road`'s
/// contact-point section to the matching lane of whatever it links to
/// (another road directly, or every connection of a junction), per spec
/// §4.4's link resolution (duplicated here rather than reused from
/// `odc_roadspace::topology`, since that module's public contract
/// deliberately returns only the resolved lane identity, not which end of
/// the target section is being entered — information this stitch needs to
/// know which local `s` to sample).
pub fn longitudinal_across_roads_fillers(model: &RoadspacesModel, road: &Road, curve: &RoadCurve3D, config: &TransformConfig) -> Result<Vec<Polygon3D>> {
    let Some(last_section) = road.last_section() else { return Ok(Vec::new()) };
    let Some(link) = road.successor() else { return Ok(Vec::new()) };
    let local_s_end = last_section.domain().end();
    let mut quads = Vec::new();

    match link {
        RoadLink::Road { road: target_id, contact } => {
            let target_road = model.road(target_id)?;
            let (target_index, entering_from_start) = match contact {
                ContactPoint::Start => (0, true),
                ContactPoint::End => (target_road.lane_sections().len().saturating_sub(1), false),
            };
            let target_section = &target_road.lane_sections()[target_index];
            let target_local_s = if entering_from_start { 0.0 } else { target_section.domain().end() };
            for lane in last_section.all_lanes() {
                if lane.id() == 0 {
                    continue;
                }
                for &succ_id in lane.successors() {
                    let Some(target_lane) = target_section.lane(succ_id) else { continue };
                    if let Some(polygon) = stitch_lane_ends(
                        curve,
                        road.length() - last_section.domain().length(),
                        last_section,
                        lane,
                        target_road.reference_curve(),
                        target_section.s_start(),
                        target_section,
                        target_lane,
                        local_s_end,
                        target_local_s,
                        config,
                    )? {
                        quads.push(polygon);
                    }
                }
            }
        }
        RoadLink::Junction(junction_id) => {
            let junction = model.junction(junction_id)?;
            for connection in junction.connections_from(road.id()) {
                let target_road = model.road(connection.connecting_road())?;
                let (target_index, entering_from_start) = match connection.contact_point() {
                    ContactPoint::Start => (0, true),
                    ContactPoint::End => (target_road.lane_sections().len().saturating_sub(1), false),
                };
                let target_section = &target_road.lane_sections()[target_index];
                let target_local_s = if entering_from_start { 0.0 } else { target_section.domain().end() };
                for lane in last_section.all_lanes() {
                    if lane.id() == 0 {
                        continue;
                    }
                    let Some(target_lane_id) = connection.get_successor_lane(lane.id()) else { continue };
                    let Some(target_lane) = target_section.lane(target_lane_id) else { continue };
                    if let Some(polygon) = stitch_lane_ends(
                        curve,
                        road.length() - last_section.domain().length(),
                        last_section,
                        lane,
                        target_road.reference_curve(),
                        target_section.s_start(),
                        target_section,
                        target_lane,
                        local_s_end,
                        target_local_s,
                        config,
                    )? {
                        quads.push(polygon);
                    }
                }
            }
        }
    }
    Ok(quads)
}

#[cfg(test)]
mod tests {
    use super::*;
    use odc_base::{Range, UnivariateFunction};
    use odc_geometry::{compose_plan_view, GeometryKind, GeometryRecord};
    use odc_roadspace::{LaneAttributes, LaneSectionId, LaneType, RoadId};

    fn flat_curve(length: f64) -> RoadCurve3D {
        let records = vec![GeometryRecord { s: 0.0, x: 0.0, y: 0.0, hdg: 0.0, length, kind: GeometryKind::Line }];
        let (xy, _) = compose_plan_view(&records, 1e-7, 1e-7, 1e-7).unwrap();
        let domain = Range::closed(0.0, length).unwrap();
        RoadCurve3D::new(xy, UnivariateFunction::Constant { value: 0.0, domain }, UnivariateFunction::Constant { value: 0.0, domain })
    }

    #[test]
    fn step_height_difference_produces_a_matching_area_filler() {
        let domain = Range::closed(0.0, 10.0).unwrap();
        let flat_lane = Lane::new(
            -1,
            LaneType::Driving,
            UnivariateFunction::Constant { value: 3.0, domain },
            UnivariateFunction::Constant { value: 0.0, domain },
            None,
            Vec::new(),
            Vec::new(),
            LaneAttributes::default(),
        );
        let raised_lane = Lane::new(
            -2,
            LaneType::Sidewalk,
            UnivariateFunction::Constant { value: 2.0, domain },
            UnivariateFunction::Constant { value: 0.15, domain },
            None,
            Vec::new(),
            Vec::new(),
            LaneAttributes::default(),
        );
        let section = LaneSection::new(
            LaneSectionId { road: RoadId(0), index: 0 },
            0.0,
            10.0,
            Vec::new(),
            Lane::center(domain),
            vec![flat_lane, raised_lane],
        )
        .unwrap();
        let curve = flat_curve(10.0);
        let mut config = TransformConfig::default();
        config.discretization_step_size = 1.0;
        let quads = lateral_fillers(&curve, 0.0, &section, &config).unwrap();
        assert!(!quads.is_empty());
        let total_area: f64 = quads.iter().map(|q| q.area()).sum();
        assert!((total_area - 10.0 * 0.15).abs() < 1e-6);
    }
}
