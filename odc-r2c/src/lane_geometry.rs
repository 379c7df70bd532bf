//! Builds a lane's [`FeatureGeometry`] (spec §4.5): a multi-surface top
//! face always, plus a solid when the lane has non-trivial height (a
//! volumetric LoD1 representation makes sense for curbs/barriers-on-lanes
//! but not for a flat, zero-height driving surface — see DESIGN.md for
//! this Open Question resolution).

use crate::boundary::{boundary_offsets, lateral_point};
use crate::config::TransformConfig;
use crate::error::Result;
use crate::lod::FeatureGeometry;
use odc_geometry::{LinearRing3D, Polygon3D, RoadCurve3D};
use odc_roadspace::{Lane, LaneSection};
use odc_tessellate::build_sweep;

/// Builds the top multi-surface (always) and, when the lane's height
/// function is non-trivial anywhere along the section, a volumetric solid.
pub fn build_lane_geometry(curve: &RoadCurve3D, s_start: f64, section: &LaneSection, lane: &Lane, config: &TransformConfig) -> Result<FeatureGeometry> {
    let samples = section.domain().arrange(config.discretization_step_size, true, config.tolerance)?;
    let sweep_samples = section.domain().arrange(config.sweep_discretization_step_size, true, config.tolerance)?;

    let mut top_quads = Vec::new();
    let mut cross_sections = Vec::new();
    let mut max_height: f64 = 0.0;

    for &local_s in &sweep_samples {
        let (inner, outer) = boundary_offsets(section, lane.id(), local_s, config.tolerance)?;
        let height = lane.height().value(local_s, config.tolerance)?;
        max_height = max_height.max(height.abs());

        let lower_left = lateral_point(curve, s_start, local_s, inner, 0.0, config.tolerance)?;
        let lower_right = lateral_point(curve, s_start, local_s, outer, 0.0, config.tolerance)?;
        let upper_left = lateral_point(curve, s_start, local_s, inner, height, config.tolerance)?;
        let upper_right = lateral_point(curve, s_start, local_s, outer, height, config.tolerance)?;
        cross_sections.push(vec![lower_left, lower_right, upper_right, upper_left]);
    }

    for pair in samples.windows(2) {
        let (inner_a, outer_a) = boundary_offsets(section, lane.id(), pair[0], config.tolerance)?;
        let (inner_b, outer_b) = boundary_offsets(section, lane.id(), pair[1], config.tolerance)?;
        let height_a = lane.height().value(pair[0], config.tolerance)?;
        let height_b = lane.height().value(pair[1], config.tolerance)?;
        max_height = max_height.max(height_a.abs()).max(height_b.abs());
        let a_inner = lateral_point(curve, s_start, pair[0], inner_a, height_a, config.tolerance)?;
        let a_outer = lateral_point(curve, s_start, pair[0], outer_a, height_a, config.tolerance)?;
        let b_inner = lateral_point(curve, s_start, pair[1], inner_b, height_b, config.tolerance)?;
        let b_outer = lateral_point(curve, s_start, pair[1], outer_b, height_b, config.tolerance)?;
        if let Ok(ring) = LinearRing3D::new(vec![a_inner, a_outer, b_outer, b_inner], config.tolerance) {
            if let Ok(polygon) = Polygon3D::simple(ring, config.tolerance) {
                top_quads.push(polygon);
            }
        }
    }

    let mut geometry = FeatureGeometry { multi_surface: Some(top_quads), ..Default::default() };

    if max_height > config.tolerance {
        if let Ok(solid) = build_sweep(&cross_sections, config.tolerance) {
            geometry.solid = Some(solid);
        }
    }

    Ok(geometry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use odc_base::{Range as R, UnivariateFunction};
    use odc_geometry::{compose_plan_view, GeometryKind, GeometryRecord};
    use odc_roadspace::{LaneAttributes, LaneSectionId, LaneType, RoadId};

    fn flat_curve(length: f64) -> RoadCurve3D {
        let records = vec![GeometryRecord { s: 0.0, x: 0.0, y: 0.0, hdg: 0.0, length, kind: GeometryKind::Line }];
        let (xy, _) = compose_plan_view(&records, 1e-7, 1e-7, 1e-7).unwrap();
        let domain = R::closed(0.0, length).unwrap();
        RoadCurve3D::new(xy, UnivariateFunction::Constant { value: 0.0, domain }, UnivariateFunction::Constant { value: 0.0, domain })
    }

    fn flat_section(domain: R) -> LaneSection {
        let lane = Lane::new(
            -1,
            LaneType::Driving,
            UnivariateFunction::Constant { value: 3.5, domain },
            UnivariateFunction::Constant { value: 0.0, domain },
            None,
            Vec::new(),
            Vec::new(),
            LaneAttributes::default(),
        );
        LaneSection::new(LaneSectionId { road: RoadId(0), index: 0 }, 0.0, domain.length(), Vec::new(), Lane::center(domain), vec![lane]).unwrap()
    }

    #[test]
    fn flat_lane_gets_a_multi_surface_but_no_solid() {
        let domain = R::closed(0.0, 20.0).unwrap();
        let section = flat_section(domain);
        let curve = flat_curve(20.0);
        let config = TransformConfig::default();
        let lane = section.lane(-1).unwrap();
        let geometry = build_lane_geometry(&curve, 0.0, &section, lane, &config).unwrap();
        assert!(geometry.multi_surface.is_some());
        assert!(geometry.solid.is_none());
        assert!(!geometry.multi_surface.unwrap().is_empty());
    }

    #[test]
    fn sweep_discretization_step_size_controls_cross_section_count_independently() {
        let domain = R::closed(0.0, 20.0).unwrap();
        let raised_lane = || {
            Lane::new(
                -1,
                LaneType::Restricted,
                UnivariateFunction::Constant { value: 0.3, domain },
                UnivariateFunction::Constant { value: 0.15, domain },
                None,
                Vec::new(),
                Vec::new(),
                LaneAttributes::default(),
            )
        };
        let section =
            LaneSection::new(LaneSectionId { road: RoadId(0), index: 0 }, 0.0, 20.0, Vec::new(), Lane::center(domain), vec![raised_lane()]).unwrap();
        let curve = flat_curve(20.0);
        let lane = section.lane(-1).unwrap();

        let mut coarse = TransformConfig::default();
        coarse.discretization_step_size = 5.0;
        coarse.sweep_discretization_step_size = 10.0;
        let coarse_faces = build_lane_geometry(&curve, 0.0, &section, lane, &coarse).unwrap().solid.unwrap().len();

        let mut fine = TransformConfig::default();
        fine.discretization_step_size = 5.0;
        fine.sweep_discretization_step_size = 2.0;
        let fine_faces = build_lane_geometry(&curve, 0.0, &section, lane, &fine).unwrap().solid.unwrap().len();

        // A finer sweep step produces more cross-sections and thus more
        // side faces, independently of the (unchanged) top-surface step.
        assert!(fine_faces > coarse_faces);
    }

    #[test]
    fn lane_with_height_gets_a_solid() {
        let domain = R::closed(0.0, 20.0).unwrap();
        let lane = Lane::new(
            -1,
            LaneType::Restricted,
            UnivariateFunction::Constant { value: 0.3, domain },
            UnivariateFunction::Constant { value: 0.15, domain },
            None,
            Vec::new(),
            Vec::new(),
            LaneAttributes::default(),
        );
        let section =
            LaneSection::new(LaneSectionId { road: RoadId(0), index: 0 }, 0.0, 20.0, Vec::new(), Lane::center(domain), vec![lane]).unwrap();
        let curve = flat_curve(20.0);
        let config = TransformConfig::default();
        let lane = section.lane(-1).unwrap();
        let geometry = build_lane_geometry(&curve, 0.0, &section, lane, &config).unwrap();
        assert!(geometry.solid.is_some());
    }
}
