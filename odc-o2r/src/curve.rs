//! Builds a road's full 3D reference line (spec §4.1-4.2) from its raw
//! `<geometry>`/`<elevation>`/`<superelevation>` records.

use crate::error::{Error, Result};
use crate::input::RoadInput;
use crate::profile::build_profile;
use odc_geometry::{compose_plan_view, AbstractCurve3D, ContinuityWarning, RoadCurve3D};

/// Composes `road`'s plan view, elevation and superelevation profiles into
/// a [`RoadCurve3D`], plus any plan-view continuity warnings (spec §4.1
/// step 5 — reported, not fatal).
pub fn build_road_curve(road: &RoadInput, tolerance: f64) -> Result<(RoadCurve3D, Vec<ContinuityWarning>)> {
    let name = road.external_id.to_string();
    let (xy, warnings) = compose_plan_view(&road.geometry, tolerance, tolerance, tolerance)
        .map_err(|e| Error::Geometry(name.clone(), e))?;
    let length = xy.length();

    let elevation = if road.elevation.is_empty() {
        crate::profile::flat(length)?
    } else {
        build_profile(&road.elevation, length, tolerance, "elevation")?
    };
    let superelevation = if road.superelevation.is_empty() {
        crate::profile::flat(length)?
    } else {
        build_profile(&road.superelevation, length, tolerance, "superelevation")?
    };

    Ok((RoadCurve3D::new(xy, elevation, superelevation), warnings))
}

/// Builds the road's lateral shape profile (crossfall over `s`), or a flat
/// zero profile if the road declares none.
pub fn build_lateral_shape(road: &RoadInput, length: f64, tolerance: f64) -> Result<odc_base::UnivariateFunction> {
    if road.lateral_shape.is_empty() {
        crate::profile::flat(length)
    } else {
        build_profile(&road.lateral_shape, length, tolerance, "lateral_shape")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::RoadInput;
    use odc_geometry::{GeometryKind, GeometryRecord};

    fn straight_road() -> RoadInput {
        RoadInput {
            external_id: 1,
            geometry: vec![GeometryRecord { s: 0.0, x: 0.0, y: 0.0, hdg: 0.0, length: 100.0, kind: GeometryKind::Line }],
            elevation: Vec::new(),
            superelevation: Vec::new(),
            lateral_shape: Vec::new(),
            lane_sections: Vec::new(),
            objects: Vec::new(),
            predecessor: None,
            successor: None,
        }
    }

    #[test]
    fn flat_road_curve_has_zero_elevation_everywhere() {
        let (curve, warnings) = build_road_curve(&straight_road(), 1e-7).unwrap();
        assert!(warnings.is_empty());
        use odc_geometry::AbstractCurve3D;
        let p = curve.point_at(50.0, 1e-9).unwrap();
        assert!(p.z.abs() < 1e-9);
    }
}
