//! Builds a roadspace object's [`FeatureGeometry`] (spec §4.5): the pose
//! locates the object relative to the road's tangent frame, then each
//! [`RoadObjectGeometry`] variant builds its own representation.
//!
//! `Repeated` expands into one [`FeatureGeometry`] per tiled instance along
//! `s_range` (spec doesn't name a sub-geometry for the repeated element
//! itself, since that detail lives in OpenDRIVE's own `<repeat>` schema,
//! out of scope here — each instance is emitted as a point, the one
//! representation every object geometry can always produce; see
//! DESIGN.md).

use crate::config::TransformConfig;
use crate::error::Result;
use crate::lod::FeatureGeometry;
use odc_base::{Affine3D, Point3, Range, Rotation3D};
use odc_geometry::{AbstractCurve3D, AbstractSolid3D, LinearRing3D, Polygon3D, RoadCurve3D};
use odc_roadspace::{RoadObjectGeometry, RoadspaceObject};
use odc_tessellate::build_sweep;

/// Builds the object's pose: the road curve's tangent frame at `s`,
/// shifted by `(t, z_offset)` and rotated by the object's own orientation
/// (if any), relative to that frame.
fn object_pose(curve: &RoadCurve3D, object: &RoadspaceObject, tolerance: f64) -> Result<Affine3D> {
    let frame = curve.affine_at(object.s(), tolerance)?;
    let rotation = object
        .orientation()
        .map(|o| Rotation3D::from_hpr(o.hdg, o.pitch, o.roll))
        .unwrap_or_else(|| Rotation3D::from_hpr(0.0, 0.0, 0.0));
    let local_pose = Affine3D::from_pose(Point3::new(0.0, object.t(), object.z_offset()), rotation)?;
    Ok(local_pose.append(&frame)?)
}

fn place(pose: &Affine3D, x: f64, y: f64, z: f64) -> Point3 { pose.transform_point(Point3::new(x, y, z)) }

fn footprint_ring(pose: &Affine3D, points: &[(f64, f64)], z: f64, tolerance: f64) -> Result<LinearRing3D> {
    let placed: Vec<Point3> = points.iter().map(|&(x, y)| place(pose, x, y, z)).collect();
    Ok(LinearRing3D::new(placed, tolerance)?)
}

/// Builds every [`FeatureGeometry`] instance `object` expands into: exactly
/// one, except for `Repeated`, which tiles along its `s_range`.
pub fn build_object_geometries(curve: &RoadCurve3D, object: &RoadspaceObject, config: &TransformConfig) -> Result<Vec<FeatureGeometry>> {
    match object.geometry() {
        RoadObjectGeometry::Repeated { s_range, distance } => {
            let step = if *distance > config.tolerance { *distance } else { config.discretization_step_size };
            let samples = Range::closed(s_range.0.min(s_range.1), s_range.0.max(s_range.1))?.arrange(step, true, config.tolerance)?;
            samples
                .into_iter()
                .map(|s| {
                    let frame = curve.affine_at(s, config.tolerance)?;
                    let point = place(&frame, 0.0, object.t(), object.z_offset());
                    Ok(FeatureGeometry { point: Some(point), ..Default::default() })
                })
                .collect()
        }
        other => Ok(vec![build_single_object_geometry(curve, object, other, config)?]),
    }
}

fn build_single_object_geometry(
    curve: &RoadCurve3D,
    object: &RoadspaceObject,
    geometry: &RoadObjectGeometry,
    config: &TransformConfig,
) -> Result<FeatureGeometry> {
    let pose = object_pose(curve, object, config.tolerance)?;
    let tolerance = config.tolerance;

    Ok(match geometry {
        RoadObjectGeometry::Cuboid { length, width, height } => {
            let solid = AbstractSolid3D::Cuboid3D { pose, length: *length, width: *width, height: *height }.polygons(tolerance)?;
            FeatureGeometry { solid: Some(solid), ..Default::default() }
        }
        RoadObjectGeometry::Cylinder { radius, height } => {
            let solid = AbstractSolid3D::Cylinder3D { pose, radius: *radius, height: *height, radial_segments: config.circle_slices }
                .polygons(tolerance)?;
            FeatureGeometry { solid: Some(solid), ..Default::default() }
        }
        RoadObjectGeometry::Point => FeatureGeometry { point: Some(place(&pose, 0.0, 0.0, 0.0)), ..Default::default() },
        RoadObjectGeometry::Rectangle { length, width } => {
            let (hl, hw) = (length / 2.0, width / 2.0);
            let points = [(-hl, -hw), (hl, -hw), (hl, hw), (-hl, hw)];
            let ring = footprint_ring(&pose, &points, 0.0, tolerance)?;
            FeatureGeometry { multi_surface: Some(vec![Polygon3D::simple(ring, tolerance)?]), ..Default::default() }
        }
        RoadObjectGeometry::Polygon { points } => {
            let ring = footprint_ring(&pose, points, 0.0, tolerance)?;
            FeatureGeometry { multi_surface: Some(vec![Polygon3D::simple(ring, tolerance)?]), ..Default::default() }
        }
        RoadObjectGeometry::Outline { outline, height } => match height {
            Some(h) => {
                let top_z = h.value(0.0, tolerance)?;
                let base: Vec<Point3> = outline.iter().map(|&(x, y)| place(&pose, x, y, 0.0)).collect();
                let top: Vec<Point3> = outline.iter().map(|&(x, y)| place(&pose, x, y, top_z)).collect();
                match build_sweep(&[base, top], tolerance) {
                    Ok(solid) => FeatureGeometry { solid: Some(solid), ..Default::default() },
                    Err(_) => {
                        let ring = footprint_ring(&pose, outline, 0.0, tolerance)?;
                        FeatureGeometry { multi_surface: Some(vec![Polygon3D::simple(ring, tolerance)?]), ..Default::default() }
                    }
                }
            }
            None => {
                let ring = footprint_ring(&pose, outline, 0.0, tolerance)?;
                FeatureGeometry { multi_surface: Some(vec![Polygon3D::simple(ring, tolerance)?]), ..Default::default() }
            }
        },
        RoadObjectGeometry::Repeated { .. } => unreachable!("handled by build_object_geometries"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use odc_base::UnivariateFunction;
    use odc_geometry::{compose_plan_view, GeometryKind, GeometryRecord};
    use odc_roadspace::{RoadId, RoadObjectId};

    fn flat_curve(length: f64) -> RoadCurve3D {
        let records = vec![GeometryRecord { s: 0.0, x: 0.0, y: 0.0, hdg: 0.0, length, kind: GeometryKind::Line }];
        let (xy, _) = compose_plan_view(&records, 1e-7, 1e-7, 1e-7).unwrap();
        let domain = Range::closed(0.0, length).unwrap();
        RoadCurve3D::new(xy, UnivariateFunction::Constant { value: 0.0, domain }, UnivariateFunction::Constant { value: 0.0, domain })
    }

    fn object(geometry: RoadObjectGeometry) -> RoadspaceObject {
        RoadspaceObject::new(RoadObjectId(0), RoadId(0), 10.0, 2.0, 0.0, None, geometry, "pole".to_string())
    }

    #[test]
    fn cuboid_object_builds_a_solid() {
        let curve = flat_curve(50.0);
        let config = TransformConfig::default();
        let obj = object(RoadObjectGeometry::Cuboid { length: 1.0, width: 1.0, height: 2.0 });
        let geometries = build_object_geometries(&curve, &obj, &config).unwrap();
        assert_eq!(geometries.len(), 1);
        assert!(geometries[0].solid.is_some());
    }

    #[test]
    fn point_object_builds_a_point() {
        let curve = flat_curve(50.0);
        let config = TransformConfig::default();
        let obj = object(RoadObjectGeometry::Point);
        let geometries = build_object_geometries(&curve, &obj, &config).unwrap();
        assert!(geometries[0].point.is_some());
    }

    #[test]
    fn repeated_object_tiles_into_several_points() {
        let curve = flat_curve(50.0);
        let config = TransformConfig::default();
        let obj = object(RoadObjectGeometry::Repeated { s_range: (0.0, 20.0), distance: 5.0 });
        let geometries = build_object_geometries(&curve, &obj, &config).unwrap();
        assert_eq!(geometries.len(), 5);
        assert!(geometries.iter().all(|g| g.point.is_some()));
    }
}
