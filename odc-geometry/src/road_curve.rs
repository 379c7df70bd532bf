//! The full 3D road reference line: a planar composite curve lofted by an
//! elevation profile and rolled by a superelevation profile (spec §4.2).

use crate::curve3d::{AbstractCurve3D, CompositeCurve};
use crate::error::{Error, Result};
use cgmath::InnerSpace;
use odc_base::{Affine3D, Point3, UnivariateFunction, Vector3};

/// A road's reference line: the plan-view composite curve `(x(s), y(s))`,
/// lofted to 3D by an elevation profile `z(s)` and rolled about its tangent
/// by a superelevation profile `theta(s)` (spec §4.2).
#[derive(Clone, Debug)]
pub struct RoadCurve3D {
    xy: CompositeCurve,
    elevation: UnivariateFunction,
    superelevation: UnivariateFunction,
}

impl RoadCurve3D {
    /// Builds a road curve. `elevation` and `superelevation` must each cover
    /// `xy`'s full `[0, length]` domain; this is not checked here; it
    /// surfaces as an [`Error::DomainOutOfRange`] the first time a point
    /// outside their declared domain is requested.
    pub fn new(xy: CompositeCurve, elevation: UnivariateFunction, superelevation: UnivariateFunction) -> Self {
        RoadCurve3D { xy, elevation, superelevation }
    }

    /// The underlying plan-view composite curve.
    pub fn plan_view(&self) -> &CompositeCurve { &self.xy }
}

fn rodrigues_rotate(v: Vector3, axis: Vector3, angle: f64) -> Vector3 {
    let (sin, cos) = angle.sin_cos();
    v * cos + axis.cross(v) * sin + axis * axis.dot(v) * (1.0 - cos)
}

impl AbstractCurve3D for RoadCurve3D {
    fn length(&self) -> f64 { self.xy.length() }

    fn point_at(&self, s: f64, tolerance: f64) -> Result<Point3> {
        let planar = self.xy.point_at(s, tolerance)?;
        let z = self.elevation.value(s, tolerance)?;
        Ok(Point3::new(planar.x, planar.y, z))
    }

    fn affine_at(&self, s: f64, tolerance: f64) -> Result<Affine3D> {
        let planar_frame = self.xy.affine_at(s, tolerance)?;
        let tangent_xy = planar_frame.transform_vector(Vector3::new(1.0, 0.0, 0.0));
        let slope = self.elevation.slope(s, tolerance)?;

        let tangent = Vector3::new(tangent_xy.x, tangent_xy.y, slope);
        let tangent = if tangent.magnitude2() > 1e-20 { tangent.normalize() } else { Vector3::new(1.0, 0.0, 0.0) };

        let up = Vector3::new(0.0, 0.0, 1.0);
        let z_ref = {
            let projected = up - tangent * up.dot(tangent);
            if projected.magnitude2() > 1e-20 { projected.normalize() } else { Vector3::new(0.0, 1.0, 0.0) }
        };
        let y_ref = z_ref.cross(tangent);

        let theta = self.superelevation.value(s, tolerance)?;
        let y = rodrigues_rotate(y_ref, tangent, theta);
        let z = rodrigues_rotate(z_ref, tangent, theta);

        let point = self.point_at(s, tolerance)?;
        Affine3D::from_basis(point, tangent, y, z).map_err(|_| Error::NonFiniteValue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve3d::{compose_plan_view, GeometryKind, GeometryRecord};
    use odc_base::Range;

    fn flat_straight_curve() -> CompositeCurve {
        let records = vec![GeometryRecord { s: 0.0, x: 0.0, y: 0.0, hdg: 0.0, length: 100.0, kind: GeometryKind::Line }];
        compose_plan_view(&records, 1e-7, 1e-7, 1e-7).unwrap().0
    }

    #[test]
    fn flat_road_matches_plan_view_with_zero_elevation() {
        let xy = flat_straight_curve();
        let domain = Range::closed(0.0, 100.0).unwrap();
        let elevation = UnivariateFunction::Constant { value: 0.0, domain };
        let superelevation = UnivariateFunction::Constant { value: 0.0, domain };
        let road = RoadCurve3D::new(xy, elevation, superelevation);
        let p = road.point_at(50.0, 1e-9).unwrap();
        assert!((p.x - 50.0).abs() < 1e-9);
        assert!(p.y.abs() < 1e-9);
        assert!(p.z.abs() < 1e-9);
    }

    #[test]
    fn constant_grade_lofts_elevation_linearly() {
        let xy = flat_straight_curve();
        let domain = Range::closed(0.0, 100.0).unwrap();
        let elevation = UnivariateFunction::Linear { a: 0.0, b: 0.05, domain };
        let superelevation = UnivariateFunction::Constant { value: 0.0, domain };
        let road = RoadCurve3D::new(xy, elevation, superelevation);
        let p = road.point_at(40.0, 1e-9).unwrap();
        assert!((p.z - 2.0).abs() < 1e-9);
    }

    #[test]
    fn superelevation_rolls_the_frame_about_the_tangent() {
        let xy = flat_straight_curve();
        let domain = Range::closed(0.0, 100.0).unwrap();
        let elevation = UnivariateFunction::Constant { value: 0.0, domain };
        let superelevation = UnivariateFunction::Constant { value: std::f64::consts::FRAC_PI_2, domain };
        let road = RoadCurve3D::new(xy, elevation, superelevation);
        let affine = road.affine_at(10.0, 1e-9).unwrap();
        let z_axis = affine.transform_vector(Vector3::new(0.0, 0.0, 1.0));
        assert!((z_axis.y.abs() - 1.0).abs() < 1e-6);
    }
}
