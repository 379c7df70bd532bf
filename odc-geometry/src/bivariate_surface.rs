//! Lane surfaces: bivariate `(s, t)` surfaces built by lofting a lateral
//! offset and height profile along a [`RoadCurve3D`] (spec §4.2, §4.3).

use crate::curve3d::{AbstractCurve3D, LineString3D};
use crate::error::Result;
use crate::road_curve::RoadCurve3D;
use odc_base::{Point3, UnivariateFunction, Vector3};

/// A surface parameterized by `s` (along the road curve) and `t` (lateral
/// offset in meters from a reference line defined by `lateral_offset`).
///
/// `point_at(s, t)` places `t` meters further out (in the road curve's
/// local lateral direction at `s`) than `lateral_offset(s)`, and applies
/// `height(s)` along the local vertical. This matches how OpenDRIVE lane
/// boundaries are built: a running sum of lane widths gives
/// `lateral_offset`, and `t` then ranges over a single lane's width.
#[derive(Clone, Debug)]
pub struct ParametricBivariateSurface {
    curve: RoadCurve3D,
    lateral_offset: UnivariateFunction,
    height: UnivariateFunction,
}

impl ParametricBivariateSurface {
    /// Builds a surface over `curve`, with `lateral_offset(s)` placing the
    /// `t = 0` reference line and `height(s)` lofting it vertically.
    pub fn new(curve: RoadCurve3D, lateral_offset: UnivariateFunction, height: UnivariateFunction) -> Self {
        ParametricBivariateSurface { curve, lateral_offset, height }
    }

    /// The underlying road curve.
    pub fn curve(&self) -> &RoadCurve3D { &self.curve }

    /// The point at `(s, t)`.
    pub fn point_at(&self, s: f64, t: f64, tolerance: f64) -> Result<Point3> {
        let frame = self.curve.affine_at(s, tolerance)?;
        let offset = self.lateral_offset.value(s, tolerance)? + t;
        let height = self.height.value(s, tolerance)?;
        let local = Vector3::new(0.0, offset, height);
        Ok(frame.transform_point(Point3::new(0.0, 0.0, 0.0)) + frame.transform_vector(local))
    }

    /// Samples the boundary at fixed lateral offset `t`, spaced by
    /// `step_size` along `s`.
    pub fn boundary_line_string(&self, t: f64, step_size: f64, tolerance: f64) -> Result<LineString3D> {
        let samples = odc_base::Range::closed(0.0, self.curve.length())?.arrange(step_size, true, tolerance)?;
        let points = samples.into_iter().map(|s| self.point_at(s, t, tolerance)).collect::<Result<Vec<_>>>()?;
        Ok(LineString3D::new(points))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve3d::{compose_plan_view, GeometryKind, GeometryRecord};
    use odc_base::Range;

    fn flat_curve(length: f64) -> RoadCurve3D {
        let records = vec![GeometryRecord { s: 0.0, x: 0.0, y: 0.0, hdg: 0.0, length, kind: GeometryKind::Line }];
        let (xy, _) = compose_plan_view(&records, 1e-7, 1e-7, 1e-7).unwrap();
        let domain = Range::closed(0.0, length).unwrap();
        RoadCurve3D::new(xy, UnivariateFunction::Constant { value: 0.0, domain }, UnivariateFunction::Constant { value: 0.0, domain })
    }

    #[test]
    fn lateral_offset_moves_point_perpendicular_to_tangent() {
        let curve = flat_curve(20.0);
        let domain = Range::closed(0.0, 20.0).unwrap();
        let surface = ParametricBivariateSurface::new(
            curve,
            UnivariateFunction::Constant { value: 3.5, domain },
            UnivariateFunction::Constant { value: 0.0, domain },
        );
        let p = surface.point_at(10.0, 0.0, 1e-9).unwrap();
        assert!((p.x - 10.0).abs() < 1e-6);
        assert!((p.y.abs() - 3.5).abs() < 1e-6);
    }

    #[test]
    fn boundary_line_string_has_expected_sample_count() {
        let curve = flat_curve(10.0);
        let domain = Range::closed(0.0, 10.0).unwrap();
        let surface = ParametricBivariateSurface::new(
            curve,
            UnivariateFunction::Constant { value: 0.0, domain },
            UnivariateFunction::Constant { value: 0.0, domain },
        );
        let line = surface.boundary_line_string(0.0, 5.0, 1e-9).unwrap();
        assert_eq!(line.points().len(), 3);
    }
}
