//! Shared lane-boundary math (spec §4.2): cumulative lateral offsets and
//! curve-relative point placement, used by both lane-surface construction
//! and filler-surface stitching.
//!
//! `ParametricBivariateSurface` (odc-geometry) assumes its `lateral_offset`/
//! `height` functions share the same parameter as the curve it lofts off
//! of, i.e. the road's *global* `s`. A lane's width/height profiles are
//! defined over a lane section's *local* `s` (`[0, length]`, restarting at
//! every section). Rather than force those functions into a shared domain,
//! this module inlines the same point-placement formula
//! (`bivariate_surface.rs`'s `point_at`) directly against the road's
//! reference curve, evaluating the curve frame at `s_start + local_s` and
//! the lane's width/height functions at `local_s`.

use crate::error::Result;
use odc_base::{Point3, Vector3};
use odc_geometry::AbstractCurve3D;
use odc_roadspace::{Lane, LaneSection, RoadId};

/// The point at lane-local `(local_s, offset, height)`, placed against the
/// road curve's frame at the section's global `s_start + local_s`.
pub fn lateral_point(
    curve: &odc_geometry::RoadCurve3D,
    s_start: f64,
    local_s: f64,
    offset: f64,
    height: f64,
    tolerance: f64,
) -> Result<Point3> {
    let frame = curve.affine_at(s_start + local_s, tolerance)?;
    let local = Vector3::new(0.0, offset, height);
    Ok(frame.transform_point(Point3::new(0.0, 0.0, 0.0)) + frame.transform_vector(local))
}

/// Lanes on the same side as `lane_id` (left for positive, right for
/// negative), nearest-to-center first.
fn side_lanes(section: &LaneSection, lane_id: i32) -> Vec<&Lane> {
    let mut lanes: Vec<&Lane> = if lane_id > 0 { section.left().iter().collect() } else { section.right().iter().collect() };
    lanes.sort_by_key(|l| l.id().abs());
    lanes
}

/// `innerBoundaryOffset(s)` / `outerBoundaryOffset(s)` for `lane_id` at
/// lane-local `local_s` (spec §4.2): the running sum of the widths of
/// every lane strictly between the center lane and `lane_id` on the same
/// side, signed by side, plus (for the outer boundary) `lane_id`'s own
/// width.
pub fn boundary_offsets(section: &LaneSection, lane_id: i32, local_s: f64, tolerance: f64) -> Result<(f64, f64)> {
    if lane_id == 0 {
        return Ok((0.0, 0.0));
    }
    let side = lane_id.signum() as f64;
    let lanes = side_lanes(section, lane_id);

    let mut inner = 0.0;
    let mut own_width = None;
    for lane in lanes {
        let w = lane.width().value(local_s, tolerance)?;
        if lane.id().abs() < lane_id.abs() {
            inner += w;
        } else if lane.id() == lane_id {
            own_width = Some(w);
        }
    }
    let own_width = own_width.ok_or(crate::error::Error::UnknownLane(odc_roadspace::LaneId { section: section.id(), id: lane_id }))?;
    let inner = side * inner;
    let outer = inner + side * own_width;
    Ok((inner, outer))
}

/// The road this section's identifier belongs to.
pub fn road_id_of(section: &LaneSection) -> RoadId { section.id().road }

#[cfg(test)]
mod tests {
    use super::*;
    use odc_base::{Range, UnivariateFunction};
    use odc_roadspace::{Lane, LaneAttributes, LaneSectionId, LaneType};

    fn lane(id: i32, width: f64, domain: Range) -> Lane {
        Lane::new(
            id,
            LaneType::Driving,
            UnivariateFunction::Constant { value: width, domain },
            UnivariateFunction::Constant { value: 0.0, domain },
            None,
            Vec::new(),
            Vec::new(),
            LaneAttributes::default(),
        )
    }

    fn section() -> LaneSection {
        let domain = Range::closed(0.0, 10.0).unwrap();
        let id = LaneSectionId { road: RoadId(0), index: 0 };
        LaneSection::new(
            id,
            0.0,
            10.0,
            vec![lane(1, 3.0, domain), lane(2, 2.5, domain)],
            Lane::center(domain),
            vec![lane(-1, 3.5, domain)],
        )
        .unwrap()
    }

    #[test]
    fn first_left_lane_inner_offset_is_zero() {
        let (inner, outer) = boundary_offsets(&section(), 1, 5.0, 1e-9).unwrap();
        assert!((inner - 0.0).abs() < 1e-9);
        assert!((outer - 3.0).abs() < 1e-9);
    }

    #[test]
    fn second_left_lane_stacks_on_the_first() {
        let (inner, outer) = boundary_offsets(&section(), 2, 5.0, 1e-9).unwrap();
        assert!((inner - 3.0).abs() < 1e-9);
        assert!((outer - 5.5).abs() < 1e-9);
    }

    #[test]
    fn right_lane_offsets_are_negative() {
        let (inner, outer) = boundary_offsets(&section(), -1, 5.0, 1e-9).unwrap();
        assert!((inner - 0.0).abs() < 1e-9);
        assert!((outer - (-3.5)).abs() < 1e-9);
    }
}
