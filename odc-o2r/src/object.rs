//! Converts raw `<object>` records into [`odc_roadspace::RoadObjectGeometry`]/
//! [`odc_roadspace::RoadObjectOrientation`] (spec §3 "RoadspaceObject").

use crate::error::Result;
use crate::input::RoadObjectGeometryInput;
use crate::profile::build_profile;
use odc_roadspace::{RoadObjectGeometry, RoadObjectOrientation};

/// Converts a raw object geometry record. `Outline`'s optional height
/// profile is built over `[0, length]` where `length` is the outline's
/// perimeter-independent declared extent — OpenDRIVE outlines extrude by a
/// single scalar height rather than a profile along an edge, so a
/// length-1 domain is used and the height sampled at `0`.
pub fn build_object_geometry(input: &RoadObjectGeometryInput) -> Result<RoadObjectGeometry> {
    Ok(match input {
        RoadObjectGeometryInput::Cuboid { length, width, height } => {
            RoadObjectGeometry::Cuboid { length: *length, width: *width, height: *height }
        }
        RoadObjectGeometryInput::Cylinder { radius, height } => RoadObjectGeometry::Cylinder { radius: *radius, height: *height },
        RoadObjectGeometryInput::Point => RoadObjectGeometry::Point,
        RoadObjectGeometryInput::Outline { outline, height_records } => {
            let height = match height_records {
                Some(records) if !records.is_empty() => Some(build_profile(records, 1.0, 1e-9, "object height")?),
                _ => None,
            };
            RoadObjectGeometry::Outline { outline: outline.clone(), height }
        }
        RoadObjectGeometryInput::Repeated { s_range, distance } => RoadObjectGeometry::Repeated { s_range: *s_range, distance: *distance },
        RoadObjectGeometryInput::Rectangle { length, width } => RoadObjectGeometry::Rectangle { length: *length, width: *width },
        RoadObjectGeometryInput::Polygon { points } => RoadObjectGeometry::Polygon { points: points.clone() },
    })
}

/// Builds the object's tangent-frame orientation, `None` if every angle is
/// zero (the common case — most objects have no declared pose).
pub fn build_object_orientation(hdg: f64, pitch: f64, roll: f64) -> Option<RoadObjectOrientation> {
    if hdg == 0.0 && pitch == 0.0 && roll == 0.0 {
        None
    } else {
        Some(RoadObjectOrientation { hdg, pitch, roll })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cuboid_geometry_converts_directly() {
        let input = RoadObjectGeometryInput::Cuboid { length: 1.0, width: 2.0, height: 3.0 };
        match build_object_geometry(&input).unwrap() {
            RoadObjectGeometry::Cuboid { length, width, height } => {
                assert_eq!((length, width, height), (1.0, 2.0, 3.0));
            }
            _ => panic!("expected Cuboid"),
        }
    }

    #[test]
    fn zero_orientation_collapses_to_none() {
        assert!(build_object_orientation(0.0, 0.0, 0.0).is_none());
        assert!(build_object_orientation(0.1, 0.0, 0.0).is_some());
    }
}
