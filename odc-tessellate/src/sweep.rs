//! `ParametricSweep3D` face construction (spec §4.3): stitch base, top,
//! side and cap faces from the solid's discretized cross-sections, then
//! triangulate each.

use crate::error::{Error, Result};
use crate::ring_faces::ring_faces;
use odc_base::Point3;
use odc_geometry::Polygon3D;

/// Builds the boundary polygons of a `ParametricSweep3D`: a start cap, an
/// end cap, and one side quad per edge of the cross-section loop between
/// every consecutive pair of cross-sections. Each cross-section is a
/// closed loop of vertices (e.g. lower-left/upper-left/upper-right/
/// lower-right for a 4-sided profile); all cross-sections must have the
/// same vertex count.
pub fn build_sweep(cross_sections: &[Vec<Point3>], tolerance: f64) -> Result<Vec<Polygon3D>> {
    if cross_sections.len() < 2 {
        return Err(Error::NotEnoughOutlineElements(cross_sections.len()));
    }
    let k = cross_sections[0].len();
    if k < 3 {
        return Err(Error::NotEnoughVertices(k));
    }
    if cross_sections.iter().any(|cs| cs.len() != k) {
        return Err(Error::NotEnoughVertices(k));
    }

    let mut faces = Vec::new();

    let start_cap: Vec<Point3> = cross_sections[0].iter().rev().copied().collect();
    faces.extend(ring_faces(&start_cap, tolerance)?);
    faces.extend(ring_faces(cross_sections.last().unwrap(), tolerance)?);

    for pair in cross_sections.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        for idx in 0..k {
            let next = (idx + 1) % k;
            let quad = vec![a[idx], a[next], b[next], b[idx]];
            faces.extend(ring_faces(&quad, tolerance)?);
        }
    }

    Ok(faces)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_cross_section(z: f64) -> Vec<Point3> {
        vec![Point3::new(-1.0, -1.0, z), Point3::new(1.0, -1.0, z), Point3::new(1.0, 1.0, z), Point3::new(-1.0, 1.0, z)]
    }

    #[test]
    fn straight_prism_has_two_caps_and_four_side_quads() {
        let cross_sections = vec![square_cross_section(0.0), square_cross_section(5.0)];
        let faces = build_sweep(&cross_sections, 1e-9).unwrap();
        assert_eq!(faces.len(), 6);
    }

    #[test]
    fn multi_station_sweep_stitches_every_segment() {
        let cross_sections = vec![square_cross_section(0.0), square_cross_section(5.0), square_cross_section(10.0)];
        let faces = build_sweep(&cross_sections, 1e-9).unwrap();
        // 2 caps + 2 segments * 4 side quads
        assert_eq!(faces.len(), 10);
    }

    #[test]
    fn single_cross_section_is_rejected() {
        let cross_sections = vec![square_cross_section(0.0)];
        assert!(build_sweep(&cross_sections, 1e-9).is_err());
    }
}
