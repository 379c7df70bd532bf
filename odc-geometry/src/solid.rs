//! Solid descriptors (spec §4.3): some build their own faces directly
//! (`Cuboid3D`, `Cylinder3D`); others (`ParametricSweep3D`, `Polyhedron3D`)
//! are descriptors whose faces require the triangulation / best-fit-plane
//! projection machinery in the tessellation crate and so are built there.

use crate::error::{Error, Result};
use crate::surface::{LinearRing3D, Polygon3D};
use odc_base::{Affine3D, Point3, Vector3};

/// Which lateral side of a cross-section a [`VerticalOutlineElement`]'s
/// single head point sits on.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Side {
    /// The left side (increasing `t`).
    Left,
    /// The right side (decreasing `t`).
    Right,
}

/// One cross-section of a vertical outline used to build a
/// [`AbstractSolid3D::Polyhedron3D`] or [`AbstractSolid3D::ParametricSweep3D`].
///
/// A sum type over the three shapes a cross-section can take, rather than a
/// single struct with optional fields: a ground footprint with no vertical
/// extent, one vertical edge on a single side (e.g. a jersey barrier
/// profile), or two vertical edges (e.g. a wall with both a near and far
/// face).
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum VerticalOutlineElement {
    /// A ground-level point with no vertical extent at this cross-section.
    BaseOnly { base: Point3 },
    /// A ground point plus one vertical edge to `head`, on the given side.
    OneHead { base: Point3, side: Side, head: Point3 },
    /// A ground point plus two vertical edges, to `left_head` and `right_head`.
    TwoHeads { base: Point3, left_head: Point3, right_head: Point3 },
}

impl VerticalOutlineElement {
    /// The ground-level point common to every variant.
    pub fn base(&self) -> Point3 {
        match *self {
            VerticalOutlineElement::BaseOnly { base }
            | VerticalOutlineElement::OneHead { base, .. }
            | VerticalOutlineElement::TwoHeads { base, .. } => base,
        }
    }
}

/// A solid in 3D: either one whose faces are built directly here, or a
/// descriptor resolved by the tessellation crate.
#[derive(Clone, Debug)]
pub enum AbstractSolid3D {
    /// An oriented box.
    Cuboid3D { pose: Affine3D, length: f64, width: f64, height: f64 },
    /// A right circular cylinder, axis along the pose's local z.
    Cylinder3D { pose: Affine3D, radius: f64, height: f64, radial_segments: usize },
    /// A swept solid along a parametric path; faces are built by stitching
    /// the edge curves of consecutive cross-sections (tessellation crate).
    ParametricSweep3D { cross_sections: Vec<Vec<Point3>> },
    /// A solid built from an ordered vertical outline (tessellation crate).
    Polyhedron3D { outline: Vec<VerticalOutlineElement> },
}

impl AbstractSolid3D {
    /// Builds the solid's boundary faces. Succeeds directly for `Cuboid3D`
    /// and `Cylinder3D`; fails with
    /// [`Error::RequiresTessellationBackend`] for `ParametricSweep3D` and
    /// `Polyhedron3D`, which the tessellation crate builds instead.
    pub fn polygons(&self, tolerance: f64) -> Result<Vec<Polygon3D>> {
        match self {
            AbstractSolid3D::Cuboid3D { pose, length, width, height } => cuboid_polygons(*pose, *length, *width, *height, tolerance),
            AbstractSolid3D::Cylinder3D { pose, radius, height, radial_segments } => {
                cylinder_polygons(*pose, *radius, *height, *radial_segments, tolerance)
            }
            AbstractSolid3D::ParametricSweep3D { .. } => Err(Error::RequiresTessellationBackend("ParametricSweep3D".into())),
            AbstractSolid3D::Polyhedron3D { .. } => Err(Error::RequiresTessellationBackend("Polyhedron3D".into())),
        }
    }
}

fn cuboid_polygons(pose: Affine3D, length: f64, width: f64, height: f64, tolerance: f64) -> Result<Vec<Polygon3D>> {
    if length <= 0.0 {
        return Err(Error::NonPositiveDimension("length".into(), length));
    }
    if width <= 0.0 {
        return Err(Error::NonPositiveDimension("width".into(), width));
    }
    if height <= 0.0 {
        return Err(Error::NonPositiveDimension("height".into(), height));
    }
    let (hl, hw, hh) = (length / 2.0, width / 2.0, height / 2.0);
    let local_corners = [
        Vector3::new(-hl, -hw, -hh),
        Vector3::new(hl, -hw, -hh),
        Vector3::new(hl, hw, -hh),
        Vector3::new(-hl, hw, -hh),
        Vector3::new(-hl, -hw, hh),
        Vector3::new(hl, -hw, hh),
        Vector3::new(hl, hw, hh),
        Vector3::new(-hl, hw, hh),
    ];
    let origin = pose.transform_point(Point3::new(0.0, 0.0, 0.0));
    let corners: Vec<Point3> = local_corners
        .iter()
        .map(|v| {
            let moved = pose.transform_vector(*v);
            Point3::new(origin.x + moved.x, origin.y + moved.y, origin.z + moved.z)
        })
        .collect();

    // outward-facing winding for each of the 6 faces, indexing `corners`.
    let faces: [[usize; 4]; 6] = [
        [0, 3, 2, 1], // bottom (-z)
        [4, 5, 6, 7], // top (+z)
        [0, 1, 5, 4], // -y
        [1, 2, 6, 5], // +x
        [2, 3, 7, 6], // +y
        [3, 0, 4, 7], // -x
    ];
    faces
        .iter()
        .map(|idx| {
            let ring = LinearRing3D::new(idx.iter().map(|&i| corners[i]).collect(), tolerance)?;
            Polygon3D::simple(ring, tolerance)
        })
        .collect()
}

fn cylinder_polygons(pose: Affine3D, radius: f64, height: f64, radial_segments: usize, tolerance: f64) -> Result<Vec<Polygon3D>> {
    if radius <= 0.0 {
        return Err(Error::NonPositiveDimension("radius".into(), radius));
    }
    if height <= 0.0 {
        return Err(Error::NonPositiveDimension("height".into(), height));
    }
    if radial_segments < 3 {
        return Err(Error::NotEnoughVertices(radial_segments));
    }

    let origin = pose.transform_point(Point3::new(0.0, 0.0, 0.0));
    let place = |local: Vector3| -> Point3 {
        let moved = pose.transform_vector(local);
        Point3::new(origin.x + moved.x, origin.y + moved.y, origin.z + moved.z)
    };

    let bottom: Vec<Point3> = (0..radial_segments)
        .map(|i| {
            let theta = 2.0 * std::f64::consts::PI * i as f64 / radial_segments as f64;
            place(Vector3::new(radius * theta.cos(), radius * theta.sin(), 0.0))
        })
        .collect();
    let top: Vec<Point3> = (0..radial_segments)
        .map(|i| {
            let theta = 2.0 * std::f64::consts::PI * i as f64 / radial_segments as f64;
            place(Vector3::new(radius * theta.cos(), radius * theta.sin(), height))
        })
        .collect();

    let mut polygons = Vec::with_capacity(radial_segments + 2);
    polygons.push(Polygon3D::simple(LinearRing3D::new(bottom.iter().rev().copied().collect(), tolerance)?, tolerance)?);
    polygons.push(Polygon3D::simple(LinearRing3D::new(top.clone(), tolerance)?, tolerance)?);
    for i in 0..radial_segments {
        let j = (i + 1) % radial_segments;
        let ring = LinearRing3D::new(vec![bottom[i], bottom[j], top[j], top[i]], tolerance)?;
        polygons.push(Polygon3D::simple(ring, tolerance)?);
    }
    Ok(polygons)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cuboid_has_six_faces_of_matching_area() {
        let solid = AbstractSolid3D::Cuboid3D { pose: Affine3D::identity(), length: 2.0, width: 3.0, height: 4.0 };
        let faces = solid.polygons(1e-9).unwrap();
        assert_eq!(faces.len(), 6);
        let areas: Vec<f64> = faces.iter().map(|f| f.area()).collect();
        assert!(areas.iter().any(|a| (a - 6.0).abs() < 1e-9));
        assert!(areas.iter().any(|a| (a - 8.0).abs() < 1e-9));
        assert!(areas.iter().any(|a| (a - 12.0).abs() < 1e-9));
    }

    #[test]
    fn cylinder_has_expected_face_count() {
        let solid = AbstractSolid3D::Cylinder3D { pose: Affine3D::identity(), radius: 1.0, height: 2.0, radial_segments: 8 };
        let faces = solid.polygons(1e-9).unwrap();
        assert_eq!(faces.len(), 10);
    }

    #[test]
    fn sweep_and_polyhedron_defer_to_tessellation_backend() {
        let sweep = AbstractSolid3D::ParametricSweep3D { cross_sections: vec![] };
        assert!(sweep.polygons(1e-9).is_err());
        let poly = AbstractSolid3D::Polyhedron3D { outline: vec![] };
        assert!(poly.polygons(1e-9).is_err());
    }
}
