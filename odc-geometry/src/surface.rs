//! Planar polygons in 3D: rings, best-fit planes and coplanarity checks
//! (spec §4.3, surface construction).

use crate::error::{Error, Result};
use cgmath::InnerSpace;
use odc_base::{FiniteCheck, Point3, Vector3};

/// An ordered, open sequence of vertices describing a closed ring (the edge
/// from the last vertex back to the first is implicit).
#[derive(Clone, Debug, PartialEq)]
pub struct LinearRing3D {
    points: Vec<Point3>,
}

impl LinearRing3D {
    /// Builds a ring from an open vertex list (no repeated closing vertex).
    /// Fails if fewer than 3 vertices are given, or if any two
    /// (cyclically) adjacent vertices are fuzzily equal.
    pub fn new(points: Vec<Point3>, tolerance: f64) -> Result<Self> {
        if points.len() < 3 {
            return Err(Error::NotEnoughVertices(points.len()));
        }
        let n = points.len();
        for i in 0..n {
            let j = (i + 1) % n;
            if fuzzy_eq_point(points[i], points[j], tolerance) {
                return Err(Error::DuplicateVertices(i, j));
            }
        }
        Ok(LinearRing3D { points })
    }

    /// The ring's vertices, in order, without a repeated closing vertex.
    pub fn points(&self) -> &[Point3] { &self.points }

    /// The edges of the ring as `(start, end)` pairs, including the
    /// closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (Point3, Point3)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }
}

fn fuzzy_eq_point(a: Point3, b: Point3, tolerance: f64) -> bool {
    (a.x - b.x).abs() <= tolerance && (a.y - b.y).abs() <= tolerance && (a.z - b.z).abs() <= tolerance
}

/// The area-weighted normal of a (possibly non-planar) ring via Newell's
/// method, and its centroid. Used as the best-fit plane for near-planar
/// input without a full eigendecomposition.
pub fn newell_plane(points: &[Point3]) -> (Point3, Vector3) {
    let n = points.len();
    let mut normal = Vector3::new(0.0, 0.0, 0.0);
    let mut centroid = Vector3::new(0.0, 0.0, 0.0);
    for i in 0..n {
        let curr = points[i];
        let next = points[(i + 1) % n];
        normal.x += (curr.y - next.y) * (curr.z + next.z);
        normal.y += (curr.z - next.z) * (curr.x + next.x);
        normal.z += (curr.x - next.x) * (curr.y + next.y);
        centroid.x += curr.x;
        centroid.y += curr.y;
        centroid.z += curr.z;
    }
    let origin = Point3::new(centroid.x / n as f64, centroid.y / n as f64, centroid.z / n as f64);
    (origin, normal)
}

/// A planar polygon in 3D: an exterior ring plus zero or more interior
/// (hole) rings, all fuzzily coplanar with a shared best-fit plane.
#[derive(Clone, Debug)]
pub struct Polygon3D {
    exterior: LinearRing3D,
    interiors: Vec<LinearRing3D>,
    origin: Point3,
    normal: Vector3,
}

impl Polygon3D {
    /// Builds a polygon, computing its best-fit plane via Newell's method
    /// and checking every vertex (exterior and interior) lies within
    /// `tolerance` of that plane.
    pub fn new(exterior: LinearRing3D, interiors: Vec<LinearRing3D>, tolerance: f64) -> Result<Self> {
        let (origin, raw_normal) = newell_plane(exterior.points());
        if raw_normal.magnitude2() < 1e-20 {
            return Err(Error::Colinear);
        }
        let normal = raw_normal.normalize();

        let mut max_deviation: f64 = 0.0;
        for ring in std::iter::once(&exterior).chain(interiors.iter()) {
            for &p in ring.points() {
                if !p.is_finite_strict() {
                    return Err(Error::NonFiniteValue);
                }
                let offset = Vector3::new(p.x - origin.x, p.y - origin.y, p.z - origin.z);
                max_deviation = max_deviation.max(offset.dot(normal).abs());
            }
        }
        if max_deviation > tolerance {
            return Err(Error::NotCoplanar(max_deviation));
        }

        Ok(Polygon3D { exterior, interiors, origin, normal })
    }

    /// A polygon with no holes.
    pub fn simple(exterior: LinearRing3D, tolerance: f64) -> Result<Self> { Self::new(exterior, Vec::new(), tolerance) }

    /// The exterior ring.
    pub fn exterior(&self) -> &LinearRing3D { &self.exterior }
    /// The interior (hole) rings.
    pub fn interiors(&self) -> &[LinearRing3D] { &self.interiors }
    /// A point on the best-fit plane (the exterior ring's centroid).
    pub fn origin(&self) -> Point3 { self.origin }
    /// The unit normal of the best-fit plane, oriented by the exterior
    /// ring's vertex winding (right-hand rule).
    pub fn normal(&self) -> Vector3 { self.normal }

    /// The polygon's area (exterior minus holes), via the half-magnitude of
    /// the Newell normal.
    pub fn area(&self) -> f64 {
        let (_, raw) = newell_plane(self.exterior.points());
        let exterior_area = raw.magnitude() / 2.0;
        let hole_area: f64 = self
            .interiors
            .iter()
            .map(|ring| newell_plane(ring.points()).1.magnitude() / 2.0)
            .sum();
        exterior_area - hole_area
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(z: f64) -> Vec<Point3> {
        vec![
            Point3::new(0.0, 0.0, z),
            Point3::new(1.0, 0.0, z),
            Point3::new(1.0, 1.0, z),
            Point3::new(0.0, 1.0, z),
        ]
    }

    #[test]
    fn planar_square_has_unit_area_and_axis_normal() {
        let ring = LinearRing3D::new(square(2.0), 1e-9).unwrap();
        let polygon = Polygon3D::simple(ring, 1e-9).unwrap();
        assert!((polygon.area() - 1.0).abs() < 1e-9);
        assert!((polygon.normal().z.abs() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn non_coplanar_vertices_are_rejected() {
        let mut points = square(0.0);
        points[2].z = 5.0;
        let ring = LinearRing3D::new(points, 1e-9).unwrap();
        assert!(Polygon3D::simple(ring, 1e-9).is_err());
    }

    #[test]
    fn duplicate_adjacent_vertices_are_rejected() {
        let mut points = square(0.0);
        points[1] = points[0];
        assert!(LinearRing3D::new(points, 1e-9).is_err());
    }

    #[test]
    fn colinear_vertices_have_no_normal() {
        let points = vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0), Point3::new(2.0, 0.0, 0.0)];
        let ring = LinearRing3D::new(points, 1e-9).unwrap();
        assert!(Polygon3D::simple(ring, 1e-9).is_err());
    }
}
