//! Shared helper: run a vertex ring through the triangulator chain and
//! flatten the result into a list of flat [`Polygon3D`] faces, dropping
//! zero-area output (spec §4.2 "filler quads with zero area ... are
//! dropped silently", applied here to every face builder).

use crate::error::Result;
use crate::triangle::Triangle3D;
use crate::triangulate::{triangulate_ring, RingTessellation};
use odc_base::Point3;
use odc_geometry::{LinearRing3D, Polygon3D};

pub fn ring_faces(points: &[Point3], tolerance: f64) -> Result<Vec<Polygon3D>> {
    if points.len() < 3 {
        return Ok(Vec::new());
    }
    match triangulate_ring(points, tolerance)? {
        RingTessellation::Polygon(polygon) => {
            if polygon.area() > tolerance * tolerance {
                Ok(vec![polygon])
            } else {
                Ok(Vec::new())
            }
        }
        RingTessellation::Triangles(triangles) => triangles
            .iter()
            .filter(|t| t.area() > tolerance * tolerance)
            .map(|t| triangle_polygon(t, tolerance))
            .collect(),
    }
}

fn triangle_polygon(triangle: &Triangle3D, tolerance: f64) -> Result<Polygon3D> {
    let ring = LinearRing3D::new(triangle.vertices().to_vec(), tolerance)?;
    Ok(Polygon3D::simple(ring, tolerance.max(1e-9))?)
}
