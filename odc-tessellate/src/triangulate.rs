//! The triangulator fallback chain (spec §4.3): coplanar shortcut,
//! constrained Delaunay (direct and best-fit-plane-projected), fan
//! triangulation, failure.

use crate::error::{Error, Result};
use crate::triangle::Triangle3D;
use cgmath::InnerSpace;
use odc_base::{Point3, Vector3};
use odc_geometry::{newell_plane, LinearRing3D, Polygon3D};
use rustc_hash::FxHashMap;
use spade::{ConstrainedDelaunayTriangulation, Point2 as SPoint2, Triangulation as _};

/// The result of running a ring through the triangulator chain: either the
/// ring was already fuzzily coplanar and is returned unchanged (stage 1),
/// or it was broken into triangles by one of the constrained-Delaunay or
/// fan fallback stages.
#[derive(Clone, Debug)]
pub enum RingTessellation {
    Polygon(Polygon3D),
    Triangles(Vec<Triangle3D>),
}

/// Runs `points` (an ordered, cyclic ring, possibly non-convex, possibly
/// non-planar) through the fallback chain and reorients the output by the
/// ring's Newell reference normal.
pub fn triangulate_ring(points: &[Point3], tolerance: f64) -> Result<RingTessellation> {
    let points = dedupe_adjacent(points, tolerance);
    if points.len() < 3 {
        return Err(Error::NotEnoughVertices(points.len()));
    }

    if let Ok(ring) = LinearRing3D::new(points.clone(), tolerance) {
        if let Ok(polygon) = Polygon3D::simple(ring, tolerance) {
            return Ok(RingTessellation::Polygon(polygon));
        }
    }

    let (_, reference_normal) = newell_plane(&points);

    let mut triangles = cdt_xy_projection(&points)
        .or_else(|_| cdt_best_fit_plane_projection(&points))
        .or_else(|_| fan_triangulation(&points, tolerance))?;

    if reference_normal.magnitude2() > 1e-20 {
        reorient(&mut triangles, reference_normal);
    }
    Ok(RingTessellation::Triangles(triangles))
}

/// Drops cyclically-adjacent fuzzy-duplicate vertices.
fn dedupe_adjacent(points: &[Point3], tolerance: f64) -> Vec<Point3> {
    let mut out: Vec<Point3> = Vec::with_capacity(points.len());
    for &p in points {
        if out.last().map(|&last| fuzzy_eq(last, p, tolerance)).unwrap_or(false) {
            continue;
        }
        out.push(p);
    }
    if out.len() > 1 && fuzzy_eq(out[0], *out.last().unwrap(), tolerance) {
        out.pop();
    }
    out
}

fn fuzzy_eq(a: Point3, b: Point3, tolerance: f64) -> bool {
    (a.x - b.x).abs() <= tolerance && (a.y - b.y).abs() <= tolerance && (a.z - b.z).abs() <= tolerance
}

/// Stage 2: constrained Delaunay on the raw `(x, y)` projection. Cheap, and
/// correct whenever the ring is already near-horizontal.
fn cdt_xy_projection(points: &[Point3]) -> Result<Vec<Triangle3D>> {
    let plane: Vec<(f64, f64)> = points.iter().map(|p| (p.x, p.y)).collect();
    cdt_triangulate(&plane, points)
}

/// Stage 3: project onto the ring's best-fit plane (Newell normal) and
/// constrained-Delaunay-triangulate there, lifting results back by index.
fn cdt_best_fit_plane_projection(points: &[Point3]) -> Result<Vec<Triangle3D>> {
    let (origin, raw_normal) = newell_plane(points);
    if raw_normal.magnitude2() < 1e-20 {
        return Err(Error::TriangulationFailure);
    }
    let normal = raw_normal.normalize();
    let (u_axis, v_axis) = orthonormal_basis(normal);
    let plane: Vec<(f64, f64)> = points
        .iter()
        .map(|p| {
            let offset = Vector3::new(p.x - origin.x, p.y - origin.y, p.z - origin.z);
            (offset.dot(u_axis), offset.dot(v_axis))
        })
        .collect();
    cdt_triangulate(&plane, points)
}

fn orthonormal_basis(normal: Vector3) -> (Vector3, Vector3) {
    let helper = if normal.x.abs() < 0.9 { Vector3::new(1.0, 0.0, 0.0) } else { Vector3::new(0.0, 1.0, 0.0) };
    let u = helper.cross(normal).normalize();
    let v = normal.cross(u);
    (u, v)
}

fn cdt_triangulate(plane: &[(f64, f64)], points3d: &[Point3]) -> Result<Vec<Triangle3D>> {
    let n = plane.len();
    let mut cdt = ConstrainedDelaunayTriangulation::<SPoint2<f64>>::new();
    let mut handle_to_index = FxHashMap::default();
    let mut handles = Vec::with_capacity(n);
    for (i, &(x, y)) in plane.iter().enumerate() {
        let handle = cdt.insert(SPoint2::new(x, y)).map_err(|_| Error::TriangulationFailure)?;
        handle_to_index.insert(handle, i);
        handles.push(handle);
    }
    for i in 0..n {
        let j = (i + 1) % n;
        if cdt.can_add_constraint(handles[i], handles[j]) {
            cdt.add_constraint(handles[i], handles[j]);
        }
    }

    let triangles: Vec<Triangle3D> = cdt
        .inner_faces()
        .filter_map(|face| {
            let verts = face.vertices();
            let idx = [
                *handle_to_index.get(&verts[0].fix())?,
                *handle_to_index.get(&verts[1].fix())?,
                *handle_to_index.get(&verts[2].fix())?,
            ];
            let centroid = (
                (plane[idx[0]].0 + plane[idx[1]].0 + plane[idx[2]].0) / 3.0,
                (plane[idx[0]].1 + plane[idx[1]].1 + plane[idx[2]].1) / 3.0,
            );
            if !point_in_polygon(centroid, plane) {
                return None;
            }
            let tri = Triangle3D::new(points3d[idx[0]], points3d[idx[1]], points3d[idx[2]]);
            (tri.area() > 1e-12).then_some(tri)
        })
        .collect();

    if triangles.is_empty() {
        return Err(Error::TriangulationFailure);
    }
    Ok(triangles)
}

/// Even-odd ray-casting point-in-polygon test in the projected plane.
fn point_in_polygon(point: (f64, f64), ring: &[(f64, f64)]) -> bool {
    let n = ring.len();
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = ring[i];
        let (xj, yj) = ring[j];
        if (yi > point.1) != (yj > point.1) && point.0 < (xj - xi) * (point.1 - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Stage 4: fan triangulation from vertex 0; rejects if vertex 0 duplicates
/// any other vertex.
fn fan_triangulation(points: &[Point3], tolerance: f64) -> Result<Vec<Triangle3D>> {
    let n = points.len();
    for i in 1..n {
        if fuzzy_eq(points[0], points[i], tolerance) {
            return Err(Error::DegeneratePivot(i));
        }
    }
    Ok((1..n - 1).map(|i| Triangle3D::new(points[0], points[i], points[i + 1])).collect())
}

/// Flips any triangle whose normal's angle to `reference_normal` exceeds
/// `3π/4`.
fn reorient(triangles: &mut [Triangle3D], reference_normal: Vector3) {
    let reference = reference_normal.normalize();
    for triangle in triangles.iter_mut() {
        let normal = triangle.raw_normal();
        if normal.magnitude2() < 1e-20 {
            continue;
        }
        let cos_angle = normal.normalize().dot(reference).clamp(-1.0, 1.0);
        if cos_angle.acos() > 3.0 * std::f64::consts::PI / 4.0 {
            triangle.flip();
        }
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
    fn coplanar_ring_is_returned_unchanged() {
        let result = triangulate_ring(&square(1.0), 1e-9).unwrap();
        assert!(matches!(result, RingTessellation::Polygon(_)));
    }

    #[test]
    fn non_planar_ring_falls_through_to_triangles() {
        let mut points = square(0.0);
        points[2].z = 5.0;
        let result = triangulate_ring(&points, 1e-9).unwrap();
        match result {
            RingTessellation::Triangles(triangles) => {
                assert!(!triangles.is_empty());
                let total_area: f64 = triangles.iter().map(Triangle3D::area).sum();
                assert!(total_area > 0.0);
            }
            RingTessellation::Polygon(_) => panic!("expected a triangulated fallback"),
        }
    }

    #[test]
    fn concave_polygon_triangulates_without_covering_the_notch() {
        // An L-shaped hexagon: the constrained triangulation must respect
        // the notch at (1,1) rather than filling the convex hull.
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(2.0, 1.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(1.0, 2.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
        ];
        let result = triangulate_ring(&points, 1e-9).unwrap();
        // This ring is planar, so stage 1 emits it unchanged; area must
        // still equal the L-shape (4 - 1 = 3), not the convex hull (4).
        match result {
            RingTessellation::Polygon(polygon) => assert!((polygon.area() - 3.0).abs() < 1e-9),
            RingTessellation::Triangles(triangles) => {
                let total: f64 = triangles.iter().map(Triangle3D::area).sum();
                assert!((total - 3.0).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn fan_triangulation_rejects_duplicate_pivot() {
        let points = vec![Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0)];
        assert!(fan_triangulation(&points, 1e-9).is_err());
    }
}
