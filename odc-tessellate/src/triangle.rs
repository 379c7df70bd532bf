//! A single output triangle of the triangulator chain.

use cgmath::InnerSpace;
use odc_base::{Point3, Vector3};

/// Three vertices, counter-clockwise around `normal()` when seen from the
/// side the normal points to.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Triangle3D {
    pub a: Point3,
    pub b: Point3,
    pub c: Point3,
}

impl Triangle3D {
    pub fn new(a: Point3, b: Point3, c: Point3) -> Self { Triangle3D { a, b, c } }

    /// The (non-unit) normal via `(b - a) x (c - a)`; zero for a degenerate
    /// (colinear or zero-area) triangle.
    pub fn raw_normal(&self) -> Vector3 {
        let ab = Vector3::new(self.b.x - self.a.x, self.b.y - self.a.y, self.b.z - self.a.z);
        let ac = Vector3::new(self.c.x - self.a.x, self.c.y - self.a.y, self.c.z - self.a.z);
        ab.cross(ac)
    }

    /// The triangle's area.
    pub fn area(&self) -> f64 { self.raw_normal().magnitude() / 2.0 }

    /// Swaps `b` and `c`, flipping the winding and negating the normal.
    pub fn flip(&mut self) { std::mem::swap(&mut self.b, &mut self.c); }

    pub fn vertices(&self) -> [Point3; 3] { [self.a, self.b, self.c] }
}
