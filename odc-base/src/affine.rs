//! 3x3 / 4x4 homogeneous affine transforms with named constructors,
//! `append`-style composition, decomposition and inversion.

use crate::cgmath64::{FiniteCheck, Matrix3, Matrix4, Point2, Point3, Vector2, Vector3};
use crate::error::{Error, Result};
use crate::rotation::{Rotation2D, Rotation3D};
use cgmath::{SquareMatrix, Transform};

/// A 2D affine transform backed by a 3x3 homogeneous matrix.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Affine2D {
    matrix: Matrix3,
}

impl Affine2D {
    fn from_matrix(matrix: Matrix3) -> Result<Self> {
        if !matrix.x.is_finite_strict() || !matrix.y.is_finite_strict() || !matrix.z.is_finite_strict() {
            return Err(Error::NonFiniteValue);
        }
        Ok(Affine2D { matrix })
    }

    /// The identity transform.
    pub fn identity() -> Self { Affine2D { matrix: Matrix3::from_value(1.0) } }

    /// Pure translation.
    pub fn translation(t: Vector2) -> Result<Self> {
        let m = Matrix3::new(1.0, 0.0, 0.0, 0.0, 1.0, 0.0, t.x, t.y, 1.0);
        Self::from_matrix(m)
    }

    /// Pure rotation about the origin.
    pub fn rotation(r: Rotation2D) -> Result<Self> {
        let rm = r.to_matrix();
        let m = Matrix3::new(
            rm.x.x, rm.x.y, 0.0,
            rm.y.x, rm.y.y, 0.0,
            0.0, 0.0, 1.0,
        );
        Self::from_matrix(m)
    }

    /// Pure scaling along each axis.
    pub fn scaling(sx: f64, sy: f64) -> Result<Self> {
        if !sx.is_finite() || !sy.is_finite() {
            return Err(Error::NonFiniteValue);
        }
        Self::from_matrix(Matrix3::new(sx, 0.0, 0.0, 0.0, sy, 0.0, 0.0, 0.0, 1.0))
    }

    /// A pose: rotate then translate to `origin`.
    pub fn from_pose(origin: Point2, rotation: Rotation2D) -> Result<Self> {
        Self::rotation(rotation)?.append(&Self::translation(Vector2::new(origin.x, origin.y))?)
    }

    /// Composition: the transform equivalent to applying `self` first, then
    /// `other`.
    pub fn append(&self, other: &Affine2D) -> Result<Self> {
        Self::from_matrix(other.matrix * self.matrix)
    }

    /// Applies this transform to a point.
    pub fn transform_point(&self, p: Point2) -> Point2 { Transform::transform_point(&self.matrix, p) }

    /// Applies the linear part of this transform to a vector (no translation).
    pub fn transform_vector(&self, v: Vector2) -> Vector2 { Transform::transform_vector(&self.matrix, v) }

    /// The inverse transform, or an error if the matrix is singular.
    pub fn inverse(&self) -> Result<Self> {
        self.matrix.invert().map(|m| Affine2D { matrix: m }).ok_or(Error::NotInvertible)
    }

    /// Extracts the translation component.
    pub fn extract_translation(&self) -> Vector2 { Vector2::new(self.matrix.z.x, self.matrix.z.y) }
}

/// A 3D affine transform backed by a 4x4 homogeneous matrix.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Affine3D {
    matrix: Matrix4,
}

impl Affine3D {
    fn from_matrix(matrix: Matrix4) -> Result<Self> {
        for col in [matrix.x, matrix.y, matrix.z, matrix.w] {
            if !col.x.is_finite() || !col.y.is_finite() || !col.z.is_finite() || !col.w.is_finite() {
                return Err(Error::NonFiniteValue);
            }
        }
        Ok(Affine3D { matrix })
    }

    /// The identity transform.
    pub fn identity() -> Self { Affine3D { matrix: Matrix4::from_value(1.0) } }

    /// Pure translation.
    pub fn translation(t: Vector3) -> Result<Self> {
        if !t.is_finite_strict() {
            return Err(Error::NonFiniteValue);
        }
        Ok(Affine3D { matrix: Matrix4::from_translation(t) })
    }

    /// Pure rotation about the origin.
    pub fn rotation(r: Rotation3D) -> Result<Self> {
        let rm = r.to_matrix();
        Self::from_matrix(Matrix4::from(rm))
    }

    /// Pure scaling along each axis.
    pub fn scaling(sx: f64, sy: f64, sz: f64) -> Result<Self> {
        if !sx.is_finite() || !sy.is_finite() || !sz.is_finite() {
            return Err(Error::NonFiniteValue);
        }
        Ok(Affine3D { matrix: Matrix4::from_nonuniform_scale(sx, sy, sz) })
    }

    /// Builds a transform from a new orthonormal basis (columns `x`, `y`,
    /// `z`) placed at `origin`.
    pub fn from_basis(origin: Point3, x: Vector3, y: Vector3, z: Vector3) -> Result<Self> {
        let m = Matrix4::new(
            x.x, x.y, x.z, 0.0,
            y.x, y.y, y.z, 0.0,
            z.x, z.y, z.z, 0.0,
            origin.x, origin.y, origin.z, 1.0,
        );
        Self::from_matrix(m)
    }

    /// A pose: rotate then translate to `origin`.
    pub fn from_pose(origin: Point3, rotation: Rotation3D) -> Result<Self> {
        Self::rotation(rotation)?.append(&Self::translation(Vector3::new(origin.x, origin.y, origin.z))?)
    }

    /// Composition: the transform equivalent to applying `self` first, then
    /// `other`.
    pub fn append(&self, other: &Affine3D) -> Result<Self> {
        Self::from_matrix(other.matrix * self.matrix)
    }

    /// Applies this transform to a point.
    pub fn transform_point(&self, p: Point3) -> Point3 { Transform::transform_point(&self.matrix, p) }

    /// Applies the linear part of this transform to a vector (no translation).
    pub fn transform_vector(&self, v: Vector3) -> Vector3 { Transform::transform_vector(&self.matrix, v) }

    /// The inverse transform, or an error if the matrix is singular.
    pub fn inverse(&self) -> Result<Self> {
        self.matrix.invert().map(|m| Affine3D { matrix: m }).ok_or(Error::NotInvertible)
    }

    /// Extracts the translation component.
    pub fn extract_translation(&self) -> Vector3 {
        Vector3::new(self.matrix.w.x, self.matrix.w.y, self.matrix.w.z)
    }

    /// Extracts the per-axis scale (the length of each basis column).
    pub fn extract_scaling(&self) -> Vector3 {
        Vector3::new(
            Vector3::new(self.matrix.x.x, self.matrix.x.y, self.matrix.x.z).mag(),
            Vector3::new(self.matrix.y.x, self.matrix.y.y, self.matrix.y.z).mag(),
            Vector3::new(self.matrix.z.x, self.matrix.z.y, self.matrix.z.z).mag(),
        )
    }

    /// `true` iff the transform is finite and strictly affine (bottom row
    /// `[0, 0, 0, 1]`), which always holds for transforms built through the
    /// constructors above.
    pub fn is_affine(&self) -> bool {
        let m = self.matrix;
        (m.x.w, m.y.w, m.z.w, m.w.w) == (0.0, 0.0, 0.0, 1.0)
    }
}

trait Magnitude {
    fn mag(&self) -> f64;
}

impl Magnitude for Vector3 {
    fn mag(&self) -> f64 { (self.x * self.x + self.y * self.y + self.z * self.z).sqrt() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translation_extracts_translation_and_matches_point_at() {
        let t = Vector3::new(1.0, 2.0, 3.0);
        let a = Affine3D::translation(t).unwrap();
        let origin = Point3::new(0.0, 0.0, 0.0);
        let moved = a.transform_point(origin);
        assert!((Vector3::new(moved.x, moved.y, moved.z) - a.extract_translation()).mag() < 1e-12);
    }

    #[test]
    fn append_then_inverse_round_trips() {
        let a = Affine3D::translation(Vector3::new(1.0, 0.0, 0.0)).unwrap();
        let b = Affine3D::rotation(Rotation3D::from_hpr(std::f64::consts::FRAC_PI_2, 0.0, 0.0)).unwrap();
        let composed = a.append(&b).unwrap();
        let inv = composed.inverse().unwrap();
        let p = Point3::new(3.0, 4.0, 5.0);
        let round_tripped = composed.append(&inv).unwrap().transform_point(p);
        assert!((round_tripped.x - p.x).abs() < 1e-9);
        assert!((round_tripped.y - p.y).abs() < 1e-9);
        assert!((round_tripped.z - p.z).abs() < 1e-9);
    }

    #[test]
    fn is_affine_holds_for_constructed_transforms() {
        let a = Affine3D::from_pose(Point3::new(1.0, 2.0, 3.0), Rotation3D::from_hpr(0.3, 0.1, 0.0)).unwrap();
        assert!(a.is_affine());
    }
}
