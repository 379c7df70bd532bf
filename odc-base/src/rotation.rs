//! Rotations in 2D and 3D, normalized into a canonical angle range at
//! construction so two rotations built from equivalent angles compare equal.

use crate::cgmath64::{Matrix2, Matrix3, Vector3};
use cgmath::{Angle, Basis2, Basis3, Rad, Rotation, Rotation2, Rotation3};
use std::f64::consts::TAU;

fn normalize(angle: f64) -> f64 {
    let a = angle % TAU;
    if a < 0.0 { a + TAU } else { a }
}

/// A rotation in the plane, stored as a single angle normalized into `[0, 2*PI)`.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Rotation2D {
    angle: f64,
}

impl Rotation2D {
    /// Builds a rotation from an angle in radians.
    pub fn from_radians(angle: f64) -> Self { Rotation2D { angle: normalize(angle) } }

    /// The normalized angle, in `[0, 2*PI)`.
    pub fn angle(&self) -> f64 { self.angle }

    /// The 2x2 rotation matrix.
    pub fn to_matrix(&self) -> Matrix2 {
        let basis: Basis2<f64> = Rotation2::from_angle(Rad(self.angle));
        *basis.as_ref()
    }

    /// Composes two rotations by summing their angles.
    pub fn compose(&self, other: &Rotation2D) -> Rotation2D {
        Rotation2D::from_radians(self.angle + other.angle)
    }
}

/// A rotation in space stored as heading / pitch / roll (intrinsic Tait-Bryan
/// angles, applied heading then pitch then roll), each normalized into
/// `[0, 2*PI)` at construction.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Rotation3D {
    heading: f64,
    pitch: f64,
    roll: f64,
}

impl Rotation3D {
    /// Builds a rotation from heading/pitch/roll in radians.
    pub fn from_hpr(heading: f64, pitch: f64, roll: f64) -> Self {
        Rotation3D { heading: normalize(heading), pitch: normalize(pitch), roll: normalize(roll) }
    }

    /// Heading (yaw) about the z-axis, in `[0, 2*PI)`.
    pub fn heading(&self) -> f64 { self.heading }
    /// Pitch about the (post-heading) y-axis, in `[0, 2*PI)`.
    pub fn pitch(&self) -> f64 { self.pitch }
    /// Roll about the (post-pitch) x-axis, in `[0, 2*PI)`.
    pub fn roll(&self) -> f64 { self.roll }

    /// The 3x3 rotation matrix `R_z(heading) * R_y(pitch) * R_x(roll)`.
    pub fn to_matrix(&self) -> Matrix3 {
        let rz: Basis3<f64> = Rotation3::from_angle_z(Rad(self.heading));
        let ry: Basis3<f64> = Rotation3::from_angle_y(Rad(self.pitch));
        let rx: Basis3<f64> = Rotation3::from_angle_x(Rad(self.roll));
        rz.as_ref() * ry.as_ref() * rx.as_ref()
    }

    /// Rotates `v` by this rotation.
    pub fn rotate_vector(&self, v: Vector3) -> Vector3 { self.to_matrix() * v }
}
