//! Re-exports of `cgmath` fixed at `f64` precision, the way the rest of this
//! workspace expects its vector and matrix types.

pub use cgmath::prelude::*;
pub use cgmath::Rad;

macro_rules! f64_type {
    ($typename: ident) => {
        /// redefinition, scalar = f64
        pub type $typename = cgmath::$typename<f64>;
    };
    ($a: ident, $($b: ident), *) => { f64_type!($a); f64_type!($($b),*); }
}
f64_type!(Vector2, Vector3, Matrix2, Matrix3, Matrix4, Point2, Point3);

/// Returns `true` iff every component of `v` is finite.
pub trait FiniteCheck {
    /// Returns `true` iff every scalar component is finite (not NaN, not infinite).
    fn is_finite_strict(&self) -> bool;
}

impl FiniteCheck for f64 {
    fn is_finite_strict(&self) -> bool { f64::is_finite(*self) }
}

impl FiniteCheck for Vector2 {
    fn is_finite_strict(&self) -> bool { self.x.is_finite() && self.y.is_finite() }
}

impl FiniteCheck for Vector3 {
    fn is_finite_strict(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl FiniteCheck for Point2 {
    fn is_finite_strict(&self) -> bool { self.x.is_finite() && self.y.is_finite() }
}

impl FiniteCheck for Point3 {
    fn is_finite_strict(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}
