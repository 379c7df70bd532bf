//! Math primitives shared across the OpenDRIVE -> CityGML transformation
//! pipeline: vectors, rotations, affine transforms, ranges, univariate
//! functions and Fresnel integrals.
//!
//! Every fuzzy comparison here takes its tolerance explicitly; there is no
//! ambient "current tolerance".

pub mod affine;
pub mod cgmath64;
pub mod error;
pub mod fresnel;
pub mod range;
pub mod rotation;
pub mod tolerance;

pub use affine::{Affine2D, Affine3D};
pub use cgmath64::{FiniteCheck, Matrix2, Matrix3, Matrix4, Point2, Point3, Vector2, Vector3};
pub use error::{Error, Result};
pub use fresnel::fresnel;
pub use range::{Endpoint, Range, RangeSet};
pub use rotation::{Rotation2D, Rotation3D};
pub use tolerance::{FuzzyEq, DEFAULT_TOLERANCE};
pub use univariate::{Piece, UnivariateFunction};

pub mod univariate;
