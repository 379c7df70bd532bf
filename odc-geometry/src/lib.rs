//! Curves, surfaces and solids over the road reference line (spec §4.1-4.3):
//! parametric plan-view curve evaluation, 3D lofting by elevation and
//! superelevation, planar surfaces with best-fit-plane checks, and solid
//! descriptors.

pub mod bivariate_surface;
pub mod curve3d;
pub mod curves;
pub mod error;
pub mod road_curve;
pub mod solid;
pub mod surface;

pub use bivariate_surface::ParametricBivariateSurface;
pub use curve3d::{
    compose_plan_view, AbstractCurve3D, CompositeCurve, ContinuityWarning, GeometryKind, GeometryRecord, LineString3D, LocalKind,
    PlacedSegment,
};
pub use curves::{Arc, CubicPolynomial, LineSegment, LocalCurve2D, ParamPolyRange, ParametricCubic, Spiral};
pub use error::{Error, Result};
pub use road_curve::RoadCurve3D;
pub use solid::{AbstractSolid3D, Side, VerticalOutlineElement};
pub use surface::{newell_plane, LinearRing3D, Polygon3D};
