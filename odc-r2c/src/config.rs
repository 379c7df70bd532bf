//! Knobs the transform takes explicitly rather than reading from any
//! ambient global (spec §6's CLI options table, restricted to the ones
//! this crate itself consumes).

/// Which CityGML major version the transform targets. Some object routing
/// decisions differ between the two (spec §6, `--convert-to-citygml2`).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum CityGmlVersion {
    #[default]
    V3,
    V2,
}

/// Parameters controlling how RoadSpace geometry is discretized and
/// identified when building CityGML features.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct TransformConfig {
    /// Fuzzy-comparison tolerance threaded through every curve/surface
    /// evaluation.
    pub tolerance: f64,
    /// Sample spacing along `s` for lane and filler boundary polylines.
    pub discretization_step_size: f64,
    /// Sample spacing along `s` for `ParametricSweep3D` cross-sections.
    pub sweep_discretization_step_size: f64,
    /// Radial segment count for `Cylinder3D` faces.
    pub circle_slices: usize,
    /// Which CityGML major version object routing targets.
    pub citygml_version: CityGmlVersion,
    /// Constant translation applied to every emitted point (`--offset`).
    pub offset: [f64; 3],
}

impl Default for TransformConfig {
    fn default() -> Self {
        TransformConfig {
            tolerance: 1e-7,
            discretization_step_size: 1.0,
            sweep_discretization_step_size: 1.0,
            circle_slices: 16,
            citygml_version: CityGmlVersion::V3,
            offset: [0.0, 0.0, 0.0],
        }
    }
}
