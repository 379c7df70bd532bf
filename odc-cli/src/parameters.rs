//! The `--parameters <path>` structured configuration file (spec §6):
//! every CLI option also has a TOML field, so a run can be fully
//! reproduced from one file instead of a long argument list.

use serde::Deserialize;
use std::path::Path;

fn default_tolerance() -> f64 { 1e-7 }
fn default_discretization_step_size() -> f64 { 0.7 }
fn default_sweep_discretization_step_size() -> f64 { 0.3 }
fn default_circle_slices() -> u32 { 16 }

/// Mirrors the CLI options table (spec §6), deserialized from TOML.
/// Fields absent from the file keep their CLI default.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Parameters {
    pub convert_to_citygml2: bool,
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    pub crs_epsg: Option<i32>,
    pub offset: Option<[f64; 3]>,
    #[serde(default = "default_discretization_step_size")]
    pub discretization_step_size: f64,
    #[serde(default = "default_sweep_discretization_step_size")]
    pub sweep_discretization_step_size: f64,
    #[serde(default = "default_circle_slices")]
    pub circle_slices: u32,
    pub transform_additional_road_lines: bool,
    pub concurrent_processing: bool,
}

impl Default for Parameters {
    fn default() -> Self {
        Parameters {
            convert_to_citygml2: false,
            tolerance: default_tolerance(),
            crs_epsg: None,
            offset: None,
            discretization_step_size: default_discretization_step_size(),
            sweep_discretization_step_size: default_sweep_discretization_step_size(),
            circle_slices: default_circle_slices(),
            transform_additional_road_lines: false,
            concurrent_processing: false,
        }
    }
}

impl Parameters {
    /// Parses a `--parameters` TOML file.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> { toml::from_str(text) }

    /// Reads and parses a `--parameters` file from disk.
    pub fn load(path: &Path) -> crate::error::Result<Self> {
        let text = std::fs::read_to_string(path).map_err(crate::error::Error::Io)?;
        Self::from_toml(&text).map_err(|e| crate::error::Error::Parameters(e.to_string()))
    }

    /// Builds the geometry-transform config these parameters drive.
    pub fn transform_config(&self) -> odc_r2c::TransformConfig {
        odc_r2c::TransformConfig {
            tolerance: self.tolerance,
            discretization_step_size: self.discretization_step_size,
            sweep_discretization_step_size: self.sweep_discretization_step_size,
            circle_slices: self.circle_slices as usize,
            citygml_version: if self.convert_to_citygml2 { odc_r2c::CityGmlVersion::V2 } else { odc_r2c::CityGmlVersion::V3 },
            offset: self.offset.unwrap_or([0.0, 0.0, 0.0]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let params = Parameters::from_toml("tolerance = 1e-6\n").unwrap();
        assert_eq!(params.tolerance, 1e-6);
        assert_eq!(params.circle_slices, 16);
        assert!(!params.convert_to_citygml2);
    }

    #[test]
    fn offset_parses_as_a_triple() {
        let params = Parameters::from_toml("offset = [1.0, 2.0, 3.0]\n").unwrap();
        assert_eq!(params.offset, Some([1.0, 2.0, 3.0]));
    }

    #[test]
    fn offset_is_forwarded_to_transform_config() {
        let mut params = Parameters::default();
        params.offset = Some([1.0, 2.0, 3.0]);
        assert_eq!(params.transform_config().offset, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn missing_offset_forwards_as_zero() {
        let params = Parameters::default();
        assert_eq!(params.transform_config().offset, [0.0, 0.0, 0.0]);
    }
}
