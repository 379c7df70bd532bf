//! Command-line surface (spec §6): two subcommands, each taking an input
//! and output directory plus the shared options table.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "odc", about = "OpenDRIVE <-> CityGML transform driver")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Converts an OpenDRIVE dataset tree into CityGML.
    OpendriveToCitygml(ConvertArgs),
    /// Validates an OpenDRIVE dataset tree, emitting a report only.
    ValidateOpendrive(ConvertArgs),
}

#[derive(Args, Debug)]
pub struct ConvertArgs {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,

    #[command(flatten)]
    pub options: Options,
}

#[derive(Args, Debug, Default)]
pub struct Options {
    /// Emit CityGML 2.0 instead of 3.0.
    #[arg(long)]
    pub convert_to_citygml2: bool,

    /// Global numeric tolerance.
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Override source CRS via EPSG code.
    #[arg(long = "crs-epsg")]
    pub crs_epsg: Option<i32>,

    /// Translate the output by a constant vector.
    #[arg(long, num_args = 3)]
    pub offset: Option<Vec<f64>>,

    /// Sampling step for curves and ruled surfaces.
    #[arg(long)]
    pub discretization_step_size: Option<f64>,

    /// Sampling step for `ParametricSweep3D`.
    #[arg(long)]
    pub sweep_discretization_step_size: Option<f64>,

    /// Slices for cylinders/circles.
    #[arg(long)]
    pub circle_slices: Option<u32>,

    /// Emit reference-line/lane-boundary/lane-center polylines as generic
    /// objects.
    #[arg(long)]
    pub transform_additional_road_lines: bool,

    /// Load all parameters from a structured file; explicit flags above
    /// still override individual fields.
    #[arg(long)]
    pub parameters: Option<PathBuf>,

    /// Process roads within a dataset concurrently.
    #[arg(long)]
    pub concurrent_processing: bool,
}

impl Options {
    /// Resolves the effective [`crate::parameters::Parameters`]: start
    /// from `--parameters`'s file (or the default), then apply every
    /// explicitly-set flag on top.
    pub fn resolve(&self) -> crate::error::Result<crate::parameters::Parameters> {
        let mut params = match &self.parameters {
            Some(path) => crate::parameters::Parameters::load(path)?,
            None => crate::parameters::Parameters::default(),
        };

        if self.convert_to_citygml2 {
            params.convert_to_citygml2 = true;
        }
        if let Some(tolerance) = self.tolerance {
            params.tolerance = tolerance;
        }
        if self.crs_epsg.is_some() {
            params.crs_epsg = self.crs_epsg;
        }
        if let Some(offset) = &self.offset {
            if let [x, y, z] = offset[..] {
                params.offset = Some([x, y, z]);
            }
        }
        if let Some(step) = self.discretization_step_size {
            params.discretization_step_size = step;
        }
        if let Some(step) = self.sweep_discretization_step_size {
            params.sweep_discretization_step_size = step;
        }
        if let Some(slices) = self.circle_slices {
            params.circle_slices = slices;
        }
        if self.transform_additional_road_lines {
            params.transform_additional_road_lines = true;
        }
        if self.concurrent_processing {
            params.concurrent_processing = true;
        }
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_flag_overrides_file_default() {
        let options = Options { tolerance: Some(1e-5), ..Default::default() };
        let params = options.resolve().unwrap();
        assert_eq!(params.tolerance, 1e-5);
    }
}
