//! External collaborator boundaries (spec §1/§6 Non-goals): parsing
//! OpenDRIVE XML into [`odc_o2r::OpenDriveModelInput`] and serializing a
//! transform result to CityGML are both out of scope for this workspace.
//! These traits are what a concrete reader/writer plugs into; no
//! implementation ships here, matching `odc_o2r::crs::CrsService`'s own
//! trait-boundary-without-a-real-backend shape.

use crate::error::Result;
use odc_o2r::OpenDriveModelInput;
use odc_r2c::TransformOutput;
use odc_report::Report;
use std::path::Path;

/// Parses one already-located OpenDRIVE input file into its record model.
pub trait OpenDriveReader {
    /// Reads and parses `path`. Returns
    /// [`crate::error::Error::UnsupportedVersion`] for a detected version
    /// this reader has no support for.
    fn read(&self, path: &Path) -> Result<OpenDriveModelInput>;
}

/// Serializes a completed transform (plus its accumulated report) into a
/// dataset's output directory.
pub trait CityGmlWriter {
    /// Writes the CityGML output and the JSON report for one dataset.
    fn write(&self, output_dir: &Path, dataset_name: &str, output: &TransformOutput, report: &Report) -> Result<()>;
}
