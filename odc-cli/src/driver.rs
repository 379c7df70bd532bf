//! Concurrency and orchestration (spec §5): drives one or more OpenDRIVE
//! datasets through validate -> O->R -> R->C, sharing only an atomic
//! progress counter, a mutex-protected report sink, and a stop flag.
//!
//! `odc_o2r::convert_model` and `odc_r2c::transform_model` each process a
//! whole dataset's roads in one sequential call; neither exposes a
//! per-road entry point. Rather than restructure them, concurrency here
//! is applied across dataset files within an input directory, not across
//! roads within one dataset — each dataset's internal per-road loop stays
//! the existing sequential implementation.

use crate::cli::Options;
use crate::error::{Error, Result};
use crate::io::{CityGmlWriter, OpenDriveReader};
use odc_report::{Report, ReportEntry};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// Shared state for one driver run, as described in spec §5.
pub struct Driver {
    reader: Box<dyn OpenDriveReader + Sync>,
    writer: Box<dyn CityGmlWriter + Sync>,
    progress: AtomicUsize,
    stop: AtomicBool,
    report: Mutex<Report>,
}

/// Outcome for a single dataset file.
pub struct DatasetOutcome {
    pub dataset_name: String,
    pub error: Option<Error>,
}

impl Driver {
    pub fn new(reader: Box<dyn OpenDriveReader + Sync>, writer: Box<dyn CityGmlWriter + Sync>) -> Self {
        Driver {
            reader,
            writer,
            progress: AtomicUsize::new(0),
            stop: AtomicBool::new(false),
            report: Mutex::new(Report::new()),
        }
    }

    /// Requests the run stop before starting any further dataset. A
    /// dataset already in progress still finishes.
    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::SeqCst);
    }

    pub fn datasets_processed(&self) -> usize {
        self.progress.load(Ordering::SeqCst)
    }

    /// Copies out everything pushed to the shared report sink so far.
    pub fn report_snapshot(&self) -> Report {
        self.report.lock().expect("report mutex poisoned").clone()
    }

    /// Runs `opendrive-to-citygml` over every dataset file under
    /// `input_dir`, writing results under `output_dir`. When
    /// `options.concurrent_processing` is set, datasets run concurrently
    /// via rayon; otherwise sequentially in sorted order.
    pub fn run_convert(&self, input_dir: &Path, output_dir: &Path, options: &Options) -> Result<Vec<DatasetOutcome>> {
        let params = options.resolve()?;
        let datasets = list_datasets(input_dir)?;

        let run_one = |path: &PathBuf| -> DatasetOutcome {
            let dataset_name = dataset_name(path);
            if self.stop.load(Ordering::SeqCst) {
                return DatasetOutcome { dataset_name, error: None };
            }
            let outcome = self.convert_one(path, output_dir, &params);
            self.progress.fetch_add(1, Ordering::SeqCst);
            outcome
        };

        let outcomes = if params.concurrent_processing {
            datasets.par_iter().map(run_one).collect()
        } else {
            datasets.iter().map(run_one).collect()
        };
        Ok(outcomes)
    }

    fn convert_one(&self, path: &Path, output_dir: &Path, params: &crate::parameters::Parameters) -> DatasetOutcome {
        let dataset_name = dataset_name(path);
        log::info!("converting dataset {dataset_name}");
        match self.convert_one_inner(path, output_dir, params) {
            Ok(()) => DatasetOutcome { dataset_name, error: None },
            Err(error) => {
                log::warn!("dataset {dataset_name} failed: {error}");
                let mut report = self.report.lock().expect("report mutex poisoned");
                report.push(ReportEntry::fatal(error.to_string(), dataset_name.clone()));
                DatasetOutcome { dataset_name, error: Some(error) }
            }
        }
    }

    fn convert_one_inner(&self, path: &Path, output_dir: &Path, params: &crate::parameters::Parameters) -> Result<()> {
        let input = self.reader.read(path)?;
        let (input, validate_report) = odc_validate::validate_and_heal(input, params.tolerance);

        let (model, convert_report) = odc_o2r::convert_model(&input, params.tolerance);
        let (output, transform_report) = odc_r2c::transform_model(&model, &params.transform_config());

        let mut report = validate_report;
        report.merge(convert_report);
        report.merge(transform_report);

        let dataset_name = dataset_name(path);
        self.writer.write(output_dir, &dataset_name, &output, &report)?;
        self.report.lock().expect("report mutex poisoned").merge(report);
        Ok(())
    }

    /// Runs `validate-opendrive` over every dataset file under
    /// `input_dir`; no R->C transform, no CityGML output.
    pub fn run_validate(&self, input_dir: &Path, options: &Options) -> Result<Vec<DatasetOutcome>> {
        let params = options.resolve()?;
        let datasets = list_datasets(input_dir)?;

        let run_one = |path: &PathBuf| -> DatasetOutcome {
            let dataset_name = dataset_name(path);
            if self.stop.load(Ordering::SeqCst) {
                return DatasetOutcome { dataset_name, error: None };
            }
            let outcome = match self.reader.read(path) {
                Ok(input) => {
                    let (_, report) = odc_validate::validate_and_heal(input, params.tolerance);
                    self.report.lock().expect("report mutex poisoned").merge(report);
                    DatasetOutcome { dataset_name: dataset_name.clone(), error: None }
                }
                Err(error) => DatasetOutcome { dataset_name: dataset_name.clone(), error: Some(error) },
            };
            self.progress.fetch_add(1, Ordering::SeqCst);
            outcome
        };

        let outcomes = if params.concurrent_processing {
            datasets.par_iter().map(run_one).collect()
        } else {
            datasets.iter().map(run_one).collect()
        };
        Ok(outcomes)
    }

    /// Maps the driver's accumulated state to a process exit code (spec
    /// §6): any dataset-level I/O error wins first, then any fatal report
    /// entry, else success.
    pub fn exit_code(&self, outcomes: &[DatasetOutcome]) -> i32 {
        if let Some(outcome) = outcomes.iter().find(|o| o.error.is_some()) {
            return outcome.error.as_ref().unwrap().exit_code();
        }
        if self.report_snapshot().summary().fatals > 0 {
            return 1;
        }
        0
    }
}

/// Initializes the `env_logger` backend. A binary built on this crate
/// should call this once before constructing a [`Driver`]; safe to call
/// more than once (later calls are no-ops).
pub fn init_logging() {
    let _ = env_logger::try_init();
}

fn dataset_name(path: &Path) -> String {
    path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_else(|| path.to_string_lossy().into_owned())
}

fn list_datasets(input_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(input_dir)
        .map_err(Error::Io)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    paths.sort();
    Ok(paths)
}
