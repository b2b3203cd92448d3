// ============================================================
// DATASET EXPLORER USE CASE
// ============================================================
// Walk the dataset registry, load each file and print its report

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::Serialize;
use tracing::{error, info, warn};

use super::exploration_report::render_report;
use crate::domain::dataset::{DatasetDescriptor, Layout, Table, DATASETS};
use crate::domain::error::{AppError, Result};
use crate::infrastructure::csv::CsvParser;
use crate::infrastructure::storage::{data_dir_exists, list_data_dir, resolve_dataset_path};

/// Exit status when the data directory is missing
pub const EXIT_DATA_DIR_MISSING: u8 = 1;

/// What happened to one dataset during a run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DatasetOutcome {
    Reported { columns: Vec<String>, rows: usize },
    Missing,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetResult {
    pub name: &'static str,
    pub filename: &'static str,
    pub outcome: DatasetOutcome,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    pub results: Vec<DatasetResult>,
    pub processing_time_ms: u64,
}

impl RunSummary {
    pub fn reported(&self) -> usize {
        self.count(|o| matches!(o, DatasetOutcome::Reported { .. }))
    }

    pub fn missing(&self) -> usize {
        self.count(|o| matches!(o, DatasetOutcome::Missing))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, DatasetOutcome::Failed(_)))
    }

    pub fn get(&self, name: &str) -> Option<&DatasetResult> {
        self.results.iter().find(|r| r.name == name)
    }

    fn count(&self, pred: impl Fn(&DatasetOutcome) -> bool) -> usize {
        self.results.iter().filter(|r| pred(&r.outcome)).count()
    }
}

/// Batch explorer over a static dataset registry
pub struct DatasetExplorer {
    data_dir: PathBuf,
    datasets: Vec<DatasetDescriptor>,
}

impl DatasetExplorer {
    /// Explorer over the full registry
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            datasets: DATASETS.to_vec(),
        }
    }

    /// Replace the registry
    pub fn with_datasets(mut self, datasets: Vec<DatasetDescriptor>) -> Self {
        self.datasets = datasets;
        self
    }

    /// Run the whole batch, writing the console report to `out`.
    ///
    /// Only a missing data directory (or a failing `out`) is an error; per-dataset
    /// problems are reported inline and recorded in the summary.
    pub fn run<W: Write>(&self, out: &mut W) -> Result<RunSummary> {
        let start = Instant::now();

        writeln!(out, "Looking in data directory: {}", self.data_dir.display())?;
        if !data_dir_exists(&self.data_dir) {
            writeln!(out, "Error: DATA_DIR not found: {}", self.data_dir.display())?;
            error!(data_dir = %self.data_dir.display(), "Data directory not found");
            return Err(AppError::NotFound(format!(
                "DATA_DIR not found: {}",
                self.data_dir.display()
            )));
        }
        writeln!(out, "{:?}", list_data_dir(&self.data_dir)?)?;

        let mut summary = RunSummary::default();
        for descriptor in &self.datasets {
            let outcome = self.explore_one(descriptor, out)?;
            summary.results.push(DatasetResult {
                name: descriptor.name,
                filename: descriptor.filename,
                outcome,
            });
        }

        summary.processing_time_ms = start.elapsed().as_millis() as u64;
        info!(
            reported = summary.reported(),
            missing = summary.missing(),
            failed = summary.failed(),
            elapsed_ms = summary.processing_time_ms,
            "Dataset exploration finished"
        );
        Ok(summary)
    }

    fn explore_one<W: Write>(
        &self,
        descriptor: &DatasetDescriptor,
        out: &mut W,
    ) -> Result<DatasetOutcome> {
        let path = resolve_dataset_path(&self.data_dir, descriptor.filename);
        if !path.exists() {
            writeln!(
                out,
                "\nWARNING: File missing for `{}`: {}",
                descriptor.name, descriptor.filename
            )?;
            warn!(dataset = descriptor.name, file = descriptor.filename, "Dataset file missing");
            return Ok(DatasetOutcome::Missing);
        }

        writeln!(
            out,
            "\n--- Reading `{}` for dataset `{}` ---",
            descriptor.filename, descriptor.name
        )?;

        match load_dataset(descriptor, &path) {
            Ok(table) => {
                writeln!(out, "\n{}", render_report(descriptor, &table))?;
                info!(
                    dataset = descriptor.name,
                    rows = table.n_rows(),
                    columns = table.n_cols(),
                    "Dataset explored"
                );
                Ok(DatasetOutcome::Reported {
                    columns: table.column_names(),
                    rows: table.n_rows(),
                })
            }
            Err(err) => {
                let message = err.to_string();
                writeln!(out, "Error loading `{}`: {}", descriptor.filename, message)?;
                error!(dataset = descriptor.name, error = %err, "Failed to load dataset");
                Ok(DatasetOutcome::Failed(message))
            }
        }
    }
}

/// Parse a dataset file according to its layout, adding the synthesized label if any
pub fn load_dataset(descriptor: &DatasetDescriptor, path: &Path) -> Result<Table> {
    let mut table = CsvParser::for_descriptor(descriptor).parse_file(path)?;
    if let Layout::Header {
        synthesized_label: Some(value),
    } = descriptor.layout()
    {
        table.push_constant_column(descriptor.label_col, value);
    }
    Ok(table)
}

/// Process exit status for a finished run
pub fn exit_status(result: &Result<RunSummary>) -> u8 {
    match result {
        Ok(_) => 0,
        Err(_) => EXIT_DATA_DIR_MISSING,
    }
}
