//! Load → aggregate → write, once per built-in view.

use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, info_span, instrument};

use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::record::Record;
use crate::sources::{CsvSource, RecordSource};
use crate::views::View;
use crate::writer::ResultWriter;

/// Outcome of one view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewReport {
    /// Which view ran.
    pub view: View,
    /// Where its results went.
    pub output: PathBuf,
    /// Number of groups written.
    pub groups: usize,
    /// Records that contributed to a mean.
    pub records_used: usize,
    /// Records skipped as ineligible.
    pub records_skipped: usize,
}

/// Outcome of a full run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Rows read from the input.
    pub records_loaded: usize,
    /// One entry per view, in run order.
    pub views: Vec<ViewReport>,
}

impl RunSummary {
    /// Output paths, in run order.
    pub fn outputs(&self) -> Vec<&PathBuf> {
        self.views.iter().map(|report| &report.output).collect()
    }
}

/// Runs the whole analysis described by `config`.
///
/// The first failure stops the run; files already written stay on disk.
#[instrument(skip_all, fields(input = %config.input.display()))]
pub fn run(config: &AnalysisConfig) -> Result<RunSummary> {
    config.validate()?;

    let source = CsvSource::with_options(&config.input, config.csv);
    info!(source = %source.description(), "Loading records");
    let records = source.load()?;
    run_on_records(config, &records)
}

/// Runs every view over already-loaded `records`.
pub fn run_on_records(config: &AnalysisConfig, records: &[Record]) -> Result<RunSummary> {
    let writer = ResultWriter::new().with_format(config.format);
    let mut views = Vec::with_capacity(View::ALL.len());

    for view in View::ALL {
        let _span = info_span!("view", %view).entered();
        let (results, stats) = view.aggregate_with_stats(records);
        let output = config.output_for(view);
        writer.write(&results, &output)?;

        views.push(ViewReport {
            view,
            output,
            groups: results.len(),
            records_used: stats.records_used,
            records_skipped: stats.records_skipped,
        });
    }

    let summary = RunSummary {
        records_loaded: records.len(),
        views,
    };
    info!(
        records = summary.records_loaded,
        views = summary.views.len(),
        "Analysis complete"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_run_on_empty_records_writes_headers() {
        let dir = TempDir::new().unwrap();
        let config = AnalysisConfig::default().with_output_dir(dir.path());

        let summary = run_on_records(&config, &[]).unwrap();
        assert_eq!(summary.records_loaded, 0);
        assert!(summary.views.iter().all(|report| report.groups == 0));

        for output in summary.outputs() {
            let contents = std::fs::read_to_string(output).unwrap();
            assert_eq!(contents, "Category 1,Category 2,Average Value\n");
        }
    }

    #[test]
    fn test_run_reports_missing_input() {
        let dir = TempDir::new().unwrap();
        let config =
            AnalysisConfig::new(dir.path().join("penguins.csv")).with_output_dir(dir.path());
        let err = run(&config).unwrap_err();
        assert!(err.is_file_access());
        assert!(!dir.path().join("avg_body_mass_results.csv").exists());
    }
}
