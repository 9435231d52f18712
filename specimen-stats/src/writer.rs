//! Serialization of grouped averages.
//!
//! The CSV layout is fixed: a header with three labels, then one row per group
//! holding the key components followed by the mean.
//!
//! # Rounding
//!
//! A mean is taken in its shortest decimal form (the digits `f64` displays,
//! so `6003 / 40` is `150.075`), rounded to two decimal places with halves
//! going away from zero, and always printed with two fractional digits
//! (`187.5` is written as `187.50`). Rounding happens only here; the
//! in-memory [`AggregateResult`] keeps full precision.

use csv::WriterBuilder;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;
use tracing::{info, instrument};

use crate::aggregate::AggregateResult;
use crate::error::{Result, StatsError};

/// Header labels written above every result table.
pub const DEFAULT_LABELS: [&str; 3] = ["Category 1", "Category 2", "Average Value"];

/// Rounds a mean to two decimal places, halves away from zero.
///
/// The result is the `f64` closest to the text [`format_mean`] writes.
pub fn round_mean(value: f64) -> f64 {
    format_mean(value).parse().unwrap_or(value)
}

/// Formats a mean the way it appears in output files.
pub fn format_mean(value: f64) -> String {
    if value.abs() < 0.001 {
        return "0.00".to_string();
    }
    match Decimal::from_str(&value.to_string()) {
        Ok(exact) => {
            let mut rounded =
                exact.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            rounded.rescale(2);
            if rounded.is_zero() {
                rounded.set_sign_positive(true);
            }
            rounded.to_string()
        }
        // Beyond Decimal's range there are no fractional digits left to round.
        Err(_) => format!("{value:.2}"),
    }
}

/// Output encoding for result files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Comma-separated table with a header row
    #[default]
    Csv,
    /// Pretty-printed JSON array of `{ "keys": [...], "average": n }`
    Json,
}

impl FromStr for OutputFormat {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(StatsError::configuration(format!(
                "Unknown output format '{other}' (expected csv or json)"
            ))),
        }
    }
}

impl OutputFormat {
    /// File extension conventionally used for this encoding.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

#[derive(Serialize)]
struct JsonRow<'a> {
    keys: &'a [String],
    average: f64,
}

/// Writes [`AggregateResult`]s to files or arbitrary sinks.
///
/// ```rust
/// use specimen_stats::aggregate::AggregateResult;
/// use specimen_stats::writer::ResultWriter;
///
/// let results: AggregateResult = [(["Biscoe", "Adelie"], 187.5)].into_iter().collect();
/// let mut out = Vec::new();
/// ResultWriter::new().write_to(&results, &mut out).unwrap();
/// assert_eq!(
///     String::from_utf8(out).unwrap(),
///     "Category 1,Category 2,Average Value\nBiscoe,Adelie,187.50\n"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct ResultWriter {
    labels: Vec<String>,
    format: OutputFormat,
}

impl Default for ResultWriter {
    fn default() -> Self {
        Self {
            labels: DEFAULT_LABELS.iter().map(|s| s.to_string()).collect(),
            format: OutputFormat::Csv,
        }
    }
}

impl ResultWriter {
    /// Creates a CSV writer with the default labels.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the header labels.
    pub fn with_labels<S: Into<String>>(mut self, labels: impl IntoIterator<Item = S>) -> Self {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the output encoding.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Writes `results` to `path`, replacing any existing file.
    #[instrument(skip_all, fields(path = %path.as_ref().display(), groups = results.len()))]
    pub fn write(&self, results: &AggregateResult, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| StatsError::file_access(path, "write", e))?;
        let mut sink = BufWriter::new(file);
        self.write_to(results, &mut sink)?;
        sink.flush().map_err(|e| StatsError::file_access(path, "write", e))?;

        info!(rows = results.len(), "Wrote grouped averages");
        Ok(())
    }

    /// Writes `results` to any sink.
    pub fn write_to<W: Write>(&self, results: &AggregateResult, sink: W) -> Result<()> {
        match self.format {
            OutputFormat::Csv => self.write_csv(results, sink),
            OutputFormat::Json => Self::write_json(results, sink),
        }
    }

    fn write_csv<W: Write>(&self, results: &AggregateResult, sink: W) -> Result<()> {
        let mut wtr = WriterBuilder::new()
            .flexible(true)
            .from_writer(sink);

        wtr.write_record(&self.labels)?;
        for (key, mean) in results.iter() {
            let mut row: Vec<String> = key.parts().to_vec();
            row.push(format_mean(mean));
            wtr.write_record(&row)?;
        }
        wtr.flush().map_err(csv::Error::from)?;
        Ok(())
    }

    fn write_json<W: Write>(results: &AggregateResult, mut sink: W) -> Result<()> {
        let rows: Vec<JsonRow<'_>> = results
            .iter()
            .map(|(key, mean)| JsonRow {
                keys: key.parts(),
                average: round_mean(mean),
            })
            .collect();
        serde_json::to_writer_pretty(&mut sink, &rows)?;
        writeln!(sink).map_err(serde_json::Error::io)?;
        Ok(())
    }
}
