//! CSV file source implementation.

use super::RecordSource;
use crate::error::{Result, StatsError};
use crate::record::Record;
use csv::{Reader, ReaderBuilder};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Options for configuring CSV file reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvOptions {
    /// Whether the first line names the columns
    pub has_header: bool,
    /// Field delimiter (default: ',')
    pub delimiter: u8,
    /// Quote character (default: '"')
    pub quote: u8,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            has_header: true,
            delimiter: b',',
            quote: b'"',
        }
    }
}

/// A delimited text file read into memory as [`Record`]s.
///
/// # Examples
///
/// ```rust,no_run
/// use specimen_stats::sources::{CsvOptions, CsvSource, RecordSource};
///
/// # fn example() -> specimen_stats::Result<()> {
/// let records = CsvSource::new("penguins.csv").load()?;
///
/// let tsv = CsvOptions {
///     delimiter: b'\t',
///     ..Default::default()
/// };
/// let records = CsvSource::with_options("penguins.tsv", tsv).load()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
    options: CsvOptions,
}

impl CsvSource {
    /// Creates a new CSV source from a file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_options(path, CsvOptions::default())
    }

    /// Creates a new CSV source with custom options.
    pub fn with_options(path: impl Into<PathBuf>, options: CsvOptions) -> Self {
        Self {
            path: path.into(),
            options,
        }
    }

    fn header(&self, reader: &mut Reader<File>) -> Result<Arc<[String]>> {
        if self.options.has_header {
            return Ok(reader.headers()?.iter().map(str::to_string).collect());
        }
        // The first row fixes the column count; it is still yielded as data.
        let width = reader.headers()?.len();
        Ok((0..width).map(|i| format!("column_{i}")).collect())
    }
}

impl RecordSource for CsvSource {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> Result<Vec<Record>> {
        let file =
            File::open(&self.path).map_err(|e| StatsError::file_access(&self.path, "read", e))?;

        let mut reader = ReaderBuilder::new()
            .has_headers(self.options.has_header)
            .delimiter(self.options.delimiter)
            .quote(self.options.quote)
            .flexible(true)
            .from_reader(file);

        let header = self.header(&mut reader)?;
        debug!(columns = ?header, "Read CSV header");

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            let values = row.iter().map(str::to_string).collect();
            records.push(Record::new(Arc::clone(&header), values));
        }

        info!(
            rows = records.len(),
            columns = header.len(),
            "Loaded records from CSV"
        );
        Ok(records)
    }

    fn description(&self) -> String {
        format!("CSV file: {}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{contents}").unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_preserves_order_and_columns() {
        let file = csv_file("species,island,sex\nAdelie,Torgersen,Male\nGentoo,Biscoe,Female\n");
        let records = CsvSource::new(file.path()).load().unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("species"), "Adelie");
        assert_eq!(records[1].get("island"), "Biscoe");
        assert_eq!(
            records[0].columns().collect::<Vec<_>>(),
            vec!["species", "island", "sex"]
        );
    }

    #[test]
    fn test_empty_and_absent_cells_are_empty_strings() {
        let file = csv_file("species,sex,body_mass_g\nAdelie,,3750\nChinstrap\n");
        let records = CsvSource::new(file.path()).load().unwrap();

        assert_eq!(records[0].get("sex"), "");
        assert_eq!(records[1].get("sex"), "");
        assert_eq!(records[1].get("body_mass_g"), "");
        assert_eq!(records[1].len(), 3);
    }

    #[test]
    fn test_values_are_not_trimmed() {
        let file = csv_file("species,sex\n Adelie ,MALE\n");
        let records = CsvSource::new(file.path()).load().unwrap();
        assert_eq!(records[0].get("species"), " Adelie ");
        assert_eq!(records[0].get("sex"), "MALE");
    }

    #[test]
    fn test_header_only_file_has_no_records() {
        let file = csv_file("species,island,sex\n");
        let records = CsvSource::new(file.path()).load().unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_custom_delimiter() {
        let file = csv_file("species\tsex\nGentoo\tFemale\n");
        let options = CsvOptions {
            delimiter: b'\t',
            ..Default::default()
        };
        let records = CsvSource::with_options(file.path(), options).load().unwrap();
        assert_eq!(records[0].get("sex"), "Female");
    }

    #[test]
    fn test_headerless_columns_are_numbered() {
        let file = csv_file("Adelie,Male\nGentoo,Female\n");
        let options = CsvOptions {
            has_header: false,
            ..Default::default()
        };
        let records = CsvSource::with_options(file.path(), options).load().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("column_0"), "Adelie");
        assert_eq!(records[1].get("column_1"), "Female");
    }

    #[test]
    fn test_missing_file_is_file_access_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = CsvSource::new(dir.path().join("nope.csv"))
            .load()
            .unwrap_err();
        assert!(err.is_file_access());
    }

    #[test]
    fn test_description_names_the_file() {
        let source = CsvSource::new("data/penguins.csv");
        assert_eq!(source.description(), "CSV file: data/penguins.csv");
    }
}
