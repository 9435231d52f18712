//! Run configuration: where to read, where to write, and how.

use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::error::{Result, StatsError};
use crate::sources::CsvOptions;
use crate::views::View;
use crate::writer::OutputFormat;

/// Input file used when none is given.
pub const DEFAULT_INPUT: &str = "penguins.csv";

/// Paths and options for one analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Penguin table to read
    pub input: PathBuf,
    /// Destination for the body mass view
    pub body_mass_output: PathBuf,
    /// Destination for the flipper length view
    pub flipper_length_output: PathBuf,
    /// Encoding of both output files
    pub format: OutputFormat,
    /// How the input is parsed
    pub csv: CsvOptions,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            body_mass_output: PathBuf::from(View::BodyMassBySpeciesSex.default_output()),
            flipper_length_output: PathBuf::from(
                View::FlipperLengthByIslandSpecies.default_output(),
            ),
            format: OutputFormat::Csv,
            csv: CsvOptions::default(),
        }
    }
}

impl AnalysisConfig {
    /// Creates a configuration reading from `input` with default outputs.
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            ..Default::default()
        }
    }

    /// Sets the body mass output path.
    pub fn with_body_mass_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.body_mass_output = path.into();
        self
    }

    /// Sets the flipper length output path.
    pub fn with_flipper_length_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.flipper_length_output = path.into();
        self
    }

    /// Places both outputs, under their default file names, in `dir`.
    pub fn with_output_dir(self, dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        self.with_body_mass_output(dir.join(View::BodyMassBySpeciesSex.default_output()))
            .with_flipper_length_output(
                dir.join(View::FlipperLengthByIslandSpecies.default_output()),
            )
    }

    /// Sets the output encoding.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets the input parsing options.
    pub fn with_csv_options(mut self, options: CsvOptions) -> Self {
        self.csv = options;
        self
    }

    /// Destination for `view`.
    ///
    /// A path carrying the view's default file name gets the extension of the
    /// configured format, so JSON runs write `avg_body_mass_results.json`.
    pub fn output_for(&self, view: View) -> PathBuf {
        let path = match view {
            View::BodyMassBySpeciesSex => &self.body_mass_output,
            View::FlipperLengthByIslandSpecies => &self.flipper_length_output,
        };
        if path.file_name() == Some(OsStr::new(view.default_output())) {
            path.with_extension(self.format.extension())
        } else {
            path.clone()
        }
    }

    /// Rejects configurations where one output would overwrite the other or
    /// the input.
    pub fn validate(&self) -> Result<()> {
        let body_mass = self.output_for(View::BodyMassBySpeciesSex);
        if body_mass == self.output_for(View::FlipperLengthByIslandSpecies) {
            return Err(StatsError::configuration(format!(
                "Both views would be written to '{}'",
                body_mass.display()
            )));
        }
        for view in View::ALL {
            if self.output_for(view) == self.input {
                return Err(StatsError::configuration(format!(
                    "Output for {view} would overwrite the input '{}'",
                    self.input.display()
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.input, PathBuf::from("penguins.csv"));
        assert_eq!(
            config.body_mass_output,
            PathBuf::from("avg_body_mass_results.csv")
        );
        assert_eq!(
            config.flipper_length_output,
            PathBuf::from("avg_flipper_length_results.csv")
        );
        assert_eq!(config.format, OutputFormat::Csv);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_output_dir() {
        let config = AnalysisConfig::new("data/penguins.csv").with_output_dir("out");
        assert_eq!(
            config.output_for(View::BodyMassBySpeciesSex),
            PathBuf::from("out/avg_body_mass_results.csv")
        );
        assert_eq!(
            config.output_for(View::FlipperLengthByIslandSpecies),
            PathBuf::from("out/avg_flipper_length_results.csv")
        );
    }

    #[test]
    fn test_default_names_follow_format_extension() {
        let config = AnalysisConfig::new("penguins.csv")
            .with_output_dir("out")
            .with_flipper_length_output("flippers.csv")
            .with_format(OutputFormat::Json);
        assert_eq!(
            config.output_for(View::BodyMassBySpeciesSex),
            PathBuf::from("out/avg_body_mass_results.json")
        );
        assert_eq!(
            config.output_for(View::FlipperLengthByIslandSpecies),
            PathBuf::from("flippers.csv")
        );
    }

    #[test]
    fn test_validate_rejects_shared_output() {
        let config = AnalysisConfig::default()
            .with_body_mass_output("same.csv")
            .with_flipper_length_output("same.csv");
        assert!(matches!(
            config.validate(),
            Err(StatsError::Configuration(_))
        ));
    }

    #[test]
    fn test_validate_rejects_overwriting_input() {
        let config = AnalysisConfig::new("penguins.csv").with_body_mass_output("penguins.csv");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: AnalysisConfig =
            serde_json::from_str(r#"{"input": "p.csv", "format": "json"}"#).unwrap();
        assert_eq!(config.input, PathBuf::from("p.csv"));
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.csv, CsvOptions::default());
    }
}
