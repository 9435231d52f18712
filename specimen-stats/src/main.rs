//! specimen-stats
//!
//! Reads a penguin table and writes the mean body mass per (species, sex) and
//! the mean flipper length per (island, species) to two CSV files.

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process;
use tracing::Level;

use specimen_stats::config::{AnalysisConfig, DEFAULT_INPUT};
use specimen_stats::logging::setup::{init_logging, LoggingConfig};
use specimen_stats::pipeline;
use specimen_stats::sources::CsvOptions;
use specimen_stats::views::View;
use specimen_stats::writer::OutputFormat;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Penguin table to read
    #[arg(short, long, default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Where to write mean body mass per species and sex
    #[arg(long, default_value = View::BodyMassBySpeciesSex.default_output())]
    body_mass_output: PathBuf,

    /// Where to write mean flipper length per island and species
    #[arg(long, default_value = View::FlipperLengthByIslandSpecies.default_output())]
    flipper_length_output: PathBuf,

    /// Output encoding (csv or json)
    #[arg(long, default_value = "csv")]
    format: OutputFormat,

    /// Field delimiter of the input file
    #[arg(long, default_value_t = ',')]
    delimiter: char,

    /// Log level for specimen-stats (RUST_LOG overrides)
    #[arg(long, default_value_t = Level::WARN)]
    log_level: Level,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

impl Args {
    fn into_config(self) -> Result<AnalysisConfig> {
        if !self.delimiter.is_ascii() {
            bail!("Delimiter must be a single ASCII character, got '{}'", self.delimiter);
        }
        let csv = CsvOptions {
            delimiter: self.delimiter as u8,
            ..Default::default()
        };
        Ok(AnalysisConfig::new(self.input)
            .with_body_mass_output(self.body_mass_output)
            .with_flipper_length_output(self.flipper_length_output)
            .with_format(self.format)
            .with_csv_options(csv))
    }
}

fn run(args: Args) -> Result<()> {
    let logging = LoggingConfig::default()
        .with_crate_level(args.log_level)
        .with_json_format(args.json_logs);
    if let Err(e) = init_logging(logging) {
        eprintln!("warning: logging disabled: {e}");
    }

    let config = args.into_config()?;
    let summary = pipeline::run(&config)
        .with_context(|| format!("Analysis of '{}' failed", config.input.display()))?;

    let outputs: Vec<String> = summary
        .outputs()
        .iter()
        .map(|path| path.display().to_string())
        .collect();
    println!(
        "Analysis complete! Results saved to {}.",
        outputs.join(" and ")
    );
    Ok(())
}

fn main() {
    if let Err(e) = run(Args::parse()) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
