//! # specimen-stats
//!
//! Grouped averages over specimen measurement tables.
//!
//! The crate reads a CSV table of individual animals (the Palmer penguins
//! dataset is the reference input), groups rows by categorical columns and
//! writes the mean of a numeric column for each group back out as CSV.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use specimen_stats::prelude::*;
//!
//! # fn main() -> specimen_stats::Result<()> {
//! let records = CsvSource::new("penguins.csv").load()?;
//!
//! let by_species_sex = View::BodyMassBySpeciesSex.aggregate(&records);
//! ResultWriter::new().write(&by_species_sex, "avg_body_mass_results.csv")?;
//!
//! // Any grouping works, not just the built-in views.
//! let by_island = aggregate(&records, &["island"], "bill_length_mm");
//! for (key, mean) in by_island.iter() {
//!     println!("{key}: {mean:.2}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Missing data
//!
//! Real specimen tables have holes. A row only contributes to a group when all
//! of its key cells are non-empty and its value cell is a finite number; other
//! rows are skipped silently. Groups that end up with no contributing rows are
//! left out of the result, so every reported mean is well defined.
//!
//! ## Architecture
//!
//! - **`sources`**: CSV loading into [`Record`]s
//! - **`aggregate`**: eligibility rules, [`GroupKey`] and grouped means
//! - **`views`**: the two built-in groupings
//! - **`writer`**: CSV/JSON output with two-decimal rounding
//! - **`pipeline`**: the end-to-end run used by the binary
//! - **`config`** and **`logging`**: run settings and `tracing` setup

pub mod aggregate;
pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod prelude;
pub mod record;
pub mod sources;
pub mod views;
pub mod writer;

pub use aggregate::{AggregateResult, GroupKey};
pub use error::{Result, StatsError};
pub use record::Record;
