//! The two built-in aggregation views over the penguin table.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::aggregate::{aggregate_with_stats, AggregateResult, AggregationStats};
use crate::record::Record;

/// Column holding the species name.
pub const SPECIES: &str = "species";
/// Column holding the island name.
pub const ISLAND: &str = "island";
/// Column holding the recorded sex.
pub const SEX: &str = "sex";
/// Column holding body mass in grams.
pub const BODY_MASS_G: &str = "body_mass_g";
/// Column holding flipper length in millimetres.
pub const FLIPPER_LENGTH_MM: &str = "flipper_length_mm";

/// A named grouping preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    /// Mean `body_mass_g` per (species, sex).
    BodyMassBySpeciesSex,
    /// Mean `flipper_length_mm` per (island, species).
    FlipperLengthByIslandSpecies,
}

impl View {
    /// Every built-in view, in the order the pipeline runs them.
    pub const ALL: [View; 2] = [View::BodyMassBySpeciesSex, View::FlipperLengthByIslandSpecies];

    /// Columns forming the group key.
    pub fn key_fields(self) -> [&'static str; 2] {
        match self {
            View::BodyMassBySpeciesSex => [SPECIES, SEX],
            View::FlipperLengthByIslandSpecies => [ISLAND, SPECIES],
        }
    }

    /// Column being averaged.
    pub fn value_field(self) -> &'static str {
        match self {
            View::BodyMassBySpeciesSex => BODY_MASS_G,
            View::FlipperLengthByIslandSpecies => FLIPPER_LENGTH_MM,
        }
    }

    /// File the CLI writes this view to unless told otherwise.
    pub fn default_output(self) -> &'static str {
        match self {
            View::BodyMassBySpeciesSex => "avg_body_mass_results.csv",
            View::FlipperLengthByIslandSpecies => "avg_flipper_length_results.csv",
        }
    }

    /// Runs this view over `records`.
    pub fn aggregate(self, records: &[Record]) -> AggregateResult {
        self.aggregate_with_stats(records).0
    }

    /// Runs this view and reports record counts.
    pub fn aggregate_with_stats(self, records: &[Record]) -> (AggregateResult, AggregationStats) {
        aggregate_with_stats(records, &self.key_fields(), self.value_field())
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            View::BodyMassBySpeciesSex => "body_mass_by_species_sex",
            View::FlipperLengthByIslandSpecies => "flipper_length_by_island_species",
        };
        f.write_str(name)
    }
}

/// Mean body mass per (species, sex).
pub fn avg_body_mass(records: &[Record]) -> AggregateResult {
    View::BodyMassBySpeciesSex.aggregate(records)
}

/// Mean flipper length per (island, species).
pub fn avg_flipper_length(records: &[Record]) -> AggregateResult {
    View::FlipperLengthByIslandSpecies.aggregate(records)
}
