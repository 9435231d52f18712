//! Record loaders.
//!
//! A source turns a file into an ordered list of [`Record`]s. Sources never
//! look at cell contents; deciding which values are usable is the
//! aggregator's job.

use crate::error::Result;
use crate::record::Record;
use std::fmt::Debug;

mod delimited;

pub use delimited::{CsvOptions, CsvSource};

/// Something that can produce records.
pub trait RecordSource: Debug {
    /// Reads every record, preserving input order.
    fn load(&self) -> Result<Vec<Record>>;

    /// Returns a human-readable description of this source.
    fn description(&self) -> String;
}
