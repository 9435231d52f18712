//! Prelude for commonly used types and traits in specimen-stats.

pub use crate::aggregate::{aggregate, AggregateResult, GroupKey, GroupingConfig};
pub use crate::config::AnalysisConfig;
pub use crate::error::{Result, StatsError};
pub use crate::logging::setup::LoggingConfig;
pub use crate::record::Record;
pub use crate::sources::{CsvOptions, CsvSource, RecordSource};
pub use crate::views::View;
pub use crate::writer::{OutputFormat, ResultWriter};
