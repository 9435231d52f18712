//! Grouped mean computation.
//!
//! Records are bucketed by the values of one or more categorical columns and
//! the mean of a numeric column is computed per bucket. A record takes part
//! only if it is *eligible*: every key cell is non-empty and the value cell
//! holds a finite number. Anything else is skipped without raising an error,
//! so a single bad cell never spoils a run.
//!
//! ```rust
//! use specimen_stats::aggregate::{aggregate, GroupKey};
//! use specimen_stats::Record;
//!
//! let records = vec![
//!     Record::from_pairs([("species", "Adelie"), ("sex", "Male"), ("body_mass_g", "4000")]),
//!     Record::from_pairs([("species", "Adelie"), ("sex", "Male"), ("body_mass_g", "4200")]),
//!     Record::from_pairs([("species", "Adelie"), ("sex", "Male"), ("body_mass_g", "abc")]),
//! ];
//!
//! let result = aggregate(&records, &["species", "sex"], "body_mass_g");
//! assert_eq!(result.get(&GroupKey::from(["Adelie", "Male"])), Some(4100.0));
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, instrument, trace};

use crate::error::{Result, StatsError};
use crate::logging::truncate_field;
use crate::record::Record;

/// Ordered tuple of categorical values identifying one group.
///
/// Equality and hashing are structural and case-sensitive; values are never
/// trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupKey(Vec<String>);

impl GroupKey {
    /// Creates a key from its components.
    pub fn new(parts: Vec<String>) -> Self {
        Self(parts)
    }

    /// Key components in key-field order.
    pub fn parts(&self) -> &[String] {
        &self.0
    }

    /// Number of components.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true for the zero-component key.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for GroupKey {
    fn from(parts: [S; N]) -> Self {
        Self(parts.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.0.join(", "))
    }
}

/// Running sum and count for one group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MeanState {
    /// Sum of all values.
    pub sum: f64,
    /// Count of contributing values.
    pub count: u64,
}

impl MeanState {
    /// Adds one value.
    pub fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    /// Calculates the mean value.
    pub fn mean(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum / self.count as f64)
        }
    }
}

/// Mapping from group key to the mean of that group's eligible values.
///
/// Every key present has at least one contributing value, so no mean is ever
/// NaN. Iteration follows the order in which groups were first seen;
/// equality ignores that order.
#[derive(Debug, Clone, Default)]
pub struct AggregateResult {
    entries: Vec<(GroupKey, f64)>,
    index: HashMap<GroupKey, usize>,
}

impl AggregateResult {
    /// Creates an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the mean for `key`. Replacing keeps the original
    /// position.
    pub fn insert(&mut self, key: GroupKey, mean: f64) {
        match self.index.get(&key) {
            Some(&idx) => self.entries[idx].1 = mean,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, mean));
            }
        }
    }

    /// Gets the mean for a group.
    pub fn get(&self, key: &GroupKey) -> Option<f64> {
        self.index.get(key).map(|&idx| self.entries[idx].1)
    }

    /// Returns true if the group is present.
    pub fn contains_key(&self, key: &GroupKey) -> bool {
        self.index.contains_key(key)
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&GroupKey, f64)> {
        self.entries.iter().map(|(k, v)| (k, *v))
    }

    /// Group keys in first-seen order.
    pub fn keys(&self) -> impl Iterator<Item = &GroupKey> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Returns the number of groups.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no group had an eligible record.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PartialEq for AggregateResult {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K: Into<GroupKey>> FromIterator<(K, f64)> for AggregateResult {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut result = Self::new();
        for (key, mean) in iter {
            result.insert(key.into(), mean);
        }
        result
    }
}

impl IntoIterator for AggregateResult {
    type Item = (GroupKey, f64);
    type IntoIter = std::vec::IntoIter<(GroupKey, f64)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Counters describing one aggregation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationStats {
    /// Records examined.
    pub records_seen: usize,
    /// Records that contributed to some group.
    pub records_used: usize,
    /// Records skipped as ineligible.
    pub records_skipped: usize,
}

/// Which columns to group by and which column to average.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupingConfig {
    key_fields: Vec<String>,
    value_field: String,
}

impl GroupingConfig {
    /// Creates a grouping over `key_fields` averaging `value_field`.
    ///
    /// At least one key field is required.
    pub fn new<S: Into<String>>(
        key_fields: impl IntoIterator<Item = S>,
        value_field: impl Into<String>,
    ) -> Result<Self> {
        let key_fields: Vec<String> = key_fields.into_iter().map(Into::into).collect();
        if key_fields.is_empty() {
            return Err(StatsError::configuration(
                "At least one key field must be provided",
            ));
        }
        Ok(Self {
            key_fields,
            value_field: value_field.into(),
        })
    }

    /// Columns forming the group key, in order.
    pub fn key_fields(&self) -> &[String] {
        &self.key_fields
    }

    /// Column being averaged.
    pub fn value_field(&self) -> &str {
        &self.value_field
    }

    /// Runs the aggregation over `records`.
    pub fn aggregate(&self, records: &[Record]) -> AggregateResult {
        aggregate(records, &self.key_fields, &self.value_field)
    }

    /// Runs the aggregation and also reports how many records were used.
    pub fn aggregate_with_stats(&self, records: &[Record]) -> (AggregateResult, AggregationStats) {
        aggregate_with_stats(records, &self.key_fields, &self.value_field)
    }
}

/// Parses a numeric cell.
///
/// Returns `None` for empty cells, text that is not a number and non-finite
/// values (`NaN`, `inf`). Surrounding whitespace is ignored for the number
/// itself; key columns get no such leniency.
pub fn parse_measurement(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Groups `records` by `key_fields` and averages `value_field` per group.
///
/// Ineligible records are skipped. An empty input yields an empty result.
pub fn aggregate<S: AsRef<str>>(
    records: &[Record],
    key_fields: &[S],
    value_field: &str,
) -> AggregateResult {
    aggregate_with_stats(records, key_fields, value_field).0
}

/// Like [`aggregate`], also returning [`AggregationStats`].
#[instrument(skip_all, fields(records = records.len(), value_field = value_field))]
pub fn aggregate_with_stats<S: AsRef<str>>(
    records: &[Record],
    key_fields: &[S],
    value_field: &str,
) -> (AggregateResult, AggregationStats) {
    let mut groups: Vec<(GroupKey, MeanState)> = Vec::new();
    let mut index: HashMap<GroupKey, usize> = HashMap::new();
    let mut stats = AggregationStats {
        records_seen: records.len(),
        ..Default::default()
    };

    for (row, record) in records.iter().enumerate() {
        let Some((key, value)) = eligible_entry(record, key_fields, value_field) else {
            trace!(
                row,
                value = %truncate_field(record.get(value_field), 64),
                "Skipping ineligible record"
            );
            stats.records_skipped += 1;
            continue;
        };

        let idx = *index.entry(key).or_insert_with_key(|key| {
            groups.push((key.clone(), MeanState::default()));
            groups.len() - 1
        });
        groups[idx].1.push(value);
        stats.records_used += 1;
    }

    let result: AggregateResult = groups
        .into_iter()
        .filter_map(|(key, state)| state.mean().map(|mean| (key, mean)))
        .collect();

    debug!(
        groups = result.len(),
        used = stats.records_used,
        skipped = stats.records_skipped,
        "Computed grouped means"
    );
    (result, stats)
}

fn eligible_entry<S: AsRef<str>>(
    record: &Record,
    key_fields: &[S],
    value_field: &str,
) -> Option<(GroupKey, f64)> {
    let mut parts = Vec::with_capacity(key_fields.len());
    for field in key_fields {
        let value = record.get(field.as_ref());
        if value.is_empty() {
            return None;
        }
        parts.push(value.to_string());
    }

    let raw = record.get(value_field);
    if raw.is_empty() {
        return None;
    }
    let value = parse_measurement(raw)?;
    Some((GroupKey::new(parts), value))
}
