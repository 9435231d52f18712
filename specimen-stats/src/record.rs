//! Field-named rows as produced by the loader.

use std::fmt;
use std::sync::Arc;

/// One input row: a mapping from column name to the raw cell text.
///
/// Records loaded from the same file share their header. Looking up a column
/// that the header does not contain is not an error; [`Record::get`] returns
/// the empty string, the same value an empty cell has.
#[derive(Clone, PartialEq, Eq)]
pub struct Record {
    header: Arc<[String]>,
    values: Vec<String>,
}

impl Record {
    /// Creates a record for `header`.
    ///
    /// Missing trailing cells become empty strings and cells beyond the
    /// header are dropped, so the record always has exactly one value per
    /// column.
    pub fn new(header: Arc<[String]>, mut values: Vec<String>) -> Self {
        values.resize(header.len(), String::new());
        Self { header, values }
    }

    /// Builds a record from `(column, value)` pairs.
    ///
    /// Handy for in-memory tables where each row may name a different set of
    /// columns. A column named twice keeps its first position and its last
    /// value.
    ///
    /// ```rust
    /// use specimen_stats::Record;
    ///
    /// let record = Record::from_pairs([("species", "Adelie"), ("sex", "Male")]);
    /// assert_eq!(record.get("species"), "Adelie");
    /// assert_eq!(record.get("body_mass_g"), "");
    /// ```
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut header: Vec<String> = Vec::new();
        let mut values: Vec<String> = Vec::new();
        for (column, value) in pairs {
            let column = column.into();
            match header.iter().position(|name| *name == column) {
                Some(idx) => values[idx] = value.into(),
                None => {
                    header.push(column);
                    values.push(value.into());
                }
            }
        }
        Self {
            header: header.into(),
            values,
        }
    }

    /// Returns the value of `column`, or `""` if the cell is empty or the
    /// column does not exist.
    pub fn get(&self, column: &str) -> &str {
        self.field(column).unwrap_or("")
    }

    /// Returns the value of `column`, or `None` if the record has no such
    /// column.
    pub fn field(&self, column: &str) -> Option<&str> {
        self.header
            .iter()
            .position(|name| name == column)
            .map(|idx| self.values[idx].as_str())
    }

    /// Column names, in header order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.header.iter().map(String::as_str)
    }

    /// `(column, value)` pairs, in header order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns().zip(self.values.iter().map(String::as_str))
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the record has no columns at all.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
