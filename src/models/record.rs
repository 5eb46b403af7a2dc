//! Header-driven record model.
//!
//! Orders and timesheet rows arrive as tabular files whose columns are only
//! known once the header row has been read, so both are modelled as a
//! string-keyed mapping rather than a fixed struct.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A single row from an orders or timesheet file.
///
/// Keys are the column names from the source file's header row. Values are
/// kept as the raw strings found in the file.
///
/// # Example
///
/// ```
/// use tip_distributor::models::Record;
///
/// let order = Record::from_pairs([("Order ID", "1001"), ("Tip", "4.50")]);
/// assert_eq!(order.get("Tip"), Some("4.50"));
/// assert_eq!(order.get("Missing"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: HashMap<String, String>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a record from `(column, value)` pairs.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        pairs.into_iter().collect()
    }

    /// Sets the value of a column, replacing any previous value.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(column.into(), value.into());
    }

    /// Returns the value stored under `column`, if the column is present.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Returns the value stored under `column` only when it is non-empty.
    pub fn get_non_empty(&self, column: &str) -> Option<&str> {
        self.get(column).filter(|value| !value.is_empty())
    }

    /// Returns true if the record carries the column at all.
    pub fn contains(&self, column: &str) -> bool {
        self.fields.contains_key(column)
    }

    /// Number of columns present in this record.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the record has no columns.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
