//! Removal of rows that cannot take part in a distribution.

use crate::models::Record;

/// Row counts before and after cleaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleaningSummary {
    /// Rows read from the file.
    pub original: usize,
    /// Rows kept.
    pub retained: usize,
}

impl CleaningSummary {
    /// Rows dropped by cleaning.
    pub fn dropped(&self) -> usize {
        self.original - self.retained
    }
}

/// Keeps only records carrying a non-empty value for every required column.
///
/// # Example
///
/// ```
/// use tip_distributor::models::Record;
/// use tip_distributor::tabular::retain_complete;
///
/// let mut rows = vec![
///     Record::from_pairs([("Tip", "1.00"), ("Date", "01/01/2024")]),
///     Record::from_pairs([("Tip", ""), ("Date", "01/01/2024")]),
/// ];
/// let summary = retain_complete(&mut rows, &["Tip", "Date"]);
/// assert_eq!(summary.retained, 1);
/// assert_eq!(summary.dropped(), 1);
/// ```
pub fn retain_complete(records: &mut Vec<Record>, required: &[&str]) -> CleaningSummary {
    let original = records.len();
    records.retain(|record| required.iter().all(|column| record.get_non_empty(column).is_some()));
    CleaningSummary {
        original,
        retained: records.len(),
    }
}
