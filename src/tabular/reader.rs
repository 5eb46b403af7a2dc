//! CSV to record conversion.

use std::borrow::Cow;
use std::collections::HashSet;

use crate::error::{EngineError, EngineResult};
use crate::models::Record;

/// Reads CSV text with a header row into records.
///
/// Blank lines are skipped and a leading byte-order mark is ignored. Rows
/// shorter than the header leave their trailing columns absent; cells beyond
/// the header are dropped. Repeated header names get a numeric suffix
/// (`Name`, `Name_1`, ...). Values are kept exactly as written.
///
/// # Example
///
/// ```
/// use tip_distributor::tabular::read_records;
///
/// let csv = "Order ID,Tip\n1001,4.50\n\n1002,\n";
/// let records = read_records("orders", csv).unwrap();
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[0].get("Tip"), Some("4.50"));
/// assert_eq!(records[1].get("Tip"), Some(""));
/// ```
pub fn read_records(source_name: &str, content: &str) -> EngineResult<Vec<Record>> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let parse_error = |e: csv::Error| EngineError::TabularParse {
        source_name: source_name.to_string(),
        message: e.to_string(),
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = unique_headers(reader.headers().map_err(parse_error)?.iter());

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result.map_err(parse_error)?;
        if row.len() == 1 && row[0].is_empty() {
            continue;
        }

        records.push(
            headers
                .iter()
                .zip(row.iter())
                .map(|(header, value)| (header.clone(), value))
                .collect(),
        );
    }

    Ok(records)
}

/// Reads uploaded bytes as CSV, replacing invalid UTF-8 sequences.
pub fn read_records_from_bytes(source_name: &str, bytes: &[u8]) -> EngineResult<Vec<Record>> {
    let content: Cow<'_, str> = String::from_utf8_lossy(bytes);
    read_records(source_name, &content)
}

fn unique_headers<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.map(|header| {
        let mut name = header.to_string();
        let mut suffix = 1;
        while !seen.insert(name.clone()) {
            name = format!("{header}_{suffix}");
            suffix += 1;
        }
        name
    })
    .collect()
}
