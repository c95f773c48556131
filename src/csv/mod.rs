//! Minimal CSV ingestion for data source blocks.
//!
//! The format understood here is deliberately naive: lines are split on `\n`,
//! fields on `,`, and every field is trimmed. Quoting and escaping are not
//! supported, so a value containing a comma shifts the remaining columns.

use crate::error::CsvError;
use indexmap::IndexMap;
use itertools::Itertools;

/// One data row, keyed by column header in header order.
pub type CsvRow = IndexMap<String, String>;

/// A parsed CSV document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<CsvRow>,
}

impl CsvTable {
    /// Human-readable one-liner shown on the block after an upload.
    pub fn summary(&self) -> String {
        format!(
            "Loaded {} rows with columns: {}",
            self.rows.len(),
            self.headers.iter().join(", ")
        )
    }
}

/// Parses CSV text into a header list and positional field maps.
///
/// Blank lines are skipped. Missing trailing values become empty strings and
/// surplus values are dropped. A repeated header keeps its first position but
/// takes the last value.
pub fn parse(text: &str) -> Result<CsvTable, CsvError> {
    let mut lines = text.split('\n').filter(|line| !line.trim().is_empty());

    let headers: Vec<String> = lines
        .next()
        .ok_or(CsvError::Empty)?
        .split(',')
        .map(|h| h.trim().to_string())
        .collect();

    let rows = lines
        .map(|line| {
            let values: Vec<&str> = line.split(',').map(str::trim).collect();
            headers
                .iter()
                .enumerate()
                .map(|(i, header)| {
                    let value = values.get(i).copied().unwrap_or_default();
                    (header.clone(), value.to_string())
                })
                .collect::<CsvRow>()
        })
        .collect();

    Ok(CsvTable { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_rows_are_padded_with_empty_values() {
        let table = parse("name,age,city\nalice,30\n").unwrap();
        assert_eq!(table.rows[0]["city"], "");
        assert_eq!(table.rows[0]["age"], "30");
    }

    #[test]
    fn carriage_returns_are_trimmed() {
        let table = parse("a,b\r\n1,2\r\n").unwrap();
        assert_eq!(table.headers, vec!["a", "b"]);
        assert_eq!(table.rows[0]["b"], "2");
    }

    #[test]
    fn whitespace_only_text_is_empty() {
        assert_eq!(parse(" \n\n  "), Err(CsvError::Empty));
    }

    #[test]
    fn embedded_commas_shift_columns() {
        let table = parse("name,city\n\"Doe, Jane\",Paris").unwrap();
        assert_eq!(table.rows[0]["name"], "\"Doe");
        assert_eq!(table.rows[0]["city"], "Jane\"");
    }
}
