use crate::constants::MATCHUP_DELIMITER;
use crate::types::ExtractedRecord;

/// Keeps matchup rows, dropping subtotal and repeated-header rows
#[derive(Debug, Clone)]
pub struct RowFilter {
    delimiter: String,
}

impl Default for RowFilter {
    fn default() -> Self {
        Self::new(MATCHUP_DELIMITER)
    }
}

impl RowFilter {
    pub fn new(delimiter: &str) -> Self {
        Self {
            delimiter: delimiter.to_string(),
        }
    }

    /// A data row carries the delimiter in its key column
    pub fn is_data_row(&self, record: &ExtractedRecord, key_column: &str) -> bool {
        record
            .get(key_column)
            .map(|v| v.contains(self.delimiter.as_str()))
            .unwrap_or(false)
    }

    pub fn apply(&self, records: Vec<ExtractedRecord>, key_column: &str) -> Vec<ExtractedRecord> {
        records
            .into_iter()
            .filter(|r| self.is_data_row(r, key_column))
            .collect()
    }
}
