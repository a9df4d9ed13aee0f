use crate::constants::{NOT_AVAILABLE, UNKNOWN_PLAYER};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A table cell; `None` when the rendered cell was empty or absent
pub type Cell = Option<String>;

/// A header cell as rendered on the page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderCell {
    pub text: String,
    /// `src` of the first image inside the cell, when the label is a logo
    pub image_src: Option<String>,
}

impl HeaderCell {
    pub fn text(text: &str) -> Self {
        Self { text: text.to_string(), image_src: None }
    }

    pub fn image(src: &str) -> Self {
        Self { text: String::new(), image_src: Some(src.to_string()) }
    }
}

/// One table lifted off a source page
#[derive(Debug, Clone, Default)]
pub struct RawTableBlock {
    pub header: Vec<HeaderCell>,
    pub rows: Vec<Vec<Cell>>,
    /// Number of `<tr>` elements in the table, header rows included
    pub total_rows: usize,
}

impl RawTableBlock {
    /// Widest body row; the column count every record is padded to
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Header plus at least one data row
    pub fn has_content(&self) -> bool {
        self.total_rows > 1
    }
}

/// Resolved column names for one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub names: Vec<String>,
    /// True when every name is a `Col_<n>` placeholder produced by the width fallback
    pub synthesized: bool,
}

impl ColumnSpec {
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn first(&self) -> Option<&str> {
        self.names.first().map(String::as_str)
    }
}

/// A table row keyed by column name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedRecord {
    pub source_label: String,
    pub values: HashMap<String, String>,
}

impl ExtractedRecord {
    pub fn new(source_label: &str) -> Self {
        Self { source_label: source_label.to_string(), values: HashMap::new() }
    }

    /// Non-empty value of `column`, if any
    pub fn get(&self, column: &str) -> Option<&str> {
        self.values.get(column).map(String::as_str).filter(|v| !v.is_empty())
    }

    pub fn set(&mut self, column: &str, value: Cell) {
        match value {
            Some(v) if !v.is_empty() => {
                self.values.insert(column.to_string(), v);
            }
            _ => {
                self.values.remove(column);
            }
        }
    }
}

/// Records extracted from one source page, before merging
#[derive(Debug, Clone)]
pub struct SourceRecords {
    pub source_id: String,
    pub columns: ColumnSpec,
    pub records: Vec<ExtractedRecord>,
}

/// Every source's records under the union of their columns
#[derive(Debug, Clone, Default)]
pub struct MergedRecordSet {
    pub columns: Vec<String>,
    pub records: Vec<ExtractedRecord>,
}

impl MergedRecordSet {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Header plus row-major string cells, the only shape a publisher sees
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl NormalizedTable {
    pub fn new(header: Vec<String>) -> Self {
        Self { header, rows: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h == name)
    }

    /// Cell of `row` under column `name`
    pub fn value(&self, row: usize, name: &str) -> Option<&str> {
        let idx = self.column_index(name)?;
        self.rows.get(row)?.get(idx).map(String::as_str)
    }
}

/// Player entity from the projections payload's `included` collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerIndexEntry {
    pub id: String,
    pub name: String,
    pub team: String,
    pub league: String,
}

impl PlayerIndexEntry {
    /// Stand-in for a projection whose player is not in the index
    pub fn unknown(id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: UNKNOWN_PLAYER.to_string(),
            team: NOT_AVAILABLE.to_string(),
            league: NOT_AVAILABLE.to_string(),
        }
    }
}

/// Skeleton projection from the payload's `data` collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionRecord {
    pub foreign_key: String,
    pub stat: String,
    pub line_value: String,
    pub description: String,
    pub odds_type: String,
}

/// A projection enriched with its player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedRecord {
    pub projection: ProjectionRecord,
    pub player: PlayerIndexEntry,
}

impl MergedRecord {
    /// Cells in `PROJECTION_HEADER` order
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.player.name.clone(),
            self.player.league.clone(),
            self.player.team.clone(),
            self.projection.stat.clone(),
            self.projection.description.clone(),
            self.projection.line_value.clone(),
            self.projection.odds_type.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_set_drops_empty_values() {
        let mut record = ExtractedRecord::new("src");
        record.set("a", Some("1".into()));
        record.set("b", Some(String::new()));
        record.set("c", None);
        assert_eq!(record.get("a"), Some("1"));
        assert_eq!(record.get("b"), None);
        assert_eq!(record.values.len(), 1);

        record.set("a", None);
        assert!(record.values.is_empty());
    }

    #[test]
    fn test_block_width_uses_widest_row() {
        let block = RawTableBlock {
            header: vec![],
            rows: vec![vec![None], vec![None, None, None], vec![None, None]],
            total_rows: 4,
        };
        assert_eq!(block.width(), 3);
        assert!(block.has_content());
    }

    #[test]
    fn test_unknown_player_uses_sentinels() {
        let p = PlayerIndexEntry::unknown("42");
        assert_eq!(p.name, "Unknown");
        assert_eq!(p.team, "N/A");
        assert_eq!(p.league, "N/A");
    }
}
