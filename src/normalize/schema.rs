use crate::constants::{LEADING_COLUMNS, PROP_COL};
use crate::normalize::{CompoundFieldDecomposer, CompoundSelection};
use crate::types::{MergedRecordSet, NormalizedTable};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info};

static ORDINAL_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\s*").expect("static regex"));

/// Result of shaping a merged record set
#[derive(Debug, Clone)]
pub struct NormalizeOutcome {
    pub table: NormalizedTable,
    /// Rows excluded for lacking an away side
    pub dropped: usize,
}

/// Produces the fixed `player, prop, O/U, line, away, home, ...` table
#[derive(Debug, Clone)]
pub struct SchemaNormalizer {
    sentinel: String,
}

impl SchemaNormalizer {
    pub fn new(sentinel: &str) -> Self {
        Self {
            sentinel: sentinel.to_string(),
        }
    }

    pub fn normalize(&self, merged: &MergedRecordSet, compound: &CompoundSelection) -> NormalizeOutcome {
        let remaining: Vec<&str> = merged
            .columns
            .iter()
            .map(String::as_str)
            .filter(|c| !compound.columns.iter().any(|k| k.as_str() == *c))
            .filter(|c| !LEADING_COLUMNS.contains(c))
            .collect();

        let header = LEADING_COLUMNS
            .iter()
            .copied()
            .chain(remaining.iter().copied())
            .map(str::to_string)
            .collect();
        let mut table = NormalizedTable::new(header);
        let mut dropped = 0;

        for record in &merged.records {
            let text = compound
                .columns
                .iter()
                .find_map(|c| record.get(c))
                .unwrap_or("");
            let parts = CompoundFieldDecomposer::decompose(text);

            if parts.away.trim().is_empty() {
                debug!("Dropping row without an away side: {:?}", text);
                dropped += 1;
                continue;
            }

            let player = Self::strip_ordinal(&parts.player);
            let mut row = vec![
                self.fill(Some(player.as_str())),
                self.fill(record.get(PROP_COL)),
                self.fill(Some(parts.over_under.as_str())),
                self.fill(Some(parts.line.as_str())),
                parts.away.clone(),
                self.fill(Some(parts.home.as_str())),
            ];
            row.extend(remaining.iter().map(|c| self.fill(record.get(c))));
            table.rows.push(row);
        }

        info!("Normalized {} rows ({} dropped without an away side)", table.len(), dropped);
        NormalizeOutcome { table, dropped }
    }

    /// `"12. A. Wilson"` -> `"A. Wilson"`
    pub fn strip_ordinal(player: &str) -> String {
        ORDINAL_PREFIX.replace(player, "").trim().to_string()
    }

    fn fill(&self, value: Option<&str>) -> String {
        match value {
            Some(v) if !v.is_empty() => v.to_string(),
            _ => self.sentinel.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ExtractedRecord;

    fn merged(rows: &[(&str, &str, Option<&str>)]) -> MergedRecordSet {
        let records = rows
            .iter()
            .map(|(player, prop, book)| {
                let mut r = ExtractedRecord::new("src");
                r.set("Player", Some(player.to_string()));
                r.set("prop", Some(prop.to_string()));
                r.set("fanduel", book.map(|s| s.to_string()));
                r
            })
            .collect();
        MergedRecordSet {
            columns: vec!["Player".into(), "fanduel".into(), "prop".into()],
            records,
        }
    }

    fn selection() -> CompoundSelection {
        CompoundSelection {
            columns: vec!["Player".into()],
            fallback: false,
        }
    }

    #[test]
    fn test_header_order_and_values() {
        let set = merged(&[("12. A. Wilson LVA @ SEA Over 20.5", "player_points", Some("-110"))]);
        let out = SchemaNormalizer::new("x").normalize(&set, &selection());

        assert_eq!(out.table.header, vec!["player", "prop", "O/U", "line", "away", "home", "fanduel"]);
        assert_eq!(
            out.table.rows[0],
            vec!["A. Wilson", "player_points", "Over", "20.5", "LVA", "SEA", "-110"]
        );
        assert_eq!(out.dropped, 0);
    }

    #[test]
    fn test_rows_without_away_are_dropped() {
        let set = merged(&[
            ("Wilson @ SEA Over 20.5", "p", None),
            ("Totals", "p", None),
            ("B. Stewart NYL @ CON Under 18.5", "p", None),
        ]);
        let out = SchemaNormalizer::new("x").normalize(&set, &selection());
        assert_eq!(out.dropped, 2);
        assert_eq!(out.table.len(), 1);
        assert_eq!(out.table.value(0, "player"), Some("B. Stewart"));
    }

    #[test]
    fn test_missing_values_get_sentinel() {
        let set = merged(&[("A. Wilson LVA @ SEA", "p", None)]);
        let out = SchemaNormalizer::new("x").normalize(&set, &selection());
        assert_eq!(out.table.value(0, "home"), Some("x"));
        assert_eq!(out.table.value(0, "O/U"), Some("x"));
        assert_eq!(out.table.value(0, "line"), Some("x"));
        assert_eq!(out.table.value(0, "fanduel"), Some("x"));
        assert_eq!(out.table.value(0, "away"), Some("LVA"));
    }

    #[test]
    fn test_coalesces_multiple_compound_columns() {
        let mut a = ExtractedRecord::new("a");
        a.set("Left", Some("A. Wilson LVA @ SEA Over 20.5".into()));
        let mut b = ExtractedRecord::new("b");
        b.set("Right", Some("B. Stewart NYL @ CON Under 18.5".into()));
        let set = MergedRecordSet {
            columns: vec!["Left".into(), "Right".into(), "prop".into()],
            records: vec![a, b],
        };
        let sel = CompoundSelection {
            columns: vec!["Left".into(), "Right".into()],
            fallback: false,
        };
        let out = SchemaNormalizer::new("x").normalize(&set, &sel);
        assert_eq!(out.table.header, vec!["player", "prop", "O/U", "line", "away", "home"]);
        assert_eq!(out.table.value(1, "away"), Some("NYL"));
        assert_eq!(out.table.value(1, "prop"), Some("x"));
    }

    #[test]
    fn test_strip_ordinal() {
        assert_eq!(SchemaNormalizer::strip_ordinal("3.  A. Wilson "), "A. Wilson");
        assert_eq!(SchemaNormalizer::strip_ordinal("A. Wilson"), "A. Wilson");
        assert_eq!(SchemaNormalizer::strip_ordinal("A. 2. Wilson"), "A. 2. Wilson");
    }
}
