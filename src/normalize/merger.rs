use crate::constants::{MATCHUP_DELIMITER, PROP_COL};
use crate::error::{Result, ScraperError};
use crate::types::{MergedRecordSet, SourceRecords};
use tracing::{info, warn};

/// Which merged column(s) hold the compound player/matchup text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundSelection {
    /// Candidate columns in merged order; per row the first non-empty one wins
    pub columns: Vec<String>,
    /// True when no column carried the matchup delimiter
    pub fallback: bool,
}

/// Concatenates per-source records and tags them with their prop label
#[derive(Debug, Clone)]
pub struct MultiSourceMerger {
    prop_suffix: String,
}

impl MultiSourceMerger {
    pub fn new(prop_suffix: &str) -> Self {
        Self {
            prop_suffix: prop_suffix.to_string(),
        }
    }

    /// Last path segment of a source id with the suffix removed:
    /// `https://host/ev/data/wnba/player_points_over_under` -> `player_points`
    pub fn prop_label(&self, source_id: &str) -> String {
        let segment = source_id.trim_end_matches('/').rsplit('/').next().unwrap_or(source_id);
        if self.prop_suffix.is_empty() {
            segment.to_string()
        } else {
            segment.replace(self.prop_suffix.as_str(), "")
        }
    }

    /// Union of columns in first-appearance order; each source contributes its
    /// own columns followed by `prop`.
    pub fn merge(&self, sources: Vec<SourceRecords>) -> MergedRecordSet {
        let mut merged = MergedRecordSet::default();

        for source in sources {
            let prop = self.prop_label(&source.source_id);
            for name in source.columns.names.iter().map(String::as_str).chain(std::iter::once(PROP_COL)) {
                if !merged.columns.iter().any(|c| c == name) {
                    merged.columns.push(name.to_string());
                }
            }
            for mut record in source.records {
                record.set(PROP_COL, Some(prop.clone()));
                merged.records.push(record);
            }
        }

        info!("Merged {} rows across {} columns", merged.len(), merged.columns.len());
        merged
    }

    /// Columns carrying the matchup delimiter in any cell. Without one, the
    /// first non-`prop` column holding any value is used instead.
    pub fn select_compound_columns(&self, merged: &MergedRecordSet) -> Result<CompoundSelection> {
        let candidates = || merged.columns.iter().filter(|c| c.as_str() != PROP_COL);

        let with_delimiter: Vec<String> = candidates()
            .filter(|c| {
                merged
                    .records
                    .iter()
                    .any(|r| r.get(c).is_some_and(|v| v.contains(MATCHUP_DELIMITER)))
            })
            .cloned()
            .collect();

        if !with_delimiter.is_empty() {
            if with_delimiter.len() > 1 {
                info!("Multiple matchup columns found, coalescing {:?}", with_delimiter);
            }
            return Ok(CompoundSelection {
                columns: with_delimiter,
                fallback: false,
            });
        }

        warn!("No columns found with '{}' delimiter", MATCHUP_DELIMITER);
        let fallback = candidates().find(|c| merged.records.iter().any(|r| r.get(c).is_some()));
        match fallback {
            Some(column) => {
                warn!("Fallback: using column '{}' for the compound field", column);
                Ok(CompoundSelection {
                    columns: vec![column.clone()],
                    fallback: true,
                })
            }
            None => Err(ScraperError::NoCompoundColumn),
        }
    }
}
