use crate::constants::{COMBINATION_MARKER, PROJECTION_HEADER};
use crate::projections::EntityIndex;
use crate::types::{MergedRecord, NormalizedTable, PlayerIndexEntry, ProjectionRecord};
use tracing::info;

/// Joins projections to their players and keeps single-player props for one league
#[derive(Debug, Clone)]
pub struct CrossReferenceJoiner {
    league: String,
    combination_marker: char,
}

impl CrossReferenceJoiner {
    pub fn new(league: &str) -> Self {
        Self {
            league: league.to_string(),
            combination_marker: COMBINATION_MARKER,
        }
    }

    /// A key missing from the index joins to the `Unknown` placeholder
    pub fn join(&self, projections: Vec<ProjectionRecord>, index: &EntityIndex) -> Vec<MergedRecord> {
        projections
            .into_iter()
            .map(|projection| {
                let player = index
                    .get(&projection.foreign_key)
                    .cloned()
                    .unwrap_or_else(|| PlayerIndexEntry::unknown(&projection.foreign_key));
                MergedRecord { projection, player }
            })
            .collect()
    }

    pub fn in_league(&self, record: &MergedRecord) -> bool {
        record.player.league == self.league
    }

    /// Combined entries such as `"A + B"` are not single-player props
    pub fn is_single_player(&self, record: &MergedRecord) -> bool {
        !record.player.name.contains(self.combination_marker)
    }

    pub fn filter(&self, records: Vec<MergedRecord>) -> Vec<MergedRecord> {
        let total = records.len();
        let kept: Vec<MergedRecord> = records
            .into_iter()
            .filter(|r| self.in_league(r) && self.is_single_player(r))
            .collect();
        info!("Kept {} of {} projections for {}", kept.len(), total, self.league);
        kept
    }

    pub fn to_table(records: &[MergedRecord]) -> NormalizedTable {
        let mut table = NormalizedTable::new(PROJECTION_HEADER.iter().map(|h| h.to_string()).collect());
        table.rows = records.iter().map(MergedRecord::to_row).collect();
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projections::{ApiObject, EntityIndexBuilder};
    use serde_json::json;

    fn index() -> EntityIndex {
        let included: Vec<ApiObject> = serde_json::from_value(json!([
            {"id": "1", "attributes": {"name": "A. Wilson", "team": "LVA", "league": "WNBA"}},
            {"id": "2", "attributes": {"name": "A. Wilson + B. Stewart", "team": "LVA/NYL", "league": "WNBA"}},
            {"id": "3", "attributes": {"name": "L. James", "team": "LAL", "league": "NBA"}}
        ]))
        .unwrap();
        EntityIndexBuilder::build(&included)
    }

    fn projection(key: &str) -> ProjectionRecord {
        ProjectionRecord {
            foreign_key: key.to_string(),
            stat: "Points".into(),
            line_value: "20.5".into(),
            description: "SEA".into(),
            odds_type: "standard".into(),
        }
    }

    #[test]
    fn test_missing_key_joins_to_unknown() {
        let joiner = CrossReferenceJoiner::new("WNBA");
        let joined = joiner.join(vec![projection("999"), projection("N/A")], &index());
        for record in &joined {
            assert_eq!(record.player.name, "Unknown");
            assert_eq!(record.player.team, "N/A");
            assert_eq!(record.player.league, "N/A");
        }
    }

    #[test]
    fn test_league_and_combination_filter() {
        let joiner = CrossReferenceJoiner::new("WNBA");
        let joined = joiner.join(vec![projection("1"), projection("2"), projection("3"), projection("999")], &index());
        let kept = joiner.filter(joined);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].player.name, "A. Wilson");
        assert_eq!(kept[0].projection.stat, "Points");
    }

    #[test]
    fn test_filters_commute() {
        let joiner = CrossReferenceJoiner::new("WNBA");
        let joined = joiner.join(vec![projection("1"), projection("2"), projection("3"), projection("1")], &index());

        let league_first: Vec<MergedRecord> = joined
            .iter()
            .filter(|r| joiner.in_league(r))
            .filter(|r| joiner.is_single_player(r))
            .cloned()
            .collect();
        let combo_first: Vec<MergedRecord> = joined
            .iter()
            .filter(|r| joiner.is_single_player(r))
            .filter(|r| joiner.in_league(r))
            .cloned()
            .collect();

        assert_eq!(league_first, combo_first);
        assert_eq!(league_first, joiner.filter(joined));
    }

    #[test]
    fn test_table_layout() {
        let joiner = CrossReferenceJoiner::new("WNBA");
        let kept = joiner.filter(joiner.join(vec![projection("1")], &index()));
        let table = CrossReferenceJoiner::to_table(&kept);
        assert_eq!(table.header, vec!["Name", "League", "Team", "Stat", "Versus", "Prizepicks", "Odds Type"]);
        assert_eq!(table.rows[0], vec!["A. Wilson", "WNBA", "LVA", "Points", "SEA", "20.5", "standard"]);
    }
}
