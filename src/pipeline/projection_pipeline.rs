use crate::app::ports::{Publisher, SourceFetcher};
use crate::config::ProjectionsConfig;
use crate::constants::UNKNOWN_PLAYER;
use crate::error::Result;
use crate::projections::{CrossReferenceJoiner, EntityIndexBuilder, PrimaryRecordExtractor, ProjectionsPayload};
use crate::telemetry::ROWS_PUBLISHED;
use crate::types::NormalizedTable;
use chrono::{DateTime, Utc};
use metrics::counter;
use serde::Serialize;
use tracing::{info, instrument};

/// Result of a complete projections pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct ProjectionRunReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub players_indexed: usize,
    pub projections_total: usize,
    pub unknown_players: usize,
    pub rows_published: usize,
    pub destination: String,
}

/// Counts gathered while building the projections table
#[derive(Debug, Clone)]
pub struct ProjectionBuild {
    pub table: NormalizedTable,
    pub players_indexed: usize,
    pub projections_total: usize,
    pub unknown_players: usize,
}

pub struct ProjectionPipeline {
    api_url: String,
    joiner: CrossReferenceJoiner,
}

impl ProjectionPipeline {
    pub fn new(api_url: &str, joiner: CrossReferenceJoiner) -> Self {
        Self {
            api_url: api_url.to_string(),
            joiner,
        }
    }

    pub fn from_config(config: &ProjectionsConfig) -> Self {
        Self::new(&config.api_url, CrossReferenceJoiner::new(&config.league))
    }

    /// Fetch the payload, join projections to players and replace the destination.
    /// Fetch and parse failures abort the run before anything is published.
    #[instrument(skip(self, fetcher, publisher), fields(api = %self.api_url))]
    pub async fn run(&self, fetcher: &dyn SourceFetcher, publisher: &dyn Publisher) -> Result<ProjectionRunReport> {
        let started_at = Utc::now();
        info!("Starting data scrape from {}", self.api_url);

        let text = fetcher.fetch(&self.api_url).await?;
        let payload = ProjectionsPayload::parse(&text)?;
        let build = self.build(&payload);

        publisher.replace(&build.table).await?;
        counter!(ROWS_PUBLISHED, "pipeline" => "projections").increment(build.table.len() as u64);
        info!("✅ Published {} projections to {}", build.table.len(), publisher.destination());

        Ok(ProjectionRunReport {
            started_at,
            finished_at: Utc::now(),
            players_indexed: build.players_indexed,
            projections_total: build.projections_total,
            unknown_players: build.unknown_players,
            rows_published: build.table.len(),
            destination: publisher.destination(),
        })
    }

    pub fn build(&self, payload: &ProjectionsPayload) -> ProjectionBuild {
        let index = EntityIndexBuilder::build(&payload.included);
        let projections = PrimaryRecordExtractor::extract(&payload.data);
        let projections_total = projections.len();

        let joined = self.joiner.join(projections, &index);
        let unknown_players = joined.iter().filter(|r| r.player.name == UNKNOWN_PLAYER).count();
        let kept = self.joiner.filter(joined);

        ProjectionBuild {
            table: CrossReferenceJoiner::to_table(&kept),
            players_indexed: index.len(),
            projections_total,
            unknown_players,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_build_counts_unknown_players() {
        let payload: ProjectionsPayload = serde_json::from_value(json!({
            "data": [
                {"attributes": {"stat_type": "Points", "line_score": 20.5}, "relationships": {"new_player": {"data": {"id": "1"}}}},
                {"attributes": {"stat_type": "Points"}, "relationships": {"new_player": {"data": {"id": "404"}}}},
                {"attributes": {"stat_type": "Points"}}
            ],
            "included": [
                {"id": "1", "attributes": {"name": "A. Wilson", "team": "LVA", "league": "WNBA"}}
            ]
        }))
        .unwrap();

        let pipeline = ProjectionPipeline::new("https://api/projections", CrossReferenceJoiner::new("WNBA"));
        let build = pipeline.build(&payload);
        assert_eq!(build.players_indexed, 1);
        assert_eq!(build.projections_total, 3);
        assert_eq!(build.unknown_players, 2);
        assert_eq!(build.table.len(), 1);
        assert_eq!(build.table.value(0, "Prizepicks"), Some("20.5"));
    }
}
