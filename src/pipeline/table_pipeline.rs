use crate::app::ports::{Publisher, SourceFetcher};
use crate::config::TablesConfig;
use crate::error::{Result, ScraperError};
use crate::normalize::{CompoundSelection, MultiSourceMerger, NormalizeOutcome, SchemaNormalizer};
use crate::tables::{RowFilter, SourceExtractor, TableSelector, WaitBudget};
use crate::telemetry::{ROWS_DROPPED, ROWS_MERGED, ROWS_PUBLISHED, SOURCES_SKIPPED};
use crate::types::SourceRecords;
use chrono::{DateTime, Utc};
use metrics::counter;
use serde::Serialize;
use tracing::{error, info, info_span, warn, Instrument};

/// A source left out of the merge, and why
#[derive(Debug, Clone, Serialize)]
pub struct SkippedSource {
    pub source_id: String,
    pub reason: String,
}

/// Result of a complete table pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct TableRunReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub sources_total: usize,
    pub sources_used: Vec<String>,
    pub sources_skipped: Vec<SkippedSource>,
    pub rows_merged: usize,
    pub rows_dropped: usize,
    pub rows_published: usize,
    pub compound_columns: Vec<String>,
    pub compound_fallback: bool,
    pub destination: String,
}

/// Normalized output of the collected sources, ready to publish
#[derive(Debug, Clone)]
pub struct TableBuild {
    pub outcome: NormalizeOutcome,
    pub compound: CompoundSelection,
    pub rows_merged: usize,
}

pub struct TablePipeline {
    extractor: SourceExtractor,
    merger: MultiSourceMerger,
    normalizer: SchemaNormalizer,
}

impl TablePipeline {
    pub fn new(extractor: SourceExtractor, merger: MultiSourceMerger, normalizer: SchemaNormalizer) -> Self {
        Self {
            extractor,
            merger,
            normalizer,
        }
    }

    pub fn from_config(config: &TablesConfig) -> Result<Self> {
        let wait = WaitBudget::from_millis(config.wait_budget_ms, config.poll_interval_ms);
        let selector = TableSelector::from_css(&config.selectors, wait)?.with_empty_markers(config.empty_markers.clone());
        Ok(Self::new(
            SourceExtractor::new(selector, RowFilter::default()),
            MultiSourceMerger::new(&config.prop_suffix),
            SchemaNormalizer::new(&config.sentinel),
        ))
    }

    /// Extract every source in order, merge, normalize and replace the destination.
    /// A failing source is skipped; failures after extraction abort before publishing.
    pub async fn run(
        &self,
        sources: &[String],
        fetcher: &dyn SourceFetcher,
        publisher: &dyn Publisher,
    ) -> Result<TableRunReport> {
        let started_at = Utc::now();
        info!("🚀 Starting table pipeline over {} sources", sources.len());

        let mut collected = Vec::new();
        let mut skipped = Vec::new();

        for source_id in sources {
            let span = info_span!("source", source = %source_id);
            match self.extractor.extract(fetcher, source_id).instrument(span).await {
                Ok(records) => collected.push(records),
                Err(e) => {
                    if e.is_source_recoverable() {
                        warn!("Skipping {}: {}", source_id, e);
                    } else {
                        error!("Skipping {} after unexpected error: {}", source_id, e);
                    }
                    skipped.push(SkippedSource {
                        source_id: source_id.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }
        counter!(SOURCES_SKIPPED, "pipeline" => "tables").increment(skipped.len() as u64);

        let sources_used: Vec<String> = collected.iter().map(|s| s.source_id.clone()).collect();
        let build = self.build(collected)?;
        let table = &build.outcome.table;

        publisher.replace(table).await?;
        counter!(ROWS_PUBLISHED, "pipeline" => "tables").increment(table.len() as u64);
        info!("✅ Published {} rows to {}", table.len(), publisher.destination());

        Ok(TableRunReport {
            started_at,
            finished_at: Utc::now(),
            sources_total: sources.len(),
            sources_used,
            sources_skipped: skipped,
            rows_merged: build.rows_merged,
            rows_dropped: build.outcome.dropped,
            rows_published: table.len(),
            compound_columns: build.compound.columns.clone(),
            compound_fallback: build.compound.fallback,
            destination: publisher.destination(),
        })
    }

    /// Merge, locate the compound column and normalize; no I/O
    pub fn build(&self, collected: Vec<SourceRecords>) -> Result<TableBuild> {
        if collected.is_empty() {
            error!("❌ No data scraped from any source");
            return Err(ScraperError::NoSourceData);
        }

        let merged = self.merger.merge(collected);
        let compound = self.merger.select_compound_columns(&merged)?;
        let outcome = self.normalizer.normalize(&merged, &compound);

        counter!(ROWS_MERGED, "pipeline" => "tables").increment(merged.len() as u64);
        counter!(ROWS_DROPPED, "pipeline" => "tables").increment(outcome.dropped as u64);

        Ok(TableBuild {
            outcome,
            compound,
            rows_merged: merged.len(),
        })
    }
}
