use crate::app::ports::SourceFetcher;
use crate::error::{Result, ScraperError};
use crate::tables::{ColumnResolver, RowFilter, TableSelector};
use crate::types::{ColumnSpec, ExtractedRecord, RawTableBlock, SourceRecords};
use tracing::{debug, info, instrument, warn};

/// Runs one source page through table selection, column naming and row filtering
pub struct SourceExtractor {
    selector: TableSelector,
    row_filter: RowFilter,
}

impl SourceExtractor {
    pub fn new(selector: TableSelector, row_filter: RowFilter) -> Self {
        Self { selector, row_filter }
    }

    #[instrument(skip(self, fetcher))]
    pub async fn extract(&self, fetcher: &dyn SourceFetcher, source_id: &str) -> Result<SourceRecords> {
        let block = self.selector.select(fetcher, source_id).await?;
        self.records_from_block(&block, source_id)
    }

    /// Everything after the table has been located; no I/O
    pub fn records_from_block(&self, block: &RawTableBlock, source_id: &str) -> Result<SourceRecords> {
        let columns = ColumnResolver::resolve(&block.header, block.width());
        debug!("Columns scraped: {:?}", columns.names);

        let key_column = columns
            .first()
            .ok_or_else(|| ScraperError::NoDataRows {
                source_id: source_id.to_string(),
            })?
            .to_string();

        let records = to_records(block, &columns, source_id);
        let total = records.len();
        let records = self.row_filter.apply(records, &key_column);

        if records.is_empty() {
            warn!("No valid data rows after filtering on {} ({} rows read)", source_id, total);
            return Err(ScraperError::NoDataRows {
                source_id: source_id.to_string(),
            });
        }

        info!("Scraped {} rows from {} ({} filtered out)", records.len(), source_id, total - records.len());
        Ok(SourceRecords {
            source_id: source_id.to_string(),
            columns,
            records,
        })
    }
}

/// Short rows leave their trailing columns missing
fn to_records(block: &RawTableBlock, columns: &ColumnSpec, source_id: &str) -> Vec<ExtractedRecord> {
    block
        .rows
        .iter()
        .map(|row| {
            let mut record = ExtractedRecord::new(source_id);
            for (name, cell) in columns.names.iter().zip(row.iter()) {
                record.set(name, cell.clone());
            }
            record
        })
        .collect()
}
