use crate::app::ports::{Publisher, SourceFetcher};
use crate::config::{FetchConfig, OutputConfig};
use crate::constants::SHEETS_TOKEN_ENV;
use crate::error::Result;
use crate::infra::{CsvFilePublisher, DirSourceFetcher, HttpSourceFetcher, SheetsPublisher, StdoutPublisher};
use tracing::info;

/// Snapshot directory when configured, HTTP otherwise
pub fn fetcher_for(config: &FetchConfig) -> Result<Box<dyn SourceFetcher>> {
    match &config.snapshot_dir {
        Some(dir) => {
            info!("Reading sources from snapshots in {}", dir.display());
            Ok(Box::new(DirSourceFetcher::new(dir)))
        }
        None => Ok(Box::new(HttpSourceFetcher::new(config.timeout_seconds, &config.user_agent)?)),
    }
}

/// Publisher for an output section; `dry_run` always prints to stdout
pub fn publisher_for(output: &OutputConfig, dry_run: bool) -> Result<Box<dyn Publisher>> {
    if dry_run {
        return Ok(Box::new(StdoutPublisher));
    }
    match output {
        OutputConfig::Csv { path } => Ok(Box::new(CsvFilePublisher::new(path))),
        OutputConfig::Sheets {
            spreadsheet_id,
            worksheet,
            clear_range,
        } => {
            let token = std::env::var(SHEETS_TOKEN_ENV)?;
            Ok(Box::new(SheetsPublisher::new(
                spreadsheet_id,
                worksheet,
                clear_range.as_deref(),
                &token,
            )))
        }
        OutputConfig::Stdout => Ok(Box::new(StdoutPublisher)),
    }
}
