use crate::app::ports::SourceFetcher;
use crate::error::{Result, ScraperError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Serves saved page snapshots from a directory.
/// `https://host/a/player_points_over_under` is read from
/// `<dir>/player_points_over_under`, `.html` or `.json`, whichever exists first.
pub struct DirSourceFetcher {
    dir: PathBuf,
}

impl DirSourceFetcher {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn candidates(&self, source_id: &str) -> Vec<PathBuf> {
        let trimmed = source_id.trim_end_matches('/');
        let segment = trimmed.rsplit('/').next().unwrap_or(trimmed);
        // Query strings are not part of a file name
        let stem = segment.split('?').next().unwrap_or(segment);
        vec![
            self.dir.join(stem),
            self.dir.join(format!("{stem}.html")),
            self.dir.join(format!("{stem}.json")),
        ]
    }
}

#[async_trait]
impl SourceFetcher for DirSourceFetcher {
    async fn fetch(&self, source_id: &str) -> Result<String> {
        for path in self.candidates(source_id) {
            if path.is_file() {
                debug!("Reading snapshot {}", path.display());
                return Ok(tokio::fs::read_to_string(&path).await?);
            }
        }
        Err(ScraperError::Fetch {
            source_id: source_id.to_string(),
            message: format!("no snapshot in {}", self.dir.display()),
        })
    }
}
