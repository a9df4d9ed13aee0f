use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Environment variable error: {0}")]
    Env(#[from] std::env::VarError),

    #[error("Fetch failed for {source_id}: {message}")]
    Fetch { source_id: String, message: String },

    #[error("Source {source_id} reports no content: {notice}")]
    EmptyPage { source_id: String, notice: String },

    #[error("No qualifying table on {source_id} after trying {tried} locator(s)")]
    NoTableFound { source_id: String, tried: usize },

    #[error("No data rows left on {source_id} after filtering")]
    NoDataRows { source_id: String },

    #[error("No source produced any records")]
    NoSourceData,

    #[error("No column usable as the compound player/matchup field")]
    NoCompoundColumn,

    #[error("Publish to {destination} failed: {message}")]
    Publish { destination: String, message: String },
}

impl ScraperError {
    /// Errors that only exclude the current source from the merge.
    pub fn is_source_recoverable(&self) -> bool {
        matches!(
            self,
            ScraperError::Fetch { .. }
                | ScraperError::Http(_)
                | ScraperError::EmptyPage { .. }
                | ScraperError::NoTableFound { .. }
                | ScraperError::NoDataRows { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ScraperError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_level_errors_are_recoverable() {
        let err = ScraperError::NoTableFound { source_id: "a".into(), tried: 3 };
        assert!(err.is_source_recoverable());
        let err = ScraperError::NoDataRows { source_id: "a".into() };
        assert!(err.is_source_recoverable());
    }

    #[test]
    fn test_pipeline_fatal_errors_are_not_recoverable() {
        assert!(!ScraperError::NoCompoundColumn.is_source_recoverable());
        assert!(!ScraperError::NoSourceData.is_source_recoverable());
        let err = ScraperError::Publish { destination: "sheet".into(), message: "denied".into() };
        assert!(!err.is_source_recoverable());
    }
}
