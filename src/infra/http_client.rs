use crate::app::ports::SourceFetcher;
use crate::error::{Result, ScraperError};
use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use std::time::Duration;
use tracing::debug;

/// Fetches source pages and the projections API over HTTP
pub struct HttpSourceFetcher {
    client: reqwest::Client,
    user_agent: String,
}

impl HttpSourceFetcher {
    pub fn new(timeout_seconds: u64, user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;
        Ok(Self {
            client,
            user_agent: user_agent.to_string(),
        })
    }
}

#[async_trait]
impl SourceFetcher for HttpSourceFetcher {
    async fn fetch(&self, source_id: &str) -> Result<String> {
        debug!("GET {}", source_id);
        let resp = self
            .client
            .get(source_id)
            .header(USER_AGENT, self.user_agent.as_str())
            .send()
            .await
            .map_err(|e| ScraperError::Fetch {
                source_id: source_id.to_string(),
                message: e.to_string(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ScraperError::Fetch {
                source_id: source_id.to_string(),
                message: format!("HTTP {}", status.as_u16()),
            });
        }

        Ok(resp.text().await?)
    }
}
