use crate::app::ports::Publisher;
use crate::constants::SHEETS_API_BASE;
use crate::error::{Result, ScraperError};
use crate::types::NormalizedTable;
use async_trait::async_trait;
use reqwest::Url;
use serde_json::json;
use tracing::{debug, info};

/// Replaces a worksheet's values through the Sheets REST API.
/// The clear and the write are two calls; nothing else writes the sheet during a run.
pub struct SheetsPublisher {
    client: reqwest::Client,
    base_url: String,
    spreadsheet_id: String,
    worksheet: String,
    clear_range: Option<String>,
    access_token: String,
}

impl SheetsPublisher {
    pub fn new(spreadsheet_id: &str, worksheet: &str, clear_range: Option<&str>, access_token: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: SHEETS_API_BASE.to_string(),
            spreadsheet_id: spreadsheet_id.to_string(),
            worksheet: worksheet.to_string(),
            clear_range: clear_range.map(|s| s.to_string()),
            access_token: access_token.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// `'Sheet Name'!A1:G`, or the whole sheet when no cell range is given
    fn a1_range(&self, cells: Option<&str>) -> String {
        let sheet = format!("'{}'", self.worksheet.replace('\'', "''"));
        match cells {
            Some(cells) => format!("{}!{}", sheet, cells),
            None => sheet,
        }
    }

    fn values_url(&self, range_segment: &str) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ScraperError::Config(format!("Invalid Sheets base URL '{}': {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| ScraperError::Config(format!("Sheets base URL cannot hold a path: {}", self.base_url)))?
            .extend(["v4", "spreadsheets", self.spreadsheet_id.as_str(), "values", range_segment]);
        Ok(url)
    }

    fn publish_error(&self, message: String) -> ScraperError {
        ScraperError::Publish {
            destination: self.destination(),
            message,
        }
    }

    async fn send(&self, request: reqwest::RequestBuilder, step: &str) -> Result<()> {
        let resp = request
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| self.publish_error(format!("{} request failed: {}", step, e)))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(self.publish_error(format!("{} returned HTTP {}: {}", step, status.as_u16(), body)));
        }
        Ok(())
    }
}

#[async_trait]
impl Publisher for SheetsPublisher {
    fn destination(&self) -> String {
        format!("sheet {}/{}", self.spreadsheet_id, self.worksheet)
    }

    async fn replace(&self, table: &NormalizedTable) -> Result<()> {
        let clear_range = self.a1_range(self.clear_range.as_deref());
        let clear_url = self.values_url(&format!("{}:clear", clear_range))?;
        debug!("Clearing {}", clear_range);
        self.send(self.client.post(clear_url).json(&json!({})), "clear").await?;

        let write_range = self.a1_range(Some("A1"));
        let mut write_url = self.values_url(&write_range)?;
        write_url.query_pairs_mut().append_pair("valueInputOption", "RAW");

        let values: Vec<&Vec<String>> = std::iter::once(&table.header).chain(table.rows.iter()).collect();
        let body = json!({
            "range": write_range,
            "majorDimension": "ROWS",
            "values": values,
        });
        self.send(self.client.put(write_url).json(&body), "write").await?;

        info!("Uploaded {} rows to {}", table.len(), self.destination());
        Ok(())
    }
}
