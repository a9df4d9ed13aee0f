use crate::app::ports::{Publisher, SourceFetcher};
use crate::error::{Result, ScraperError};
use crate::types::NormalizedTable;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use tracing::debug;

/// Canned responses per source id. Each fetch pops the next queued response;
/// the last one keeps being served, which lets a table "finish rendering"
/// after a few polls.
#[derive(Default)]
pub struct StaticSourceFetcher {
    responses: Mutex<HashMap<String, VecDeque<String>>>,
    calls: Mutex<HashMap<String, usize>>,
    plain_pages: bool,
}

impl StaticSourceFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Behave like a plain HTTP or snapshot source that is read once
    pub fn without_refresh(mut self) -> Self {
        self.plain_pages = true;
        self
    }

    pub fn with_response(self, source_id: &str, body: &str) -> Self {
        self.push(source_id, body);
        self
    }

    pub fn push(&self, source_id: &str, body: &str) {
        let mut responses = self.responses.lock().unwrap();
        responses
            .entry(source_id.to_string())
            .or_default()
            .push_back(body.to_string());
    }

    /// Number of fetches made for `source_id`
    pub fn calls(&self, source_id: &str) -> usize {
        self.calls.lock().unwrap().get(source_id).copied().unwrap_or(0)
    }
}

#[async_trait]
impl SourceFetcher for StaticSourceFetcher {
    async fn fetch(&self, source_id: &str) -> Result<String> {
        *self.calls.lock().unwrap().entry(source_id.to_string()).or_default() += 1;

        let mut responses = self.responses.lock().unwrap();
        let queue = responses.get_mut(source_id).ok_or_else(|| ScraperError::Fetch {
            source_id: source_id.to_string(),
            message: "no canned response".to_string(),
        })?;

        let body = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        };
        body.ok_or_else(|| ScraperError::Fetch {
            source_id: source_id.to_string(),
            message: "no canned response".to_string(),
        })
    }

    fn refreshes(&self) -> bool {
        !self.plain_pages
    }
}

/// Keeps the last published table in memory
#[derive(Default)]
pub struct InMemoryPublisher {
    current: Mutex<Option<NormalizedTable>>,
    publishes: Mutex<usize>,
    fail_with: Option<String>,
}

impl InMemoryPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// A publisher whose every write fails with `message`
    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::default()
        }
    }

    /// Seed the destination, as if an earlier run had published `table`
    pub fn with_contents(self, table: NormalizedTable) -> Self {
        *self.current.lock().unwrap() = Some(table);
        self
    }

    pub fn contents(&self) -> Option<NormalizedTable> {
        self.current.lock().unwrap().clone()
    }

    pub fn publish_count(&self) -> usize {
        *self.publishes.lock().unwrap()
    }
}

#[async_trait]
impl Publisher for InMemoryPublisher {
    fn destination(&self) -> String {
        "memory".to_string()
    }

    async fn replace(&self, table: &NormalizedTable) -> Result<()> {
        if let Some(message) = &self.fail_with {
            return Err(ScraperError::Publish {
                destination: self.destination(),
                message: message.clone(),
            });
        }
        debug!("Replacing in-memory table with {} rows", table.len());
        *self.current.lock().unwrap() = Some(table.clone());
        *self.publishes.lock().unwrap() += 1;
        Ok(())
    }
}
