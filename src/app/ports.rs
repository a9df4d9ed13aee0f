use crate::error::Result;
use crate::types::NormalizedTable;
use async_trait::async_trait;

/// Read-only access to source content: rendered page HTML for table sources,
/// raw JSON text for the projections API. Session handling lives behind it.
#[async_trait]
pub trait SourceFetcher: Send + Sync {
    async fn fetch(&self, source_id: &str) -> Result<String>;

    /// Whether fetching the same source again can return a later rendering
    /// of it. Only such fetchers are polled while a table renders.
    fn refreshes(&self) -> bool {
        false
    }
}

/// Destination sink. `replace` clears the destination and writes the header
/// followed by every row; it is never additive.
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Human-readable name of the destination, for logs and errors
    fn destination(&self) -> String;

    async fn replace(&self, table: &NormalizedTable) -> Result<()>;
}
