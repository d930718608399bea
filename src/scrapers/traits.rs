use crate::error::Result;
use async_trait::async_trait;

/// Source of raw listing markup.
/// The extractor only talks to the network through this, so tests can swap in a spy.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the page body, failing on transport errors or non-success statuses
    async fn fetch(&self, url: &str) -> Result<String>;

    /// Get the name of the fetcher backend
    fn source_name(&self) -> &'static str;
}
