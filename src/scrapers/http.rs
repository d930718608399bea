use crate::error::{ExtractionError, Result};
use crate::scrapers::traits::PageFetcher;
use crate::scrapers::types::ExtractorConfig;
use async_trait::async_trait;
use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, PRAGMA, USER_AGENT,
};
use reqwest::Client;
use tracing::{debug, warn};

/// Fetches listing pages over HTTP with a browser-like signature.
///
/// Every request carries `Cache-Control: no-cache` so the live page is always
/// observed. No retries.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher with the default browser signature
    pub fn new() -> Result<Self> {
        Self::with_config(&ExtractorConfig::default())
    }

    /// Create a fetcher with a custom request signature and timeout
    pub fn with_config(config: &ExtractorConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, header_value(&config.user_agent)?);
        headers.insert(ACCEPT, header_value(&config.accept)?);
        headers.insert(ACCEPT_LANGUAGE, header_value(&config.accept_language)?);
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| ExtractionError::Client(e.to_string()))?;

        Ok(Self { client })
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| ExtractionError::Client(format!("invalid header value {value:?}: {e}")))
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        debug!(url = %url, "Fetching listing page");

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "HTTP request failed");
            ExtractionError::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "Listing page returned failure status");
            return Err(ExtractionError::Http {
                status: status.as_u16(),
            });
        }

        let html = response
            .text()
            .await
            .map_err(|e| ExtractionError::Network(e.to_string()))?;

        debug!(url = %url, bytes = html.len(), "Downloaded listing page");
        Ok(html)
    }

    fn source_name(&self) -> &'static str {
        "http"
    }
}
