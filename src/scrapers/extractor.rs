use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::{ExtractionError, Result};
use crate::models::{ExtractResponse, ScrapedListing};
use crate::scrapers::clean::truncate_chars;
use crate::scrapers::http::HttpFetcher;
use crate::scrapers::page::Page;
use crate::scrapers::strategies::CASCADE;
use crate::scrapers::traits::PageFetcher;
use crate::scrapers::types::{ExtractorConfig, DEFAULT_TIMEOUT};

/// Downstream storage limit for listing titles
pub const MAX_TITLE_CHARS: usize = 100;

/// Turns a rental listing URL into a best-effort `ScrapedListing`.
///
/// One fetch per call, no retries, no shared mutable state: safe to call
/// concurrently for different URLs.
pub struct Extractor<F = HttpFetcher> {
    fetcher: F,
    timeout: Duration,
}

impl Extractor<HttpFetcher> {
    /// Create an extractor backed by HTTP with the default browser signature
    pub fn new() -> Result<Self> {
        Self::with_config(ExtractorConfig::default())
    }

    /// Create an extractor backed by HTTP with a custom configuration
    pub fn with_config(config: ExtractorConfig) -> Result<Self> {
        let fetcher = HttpFetcher::with_config(&config)?;
        Ok(Self::with_fetcher(fetcher).with_timeout(config.timeout))
    }
}

impl<F: PageFetcher> Extractor<F> {
    pub fn with_fetcher(fetcher: F) -> Self {
        Self {
            fetcher,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Deadline applied around the fetch, whatever the fetcher does itself
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn extract(&self, url: &str) -> Result<ScrapedListing> {
        self.extract_with_cancellation(url, &CancellationToken::new())
            .await
    }

    /// Like [`Extractor::extract`], but gives up with `Cancelled` as soon as
    /// `cancel` fires.
    pub async fn extract_with_cancellation(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<ScrapedListing> {
        let url = url.trim();
        if url.is_empty() {
            return Err(ExtractionError::InvalidInput("missing URL".to_string()));
        }

        debug!(url = %url, fetcher = self.fetcher.source_name(), "Starting extraction");

        let html = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                warn!(url = %url, "Extraction cancelled");
                return Err(ExtractionError::Cancelled);
            }
            fetched = tokio::time::timeout(self.timeout, self.fetcher.fetch(url)) => match fetched {
                Ok(result) => result?,
                Err(_) => {
                    warn!(url = %url, timeout = ?self.timeout, "Fetch deadline exceeded");
                    return Err(ExtractionError::Network(format!(
                        "request timed out after {:?}",
                        self.timeout
                    )));
                }
            },
        };

        let listing = extract_from_html(&html);
        if listing.is_empty() {
            warn!(url = %url, "No listing metadata recovered");
        } else {
            info!(url = %url, title = ?listing.title, "Extracted listing metadata");
        }
        Ok(listing)
    }

    /// [`Extractor::extract`] folded into the `{ success, data, error }` envelope
    pub async fn respond(&self, url: &str) -> ExtractResponse {
        self.extract(url).await.into()
    }
}

/// Run the strategy cascade over already-fetched markup.
pub fn extract_from_html(html: &str) -> ScrapedListing {
    let page = Page::parse(html);
    let listing = CASCADE
        .iter()
        .fold(ScrapedListing::default(), |listing, (name, strategy)| {
            debug!(strategy = *name, "Applying extraction strategy");
            strategy(listing, &page)
        });
    finalize(listing)
}

fn finalize(mut listing: ScrapedListing) -> ScrapedListing {
    listing.title = listing
        .title
        .map(|title| truncate_chars(&title, MAX_TITLE_CHARS));
    listing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AmenityFlag;

    #[test]
    fn json_ld_title_beats_open_graph() {
        let html = r#"
            <html><head>
                <meta property="og:title" content="OG title">
                <meta property="og:image" content="https://img.example.com/og.jpg">
                <script type="application/ld+json">
                    {"@type": "VacationRental", "name": "Structured title"}
                </script>
            </head></html>
        "#;

        let listing = extract_from_html(html);

        assert_eq!(listing.title.as_deref(), Some("Structured title"));
        assert_eq!(listing.image_url.as_deref(), Some("https://img.example.com/og.jpg"));
    }

    #[test]
    fn long_titles_are_truncated() {
        let name = "é".repeat(150);
        let html = format!(
            r#"<script type="application/ld+json">{{"@type": "Place", "name": "{name}"}}</script>"#
        );

        let title = extract_from_html(&html).title.unwrap();

        assert_eq!(title.chars().count(), MAX_TITLE_CHARS);
        assert_eq!(title, "é".repeat(100));
    }

    #[test]
    fn empty_page_resolves_flags_only() {
        let listing = extract_from_html("");

        assert!(listing.is_empty());
        assert_eq!(listing.has_pool, AmenityFlag::Absent);
        assert_eq!(listing.has_jacuzzi, AmenityFlag::Absent);
        assert_eq!(listing.has_bbq, AmenityFlag::Absent);
    }
}
