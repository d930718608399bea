//! Best-effort metadata extraction for vacation rental listing pages.
//!
//! Fetch a listing URL, then recover title, description, image, price,
//! address, coordinates, bedroom/bed counts and amenity flags from JSON-LD,
//! Open Graph tags and the page text, in that order of precedence.

pub mod error;
pub mod models;
pub mod scrapers;

pub use error::ExtractionError;
pub use models::{AmenityFlag, ExtractResponse, ScrapedListing};
pub use scrapers::{extract_from_html, Extractor, ExtractorConfig, HttpFetcher, PageFetcher};
