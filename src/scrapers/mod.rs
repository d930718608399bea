pub mod clean;
pub mod extractor;
pub mod http;
pub mod page;
pub mod strategies;
pub mod traits;
pub mod types;

pub use extractor::{extract_from_html, Extractor, MAX_TITLE_CHARS};
pub use http::HttpFetcher;
pub use traits::PageFetcher;
pub use types::ExtractorConfig;
