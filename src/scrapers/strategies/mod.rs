//! The extraction cascade.
//!
//! Each strategy takes the listing built so far and only fills fields that
//! are still unset, so running them in order gives the precedence
//! JSON-LD > meta tags > free text.

pub mod json_ld;
pub mod meta_tags;
pub mod text;

use crate::models::ScrapedListing;
use crate::scrapers::page::Page;

pub type Strategy = fn(ScrapedListing, &Page<'_>) -> ScrapedListing;

pub const CASCADE: [(&str, Strategy); 3] = [
    ("json-ld", json_ld::apply),
    ("meta-tags", meta_tags::apply),
    ("text", text::apply),
];
