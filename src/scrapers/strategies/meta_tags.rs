//! Open Graph / `<meta>` fallback for title, description and image.

use crate::models::ScrapedListing;
use crate::scrapers::page::Page;

pub fn apply(mut listing: ScrapedListing, page: &Page<'_>) -> ScrapedListing {
    if listing.title.is_none() {
        listing.title = page
            .meta_property("og:title")
            .or_else(|| page.title_text());
    }
    if listing.description.is_none() {
        listing.description = page
            .meta_property("og:description")
            .or_else(|| page.meta_name("description"));
    }
    if listing.image_url.is_none() {
        listing.image_url = page.meta_property("og:image");
    }
    listing
}
