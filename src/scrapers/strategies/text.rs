//! Keyword and regex inference over free text.
//!
//! Amenities and bedrooms are read from the title and description found so
//! far. The price is read from the raw markup. This is the last strategy, so
//! every amenity flag leaves it as `Present` or `Absent`.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::models::{AmenityFlag, ScrapedListing};
use crate::scrapers::page::Page;

static POOL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)piscine|pool|bassin").expect("POOL_RE should compile"));
static JACUZZI_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)jacuzzi|spa|bain à remous").expect("JACUZZI_RE should compile")
});
static BBQ_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)barbecue|bbq|plancha").expect("BBQ_RE should compile"));
static PRICE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+[\s.,]?[0-9]*)\s?€").expect("PRICE_RE should compile"));
static BEDROOMS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)([0-9]+)\s?chambre").expect("BEDROOMS_RE should compile"));

/// Exclusive bounds; rejects things like a year or a 5-digit sale price.
pub const MIN_PRICE: f64 = 50.0;
pub const MAX_PRICE: f64 = 10_000.0;

pub fn apply(mut listing: ScrapedListing, page: &Page<'_>) -> ScrapedListing {
    let text = search_text(&listing);

    resolve(&mut listing.has_pool, &POOL_RE, &text);
    resolve(&mut listing.has_jacuzzi, &JACUZZI_RE, &text);
    resolve(&mut listing.has_bbq, &BBQ_RE, &text);

    if listing.price.is_none() {
        listing.price = price_from_markup(page.raw());
    }

    if listing.bedrooms.is_none() {
        listing.bedrooms = BEDROOMS_RE
            .captures(&text)
            .and_then(|caps| caps[1].parse().ok());
    }

    listing
}

/// Lower-cased "title description", with missing parts as empty strings.
fn search_text(listing: &ScrapedListing) -> String {
    format!(
        "{} {}",
        listing.title.as_deref().unwrap_or_default(),
        listing.description.as_deref().unwrap_or_default()
    )
    .to_lowercase()
}

fn resolve(flag: &mut AmenityFlag, pattern: &Regex, text: &str) {
    if flag.is_unknown() {
        *flag = AmenityFlag::from(pattern.is_match(text));
    }
}

/// Only the first euro amount on the page is considered.
fn price_from_markup(html: &str) -> Option<f64> {
    let caps = PRICE_RE.captures(html)?;
    let number: String = caps[1].chars().filter(|c| !c.is_whitespace()).collect();
    let price: f64 = number.replacen(',', ".", 1).parse().ok()?;

    if price > MIN_PRICE && price < MAX_PRICE {
        Some(price)
    } else {
        debug!(price, "Discarding implausible price");
        None
    }
}
