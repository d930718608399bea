//! Structured data (schema.org JSON-LD) strategy.
//!
//! Highest precedence in the cascade. Every `application/ld+json` block is
//! parsed, and each object typed as a rental, lodging, product or place
//! contributes fields. `title`, `description`, `address`, coordinates and
//! `beds` keep the first value found; `image_url` takes the last one.

use serde_json::Value;
use tracing::{debug, warn};

use crate::models::{AmenityFlag, ScrapedListing};
use crate::scrapers::clean::{decode_entities, non_empty, strip_tags};
use crate::scrapers::page::Page;

const LISTING_TYPES: [&str; 4] = ["VacationRental", "Accommodation", "Product", "Place"];
const LODGING_MARKER: &str = "Lodging";

const POOL_KEYWORDS: [&str; 3] = ["pool", "piscine", "swimming_pool"];
const JACUZZI_KEYWORDS: [&str; 3] = ["jacuzzi", "spa", "hot tub"];
const BBQ_KEYWORDS: [&str; 3] = ["bbq", "barbecue", "grill"];

pub fn apply(mut listing: ScrapedListing, page: &Page<'_>) -> ScrapedListing {
    for (idx, block) in page.json_ld_blocks().enumerate() {
        let root: Value = match serde_json::from_str(&block) {
            Ok(root) => root,
            Err(e) => {
                warn!(block = idx, error = %e, "Skipping malformed JSON-LD block");
                continue;
            }
        };

        let entities: Vec<&Value> = match &root {
            Value::Array(items) => items.iter().collect(),
            other => vec![other],
        };

        let mut matched = 0;
        for entity in entities.into_iter().filter(|e| is_listing_entity(e)) {
            merge_entity(&mut listing, entity);
            matched += 1;
        }

        // Some sites put the coordinates on the block root, outside the entity.
        if matched > 0 {
            if listing.lat.is_none() {
                listing.lat = root.get("latitude").and_then(coordinate);
            }
            if listing.lng.is_none() {
                listing.lng = root.get("longitude").and_then(coordinate);
            }
        }

        debug!(block = idx, matched, "Processed JSON-LD block");
    }

    listing
}

/// Exact match on the known vocabulary, or a case-sensitive "Lodging"
/// substring (`LodgingBusiness`, `Lodging`). For a list of types only an
/// exact "Lodging" element counts.
fn is_listing_entity(entity: &Value) -> bool {
    match entity.get("@type") {
        Some(Value::String(kind)) => {
            LISTING_TYPES.contains(&kind.as_str()) || kind.contains(LODGING_MARKER)
        }
        Some(Value::Array(kinds)) => kinds.iter().any(|k| k.as_str() == Some(LODGING_MARKER)),
        _ => false,
    }
}

fn merge_entity(listing: &mut ScrapedListing, entity: &Value) {
    if listing.title.is_none() {
        listing.title = entity
            .get("name")
            .and_then(Value::as_str)
            .and_then(|name| non_empty(&decode_entities(name)));
    }

    if listing.description.is_none() {
        listing.description = entity
            .get("description")
            .and_then(Value::as_str)
            .and_then(|desc| non_empty(&decode_entities(&strip_tags(desc))));
    }

    if let Some(image) = entity.get("image").and_then(image_url) {
        listing.image_url = Some(image);
    }

    if listing.address.is_none() {
        listing.address = entity.get("address").and_then(compose_address);
    }

    if listing.lat.is_none() {
        listing.lat = entity
            .get("geo")
            .and_then(|geo| geo.get("latitude"))
            .and_then(coordinate)
            .or_else(|| entity.get("latitude").and_then(coordinate));
    }
    if listing.lng.is_none() {
        listing.lng = entity
            .get("geo")
            .and_then(|geo| geo.get("longitude"))
            .and_then(coordinate)
            .or_else(|| entity.get("longitude").and_then(coordinate));
    }

    if let Some(Value::Array(features)) = entity.get("amenityFeature") {
        let names: Vec<String> = features
            .iter()
            .filter_map(|feature| feature.get("name").and_then(Value::as_str))
            .map(str::to_lowercase)
            .collect();

        mark_if_listed(&mut listing.has_pool, &names, &POOL_KEYWORDS);
        mark_if_listed(&mut listing.has_jacuzzi, &names, &JACUZZI_KEYWORDS);
        mark_if_listed(&mut listing.has_bbq, &names, &BBQ_KEYWORDS);
    }

    // Occupancy is guest capacity; used as an approximation of the bed count.
    if listing.beds.is_none() {
        listing.beds = entity
            .get("occupancy")
            .and_then(|occupancy| occupancy.get("value"))
            .and_then(leading_integer);
    }
}

/// Only ever raises a flag; a missing keyword leaves it as it was.
fn mark_if_listed(flag: &mut AmenityFlag, names: &[String], keywords: &[&str]) {
    if names
        .iter()
        .any(|name| keywords.iter().any(|kw| name.contains(kw)))
    {
        *flag = AmenityFlag::Present;
    }
}

fn image_url(image: &Value) -> Option<String> {
    match image {
        Value::Array(images) => images.first().and_then(image_url),
        Value::String(url) => non_empty(url),
        Value::Object(_) => image.get("url").and_then(Value::as_str).and_then(non_empty),
        _ => None,
    }
}

/// "street, postal code, locality", skipping absent parts.
fn compose_address(address: &Value) -> Option<String> {
    let parts: Vec<String> = ["streetAddress", "postalCode", "addressLocality"]
        .iter()
        .filter_map(|key| address.get(key).and_then(scalar_text))
        .collect();

    (!parts.is_empty()).then(|| parts.join(", "))
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => non_empty(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn coordinate(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

fn leading_integer(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .filter(|v| v.is_finite() && *v >= 0.0 && *v <= f64::from(u32::MAX))
            .map(|v| v.trunc() as u32),
        Value::String(s) => {
            let digits: String = s
                .trim_start()
                .chars()
                .take_while(|c| c.is_ascii_digit())
                .collect();
            digits.parse().ok()
        }
        _ => None,
    }
}
