use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;

/// Amenity knowledge for a listing.
///
/// `Unknown` means no source has said anything yet. The text inference pass
/// resolves every `Unknown` into `Present` or `Absent`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum AmenityFlag {
    #[default]
    Unknown,
    Present,
    Absent,
}

impl AmenityFlag {
    pub fn is_unknown(&self) -> bool {
        matches!(self, AmenityFlag::Unknown)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AmenityFlag::Unknown => None,
            AmenityFlag::Present => Some(true),
            AmenityFlag::Absent => Some(false),
        }
    }
}

impl From<bool> for AmenityFlag {
    fn from(present: bool) -> Self {
        if present {
            AmenityFlag::Present
        } else {
            AmenityFlag::Absent
        }
    }
}

impl From<Option<bool>> for AmenityFlag {
    fn from(value: Option<bool>) -> Self {
        value.map_or(AmenityFlag::Unknown, AmenityFlag::from)
    }
}

impl From<AmenityFlag> for Option<bool> {
    fn from(flag: AmenityFlag) -> Self {
        flag.as_bool()
    }
}

/// Partial listing metadata recovered from a rental page.
///
/// Every field is optional: no single page is expected to carry all of them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrapedListing {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beds: Option<u32>,
    #[serde(default, skip_serializing_if = "AmenityFlag::is_unknown")]
    pub has_pool: AmenityFlag,
    #[serde(default, skip_serializing_if = "AmenityFlag::is_unknown")]
    pub has_jacuzzi: AmenityFlag,
    #[serde(default, skip_serializing_if = "AmenityFlag::is_unknown")]
    pub has_bbq: AmenityFlag,
    /// Free-form equipment notes. The extractor never fills this in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_amenities: Option<String>,
}

impl ScrapedListing {
    /// True when nothing that identifies the listing was recovered.
    ///
    /// Amenity flags are ignored: the text pass always resolves them, even on
    /// an empty page.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.image_url.is_none()
            && self.price.is_none()
            && self.address.is_none()
            && self.lat.is_none()
            && self.lng.is_none()
            && self.bedrooms.is_none()
            && self.beds.is_none()
            && self.other_amenities.is_none()
    }
}

/// Wire envelope returned to form pre-fill callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ScrapedListing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<Result<ScrapedListing, ExtractionError>> for ExtractResponse {
    fn from(result: Result<ScrapedListing, ExtractionError>) -> Self {
        match result {
            Ok(listing) => Self {
                success: true,
                data: Some(listing),
                error: None,
            },
            Err(err) => Self {
                success: false,
                data: None,
                error: Some(err.to_string()),
            },
        }
    }
}
