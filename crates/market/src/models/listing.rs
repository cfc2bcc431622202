//! Listing domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use craftify_core::{ListingId, Price, UserId};

/// Region assigned when none can be derived.
pub const UNKNOWN_REGION: &str = "Unknown";

/// A sellable artwork owned by an artist.
///
/// `region` and `created_at` are optional because records written by early
/// versions lack them; the seed routine backfills regions on startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    /// Unique listing ID.
    pub id: ListingId,
    /// Title.
    pub title: String,
    /// Unit price in whole rupees.
    pub price: Price,
    /// Free-form description.
    #[serde(default)]
    pub desc: String,
    /// Region or city of origin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Image as an embeddable URL; empty when none was uploaded.
    #[serde(default)]
    pub img: String,
    /// Owning artist.
    pub artist_id: UserId,
    /// Creation time.
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

impl Listing {
    /// Non-blank region, if any.
    #[must_use]
    pub fn region(&self) -> Option<&str> {
        self.region
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
    }

    /// Lower-cased `title desc region` haystack used by market search.
    #[must_use]
    pub fn search_text(&self) -> String {
        format!(
            "{} {} {}",
            self.title,
            self.desc,
            self.region.as_deref().unwrap_or("")
        )
        .to_lowercase()
    }
}
