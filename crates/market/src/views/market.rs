//! Market (product listing) page.
//!
//! Filtering and sorting are recomputed from the stored listings on every
//! render; the query itself is render-local state.

use std::str::FromStr;

use askama::Template;

use super::{Outcome, ViewContext};
use crate::error::{AppError, Result};
use crate::models::Listing;

/// Regions offered in the filter drop-down.
pub const REGION_OPTIONS: [&str; 4] = ["Bihar", "Jaipur", "Uttar Pradesh", "West Bengal"];

/// Listing sort order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Newest first; listings without a creation time last.
    #[default]
    Recent,
    PriceAsc,
    PriceDesc,
}

impl SortOrder {
    /// Every order, as shown in the drop-down.
    pub const ALL: [Self; 3] = [Self::Recent, Self::PriceAsc, Self::PriceDesc];

    /// Form value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Recent => "recent",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
        }
    }

    /// Drop-down label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Recent => "Sort: Recent",
            Self::PriceAsc => "Price: Low to High",
            Self::PriceDesc => "Price: High to Low",
        }
    }

    /// Sort listings in place. The sort is stable.
    pub fn apply(self, listings: &mut [Listing]) {
        match self {
            Self::Recent => listings.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            Self::PriceAsc => listings.sort_by_key(|l| l.price),
            Self::PriceDesc => listings.sort_by(|a, b| b.price.cmp(&a.price)),
        }
    }
}

impl FromStr for SortOrder {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|order| order.as_str() == s.trim())
            .ok_or_else(|| AppError::validation(format!("Unknown sort order: {s}")))
    }
}

/// Market search, region filter and sort.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarketQuery {
    /// Free-text search.
    pub q: String,
    /// Exact region filter; empty for all regions.
    pub region: String,
    pub sort: SortOrder,
}

impl MarketQuery {
    /// Apply the query to a set of listings.
    ///
    /// The search text is trimmed and lower-cased and matched as a substring
    /// of `title desc region`. The region filter compares case-insensitively.
    #[must_use]
    pub fn apply(&self, listings: Vec<Listing>) -> Vec<Listing> {
        let needle = self.q.trim().to_lowercase();
        let region = self.region.trim();

        let mut items: Vec<Listing> = listings
            .into_iter()
            .filter(|l| needle.is_empty() || l.search_text().contains(&needle))
            .filter(|l| {
                region.is_empty()
                    || l
                        .region
                        .as_deref()
                        .unwrap_or_default()
                        .eq_ignore_ascii_case(region)
            })
            .collect();
        self.sort.apply(&mut items);
        items
    }
}

/// A drop-down option.
#[derive(Clone)]
pub struct OptionView {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// A product card.
#[derive(Clone)]
pub struct CardView {
    pub id: String,
    pub title: String,
    pub desc: String,
    pub price: String,
    pub img: String,
    pub region: Option<String>,
}

impl From<&Listing> for CardView {
    fn from(listing: &Listing) -> Self {
        Self {
            id: listing.id.to_string(),
            title: listing.title.clone(),
            desc: listing.desc.clone(),
            price: listing.price.to_string(),
            img: listing.img.clone(),
            region: listing.region().map(str::to_string),
        }
    }
}

/// Market page template.
#[derive(Template)]
#[template(path = "market.html")]
pub struct MarketTemplate {
    pub q: String,
    pub regions: Vec<OptionView>,
    pub sorts: Vec<OptionView>,
    pub cards: Vec<CardView>,
}

/// Render the market page.
///
/// # Errors
///
/// Returns `AppError::Render` if the template fails to render.
pub fn render(ctx: &ViewContext<'_>) -> Result<Outcome> {
    let query = &ctx.ui.market;
    let cards = query
        .apply(ctx.db.listings())
        .iter()
        .map(CardView::from)
        .collect();

    let regions = std::iter::once(("", "All regions"))
        .chain(REGION_OPTIONS.iter().map(|r| (*r, *r)))
        .map(|(value, label)| OptionView {
            value: value.to_string(),
            label: label.to_string(),
            selected: query.region.eq_ignore_ascii_case(value),
        })
        .collect();

    let sorts = SortOrder::ALL
        .iter()
        .map(|order| OptionView {
            value: order.as_str().to_string(),
            label: order.label().to_string(),
            selected: *order == query.sort,
        })
        .collect();

    Outcome::page(
        "Market",
        &MarketTemplate {
            q: query.q.clone(),
            regions,
            sorts,
            cards,
        },
    )
}
