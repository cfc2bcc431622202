//! Listing repository.
//!
//! Mutations are scoped to the owning artist: an artist can only edit or
//! delete listings whose `artist_id` is their own user ID.

use chrono::Utc;

use craftify_core::{ListingId, Price, UserId};

use super::Db;
use crate::error::{AppError, Result};
use crate::models::Listing;

/// Validated listing fields from the publish or edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingDraft {
    pub title: String,
    pub price: Price,
    pub desc: String,
}

impl ListingDraft {
    /// Validate raw form input.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` for a blank title and
    /// `AppError::InvalidPrice` for a price that isn't a positive whole number.
    pub fn parse(title: &str, price: &str, desc: &str) -> Result<Self> {
        let title = title.trim();
        if title.is_empty() {
            return Err(AppError::validation("Title is required"));
        }
        Ok(Self {
            title: title.to_owned(),
            price: Price::parse(price)?,
            desc: desc.to_owned(),
        })
    }
}

/// Repository for listing operations.
pub struct ListingRepository<'a> {
    db: &'a Db,
}

impl<'a> ListingRepository<'a> {
    /// Create a new listing repository.
    #[must_use]
    pub const fn new(db: &'a Db) -> Self {
        Self { db }
    }

    /// Get a listing by ID.
    #[must_use]
    pub fn get(&self, id: &ListingId) -> Option<Listing> {
        self.db.listings().into_iter().find(|l| &l.id == id)
    }

    /// Listings owned by an artist, newest first.
    #[must_use]
    pub fn owned_by(&self, artist_id: &UserId) -> Vec<Listing> {
        self.db
            .listings()
            .into_iter()
            .filter(|l| &l.artist_id == artist_id)
            .collect()
    }

    /// Publish a new listing at the front of the catalogue.
    ///
    /// A blank region is stored as absent; the region normalization pass fills
    /// it on the next start.
    pub fn publish(
        &self,
        artist_id: &UserId,
        draft: ListingDraft,
        region: &str,
        img: String,
    ) -> Listing {
        let region = region.trim();
        let listing = Listing {
            id: ListingId::generate(),
            title: draft.title,
            price: draft.price,
            desc: draft.desc,
            region: (!region.is_empty()).then(|| region.to_owned()),
            img,
            artist_id: artist_id.clone(),
            created_at: Some(Utc::now()),
        };

        let mut listings = self.db.listings();
        listings.insert(0, listing.clone());
        self.db.set_listings(&listings);

        tracing::info!(listing_id = %listing.id, artist_id = %artist_id, "Listing published");
        listing
    }

    /// Update title, price and description of an owned listing.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the listing doesn't exist and
    /// `AppError::Forbidden` if it belongs to another artist.
    pub fn update(&self, artist_id: &UserId, id: &ListingId, draft: ListingDraft) -> Result<Listing> {
        let mut listings = self.db.listings();
        let listing = listings
            .iter_mut()
            .find(|l| &l.id == id)
            .ok_or_else(|| AppError::NotFound("Listing is no longer available".to_string()))?;
        if &listing.artist_id != artist_id {
            return Err(AppError::Forbidden(
                "You can only edit your own listings".to_string(),
            ));
        }

        listing.title = draft.title;
        listing.price = draft.price;
        listing.desc = draft.desc;
        let updated = listing.clone();
        self.db.set_listings(&listings);
        Ok(updated)
    }

    /// Delete an owned listing.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the listing doesn't exist and
    /// `AppError::Forbidden` if it belongs to another artist.
    pub fn delete(&self, artist_id: &UserId, id: &ListingId) -> Result<()> {
        let mut listings = self.db.listings();
        let Some(pos) = listings.iter().position(|l| &l.id == id) else {
            return Err(AppError::NotFound(
                "Listing is no longer available".to_string(),
            ));
        };
        if listings.get(pos).is_some_and(|l| &l.artist_id != artist_id) {
            return Err(AppError::Forbidden(
                "You can only delete your own listings".to_string(),
            ));
        }

        listings.remove(pos);
        self.db.set_listings(&listings);
        tracing::info!(listing_id = %id, "Listing removed");
        Ok(())
    }
}
