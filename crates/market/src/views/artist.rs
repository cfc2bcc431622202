//! Artist dashboard.
//!
//! Shows the artist's profile form, the publish form and the artist's own
//! listings. At most one listing is open in the edit form at a time.

use askama::Template;

use craftify_core::Role;

use super::{Outcome, ViewContext};
use crate::db::{ListingRepository, UserRepository};
use crate::error::Result;
use crate::models::Listing;
use crate::router::Route;

/// Notice shown when a buyer opens the dashboard.
pub const ARTIST_ONLY: &str = "Artist area only";

/// One of the artist's listings.
#[derive(Clone)]
pub struct OwnListingView {
    pub id: String,
    pub title: String,
    pub price: String,
    pub price_value: u64,
    pub desc: String,
    pub img: String,
    pub editing: bool,
}

impl OwnListingView {
    fn new(listing: &Listing, editing: bool) -> Self {
        Self {
            id: listing.id.to_string(),
            title: listing.title.clone(),
            price: listing.price.to_string(),
            price_value: listing.price.amount(),
            desc: listing.desc.clone(),
            img: listing.img.clone(),
            editing,
        }
    }
}

/// Artist dashboard template.
#[derive(Template)]
#[template(path = "artist.html")]
pub struct ArtistTemplate {
    pub name: String,
    pub bio: String,
    pub listings: Vec<OwnListingView>,
}

/// Render the artist dashboard.
///
/// # Errors
///
/// Returns `AppError::Render` if the template fails to render.
pub fn render(ctx: &ViewContext<'_>) -> Result<Outcome> {
    let Some(session) = ctx.session else {
        return Ok(Outcome::redirect(Route::Login));
    };
    if session.role != Role::Artist {
        return Ok(Outcome::redirect_with(Route::Market, ARTIST_ONLY));
    }
    let Some(user) = UserRepository::new(ctx.db).get_by_id(&session.user_id) else {
        tracing::warn!(user_id = %session.user_id, "Session user no longer exists");
        return Ok(Outcome::redirect(Route::Login));
    };

    let listings = ListingRepository::new(ctx.db)
        .owned_by(&session.user_id)
        .iter()
        .map(|l| OwnListingView::new(l, ctx.ui.editing_listing.as_ref() == Some(&l.id)))
        .collect();

    Outcome::page(
        "Artist Dashboard",
        &ArtistTemplate {
            name: user.profile.name,
            bio: user.profile.bio,
            listings,
        },
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::ListingDraft;
    use crate::views::UiState;
    use crate::views::test_support::{body, login_as, seeded_db};

    #[test]
    fn test_anonymous_redirects_to_login() {
        let db = seeded_db();
        let ui = UiState::default();
        let ctx = ViewContext {
            db: &db,
            session: None,
            ui: &ui,
        };
        assert_eq!(render(&ctx).unwrap(), Outcome::redirect(Route::Login));
    }

    #[test]
    fn test_buyer_is_turned_away() {
        let db = seeded_db();
        let (_, session) = login_as(&db, "buyer@example.com", Role::User);
        let ui = UiState::default();
        let ctx = ViewContext {
            db: &db,
            session: Some(&session),
            ui: &ui,
        };
        assert_eq!(
            render(&ctx).unwrap(),
            Outcome::redirect_with(Route::Market, ARTIST_ONLY)
        );
    }

    #[test]
    fn test_shows_only_own_listings() {
        let db = seeded_db();
        let (artist, session) = login_as(&db, "maker@example.com", Role::Artist);
        let mine = ListingRepository::new(&db).publish(
            &artist.id,
            ListingDraft::parse("Brass Lamp", "2200", "Cast brass").unwrap(),
            "",
            String::new(),
        );
        let ui = UiState {
            editing_listing: Some(mine.id.clone()),
            ..UiState::default()
        };
        let ctx = ViewContext {
            db: &db,
            session: Some(&session),
            ui: &ui,
        };

        let html = body(render(&ctx).unwrap());
        assert!(html.contains("Brass Lamp"));
        assert!(!html.contains("Madhubani Paintings"));
        assert!(html.contains(r#"id="edit-form""#));
        assert!(html.contains(r#"value="2200""#));
    }
}
