//! View handlers.
//!
//! Each view is a pure function of the stored state, the active session and
//! render-local [`UiState`]. A handler either renders its page body or asks
//! the runtime to redirect elsewhere, optionally with a notice. Guards live in
//! the handlers: session-gated views send anonymous visitors to login, and the
//! artist dashboard turns away buyers.

pub mod artist;
pub mod auth;
pub mod booking;
pub mod cart;
pub mod checkout;
pub mod home;
pub mod invoice;
pub mod market;
pub mod profile;

use askama::Template;

use craftify_core::ListingId;

pub use market::{MarketQuery, SortOrder};

use crate::db::Db;
use crate::error::Result;
use crate::models::Session;
use crate::router::Route;
use crate::timers::Countdown;

/// Render-local state that isn't persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    /// Market search, region filter and sort.
    pub market: MarketQuery,
    /// Listing open in the artist edit form.
    pub editing_listing: Option<ListingId>,
    /// Profile page is in edit mode.
    pub editing_profile: bool,
    /// Active home slideshow image.
    pub slide_index: usize,
    /// Running UPI payment countdown.
    pub countdown: Option<Countdown>,
}

impl UiState {
    /// Forget per-view state when navigating away.
    pub fn reset_for_navigation(&mut self) {
        self.market = MarketQuery::default();
        self.editing_listing = None;
        self.editing_profile = false;
        self.countdown = None;
    }
}

/// Everything a view may read.
#[derive(Debug, Clone, Copy)]
pub struct ViewContext<'a> {
    pub db: &'a Db,
    pub session: Option<&'a Session>,
    pub ui: &'a UiState,
}

/// A rendered page body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Short title, shown as `Craftify — {title}`.
    pub title: &'static str,
    pub body: String,
    /// Notice raised while rendering.
    pub notice: Option<String>,
}

/// Result of running a view handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Page(Page),
    Redirect { to: Route, notice: Option<String> },
}

impl Outcome {
    /// Render a template into a page.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Render` if the template fails to render.
    pub fn page(title: &'static str, template: &impl Template) -> Result<Self> {
        Ok(Self::Page(Page {
            title,
            body: template.render()?,
            notice: None,
        }))
    }

    /// Redirect without a notice.
    #[must_use]
    pub const fn redirect(to: Route) -> Self {
        Self::Redirect { to, notice: None }
    }

    /// Redirect and show a notice.
    #[must_use]
    pub fn redirect_with(to: Route, notice: impl Into<String>) -> Self {
        Self::Redirect {
            to,
            notice: Some(notice.into()),
        }
    }

    /// Attach a notice to a rendered page.
    #[must_use]
    pub fn with_notice(self, notice: impl Into<String>) -> Self {
        match self {
            Self::Page(page) => Self::Page(Page {
                notice: Some(notice.into()),
                ..page
            }),
            redirect @ Self::Redirect { .. } => redirect,
        }
    }
}

/// Dispatch a route to its view handler.
///
/// # Errors
///
/// Returns `AppError::Render` if a template fails to render.
pub fn render(route: &Route, ctx: &ViewContext<'_>) -> Result<Outcome> {
    match route {
        Route::Home => home::render(ctx),
        Route::Market => market::render(ctx),
        Route::Login => auth::render_login(),
        Route::Signup => auth::render_signup(),
        Route::Artist => artist::render(ctx),
        Route::Profile => profile::render(ctx),
        Route::Booking => booking::render(ctx),
        Route::Cart => cart::render(ctx),
        Route::Checkout => checkout::render(ctx),
        Route::Invoice { id } => invoice::render(ctx, id.as_ref()),
    }
}

/// Format a timestamp as a short date.
pub(crate) fn format_date(at: chrono::DateTime<chrono::Utc>) -> String {
    at.format("%d/%m/%Y").to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod test_support {
    //! Fixtures shared by the view tests.

    use secrecy::SecretString;

    use craftify_core::{Email, Role};

    use crate::db::{Db, NewUser, UserRepository};
    use crate::models::{Profile, Session, User};

    /// A seeded in-memory store.
    pub fn seeded_db() -> Db {
        let db = Db::in_memory();
        crate::seed::run(&db);
        db
    }

    /// Register a user and return a session for them.
    pub fn login_as(db: &Db, email: &str, role: Role) -> (User, Session) {
        let user = UserRepository::new(db)
            .create(NewUser {
                email: Email::parse(email).unwrap(),
                password: SecretString::from("pass"),
                role,
                profile: Profile {
                    name: "Tester".to_string(),
                    ..Profile::default()
                },
            })
            .unwrap();
        let session = Session {
            user_id: user.id.clone(),
            role,
        };
        (user, session)
    }

    /// Unwrap a rendered page body.
    pub fn body(outcome: super::Outcome) -> String {
        match outcome {
            super::Outcome::Page(page) => page.body,
            super::Outcome::Redirect { to, .. } => panic!("expected a page, got redirect to {to}"),
        }
    }
}
