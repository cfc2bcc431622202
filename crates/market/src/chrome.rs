//! Shell chrome: header, nav, toast and footer around every page.
//!
//! Re-derived from the store after every navigation or action.

use askama::Template;

use craftify_core::Role;

use crate::db::{CartRepository, Db, UserRepository};
use crate::filters;
use crate::models::Session;
use crate::router::Route;

/// Title used when a page has none.
pub const DEFAULT_TITLE: &str = "Craftify — Handcrafted Art Marketplace";

/// Header nav entries, in display order.
const NAV: [(&str, Route); 6] = [
    ("Home", Route::Home),
    ("Products", Route::Market),
    ("Artist", Route::Artist),
    ("Cart", Route::Cart),
    ("Profile", Route::Profile),
    ("Booking", Route::Booking),
];

/// Full page title for a view title.
#[must_use]
pub fn page_title(title: &str) -> String {
    if title.is_empty() {
        DEFAULT_TITLE.to_string()
    } else {
        format!("Craftify — {title}")
    }
}

/// A header nav link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavView {
    pub label: &'static str,
    pub href: String,
    pub current: bool,
    /// Item count shown next to the cart link.
    pub badge: Option<u32>,
}

/// Signed-in user shown in the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthView {
    pub name: String,
    pub role_label: &'static str,
    pub avatar: String,
}

/// Header and footer state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chrome {
    pub auth: Option<AuthView>,
    pub cart_count: u32,
    pub nav: Vec<NavView>,
}

impl Chrome {
    /// Derive the chrome for the active route.
    #[must_use]
    pub fn derive(db: &Db, session: Option<&Session>, route: &Route) -> Self {
        let auth = session.map(|s| auth_view(db, s));
        let cart_count = session.map_or(0, |s| CartRepository::new(db).item_count(&s.user_id));
        let active = route.nav_label();

        let nav = NAV
            .iter()
            .map(|(label, target)| NavView {
                label: *label,
                href: target.fragment(),
                current: active == Some(*label),
                badge: (*target == Route::Cart).then_some(cart_count),
            })
            .collect();

        Self {
            auth,
            cart_count,
            nav,
        }
    }

    /// Label of the highlighted nav entry.
    #[must_use]
    pub fn active_nav(&self) -> Option<&'static str> {
        self.nav.iter().find(|n| n.current).map(|n| n.label)
    }
}

fn auth_view(db: &Db, session: &Session) -> AuthView {
    match UserRepository::new(db).get_by_id(&session.user_id) {
        Some(user) => AuthView {
            name: user.display_name().to_string(),
            role_label: user.role.label(),
            avatar: user.profile.avatar,
        },
        None => AuthView {
            name: Role::User.label().to_string(),
            role_label: session.role.label(),
            avatar: String::new(),
        },
    }
}

/// The page shell.
#[derive(Template)]
#[template(path = "layout.html")]
pub struct LayoutTemplate<'a> {
    pub title: &'a str,
    pub chrome: &'a Chrome,
    pub toast: Option<&'a str>,
    pub content: &'a str,
}
