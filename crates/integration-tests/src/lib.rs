//! Scenario tests for Craftify.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p craftify-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `seed_and_storage` - startup seeding, migration and persistence
//! - `market_queries` - search, region filter and sort
//! - `cart_and_checkout` - cart arithmetic, checkout and invoices
//!
//! Every test drives the runtime through [`App`] the way a visitor would,
//! over an in-memory store or a file store in a temporary directory.

use std::sync::Arc;

use secrecy::SecretString;

use craftify_core::{ListingId, PaymentMethod, Role};
use craftify_market::app::{Action, App, CheckoutForm, Event, Screen, SignupForm};
use craftify_market::config::MarketConfig;
use craftify_market::db::Db;
use craftify_market::models::Listing;
use craftify_market::storage::{MemoryStore, Storage};

/// A running app plus a handle on its in-memory backend.
pub struct TestContext {
    pub app: App,
    pub store: Arc<MemoryStore>,
}

impl TestContext {
    /// Start an app over a fresh in-memory store.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let db = Db::new(Storage::new(store.clone()));
        Self {
            app: App::new(db, MarketConfig::default()),
            store,
        }
    }

    /// Navigate to a fragment.
    pub fn visit(&mut self, fragment: &str) -> Screen {
        self.app.handle(Event::Navigate(fragment.to_string()))
    }

    /// Perform an action.
    pub fn act(&mut self, action: Action) -> Screen {
        self.app.handle(Event::Action(action))
    }

    /// Sign up and log in as a new account.
    pub fn sign_up(&mut self, email: &str, role: Role) -> Screen {
        self.visit("#/signup");
        self.act(Action::Signup(SignupForm {
            role,
            email: email.to_string(),
            password: SecretString::from("secret"),
            name: String::new(),
            bio: String::new(),
            avatar: String::new(),
        }))
    }

    /// Seeded listing with the given title.
    ///
    /// # Panics
    ///
    /// Panics if no listing has that title.
    #[must_use]
    pub fn listing(&self, title: &str) -> Listing {
        self.app
            .db()
            .listings()
            .into_iter()
            .find(|l| l.title == title)
            .unwrap_or_else(|| panic!("no listing titled {title}"))
    }

    /// Add a listing to the cart `times` times from the market.
    pub fn add_to_cart(&mut self, id: &ListingId, times: u32) {
        self.visit("#/market");
        for _ in 0..times {
            self.act(Action::AddToCart(id.clone()));
        }
    }

    /// Submit the checkout form with a complete address.
    pub fn checkout(&mut self, method: PaymentMethod, upi_id: &str) -> Screen {
        self.visit("#/checkout");
        self.act(Action::PlaceOrder(address(method, upi_id)))
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// A complete checkout form.
#[must_use]
pub fn address(method: PaymentMethod, upi_id: &str) -> CheckoutForm {
    CheckoutForm {
        full_name: "Asha Rao".to_string(),
        phone: "+91 98765 43210".to_string(),
        street: "12 Artisan Lane".to_string(),
        city: "Pune".to_string(),
        state: "Maharashtra".to_string(),
        zip: "411001".to_string(),
        country: "India".to_string(),
        payment_method: method,
        upi_id: upi_id.to_string(),
    }
}
