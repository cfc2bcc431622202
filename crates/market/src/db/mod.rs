//! Domain store over the key-value storage adapter.
//!
//! # Keys
//!
//! | Key | Value |
//! |---|---|
//! | `craftify.users` | sequence of [`User`] |
//! | `craftify.session` | single [`Session`] or `null` |
//! | `craftify.listings` | sequence of [`Listing`], newest first |
//! | `craftify.carts` | mapping user ID -> sequence of [`CartRow`](crate::models::CartRow) |
//! | `craftify.orders` | sequence of [`Order`], most recent first |
//! | `craftify.version` | data version tag, currently `"2"` |
//!
//! Every setter overwrites the whole entity. Read-modify-write sequences live
//! in the repositories ([`UserRepository`], [`ListingRepository`],
//! [`CartRepository`], [`OrderRepository`]); nothing is locked, so callers
//! must re-read before each mutation.

pub mod carts;
pub mod listings;
pub mod orders;
pub mod users;

pub use carts::CartRepository;
pub use listings::{ListingDraft, ListingRepository};
pub use orders::OrderRepository;
pub use users::{NewUser, UserRepository};

use crate::models::{Carts, Listing, Order, Session, User};
use crate::storage::Storage;

/// Fixed storage keys.
pub mod keys {
    /// Registered users.
    pub const USERS: &str = "craftify.users";
    /// Active session.
    pub const SESSION: &str = "craftify.session";
    /// Published listings.
    pub const LISTINGS: &str = "craftify.listings";
    /// Carts by user.
    pub const CARTS: &str = "craftify.carts";
    /// Placed orders.
    pub const ORDERS: &str = "craftify.orders";
    /// Data version marker.
    pub const VERSION: &str = "craftify.version";
}

/// Version reported when no marker has been written yet.
pub const INITIAL_VERSION: &str = "1";

/// Typed accessors for every stored entity.
///
/// Cheaply cloneable; clones share the same storage backend.
#[derive(Debug, Clone)]
pub struct Db {
    storage: Storage,
}

impl Db {
    /// Create a domain store over a storage adapter.
    #[must_use]
    pub const fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// Create a domain store over a fresh in-memory backend.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Storage::in_memory())
    }

    /// All registered users.
    #[must_use]
    pub fn users(&self) -> Vec<User> {
        self.storage.read_seq(keys::USERS)
    }

    /// Replace all users.
    pub fn set_users(&self, users: &[User]) {
        self.storage.write(keys::USERS, users);
    }

    /// The active session, if any.
    #[must_use]
    pub fn session(&self) -> Option<Session> {
        self.storage.read(keys::SESSION, None)
    }

    /// Replace the active session (`None` logs out).
    pub fn set_session(&self, session: Option<&Session>) {
        self.storage.write(keys::SESSION, &session);
    }

    /// All listings, newest first.
    #[must_use]
    pub fn listings(&self) -> Vec<Listing> {
        self.storage.read_seq(keys::LISTINGS)
    }

    /// Number of stored listing records, including ones that fail to parse.
    #[must_use]
    pub fn stored_listing_count(&self) -> usize {
        self.storage.stored_len(keys::LISTINGS)
    }

    /// Replace all listings.
    pub fn set_listings(&self, listings: &[Listing]) {
        self.storage.write(keys::LISTINGS, listings);
    }

    /// Every user's cart.
    #[must_use]
    pub fn carts(&self) -> Carts {
        self.storage.read(keys::CARTS, Carts::new())
    }

    /// Replace all carts.
    pub fn set_carts(&self, carts: &Carts) {
        self.storage.write(keys::CARTS, carts);
    }

    /// All orders, most recent first.
    #[must_use]
    pub fn orders(&self) -> Vec<Order> {
        self.storage.read_seq(keys::ORDERS)
    }

    /// Replace all orders.
    pub fn set_orders(&self, orders: &[Order]) {
        self.storage.write(keys::ORDERS, orders);
    }

    /// Stored data version (`"1"` when unset).
    #[must_use]
    pub fn version(&self) -> String {
        self.storage.read(keys::VERSION, INITIAL_VERSION.to_string())
    }

    /// Replace the data version marker.
    pub fn set_version(&self, version: &str) {
        self.storage.write(keys::VERSION, version);
    }
}
