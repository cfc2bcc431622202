//! Domain models persisted in the key-value store.
//!
//! Field names serialize in camelCase (`userId`, `artistId`, `createdAt`) and
//! timestamps as epoch milliseconds, so stored documents stay compatible with
//! data written by earlier versions of the marketplace.

pub mod cart;
pub mod listing;
pub mod order;
pub mod session;
pub mod user;

pub use cart::{CartRow, Carts, OrderLine, lines_total};
pub use listing::Listing;
pub use order::{Address, Order};
pub use session::Session;
pub use user::{Profile, User};
