//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! craftify cart add itm_abc123
//! craftify cart dec itm_abc123
//! craftify cart clear
//! ```

use std::path::PathBuf;

use craftify_core::ListingId;
use craftify_market::app::{Action, App, Screen};

use super::{CliError, act, open_app, show, visit};

/// A change to the cart.
pub enum Change {
    Add(String),
    Increment(String),
    Decrement(String),
    Remove(String),
    Clear,
}

/// Apply a cart change and show the cart.
///
/// Adding happens from the market, like clicking a product card; everything
/// else happens on the cart page.
///
/// # Errors
///
/// Returns `CliError` if the store cannot be opened.
pub fn apply(data_dir: Option<PathBuf>, change: Change) -> Result<(), CliError> {
    let mut app = open_app(data_dir)?;

    let screen = match change {
        Change::Add(id) => {
            visit(&mut app, "#/market");
            act(&mut app, Action::AddToCart(ListingId::new(id)))
        }
        Change::Increment(id) => on_cart(&mut app, Action::IncrementQty(ListingId::new(id))),
        Change::Decrement(id) => on_cart(&mut app, Action::DecrementQty(ListingId::new(id))),
        Change::Remove(id) => on_cart(&mut app, Action::RemoveFromCart(ListingId::new(id))),
        Change::Clear => on_cart(&mut app, Action::ClearCart),
    };
    show(&screen);
    Ok(())
}

fn on_cart(app: &mut App, action: Action) -> Screen {
    visit(app, "#/cart");
    act(app, action)
}
