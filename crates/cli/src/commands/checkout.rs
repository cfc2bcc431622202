//! Checkout command.
//!
//! # Usage
//!
//! ```bash
//! craftify checkout --method cod --full-name "Asha Rao" --phone "+91 98765 43210" \
//!     --street "12 Artisan Lane" --city Pune --state Maharashtra --zip 411001 --country India
//!
//! # UPI waits for the payment countdown before placing the order
//! craftify checkout --method upi --upi-id asha@upi ...
//! ```

use std::path::PathBuf;

use craftify_market::app::{Action, CheckoutForm};

use super::{CliError, act, open_app, progress, show, visit};

/// Submit the checkout form.
///
/// With UPI the countdown runs to completion, printing every tick, before
/// the order is placed.
///
/// # Errors
///
/// Returns `CliError` if the store cannot be opened.
pub async fn place_order(data_dir: Option<PathBuf>, form: CheckoutForm) -> Result<(), CliError> {
    let mut app = open_app(data_dir)?;
    visit(&mut app, "#/checkout");

    let mut screen = act(&mut app, Action::PlaceOrder(form));
    if app.payment_pending() {
        if let Some(countdown) = app.ui().countdown {
            progress(&countdown.text());
        }
        screen = app
            .await_payment(|countdown, _| progress(&countdown.text()))
            .await;
    }

    show(&screen);
    Ok(())
}
