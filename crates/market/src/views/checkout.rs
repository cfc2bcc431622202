//! Checkout page: delivery address, payment method and order summary.

use askama::Template;

use craftify_core::{PaymentMethod, format_inr};

use super::cart::CartLineView;
use super::{Outcome, ViewContext};
use crate::db::CartRepository;
use crate::error::Result;
use crate::models::lines_total;
use crate::router::Route;

/// Notice shown when checking out with nothing in the cart.
pub const EMPTY_CART: &str = "Your cart is empty";

/// A payment method choice.
#[derive(Clone)]
pub struct MethodOption {
    pub value: String,
    pub label: &'static str,
}

/// Checkout page template.
#[derive(Template)]
#[template(path = "checkout.html")]
pub struct CheckoutTemplate {
    pub lines: Vec<CartLineView>,
    pub total: String,
    pub methods: Vec<MethodOption>,
    /// Countdown text while a UPI payment is pending.
    pub countdown: Option<String>,
}

/// Render the checkout page.
///
/// Empty carts are sent back to the cart page.
///
/// # Errors
///
/// Returns `AppError::Render` if the template fails to render.
pub fn render(ctx: &ViewContext<'_>) -> Result<Outcome> {
    let Some(session) = ctx.session else {
        return Ok(Outcome::redirect(Route::Login));
    };

    let detailed = CartRepository::new(ctx.db).detailed(&session.user_id);
    if detailed.is_empty() {
        return Ok(Outcome::redirect_with(Route::Cart, EMPTY_CART));
    }

    let methods = [PaymentMethod::Cod, PaymentMethod::Upi]
        .into_iter()
        .map(|method| MethodOption {
            value: method.to_string(),
            label: method.label(),
        })
        .collect();

    Outcome::page(
        "Checkout",
        &CheckoutTemplate {
            lines: detailed.iter().map(CartLineView::from).collect(),
            total: format_inr(lines_total(&detailed)),
            methods,
            countdown: ctx.ui.countdown.map(|c| c.text()),
        },
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use craftify_core::Role;

    use super::*;
    use crate::timers::Countdown;
    use crate::views::UiState;
    use crate::views::test_support::{body, login_as, seeded_db};

    #[test]
    fn test_empty_cart_redirects() {
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
            Outcome::redirect_with(Route::Cart, EMPTY_CART)
        );
    }

    #[test]
    fn test_summary_and_countdown() {
        let db = seeded_db();
        let (buyer, session) = login_as(&db, "buyer@example.com", Role::User);
        let listing = db
            .listings()
            .into_iter()
            .find(|l| l.price.amount() == 4200)
            .unwrap();
        CartRepository::new(&db).add(&buyer.id, &listing.id);

        let ui = UiState {
            countdown: Some(Countdown::new(7)),
            ..UiState::default()
        };
        let ctx = ViewContext {
            db: &db,
            session: Some(&session),
            ui: &ui,
        };
        let html = body(render(&ctx).unwrap());
        assert!(html.contains("Wood Carving"));
        assert!(html.contains("₹4,200"));
        assert!(html.contains("Cash on Delivery"));
        assert!(html.contains("Open your UPI app to pay… 7s"));
    }
}
