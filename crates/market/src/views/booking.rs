//! Booking history: the acting user's orders, most recent first.

use askama::Template;

use craftify_core::format_inr;

use super::{Outcome, ViewContext};
use crate::db::OrderRepository;
use crate::error::Result;
use crate::models::Order;
use crate::router::Route;

/// An order row.
#[derive(Clone)]
pub struct BookingView {
    pub href: String,
    pub invoice_number: String,
    pub placed_at: String,
    pub item_count: usize,
    pub total: String,
    pub status: &'static str,
    pub thumbnail: String,
}

impl From<&Order> for BookingView {
    fn from(order: &Order) -> Self {
        Self {
            href: Route::invoice(order.id.clone()).fragment(),
            invoice_number: order.invoice_number(),
            placed_at: order.created_at.format("%d/%m/%Y, %H:%M:%S").to_string(),
            item_count: order.items.len(),
            total: format_inr(order.total),
            status: order.status.label(),
            thumbnail: order.thumbnail().to_string(),
        }
    }
}

/// Booking page template.
#[derive(Template)]
#[template(path = "booking.html")]
pub struct BookingTemplate {
    pub orders: Vec<BookingView>,
}

/// Render the booking page.
///
/// # Errors
///
/// Returns `AppError::Render` if the template fails to render.
pub fn render(ctx: &ViewContext<'_>) -> Result<Outcome> {
    let Some(session) = ctx.session else {
        return Ok(Outcome::redirect(Route::Login));
    };

    let orders = OrderRepository::new(ctx.db)
        .for_user(&session.user_id)
        .iter()
        .map(BookingView::from)
        .collect();

    Outcome::page("Bookings", &BookingTemplate { orders })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use craftify_core::Role;

    use super::*;
    use crate::db::CartRepository;
    use crate::models::Address;
    use crate::views::UiState;
    use crate::views::test_support::{body, login_as, seeded_db};

    #[test]
    fn test_empty_state() {
        let db = seeded_db();
        let (_, session) = login_as(&db, "buyer@example.com", Role::User);
        let ui = UiState::default();
        let ctx = ViewContext {
            db: &db,
            session: Some(&session),
            ui: &ui,
        };
        let html = body(render(&ctx).unwrap());
        assert!(html.contains("No bookings yet"));
    }

    #[test]
    fn test_lists_only_own_orders() {
        let db = seeded_db();
        let (buyer, session) = login_as(&db, "buyer@example.com", Role::User);
        let (other, _) = login_as(&db, "other@example.com", Role::User);
        let listing = db.listings().into_iter().next().unwrap();

        let carts = CartRepository::new(&db);
        carts.add(&buyer.id, &listing.id);
        let mine = OrderRepository::new(&db).create(
            &buyer.id,
            carts.detailed(&buyer.id),
            Address::default(),
        );
        carts.add(&other.id, &listing.id);
        let theirs = OrderRepository::new(&db).create(
            &other.id,
            carts.detailed(&other.id),
            Address::default(),
        );

        let ui = UiState::default();
        let ctx = ViewContext {
            db: &db,
            session: Some(&session),
            ui: &ui,
        };
        let html = body(render(&ctx).unwrap());
        assert!(html.contains(&mine.invoice_number()));
        assert!(!html.contains(&theirs.invoice_number()));
        assert!(html.contains("Arriving soon"));
        assert!(html.contains(&format!("#/invoice?id={}", mine.id)));
    }
}
