//! Cart page.

use askama::Template;

use craftify_core::format_inr;

use super::{Outcome, ViewContext};
use crate::db::CartRepository;
use crate::error::Result;
use crate::models::{OrderLine, lines_total};
use crate::router::Route;

/// A cart row joined with its listing.
#[derive(Clone)]
pub struct CartLineView {
    pub item_id: String,
    pub title: String,
    pub img: String,
    pub price: String,
    pub qty: u32,
    pub line_total: String,
}

impl From<&OrderLine> for CartLineView {
    fn from(line: &OrderLine) -> Self {
        Self {
            item_id: line.item_id.to_string(),
            title: line.item.title.clone(),
            img: line.item.img.clone(),
            price: line.item.price.to_string(),
            qty: line.qty,
            line_total: format_inr(line.line_total()),
        }
    }
}

/// Cart page template.
#[derive(Template)]
#[template(path = "cart.html")]
pub struct CartTemplate {
    pub lines: Vec<CartLineView>,
    pub subtotal: String,
    pub empty: bool,
}

/// Render the cart page.
///
/// # Errors
///
/// Returns `AppError::Render` if the template fails to render.
pub fn render(ctx: &ViewContext<'_>) -> Result<Outcome> {
    let Some(session) = ctx.session else {
        return Ok(Outcome::redirect(Route::Login));
    };

    let detailed = CartRepository::new(ctx.db).detailed(&session.user_id);
    Outcome::page(
        "Cart",
        &CartTemplate {
            lines: detailed.iter().map(CartLineView::from).collect(),
            subtotal: format_inr(lines_total(&detailed)),
            empty: detailed.is_empty(),
        },
    )
}
