//! Invoice page.
//!
//! Shows the requested order, or the most recent order when no ID was given
//! or the ID is unknown. With no orders at all the visitor is sent to the
//! market.

use askama::Template;

use craftify_core::{OrderId, format_inr};

use super::{Outcome, ViewContext, format_date};
use crate::db::OrderRepository;
use crate::error::Result;
use crate::models::{Order, OrderLine};
use crate::router::Route;

/// Notice shown when there is nothing to invoice.
pub const NO_INVOICE: &str = "No invoice available";

/// Notice shown when the requested invoice is unknown.
pub const INVOICE_NOT_FOUND: &str = "Invoice not found, showing latest order";

/// An invoice line.
#[derive(Clone)]
pub struct InvoiceLineView {
    pub title: String,
    pub img: String,
    pub qty: u32,
    pub line_total: String,
}

impl From<&OrderLine> for InvoiceLineView {
    fn from(line: &OrderLine) -> Self {
        Self {
            title: line.item.title.clone(),
            img: line.item.img.clone(),
            qty: line.qty,
            line_total: format_inr(line.line_total()),
        }
    }
}

/// Invoice page template.
#[derive(Template)]
#[template(path = "invoice.html")]
pub struct InvoiceTemplate {
    pub invoice_number: String,
    pub date: String,
    pub full_name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
    pub phone: String,
    pub payment: String,
    pub status: &'static str,
    pub lines: Vec<InvoiceLineView>,
    pub total: String,
}

impl From<&Order> for InvoiceTemplate {
    fn from(order: &Order) -> Self {
        let address = &order.address;
        let payment = match address.upi_id.as_deref() {
            Some(upi_id) => format!("{} ({upi_id})", address.payment_method.label()),
            None => address.payment_method.label().to_string(),
        };
        Self {
            invoice_number: order.invoice_number(),
            date: format_date(order.created_at),
            full_name: address.full_name.clone(),
            street: address.street.clone(),
            city: address.city.clone(),
            state: address.state.clone(),
            zip: address.zip.clone(),
            country: address.country.clone(),
            phone: address.phone.clone(),
            payment,
            status: order.status.label(),
            lines: order.items.iter().map(InvoiceLineView::from).collect(),
            total: format_inr(order.total),
        }
    }
}

/// Pick the order to show.
///
/// Returns the order and whether a requested ID had to be replaced by the
/// latest order.
#[must_use]
pub fn resolve(repo: &OrderRepository<'_>, id: Option<&OrderId>) -> Option<(Order, bool)> {
    if let Some(id) = id {
        if let Some(order) = repo.get(id) {
            return Some((order, false));
        }
        tracing::warn!(order_id = %id, "Invoice not found, falling back to latest order");
        return repo.latest().map(|order| (order, true));
    }
    repo.latest().map(|order| (order, false))
}

/// Render the invoice page.
///
/// # Errors
///
/// Returns `AppError::Render` if the template fails to render.
pub fn render(ctx: &ViewContext<'_>, id: Option<&OrderId>) -> Result<Outcome> {
    let repo = OrderRepository::new(ctx.db);
    let Some((order, fell_back)) = resolve(&repo, id) else {
        return Ok(Outcome::redirect_with(Route::Market, NO_INVOICE));
    };

    let outcome = Outcome::page("Invoice", &InvoiceTemplate::from(&order))?;
    Ok(if fell_back {
        outcome.with_notice(INVOICE_NOT_FOUND)
    } else {
        outcome
    })
}
