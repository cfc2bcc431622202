//! Fragment router.
//!
//! Maps a location fragment (`#/market`, `#/invoice?id=ord_x`, ...) to a
//! [`Route`]. Exact paths dispatch to their view, `#/invoice` matches by
//! prefix and carries an optional order ID from its query string, an empty
//! fragment is home, and anything else falls back to the market.
//!
//! Access control is not decided here; view handlers redirect on their own.

use url::form_urlencoded;

use craftify_core::OrderId;

/// A navigable view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Route {
    #[default]
    Home,
    Market,
    Login,
    Signup,
    Artist,
    Profile,
    Booking,
    Cart,
    Checkout,
    /// Invoice for a specific order, or the most recent one.
    Invoice { id: Option<OrderId> },
}

impl Route {
    /// Resolve a fragment. The leading `#` is optional.
    #[must_use]
    pub fn parse(fragment: &str) -> Self {
        let fragment = fragment.trim();
        let fragment = fragment.strip_prefix('#').unwrap_or(fragment);

        match fragment {
            "" | "/" => Self::Home,
            "/market" => Self::Market,
            "/login" => Self::Login,
            "/signup" => Self::Signup,
            "/artist" => Self::Artist,
            "/profile" => Self::Profile,
            "/booking" => Self::Booking,
            "/cart" => Self::Cart,
            "/checkout" => Self::Checkout,
            other if other.starts_with("/invoice") => Self::Invoice {
                id: invoice_id(other),
            },
            other => {
                tracing::debug!(fragment = other, "Unknown fragment, showing market");
                Self::Market
            }
        }
    }

    /// The canonical fragment for this route.
    #[must_use]
    pub fn fragment(&self) -> String {
        match self {
            Self::Home => "#/".to_string(),
            Self::Market => "#/market".to_string(),
            Self::Login => "#/login".to_string(),
            Self::Signup => "#/signup".to_string(),
            Self::Artist => "#/artist".to_string(),
            Self::Profile => "#/profile".to_string(),
            Self::Booking => "#/booking".to_string(),
            Self::Cart => "#/cart".to_string(),
            Self::Checkout => "#/checkout".to_string(),
            Self::Invoice { id: None } => "#/invoice".to_string(),
            Self::Invoice { id: Some(id) } => {
                let query = form_urlencoded::Serializer::new(String::new())
                    .append_pair("id", id.as_str())
                    .finish();
                format!("#/invoice?{query}")
            }
        }
    }

    /// Invoice route for an order.
    #[must_use]
    pub const fn invoice(id: OrderId) -> Self {
        Self::Invoice { id: Some(id) }
    }

    /// The header nav entry highlighted while this route is active.
    #[must_use]
    pub const fn nav_label(&self) -> Option<&'static str> {
        match self {
            Self::Home => Some("Home"),
            Self::Market => Some("Products"),
            Self::Artist => Some("Artist"),
            Self::Cart | Self::Checkout => Some("Cart"),
            Self::Profile => Some("Profile"),
            Self::Booking => Some("Booking"),
            Self::Login | Self::Signup | Self::Invoice { .. } => None,
        }
    }

    /// Whether the view requires a session.
    #[must_use]
    pub const fn requires_session(&self) -> bool {
        matches!(
            self,
            Self::Artist | Self::Profile | Self::Booking | Self::Cart | Self::Checkout
        )
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.fragment())
    }
}

/// Extract a non-empty `id` parameter from `/invoice?...`.
fn invoice_id(path: &str) -> Option<OrderId> {
    let (_, query) = path.split_once('?')?;
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "id")
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(OrderId::from)
}
