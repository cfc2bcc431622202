//! Listing prices in whole Indian rupees.
//!
//! Prices are positive integers; there are no fractional amounts anywhere in
//! the marketplace, so totals are plain `u64` sums and formatting never shows
//! a decimal part.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input is not a whole number.
    #[error("price must be a whole number")]
    NotANumber,
    /// The price is zero.
    #[error("price must be greater than zero")]
    NotPositive,
}

/// A listing price in whole rupees.
///
/// ## Constraints
///
/// - Must be greater than zero when created through [`Price::new`] or
///   [`Price::parse`]. Stored values are trusted as-is on deserialization.
///
/// ## Examples
///
/// ```
/// use craftify_core::Price;
///
/// let price = Price::parse("3500").unwrap();
/// assert_eq!(price.amount(), 3500);
/// assert_eq!(price.to_string(), "₹3,500");
///
/// assert!(Price::parse("0").is_err());
/// assert!(Price::parse("12.5").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    /// Create a price from a whole rupee amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::NotPositive`] if `amount` is zero.
    pub const fn new(amount: u64) -> Result<Self, PriceError> {
        if amount == 0 {
            return Err(PriceError::NotPositive);
        }
        Ok(Self(amount))
    }

    /// Parse a price from user input (surrounding whitespace is ignored).
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a whole number or is not positive.
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let trimmed = s.trim();
        if trimmed.starts_with('-') {
            return Err(PriceError::NotPositive);
        }
        let amount = trimmed
            .parse::<u64>()
            .map_err(|_| PriceError::NotANumber)?;
        Self::new(amount)
    }

    /// The amount in whole rupees.
    #[must_use]
    pub const fn amount(self) -> u64 {
        self.0
    }

    /// Price of `qty` units.
    #[must_use]
    pub fn times(self, qty: u32) -> u64 {
        self.0.saturating_mul(u64::from(qty))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_inr(self.0))
    }
}

impl std::str::FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Format an amount as Indian rupees with Indian digit grouping.
///
/// The last three digits form one group and every two digits before that form
/// another, matching the `en-IN` locale: `₹1,00,000`.
#[must_use]
pub fn format_inr(amount: u64) -> String {
    let digits = amount.to_string();
    let len = digits.len();
    if len <= 3 {
        return format!("₹{digits}");
    }

    let (head, tail) = digits.split_at(len - 3);
    let mut grouped = String::with_capacity(len + len / 2 + 4);
    for (i, c) in head.chars().enumerate() {
        if i > 0 && (head.len() - i) % 2 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("₹{grouped},{tail}")
}
