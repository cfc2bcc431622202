//! Status enums for various entities.

use serde::{Deserialize, Serialize};

/// Account role chosen at signup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Buys art.
    #[default]
    User,
    /// Sells art and owns listings.
    Artist,
}

impl Role {
    /// Human-readable label shown in the header.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Artist => "Artist",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Artist => write!(f, "artist"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "artist" => Ok(Self::Artist),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}

/// Order delivery status.
///
/// Orders are immutable once placed, so every order carries the status it was
/// created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    #[default]
    #[serde(rename = "Arriving soon")]
    ArrivingSoon,
}

impl OrderStatus {
    /// Display label, identical to the stored value.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ArrivingSoon => "Arriving soon",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Checkout payment method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Cash on delivery: the order is placed immediately.
    #[default]
    Cod,
    /// UPI: requires an identifier and a confirmation countdown.
    Upi,
}

impl PaymentMethod {
    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cod => "Cash on Delivery",
            Self::Upi => "UPI",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cod => write!(f, "cod"),
            Self::Upi => write!(f, "upi"),
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cod" => Ok(Self::Cod),
            "upi" => Ok(Self::Upi),
            _ => Err(format!("invalid payment method: {s}")),
        }
    }
}
